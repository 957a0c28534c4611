//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use crate::app::log::OperationLog;
use crate::messages::ui_events::{AuthMode, Focus, InputMode};
use crate::messages::{CallKind, RenderState};
use crate::models::{Account, User};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthForm {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateAccountForm {
    /// Major units, as typed
    pub initial_balance: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferForm {
    /// Account number picked from the loaded accounts; empty when none
    pub from_account_number: String,
    pub to_account_number: String,
    /// Major units, as typed
    pub amount: String,
}

/// Main application state - pure data, no I/O
pub struct AppState {
    // Session
    pub current_user: Option<User>,
    pub accounts: Vec<Account>,
    pub log: OperationLog,
    pub currency_label: String,

    // Forms
    pub auth_mode: AuthMode,
    pub auth_form: AuthForm,
    pub create_form: CreateAccountForm,
    pub transfer_form: TransferForm,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub selected_account: usize,
    pub log_scroll: u16,
    pub show_help: bool,

    // In-flight calls
    pub(crate) next_request_id: u64,
    pub(crate) pending: HashMap<u64, CallKind>,
}

impl Default for AppState {
    fn default() -> Self {
        use crate::constants::DEFAULT_CURRENCY_LABEL;
        Self::new(DEFAULT_CURRENCY_LABEL)
    }
}

impl AppState {
    pub fn new(currency_label: impl Into<String>) -> Self {
        AppState {
            current_user: None,
            accounts: Vec::new(),
            log: OperationLog::new(),
            currency_label: currency_label.into(),
            auth_mode: AuthMode::Login,
            auth_form: AuthForm::default(),
            create_form: CreateAccountForm::default(),
            transfer_form: TransferForm::default(),
            focus: Focus::initial(false),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            selected_account: 0,
            log_scroll: 0,
            show_help: false,
            next_request_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    pub fn logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn current_user_id(&self) -> Option<i64> {
        self.current_user.as_ref().map(|u| u.user_id)
    }

    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of calls still waiting for a response
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn selected_account(&self) -> Option<&Account> {
        self.accounts.get(self.selected_account)
    }

    /// Get the focused input field content
    pub fn current_input(&self) -> &str {
        match self.focus {
            Focus::Username => &self.auth_form.username,
            Focus::Password => &self.auth_form.password,
            Focus::InitialBalance => &self.create_form.initial_balance,
            Focus::TransferTo => &self.transfer_form.to_account_number,
            Focus::TransferAmount => &self.transfer_form.amount,
            Focus::TransferFrom | Focus::Accounts | Focus::Log => "",
        }
    }

    /// Get mutable reference to the focused input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Username => Some(&mut self.auth_form.username),
            Focus::Password => Some(&mut self.auth_form.password),
            Focus::InitialBalance => Some(&mut self.create_form.initial_balance),
            Focus::TransferTo => Some(&mut self.transfer_form.to_account_number),
            Focus::TransferAmount => Some(&mut self.transfer_form.amount),
            Focus::TransferFrom | Focus::Accounts | Focus::Log => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        // Account data is only ever shown alongside a user
        let accounts = if self.logged_in() {
            self.accounts.clone()
        } else {
            Vec::new()
        };
        // Byte offset -> display column
        let cursor_position = self
            .current_input()
            .get(..self.cursor_position)
            .map(|prefix| prefix.chars().count())
            .unwrap_or(0);

        RenderState {
            user: self.current_user.clone(),
            accounts,
            log: self.log.entries().cloned().collect(),
            currency_label: self.currency_label.clone(),
            auth_mode: self.auth_mode,
            username: self.auth_form.username.clone(),
            password_len: self.auth_form.password.chars().count(),
            initial_balance: self.create_form.initial_balance.clone(),
            transfer_from: self.transfer_form.from_account_number.clone(),
            transfer_to: self.transfer_form.to_account_number.clone(),
            transfer_amount: self.transfer_form.amount.clone(),
            focus: self.focus,
            input_mode: self.input_mode,
            cursor_position,
            selected_account: self.selected_account,
            log_scroll: self.log_scroll,
            is_loading: self.is_loading(),
            show_help: self.show_help,
        }
    }
}
