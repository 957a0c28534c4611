//! Command handlers - state transitions for UI events and API responses
//!
//! Transitions never perform I/O. A transition that needs the network returns
//! the `NetworkCommand` to issue, and follow-up calls are only produced while
//! handling the response they depend on.

use crate::app::state::{AuthForm, CreateAccountForm, TransferForm};
use crate::app::AppState;
use crate::constants::UNKNOWN_ERROR_MESSAGE;
use crate::messages::ui_events::{AuthMode, Focus, InputMode};
use crate::messages::{ApiCall, ApiOutcome, ApiPayload, CallKind, NetworkCommand, NetworkResponse};
use crate::models::{Account, CreateAccountRequest, Credentials, TransferRequest, User};
use crate::money::{format_minor_units, parse_major_units};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_field(&mut self) {
        let editing = self.input_mode == InputMode::Editing;
        self.focus_on(self.focus.next(self.logged_in()), editing);
    }

    pub fn prev_field(&mut self) {
        let editing = self.input_mode == InputMode::Editing;
        self.focus_on(self.focus.prev(self.logged_in()), editing);
    }

    fn focus_on(&mut self, focus: Focus, keep_editing: bool) {
        self.focus = focus;
        self.input_mode = if keep_editing && focus.is_text_input() {
            InputMode::Editing
        } else {
            InputMode::Normal
        };
        self.cursor_position = self.current_input().len();
    }

    pub fn select_next(&mut self) {
        match self.focus {
            Focus::Accounts => {
                if !self.accounts.is_empty() {
                    self.selected_account = (self.selected_account + 1).min(self.accounts.len() - 1);
                }
            }
            Focus::TransferFrom => self.cycle_transfer_source(true),
            Focus::Log => self.log_scroll = self.log_scroll.saturating_add(1),
            _ => {}
        }
    }

    pub fn select_prev(&mut self) {
        match self.focus {
            Focus::Accounts => self.selected_account = self.selected_account.saturating_sub(1),
            Focus::TransferFrom => self.cycle_transfer_source(false),
            Focus::Log => self.log_scroll = self.log_scroll.saturating_sub(1),
            _ => {}
        }
    }

    fn cycle_transfer_source(&mut self, forward: bool) {
        if self.accounts.is_empty() {
            self.transfer_form.from_account_number.clear();
            return;
        }

        let len = self.accounts.len();
        let current = self
            .accounts
            .iter()
            .position(|a| a.account_number == self.transfer_form.from_account_number);
        let index = match (current, forward) {
            (None, true) => 0,
            (None, false) => len - 1,
            (Some(i), true) => (i + 1) % len,
            (Some(i), false) => (i + len - 1) % len,
        };
        self.transfer_form.from_account_number = self.accounts[index].account_number.clone();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.focus.is_text_input() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        let inserted = match self.current_input_mut() {
            Some(input) if cursor_pos <= input.len() => {
                input.insert(cursor_pos, c);
                true
            }
            _ => false,
        };
        if inserted {
            self.cursor_position = cursor_pos + c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        let removed_at = self.current_input_mut().and_then(|input| {
            let prev_pos = input.get(..cursor_pos)?.char_indices().last().map(|(i, _)| i)?;
            input.remove(prev_pos);
            Some(prev_pos)
        });
        if let Some(prev_pos) = removed_at {
            self.cursor_position = prev_pos;
        }
    }

    fn clamp_cursor(&mut self) {
        let len = self.current_input().len();
        if self.cursor_position > len {
            self.cursor_position = len;
        }
    }

    // ========================
    // Popups
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Authentication
    // ========================

    /// Switch between sign-in and registration; the form starts over
    pub fn toggle_auth_mode(&mut self) {
        if self.logged_in() {
            return;
        }
        self.auth_mode = self.auth_mode.toggle();
        self.auth_form = AuthForm::default();
        self.cursor_position = 0;
    }

    /// Submit the form that owns the focused field
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        match self.focus {
            Focus::Username | Focus::Password => self.submit_auth(),
            Focus::InitialBalance => self.create_account(),
            Focus::TransferFrom | Focus::TransferTo | Focus::TransferAmount => self.transfer(),
            Focus::Accounts | Focus::Log => None,
        }
    }

    /// Login or Register, depending on the auth mode
    pub fn submit_auth(&mut self) -> Option<NetworkCommand> {
        if self.logged_in() {
            return None;
        }

        let AuthForm { username, password } = &self.auth_form;
        if username.trim().is_empty() || password.is_empty() {
            self.log.error("Username and password are required", None);
            return None;
        }

        let credentials = Credentials::new(username.trim(), password.clone());
        let call = match self.auth_mode {
            AuthMode::Login => ApiCall::Login(credentials),
            AuthMode::Register => ApiCall::Register(credentials),
        };
        Some(self.issue(call))
    }

    /// Forget the session locally. No server call.
    pub fn logout(&mut self) {
        if !self.logged_in() {
            return;
        }
        self.current_user = None;
        self.accounts.clear();
        self.selected_account = 0;
        self.create_form = CreateAccountForm::default();
        self.transfer_form = TransferForm::default();
        self.focus_on(Focus::initial(false), false);
        self.log.success("Signed out.", None);
    }

    fn sign_in(&mut self, user: User) {
        tracing::info!(user_id = user.user_id, username = %user.username, "signed in");
        self.current_user = Some(user);
        self.accounts.clear();
        self.selected_account = 0;
        self.auth_form = AuthForm::default();
        self.create_form = CreateAccountForm::default();
        self.transfer_form = TransferForm::default();
        self.focus_on(Focus::initial(true), false);
    }

    // ========================
    // Accounts
    // ========================

    pub fn load_accounts(&mut self, user_id: i64) -> NetworkCommand {
        self.issue(ApiCall::ListAccounts { user_id })
    }

    fn refresh_accounts(&mut self) -> Option<NetworkCommand> {
        let user_id = self.current_user_id()?;
        Some(self.load_accounts(user_id))
    }

    pub fn create_account(&mut self) -> Option<NetworkCommand> {
        let user_id = self.current_user_id()?;
        let initial_balance = match parse_major_units(&self.create_form.initial_balance) {
            Ok(minor) => minor,
            Err(e) => {
                self.log.error(format!("Invalid initial balance: {}", e), None);
                return None;
            }
        };

        Some(self.issue(ApiCall::CreateAccount(CreateAccountRequest {
            user_id,
            initial_balance,
        })))
    }

    pub fn transfer(&mut self) -> Option<NetworkCommand> {
        let user_id = self.current_user_id()?;

        let form = &self.transfer_form;
        if form.from_account_number.is_empty() {
            self.log.error("Choose a source account", None);
            return None;
        }
        let to_account_number = form.to_account_number.trim().to_string();
        if to_account_number.is_empty() {
            self.log.error("Recipient account number is required", None);
            return None;
        }
        let amount = match parse_major_units(&form.amount) {
            Ok(minor) => minor,
            Err(e) => {
                self.log.error(format!("Invalid transfer amount: {}", e), None);
                return None;
            }
        };

        let request = TransferRequest {
            from_account_number: self.transfer_form.from_account_number.clone(),
            to_account_number,
            amount,
        };
        Some(self.issue(ApiCall::Transfer { user_id, request }))
    }

    pub fn delete_account(&mut self, account_id: i64) -> Option<NetworkCommand> {
        let user_id = self.current_user_id()?;
        Some(self.issue(ApiCall::DeleteAccount { user_id, account_id }))
    }

    pub fn delete_selected_account(&mut self) -> Option<NetworkCommand> {
        let account_id = self.selected_account()?.id;
        self.delete_account(account_id)
    }

    fn replace_accounts(&mut self, accounts: Vec<Account>) {
        self.accounts = accounts;
        if self.selected_account >= self.accounts.len() {
            self.selected_account = self.accounts.len().saturating_sub(1);
        }
        let source = &self.transfer_form.from_account_number;
        if !source.is_empty() && !self.accounts.iter().any(|a| &a.account_number == source) {
            self.transfer_form.from_account_number.clear();
        }
    }

    // ========================
    // Responses
    // ========================

    fn issue(&mut self, call: ApiCall) -> NetworkCommand {
        let id = self.next_id();
        let kind = call.kind();
        self.pending.insert(id, kind);
        tracing::debug!(id, ?kind, "issuing call");
        NetworkCommand::Execute { id, call }
    }

    /// Apply a settled call. Every outcome except an ignored one appends to the log.
    pub fn handle_response(&mut self, response: NetworkResponse) -> Option<NetworkCommand> {
        let NetworkResponse { id, outcome } = response;
        let Some(kind) = self.pending.remove(&id) else {
            tracing::debug!(id, "ignoring response for unknown request");
            return None;
        };
        tracing::debug!(id, ?kind, outcome = outcome.variant_name(), "response received");

        match outcome {
            ApiOutcome::Success {
                payload,
                execution_time_ms,
            } => self.apply_success(kind, payload, execution_time_ms),
            ApiOutcome::StructuredError {
                message,
                execution_time_ms,
            } => {
                self.log.error(message, execution_time_ms);
                None
            }
            ApiOutcome::OpaqueError { body } => {
                self.log.error(body, None);
                None
            }
            ApiOutcome::TransportError { message } => {
                self.log.error(format!("Error: {}", message), None);
                None
            }
            ApiOutcome::UnknownError => {
                self.log.error(UNKNOWN_ERROR_MESSAGE, None);
                None
            }
        }
    }

    fn apply_success(
        &mut self,
        kind: CallKind,
        payload: ApiPayload,
        execution_time_ms: Option<u64>,
    ) -> Option<NetworkCommand> {
        match (kind, payload) {
            (CallKind::Login, ApiPayload::User(user)) => {
                self.log
                    .success(format!("Welcome, {}!", user.username), execution_time_ms);
                let user_id = user.user_id;
                self.sign_in(user);
                Some(self.load_accounts(user_id))
            }
            (CallKind::Register, ApiPayload::User(user)) => {
                self.log.success(
                    format!("Registration successful! Welcome, {}!", user.username),
                    execution_time_ms,
                );
                self.sign_in(user);
                None
            }
            (CallKind::ListAccounts { user_id }, ApiPayload::Accounts(accounts)) => {
                if self.current_user_id() != Some(user_id) {
                    tracing::debug!(user_id, "discarding accounts of a user no longer signed in");
                    return None;
                }
                self.replace_accounts(accounts);
                self.log.success("Accounts loaded.", execution_time_ms);
                None
            }
            (CallKind::CreateAccount, ApiPayload::Account(account)) => {
                self.log.success(
                    format!(
                        "Account created: {} with balance {} {}",
                        account.account_number,
                        format_minor_units(account.balance),
                        self.currency_label
                    ),
                    execution_time_ms,
                );
                self.create_form = CreateAccountForm::default();
                self.clamp_cursor();
                self.refresh_accounts()
            }
            (CallKind::Transfer, ApiPayload::Message(message)) => {
                self.log.success(message, execution_time_ms);
                self.transfer_form = TransferForm::default();
                self.clamp_cursor();
                self.refresh_accounts()
            }
            (CallKind::DeleteAccount, ApiPayload::Message(message)) => {
                self.log.success(message, execution_time_ms);
                self.refresh_accounts()
            }
            (kind, payload) => {
                tracing::warn!(?kind, ?payload, "payload does not match call");
                self.log.error(UNKNOWN_ERROR_MESSAGE, None);
                None
            }
        }
    }
}
