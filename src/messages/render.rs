//! Render state - data structure sent from App layer to UI for rendering

use crate::app::log::LogEntry;
use crate::messages::ui_events::{AuthMode, Focus, InputMode};
use crate::models::{Account, User};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    // Session
    pub user: Option<User>,
    pub accounts: Vec<Account>,
    pub log: Vec<LogEntry>,
    pub currency_label: String,

    // Auth form (the password itself never leaves the App layer)
    pub auth_mode: AuthMode,
    pub username: String,
    pub password_len: usize,

    // Session forms
    pub initial_balance: String,
    pub transfer_from: String,
    pub transfer_to: String,
    pub transfer_amount: String,

    // UI state
    pub focus: Focus,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub selected_account: usize,
    pub log_scroll: u16,
    pub is_loading: bool,
    pub show_help: bool,
}

impl RenderState {
    pub fn logged_in(&self) -> bool {
        self.user.is_some()
    }
}

impl Default for RenderState {
    fn default() -> Self {
        use crate::constants::DEFAULT_CURRENCY_LABEL;
        RenderState {
            user: None,
            accounts: Vec::new(),
            log: Vec::new(),
            currency_label: String::from(DEFAULT_CURRENCY_LABEL),
            auth_mode: AuthMode::Login,
            username: String::new(),
            password_len: 0,
            initial_balance: String::new(),
            transfer_from: String::new(),
            transfer_to: String::new(),
            transfer_amount: String::new(),
            focus: Focus::Username,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            selected_account: 0,
            log_scroll: 0,
            is_loading: false,
            show_help: false,
        }
    }
}
