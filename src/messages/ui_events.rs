//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Focus navigation
    NextField,
    PrevField,
    SelectNext,
    SelectPrev,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Actions
    Submit,
    ToggleAuthMode,
    Logout,
    DeleteAccount,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Login vs registration form
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn toggle(&self) -> AuthMode {
        match self {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::Login => "Sign in",
            AuthMode::Register => "Register",
        }
    }
}

/// Focused field or panel
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Focus {
    Username,
    Password,
    InitialBalance,
    TransferFrom,
    TransferTo,
    TransferAmount,
    Accounts,
    Log,
}

const AUTH_ORDER: [Focus; 3] = [Focus::Username, Focus::Password, Focus::Log];

const SESSION_ORDER: [Focus; 6] = [
    Focus::InitialBalance,
    Focus::TransferFrom,
    Focus::TransferTo,
    Focus::TransferAmount,
    Focus::Accounts,
    Focus::Log,
];

impl Focus {
    fn order(logged_in: bool) -> &'static [Focus] {
        if logged_in {
            &SESSION_ORDER
        } else {
            &AUTH_ORDER
        }
    }

    /// First focus of a screen
    pub fn initial(logged_in: bool) -> Focus {
        Focus::order(logged_in)[0]
    }

    pub fn next(&self, logged_in: bool) -> Focus {
        let order = Focus::order(logged_in);
        match order.iter().position(|f| f == self) {
            Some(i) => order[(i + 1) % order.len()],
            None => order[0],
        }
    }

    pub fn prev(&self, logged_in: bool) -> Focus {
        let order = Focus::order(logged_in);
        match order.iter().position(|f| f == self) {
            Some(i) => order[(i + order.len() - 1) % order.len()],
            None => order[0],
        }
    }

    /// Fields that accept typed text
    pub fn is_text_input(&self) -> bool {
        matches!(
            self,
            Focus::Username
                | Focus::Password
                | Focus::InitialBalance
                | Focus::TransferTo
                | Focus::TransferAmount
        )
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    logged_in: bool,
    focus: Focus,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::BackTab => Some(UiEvent::PrevField),
            KeyCode::Char('e') | KeyCode::Enter => {
                if focus.is_text_input() {
                    Some(UiEvent::StartEditing)
                } else if focus == Focus::TransferFrom {
                    Some(UiEvent::SelectNext)
                } else {
                    None
                }
            }
            KeyCode::Char('s') => Some(UiEvent::Submit),
            KeyCode::Char('r') if !logged_in => Some(UiEvent::ToggleAuthMode),
            KeyCode::Char('x') if logged_in => Some(UiEvent::Logout),
            KeyCode::Char('d') if logged_in && focus == Focus::Accounts => {
                Some(UiEvent::DeleteAccount)
            }
            KeyCode::Up => Some(UiEvent::SelectPrev),
            KeyCode::Down => Some(UiEvent::SelectNext),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Tab => Some(UiEvent::NextField),
            KeyCode::BackTab => Some(UiEvent::PrevField),
            KeyCode::Enter => Some(UiEvent::Submit),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
    }
}
