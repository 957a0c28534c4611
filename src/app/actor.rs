//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config.currency_label.clone()),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    // A follow-up (the account refresh) is only sent once its
                    // predecessor has settled here
                    if let Some(cmd) = self.state.handle_response(response) {
                        self.send(cmd);
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        if self.network_tx.send(cmd).is_err() {
            tracing::error!("network actor is gone, dropping command");
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let cmd = match event {
            // Navigation
            UiEvent::NextField => {
                self.state.next_field();
                None
            }
            UiEvent::PrevField => {
                self.state.prev_field();
                None
            }
            UiEvent::SelectNext => {
                self.state.select_next();
                None
            }
            UiEvent::SelectPrev => {
                self.state.select_prev();
                None
            }

            // Input editing
            UiEvent::StartEditing => {
                self.state.start_editing();
                None
            }
            UiEvent::StopEditing => {
                self.state.stop_editing();
                None
            }
            UiEvent::CharInput(c) => {
                self.state.enter_char(c);
                None
            }
            UiEvent::Backspace => {
                self.state.delete_char();
                None
            }
            UiEvent::CursorLeft => {
                self.state.move_cursor_left();
                None
            }
            UiEvent::CursorRight => {
                self.state.move_cursor_right();
                None
            }

            // Actions
            UiEvent::Submit => self.state.submit(),
            UiEvent::ToggleAuthMode => {
                self.state.toggle_auth_mode();
                None
            }
            UiEvent::Logout => {
                self.state.logout();
                None
            }
            UiEvent::DeleteAccount => self.state.delete_selected_account(),

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                None
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                None
            }

            // System
            UiEvent::Quit => return true,
        };

        if let Some(cmd) = cmd {
            self.send(cmd);
        }
        false
    }
}
