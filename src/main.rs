//! P2P Transfers TUI - Actor-based client for the transfer API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - session state machine processing events
//! - Network Layer (Tokio) - async HTTP execution

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;

use p2p_transfer::app::AppActor;
use p2p_transfer::config::Config;
use p2p_transfer::constants::LOG_FILE_NAME;
use p2p_transfer::messages::ui_events::key_to_ui_event;
use p2p_transfer::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use p2p_transfer::network::NetworkActor;
use p2p_transfer::ui;

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config errors are reported before the terminal is taken over
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging to file
    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create log directory {}", config.log_dir.display()))?;
    let file_appender = tracing_appender::rolling::never(&config.log_dir, LOG_FILE_NAME);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "starting");

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(&config, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| ui::draw(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.logged_in(),
                    current_state.focus,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}
