//! # P2P Transfers TUI
//!
//! A terminal client for a peer-to-peer money transfer service.
//!
//! ## Features
//! - Sign in / registration against the remote API
//! - Account list with balances in major units
//! - Account creation, transfers and deletion
//! - Timestamped operation log with server execution times
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (Session state machine)
//! - Network Layer (Tokio runtime)

pub mod config;
pub mod constants;
pub mod models;
pub mod money;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use models::{Account, Credentials, HttpMethod, User};
pub use money::{format_minor_units, parse_major_units, MoneyError};
pub use messages::{ApiCall, ApiOutcome, NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use app::{AppActor, AppState};
pub use network::NetworkActor;
