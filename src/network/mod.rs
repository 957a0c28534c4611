//! Network layer - async API calls
//!
//! Runs in the Tokio runtime, receives commands from the App layer,
//! sends classified outcomes back.

pub mod client;
pub mod actor;

pub use actor::NetworkActor;
pub use client::{classify_response, execute_call};
