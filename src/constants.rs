//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Default base URL of the transfer API (includes the `/api` prefix)
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Currency label shown next to balances
pub const DEFAULT_CURRENCY_LABEL: &str = "RUB";

/// Directory under the home directory holding the config file
pub const CONFIG_DIR_NAME: &str = ".p2p-transfer";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Tracing output file, written under the configured log directory
pub const LOG_FILE_NAME: &str = "p2p-transfer.log";

/// Environment variable overriding the API base URL
pub const ENV_API_URL: &str = "P2P_API_URL";

/// Environment variable overriding the HTTP timeout
pub const ENV_TIMEOUT_SECS: &str = "P2P_TIMEOUT_SECS";

/// Log text used when a failure could not be classified
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Application name
pub const APP_NAME: &str = "P2P Transfers";

/// Application version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
