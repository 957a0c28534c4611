use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_BASE_URL, DEFAULT_CURRENCY_LABEL,
    DEFAULT_TIMEOUT_SECS, ENV_API_URL, ENV_TIMEOUT_SECS,
};

/// Client configuration, read from `~/.p2p-transfer/config.yaml`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the API, including the `/api` prefix
    pub base_url: String,
    pub timeout_secs: u64,
    pub currency_label: String,
    /// Directory for the tracing log file
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            currency_label: String::from(DEFAULT_CURRENCY_LABEL),
            log_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Directory holding the config file
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
    }

    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let path = Self::config_dir().join(CONFIG_FILE_NAME);
        let mut config = Self::load_from(&path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load from a specific file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        Ok(config)
    }

    /// Apply overrides from a key lookup (the process environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL) {
            self.base_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT_SECS, raw))?;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.yaml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "base_url: http://bank.local/api\ncurrency_label: EUR\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "http://bank.local/api");
        assert_eq!(config.currency_label, "EUR");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "timeout_secs: [not, a, number]\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [(ENV_API_URL, "http://10.0.0.2/api"), (ENV_TIMEOUT_SECS, " 5 ")]
            .into_iter()
            .collect();
        let mut config = Config::default();
        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.base_url, "http://10.0.0.2/api");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_bad_timeout_override_is_rejected() {
        let mut config = Config::default();
        let result = config.apply_overrides(|key| (key == ENV_TIMEOUT_SECS).then(|| "soon".to_string()));
        assert!(result.is_err());
    }
}
