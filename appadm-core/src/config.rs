//! # Configuration
//!
//! Endpoint and defaults for the admin CLI, loaded from
//! `<config dir>/appadm/config.toml` with environment overrides.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};

/// Environment override for the service endpoint
pub const ENDPOINT_ENV: &str = "APPADM_ENDPOINT";
/// Environment override for the default application type
pub const APP_TYPE_ENV: &str = "APPADM_APP_TYPE";

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the resource manager admin API
    pub endpoint: String,
    /// Application type assumed when a command addresses an application by
    /// name and no `--app-type` flag is given
    pub default_app_type: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8088".to_string(),
            default_app_type: None,
            request_timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl Config {
    /// Path of the configuration file
    pub fn config_file() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("appadm")
            .join("config.toml")
    }

    /// Load configuration: file if present, defaults otherwise, then
    /// environment overrides on top.
    pub fn load() -> Result<Self> {
        let path = Self::config_file();
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            debug!(path = %path.display(), "loaded configuration file");
            toml::from_str(&raw).map_err(|e| ClientError::Configuration(e.to_string()))?
        } else {
            Config::default()
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            config.endpoint = endpoint;
        }
        if let Ok(app_type) = std::env::var(APP_TYPE_ENV) {
            config.default_app_type = Some(app_type);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert!(config.endpoint.starts_with("http://"));
        assert!(config.default_app_type.is_none());
        assert!(config.request_timeout_secs > 0);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: Config = toml::from_str("endpoint = \"http://rm.internal:8088\"").unwrap();
        assert_eq!(config.endpoint, "http://rm.internal:8088");
        assert_eq!(config.request_timeout_secs, Config::default().request_timeout_secs);
    }

    #[test]
    fn default_app_type_parses() {
        let config: Config = toml::from_str("default_app_type = \"service\"").unwrap();
        assert_eq!(config.default_app_type.as_deref(), Some("service"));
    }
}
