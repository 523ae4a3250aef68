//! Configuration module for panelctl
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`PANEL_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use panelctl::config::PanelConfig;
//!
//! let config = PanelConfig::default();
//! assert_eq!(config.api.base_url, "http://localhost:8081");
//!
//! let toml = r#"
//! [refresh]
//! interval_seconds = 5
//! "#;
//! let config: PanelConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.refresh.interval_seconds, 5);
//! ```

pub mod api;
pub mod error;
pub mod logging;
pub mod refresh;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use refresh::RefreshConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Unified configuration for the dashboard client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PanelConfig {
    /// Panel API connection
    pub api: ApiConfig,
    /// Auto-refresh and progress polling
    pub refresh: RefreshConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl PanelConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports PANEL_* environment variables for common settings.
    /// Invalid values are silently ignored (defaults are kept).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("PANEL_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("PANEL_API_TIMEOUT") {
            if let Ok(t) = timeout.parse() {
                self.api.timeout_seconds = t;
            }
        }
        if let Ok(interval) = std::env::var("PANEL_REFRESH_INTERVAL") {
            if let Ok(i) = interval.parse() {
                self.refresh.interval_seconds = i;
            }
        }

        if let Ok(level) = std::env::var("PANEL_LOG_LEVEL") {
            self.logging.set_level(&level);
        }
        if let Ok(format) = std::env::var("PANEL_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match reqwest::Url::parse(&self.api.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(ConfigError::Validation {
                    field: "api.base_url".to_string(),
                    message: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::Validation {
                    field: "api.base_url".to_string(),
                    message: e.to_string(),
                });
            }
        }

        if self.api.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "api.timeout_seconds".to_string(),
                message: "timeout must be non-zero".to_string(),
            });
        }
        if self.refresh.interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "refresh.interval_seconds".to_string(),
                message: "interval must be non-zero".to_string(),
            });
        }
        if self.refresh.progress_interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "refresh.progress_interval_ms".to_string(),
                message: "interval must be non-zero".to_string(),
            });
        }

        self.logging.validate()
    }
}
