//! Logging settings: verbosity, output format and per-module overrides.

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Accepted values for `level` and for every component override.
pub const LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// panelctl modules that accept a level override.
pub const COMPONENTS: [&str; 5] = ["api", "cli", "config", "dashboard", "view"];

fn is_level(value: &str) -> bool {
    LEVELS.iter().any(|level| level.eq_ignore_ascii_case(value))
}

/// How events are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// One compact line per event, for a person watching the dashboard
    #[default]
    Pretty,
    /// One JSON object per line, for piping into a log collector
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LogFormat::Pretty, LogFormat::Json]
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid log format: {} (expected pretty or json)", s))
    }
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

/// `[logging]` section.
///
/// The client is quiet by default (`warn`): a dashboard that polls every few
/// seconds would otherwise bury its own output under request traces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    /// Overrides keyed by module, e.g. `dashboard = "debug"` to trace polling
    /// without the HTTP noise from `api`
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub component_levels: BTreeMap<String, String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Pretty,
            component_levels: BTreeMap::new(),
        }
    }
}

impl LoggingConfig {
    /// Set the base level if `level` names one. Returns whether it was applied.
    pub fn set_level(&mut self, level: &str) -> bool {
        if is_level(level) {
            self.level = level.to_lowercase();
            true
        } else {
            false
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_level(&self.level) {
            return Err(ConfigError::Validation {
                field: "logging.level".to_string(),
                message: format!("unknown level '{}'", self.level),
            });
        }

        for (component, level) in &self.component_levels {
            if !COMPONENTS.contains(&component.as_str()) {
                return Err(ConfigError::Validation {
                    field: format!("logging.component_levels.{}", component),
                    message: format!("unknown component, expected one of {}", COMPONENTS.join(", ")),
                });
            }
            if !is_level(level) {
                return Err(ConfigError::Validation {
                    field: format!("logging.component_levels.{}", component),
                    message: format!("unknown level '{}'", level),
                });
            }
        }

        Ok(())
    }
}
