//! Polling configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Auto-refresh and update-progress polling settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between auto-refresh ticks
    pub interval_seconds: u64,
    /// Milliseconds between update-progress polls
    pub progress_interval_ms: u64,
    /// Consecutive failed progress polls before the update is marked failed
    pub max_progress_failures: u32,
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_seconds)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 30,
            progress_interval_ms: 2000,
            max_progress_failures: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_config_defaults() {
        let config = RefreshConfig::default();
        assert_eq!(config.interval(), Duration::from_secs(30));
        assert_eq!(config.progress_interval(), Duration::from_secs(2));
        assert_eq!(config.max_progress_failures, 3);
    }

    #[test]
    fn test_refresh_config_partial_toml() {
        let config: RefreshConfig = toml::from_str("interval_seconds = 5").unwrap();
        assert_eq!(config.interval_seconds, 5);
        assert_eq!(config.progress_interval_ms, 2000);
    }
}
