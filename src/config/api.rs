//! Panel API connection configuration

use serde::{Deserialize, Serialize};

/// Where the panel API lives and how long to wait for it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL; endpoints are resolved under `{base_url}/api/`
    pub base_url: String,
    /// Timeout applied to every request
    pub timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            timeout_seconds: 10,
        }
    }
}
