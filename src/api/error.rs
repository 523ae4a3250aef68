//! Error types for panel API calls.

use thiserror::Error;

/// Errors that can occur while talking to the panel API.
///
/// The variants exist for the diagnostic trace. Callers that render to the
/// user treat every variant the same way, see [`ApiError::is_unavailable`].
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Connection refused, DNS failure, reset, ...
    #[error("network error: {0}")]
    Network(String),

    /// Request exceeded the configured timeout
    #[error("request timeout after {0}s")]
    Timeout(u64),

    /// Non-2xx response
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Body could not be read or did not match the expected shape
    #[error("invalid response: {0}")]
    Decode(String),

    /// A path could not be built from the base URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Every failure means "API unavailable" to the dashboard.
    pub fn is_unavailable(&self) -> bool {
        true
    }

    pub(crate) fn from_reqwest(e: reqwest::Error, timeout_seconds: u64) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(timeout_seconds)
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
