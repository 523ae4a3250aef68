//! Wire types for the panel REST API.
//!
//! Every type here is a transient view-model: the dashboard renders what it
//! fetched and throws it away on the next load.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Response of `GET /api/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemStatus {
    /// `online`, `offline`, or whatever else the backend reports (e.g. `error`)
    pub status: String,
}

impl SystemStatus {
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// Response of `GET /api/overview`.
///
/// Every field is required: the panel answers a failed collection with
/// `{"error": ...}` and status 200, which must not decode as zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub active_users: u64,
    pub total_rooms: u64,
    pub running_services: u64,
    /// Percentage string as reported by `df`, e.g. `"42%"`
    pub disk_usage: String,
}

/// Run state of a managed service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceState {
    Running,
    #[serde(other)]
    Stopped,
}

/// One entry of `GET /api/services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub status: ServiceState,
    #[serde(default)]
    pub description: String,
}

/// One entry of `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    /// The backend sends `""` for users without a third-party id; that is
    /// normalized to `None`.
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub email: Option<String>,
    pub status: String,
}

impl User {
    pub fn is_active(&self) -> bool {
        self.status == "active"
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// One entry of `GET /api/backup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backup {
    pub name: String,
    /// Archive size in bytes
    pub size: u64,
    /// ISO-8601 modification time, local to the server
    pub date: String,
}

impl Backup {
    /// Size in mebibytes, as displayed by the dashboard.
    pub fn size_mb(&self) -> f64 {
        self.size as f64 / 1024.0 / 1024.0
    }
}

/// Response of `GET /api/updates`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub current_version: String,
    pub latest_version: String,
    pub update_available: bool,
}

/// Response of `GET /api/updates/progress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProgress {
    /// Percent complete, 0-100
    pub progress: u8,
    #[serde(default)]
    pub message: String,
    pub completed: bool,
}

/// Body of `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_admin: bool,
}

impl NewUser {
    /// Build a creation request from raw form input.
    ///
    /// The username is trimmed. Returns `None` when either field is empty, in
    /// which case no request must be issued.
    pub fn from_input(username: &str, password: &str, is_admin: bool) -> Option<Self> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            password: password.to_string(),
            is_admin,
        })
    }
}

/// Control operation for `POST /api/services/{name}/{op}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceOp {
    Start,
    Stop,
    Restart,
}

impl ServiceOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceOp::Start => "start",
            ServiceOp::Stop => "stop",
            ServiceOp::Restart => "restart",
        }
    }
}

impl fmt::Display for ServiceOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "start" => Ok(ServiceOp::Start),
            "stop" => Ok(ServiceOp::Stop),
            "restart" => Ok(ServiceOp::Restart),
            _ => Err(format!("Invalid service operation: {}", s)),
        }
    }
}
