//! User-triggered mutations.

use super::ResourceKind;
use crate::api::{ApiError, NewUser, PanelApi, ServiceOp};

/// A mutating request against one resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ControlService { name: String, op: ServiceOp },
    CreateUser(NewUser),
    DeleteUser { username: String },
    CreateBackup,
}

impl Action {
    /// Collection to re-fetch after the action succeeds.
    pub fn kind(&self) -> ResourceKind {
        match self {
            Action::ControlService { .. } => ResourceKind::Services,
            Action::CreateUser(_) | Action::DeleteUser { .. } => ResourceKind::Users,
            Action::CreateBackup => ResourceKind::Backups,
        }
    }

    pub(crate) async fn execute(&self, api: &dyn PanelApi) -> Result<(), ApiError> {
        match self {
            Action::ControlService { name, op } => api.control_service(name, *op).await,
            Action::CreateUser(user) => api.create_user(user).await,
            Action::DeleteUser { username } => api.delete_user(username).await,
            Action::CreateBackup => api.create_backup().await,
        }
    }

    pub fn success_message(&self) -> String {
        match self {
            Action::ControlService { name, op } => format!("Service {}: {} done", name, op),
            Action::CreateUser(user) => format!("User {} created", user.username),
            Action::DeleteUser { username } => format!("User {} deleted", username),
            Action::CreateBackup => "Backup created".to_string(),
        }
    }

    pub fn failure_message(&self) -> String {
        match self {
            Action::ControlService { name, op } => {
                format!("Failed to {} service {}", op, name)
            }
            Action::CreateUser(user) => format!("Failed to create user {}", user.username),
            Action::DeleteUser { username } => format!("Failed to delete user {}", username),
            Action::CreateBackup => "Failed to create backup".to_string(),
        }
    }
}
