//! Panel API access layer.
//!
//! [`PanelApi`] is the seam between the dashboard and the backend: the
//! dashboard only ever sees this trait, [`HttpPanelApi`] implements it over
//! reqwest against the fixed `/api/*` surface.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod types;

pub use client::HttpPanelApi;
pub use error::ApiError;
pub use types::{
    Backup, NewUser, OverviewStats, Service, ServiceOp, ServiceState, SystemStatus, UpdateInfo,
    UpdateProgress, User,
};

/// REST surface of the server management panel.
///
/// Object-safe; the dashboard holds it as `Arc<dyn PanelApi>`.
#[async_trait]
pub trait PanelApi: Send + Sync + 'static {
    /// `GET /api/status`
    async fn status(&self) -> Result<SystemStatus, ApiError>;

    /// `GET /api/overview`
    async fn overview(&self) -> Result<OverviewStats, ApiError>;

    /// `GET /api/services`
    async fn services(&self) -> Result<Vec<Service>, ApiError>;

    /// `POST /api/services/{name}/{op}`
    async fn control_service(&self, name: &str, op: ServiceOp) -> Result<(), ApiError>;

    /// `GET /api/users`
    async fn users(&self) -> Result<Vec<User>, ApiError>;

    /// `POST /api/users`
    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError>;

    /// `DELETE /api/users/{username}`
    async fn delete_user(&self, username: &str) -> Result<(), ApiError>;

    /// `GET /api/backup`
    async fn backups(&self) -> Result<Vec<Backup>, ApiError>;

    /// `POST /api/backup`
    async fn create_backup(&self) -> Result<(), ApiError>;

    /// `GET /api/updates`
    async fn update_info(&self) -> Result<UpdateInfo, ApiError>;

    /// `POST /api/updates/check`
    async fn check_updates(&self) -> Result<(), ApiError>;

    /// `POST /api/updates/perform`
    async fn perform_update(&self) -> Result<(), ApiError>;

    /// `GET /api/updates/progress`
    async fn update_progress(&self) -> Result<UpdateProgress, ApiError>;
}
