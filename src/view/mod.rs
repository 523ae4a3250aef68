//! Render sinks for the dashboard.
//!
//! The dashboard never formats anything itself. It hands typed content for a
//! named [`Region`] to a [`DashboardView`], raises or clears the error banner,
//! and posts transient [`Notice`]s for action outcomes.
//!
//! - [`TerminalView`] prints to a terminal (colored lines, comfy-table tables)
//! - [`MemoryView`] keeps the latest state per region, for `--json` snapshots
//!   and for tests

pub mod format;
pub mod memory;
pub mod terminal;

pub use memory::{MemoryView, Snapshot};
pub use terminal::TerminalView;

use crate::api::{Backup, OverviewStats, Service, UpdateInfo, UpdateProgress, User};
use crate::dashboard::Section;
use serde::Serialize;

/// Named output region. Each region shows exactly one [`RegionContent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Status,
    Overview,
    Services,
    Users,
    Backups,
    Updates,
    UpdateProgress,
}

/// Result of the last status poll, as shown by the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

/// What a region currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum RegionContent {
    Status(ConnectionState),
    Overview(OverviewStats),
    Services(Vec<Service>),
    Users(Vec<User>),
    Backups(Vec<Backup>),
    Updates(UpdateInfo),
    Progress(UpdateProgress),
    /// Placeholder shown when the region's data could not be loaded
    NoData,
}

/// Severity of a transient notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message about the outcome of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// Output side of the dashboard.
///
/// Object-safe and shared between the client and its background pollers as
/// `Arc<dyn DashboardView>`. Calls may arrive from concurrent tasks; the last
/// write to a region wins.
pub trait DashboardView: Send + Sync + 'static {
    /// Make `section` the only visible section.
    fn show_section(&self, section: Section);

    /// Replace the contents of `region`.
    fn render(&self, region: Region, content: RegionContent);

    /// Show or hide the persistent "API unavailable" banner.
    fn set_error_banner(&self, visible: bool);

    /// Post a transient message.
    fn notify(&self, notice: Notice);
}
