//! Update-flow state machine.
//!
//! ```text
//! Idle -> Checking -> UpdateAvailable | UpToDate -> Updating -> Completed | Failed -> Idle
//! ```
//!
//! Every transition is caused by a server response (or the lack of one); the
//! client never decides on its own that an update finished.

use serde::Serialize;

/// Where the update flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdatePhase {
    #[default]
    Idle,
    Checking,
    UpdateAvailable,
    UpToDate,
    Updating,
    Completed,
    Failed,
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateEvent {
    /// `POST /api/updates/check` is about to be sent
    CheckStarted,
    /// Check request or the follow-up info fetch failed
    CheckFailed,
    /// `GET /api/updates` answered
    InfoLoaded { update_available: bool },
    /// `POST /api/updates/perform` was accepted
    UpdateStarted,
    /// `POST /api/updates/perform` failed
    UpdateRejected,
    /// A progress monitor started polling
    MonitorStarted,
    /// `GET /api/updates/progress` answered
    Progress { completed: bool },
    /// `GET /api/updates/progress` failed `consecutive` times in a row
    ProgressFailed { consecutive: u32 },
    /// The user left the finished update behind
    Dismissed,
}

impl UpdatePhase {
    /// True while a progress monitor should be running.
    pub fn is_updating(&self) -> bool {
        matches!(self, UpdatePhase::Updating)
    }

    /// True once an update ran to an outcome.
    pub fn is_finished(&self) -> bool {
        matches!(self, UpdatePhase::Completed | UpdatePhase::Failed)
    }

    /// Compute the phase after `event`. Returns `self` unchanged for events
    /// that don't apply in the current phase.
    pub fn apply(self, event: UpdateEvent, max_progress_failures: u32) -> UpdatePhase {
        use UpdatePhase::*;

        match (self, event) {
            (Updating, UpdateEvent::CheckStarted) => Updating,
            (_, UpdateEvent::CheckStarted) => Checking,

            (Checking, UpdateEvent::CheckFailed) => Idle,

            // A finished update keeps showing its outcome until dismissed
            (Completed | Failed | Updating, UpdateEvent::InfoLoaded { .. }) => self,
            (_, UpdateEvent::InfoLoaded { update_available: true }) => UpdateAvailable,
            (_, UpdateEvent::InfoLoaded { update_available: false }) => UpToDate,

            (_, UpdateEvent::UpdateStarted | UpdateEvent::MonitorStarted) => Updating,
            (_, UpdateEvent::UpdateRejected) => Failed,

            (_, UpdateEvent::Progress { completed: true }) => Completed,
            (_, UpdateEvent::Progress { completed: false }) => Updating,

            (Updating, UpdateEvent::ProgressFailed { consecutive })
                if consecutive >= max_progress_failures =>
            {
                Failed
            }

            (Completed | Failed, UpdateEvent::Dismissed) => Idle,

            (phase, _) => phase,
        }
    }
}
