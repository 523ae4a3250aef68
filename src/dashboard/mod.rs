//! Dashboard client: the one stateful component.
//!
//! [`DashboardClient`] owns the visible section, the auto-refresh poller, the
//! update-progress poller and the update phase. It fetches through a
//! [`PanelApi`] and renders into a [`DashboardView`]; it never keeps fetched
//! data around. Every successful mutation is followed by a re-fetch of the
//! affected list.
//!
//! Failures of any kind are caught here. Read failures render a "no data"
//! placeholder and raise the error banner, action failures post an error
//! notice. Nothing is retried; the next poll or the next user action is the
//! recovery path.

mod action;
mod poller;
mod section;
mod update;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use poller::PollHandle;
pub use section::{Loader, ResourceKind, Section, SectionParseError};
pub use update::{UpdateEvent, UpdatePhase};

use crate::api::{ApiError, NewUser, PanelApi};
use crate::config::RefreshConfig;
use crate::view::{ConnectionState, DashboardView, Notice, Region, RegionContent};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

/// State shared with the background pollers.
struct Shared {
    api: Arc<dyn PanelApi>,
    view: Arc<dyn DashboardView>,
    config: RefreshConfig,
    section: RwLock<Section>,
    update_phase: RwLock<UpdatePhase>,
}

impl Shared {
    fn section(&self) -> Section {
        *self.section.read().unwrap()
    }

    fn update_phase(&self) -> UpdatePhase {
        *self.update_phase.read().unwrap()
    }

    fn apply_update_event(&self, event: UpdateEvent) -> UpdatePhase {
        let mut phase = self.update_phase.write().unwrap();
        let old = *phase;
        *phase = old.apply(event, self.config.max_progress_failures);
        if *phase != old {
            tracing::info!(
                old_phase = ?old,
                new_phase = ?*phase,
                event = ?event,
                "Update phase changed"
            );
        }
        *phase
    }

    async fn refresh_status(&self) -> ConnectionState {
        let (state, reachable) = match self.api.status().await {
            Ok(status) if status.is_online() => (ConnectionState::Connected, true),
            Ok(status) => {
                tracing::debug!(status = %status.status, "Panel reports system not online");
                (ConnectionState::Disconnected, true)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Status check failed");
                (ConnectionState::Disconnected, false)
            }
        };

        self.view.render(Region::Status, RegionContent::Status(state));
        self.view.set_error_banner(!reachable);
        state
    }

    /// Render a fetch result into `region`. Returns whether it succeeded.
    fn render_result(&self, region: Region, result: Result<RegionContent, ApiError>) -> bool {
        match result {
            Ok(content) => {
                self.view.render(region, content);
                self.view.set_error_banner(false);
                true
            }
            Err(e) => {
                tracing::warn!(region = ?region, error = %e, "Failed to load panel data");
                self.view.render(region, RegionContent::NoData);
                self.view.set_error_banner(true);
                false
            }
        }
    }

    async fn load_overview(&self) -> bool {
        let result = self.api.overview().await.map(RegionContent::Overview);
        self.render_result(Region::Overview, result)
    }

    async fn load_list(&self, kind: ResourceKind) -> bool {
        let result = match kind {
            ResourceKind::Services => self.api.services().await.map(RegionContent::Services),
            ResourceKind::Users => self.api.users().await.map(RegionContent::Users),
            ResourceKind::Backups => self.api.backups().await.map(RegionContent::Backups),
        };
        self.render_result(kind.region(), result)
    }

    async fn load_updates(&self) -> bool {
        let result = self.api.update_info().await.inspect(|info| {
            self.apply_update_event(UpdateEvent::InfoLoaded {
                update_available: info.update_available,
            });
        });
        self.render_result(Region::Updates, result.map(RegionContent::Updates))
    }

    async fn load_section(&self, section: Section) -> bool {
        match section.loader() {
            None => true,
            Some(Loader::Overview) => self.load_overview().await,
            Some(Loader::List(kind)) => self.load_list(kind).await,
            Some(Loader::Updates) => self.load_updates().await,
        }
    }

    /// One auto-refresh tick.
    async fn refresh_tick(&self) {
        self.refresh_status().await;
        if self.section() == Section::Overview {
            self.load_overview().await;
        }
    }

    /// One update-progress poll.
    async fn progress_tick(&self, failures: &AtomicU32) -> ControlFlow<()> {
        match self.api.update_progress().await {
            Ok(progress) => {
                failures.store(0, Ordering::SeqCst);
                let completed = progress.completed;
                self.apply_update_event(UpdateEvent::Progress { completed });
                self.view
                    .render(Region::UpdateProgress, RegionContent::Progress(progress));

                if completed {
                    tracing::info!("Update completed");
                    self.view.notify(Notice::success("Update completed"));
                    self.load_updates().await;
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            }
            Err(e) => {
                let consecutive = failures.fetch_add(1, Ordering::SeqCst) + 1;
                tracing::warn!(error = %e, consecutive, "Update progress poll failed");

                let phase = self.apply_update_event(UpdateEvent::ProgressFailed { consecutive });
                if phase == UpdatePhase::Failed
                    || consecutive >= self.config.max_progress_failures
                {
                    self.view.render(Region::UpdateProgress, RegionContent::NoData);
                    self.view
                        .notify(Notice::error("Update failed: lost contact with the panel API"));
                    return ControlFlow::Break(());
                }
                ControlFlow::Continue(())
            }
        }
    }
}

/// Owned dashboard client with explicit `start()` / `stop()` lifecycle.
pub struct DashboardClient {
    shared: Arc<Shared>,
    refresh_task: Mutex<Option<PollHandle>>,
    progress_task: Mutex<Option<PollHandle>>,
}

impl DashboardClient {
    pub fn new(
        api: Arc<dyn PanelApi>,
        view: Arc<dyn DashboardView>,
        config: RefreshConfig,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                view,
                config,
                section: RwLock::new(Section::default()),
                update_phase: RwLock::new(UpdatePhase::default()),
            }),
            refresh_task: Mutex::new(None),
            progress_task: Mutex::new(None),
        }
    }

    /// Start on a section other than the default overview.
    pub fn with_section(self, section: Section) -> Self {
        *self.shared.section.write().unwrap() = section;
        self
    }

    /// Currently visible section.
    pub fn section(&self) -> Section {
        self.shared.section()
    }

    pub fn update_phase(&self) -> UpdatePhase {
        self.shared.update_phase()
    }

    /// Initial load, then auto-refresh at the configured interval.
    pub async fn start(&self) {
        let section = self.section();
        tracing::info!(section = %section, "Starting dashboard");

        self.shared.view.show_section(section);
        self.shared.refresh_status().await;
        self.shared.load_section(section).await;
        self.start_auto_refresh(self.shared.config.interval());
    }

    /// Cancel every background task.
    pub fn stop(&self) {
        self.stop_auto_refresh();
        self.stop_update_monitor();
        tracing::info!("Dashboard stopped");
    }

    /// Switch the visible section and load its data.
    pub async fn select_section(&self, section: Section) -> bool {
        let previous = std::mem::replace(&mut *self.shared.section.write().unwrap(), section);
        if previous == Section::Updates && section != Section::Updates {
            self.shared.apply_update_event(UpdateEvent::Dismissed);
        }

        tracing::debug!(from = %previous, to = %section, "Section selected");
        self.shared.view.show_section(section);
        self.shared.load_section(section).await
    }

    /// Re-fetch status and the visible section.
    pub async fn reload(&self) -> bool {
        let online = self.shared.refresh_status().await == ConnectionState::Connected;
        let loaded = self.shared.load_section(self.section()).await;
        online && loaded
    }

    /// Fetch system status; failures render as disconnected.
    pub async fn refresh_status(&self) -> ConnectionState {
        self.shared.refresh_status().await
    }

    pub async fn load_overview(&self) -> bool {
        self.shared.load_overview().await
    }

    /// Fetch a collection and replace its region.
    pub async fn load_list(&self, kind: ResourceKind) -> bool {
        self.shared.load_list(kind).await
    }

    pub async fn load_updates(&self) -> bool {
        self.shared.load_updates().await
    }

    /// Send a mutation; on success re-fetch the affected list.
    pub async fn perform_action(&self, action: Action) -> bool {
        match action.execute(self.shared.api.as_ref()).await {
            Ok(()) => {
                tracing::info!(action = ?action.kind(), "Action succeeded");
                self.shared
                    .view
                    .notify(Notice::success(action.success_message()));
                self.shared.load_list(action.kind()).await;
                true
            }
            Err(e) => {
                tracing::warn!(action = ?action.kind(), error = %e, "Action failed");
                self.shared
                    .view
                    .notify(Notice::error(action.failure_message()));
                false
            }
        }
    }

    /// Validate form input and create a user. Empty input sends nothing.
    pub async fn create_user(&self, username: &str, password: &str, is_admin: bool) -> bool {
        match NewUser::from_input(username, password, is_admin) {
            Some(user) => self.perform_action(Action::CreateUser(user)).await,
            None => {
                self.shared
                    .view
                    .notify(Notice::error("Username and password are required"));
                false
            }
        }
    }

    /// Start (or restart) the auto-refresh poller.
    pub fn start_auto_refresh(&self, interval: Duration) {
        let shared = Arc::clone(&self.shared);
        let handle = PollHandle::spawn("auto-refresh", interval, move || {
            let shared = Arc::clone(&shared);
            async move {
                shared.refresh_tick().await;
                ControlFlow::Continue(())
            }
        });

        // Replacing the handle drops, and so cancels, any previous poller
        if let Some(previous) = self.refresh_task.lock().unwrap().replace(handle) {
            previous.cancel();
            tracing::debug!("Replaced running auto-refresh");
        }
        tracing::info!(interval_ms = interval.as_millis() as u64, "Auto-refresh started");
    }

    pub fn stop_auto_refresh(&self) {
        if let Some(handle) = self.refresh_task.lock().unwrap().take() {
            handle.cancel();
            tracing::info!("Auto-refresh stopped");
        }
    }

    pub fn is_auto_refreshing(&self) -> bool {
        self.refresh_task
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Ask the panel to look for updates, then show the result.
    pub async fn check_for_updates(&self) -> bool {
        self.shared.apply_update_event(UpdateEvent::CheckStarted);

        if let Err(e) = self.shared.api.check_updates().await {
            tracing::warn!(error = %e, "Update check failed");
            self.shared.apply_update_event(UpdateEvent::CheckFailed);
            self.shared
                .view
                .notify(Notice::error("Failed to check for updates"));
            return false;
        }

        match self.shared.api.update_info().await {
            Ok(info) => {
                let phase = self.shared.apply_update_event(UpdateEvent::InfoLoaded {
                    update_available: info.update_available,
                });
                let notice = match phase {
                    UpdatePhase::UpdateAvailable => {
                        Notice::success(format!("Update available: {}", info.latest_version))
                    }
                    _ => Notice::success("Already up to date"),
                };
                self.shared
                    .view
                    .render(Region::Updates, RegionContent::Updates(info));
                self.shared.view.set_error_banner(false);
                self.shared.view.notify(notice);
                true
            }
            Err(e) => {
                self.shared.apply_update_event(UpdateEvent::CheckFailed);
                self.shared.render_result(Region::Updates, Err(e));
                self.shared
                    .view
                    .notify(Notice::error("Failed to check for updates"));
                false
            }
        }
    }

    /// Start an update and follow its progress.
    pub async fn perform_update(&self) -> bool {
        match self.shared.api.perform_update().await {
            Ok(()) => {
                self.shared.apply_update_event(UpdateEvent::UpdateStarted);
                self.shared.view.notify(Notice::success("Update started"));
                self.monitor_update_progress();
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "Update request failed");
                self.shared.apply_update_event(UpdateEvent::UpdateRejected);
                self.shared
                    .view
                    .notify(Notice::error("Failed to start update"));
                false
            }
        }
    }

    /// Poll update progress until the panel reports completion.
    ///
    /// At most one monitor runs; starting another cancels the previous one.
    pub fn monitor_update_progress(&self) {
        self.shared.apply_update_event(UpdateEvent::MonitorStarted);
        let shared = Arc::clone(&self.shared);
        let failures = Arc::new(AtomicU32::new(0));
        let handle = PollHandle::spawn(
            "update-progress",
            self.shared.config.progress_interval(),
            move || {
                let shared = Arc::clone(&shared);
                let failures = Arc::clone(&failures);
                async move { shared.progress_tick(&failures).await }
            },
        );

        if let Some(previous) = self.progress_task.lock().unwrap().replace(handle) {
            previous.cancel();
            tracing::debug!("Replaced running update monitor");
        }
        tracing::info!("Update progress monitor started");
    }

    pub fn stop_update_monitor(&self) {
        if let Some(handle) = self.progress_task.lock().unwrap().take() {
            handle.cancel();
        }
    }

    pub fn is_monitoring_update(&self) -> bool {
        self.progress_task
            .lock()
            .unwrap()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }

    /// Wait until the current update monitor finishes on its own.
    /// Returns immediately if none is running.
    pub async fn wait_for_update(&self) -> UpdatePhase {
        let handle = self.progress_task.lock().unwrap().take();
        if let Some(handle) = handle {
            handle.join().await;
        }
        self.update_phase()
    }
}
