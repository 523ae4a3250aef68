//! Unit tests for the dashboard client, against an in-process fake API.

use super::*;
use crate::api::{
    Backup, OverviewStats, Service, ServiceOp, ServiceState, SystemStatus, UpdateInfo,
    UpdateProgress, User,
};
use crate::view::MemoryView;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::AtomicBool;

// ============================================================================
// Fake panel API
// ============================================================================

#[derive(Default)]
struct FakeApi {
    calls: Mutex<HashMap<&'static str, usize>>,
    /// `None` simulates a network failure
    status: Mutex<Option<String>>,
    users: Mutex<Vec<User>>,
    fail_reads: AtomicBool,
    fail_mutations: AtomicBool,
    update_available: AtomicBool,
    /// Responses for `update_progress`; the last one repeats forever
    progress: Mutex<VecDeque<Result<UpdateProgress, ApiError>>>,
}

impl FakeApi {
    fn online() -> Arc<Self> {
        let api = Self::default();
        *api.status.lock().unwrap() = Some("online".to_string());
        *api.users.lock().unwrap() = vec![user("alice"), user("bob")];
        Arc::new(api)
    }

    fn calls(&self, endpoint: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(endpoint)
            .copied()
            .unwrap_or(0)
    }

    fn record(&self, endpoint: &'static str) {
        *self.calls.lock().unwrap().entry(endpoint).or_insert(0) += 1;
    }

    fn read_result(&self) -> Result<(), ApiError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(ApiError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn mutation_result(&self) -> Result<(), ApiError> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(ApiError::Status {
                status: 500,
                message: "boom".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn script_progress(&self, steps: Vec<Result<UpdateProgress, ApiError>>) {
        *self.progress.lock().unwrap() = steps.into();
    }
}

fn user(name: &str) -> User {
    User {
        username: name.to_string(),
        email: None,
        status: "active".to_string(),
    }
}

fn progress(percent: u8, completed: bool) -> Result<UpdateProgress, ApiError> {
    Ok(UpdateProgress {
        progress: percent,
        message: format!("{}%", percent),
        completed,
    })
}

#[async_trait]
impl PanelApi for FakeApi {
    async fn status(&self) -> Result<SystemStatus, ApiError> {
        self.record("status");
        match self.status.lock().unwrap().clone() {
            Some(status) => Ok(SystemStatus { status }),
            None => Err(ApiError::Network("connection refused".to_string())),
        }
    }

    async fn overview(&self) -> Result<OverviewStats, ApiError> {
        self.record("overview");
        self.read_result()?;
        Ok(OverviewStats {
            active_users: self.users.lock().unwrap().len() as u64,
            total_rooms: 3,
            running_services: 2,
            disk_usage: "40%".to_string(),
        })
    }

    async fn services(&self) -> Result<Vec<Service>, ApiError> {
        self.record("services");
        self.read_result()?;
        Ok(vec![Service {
            name: "synapse".to_string(),
            status: ServiceState::Running,
            description: "Port: 8008".to_string(),
        }])
    }

    async fn control_service(&self, _name: &str, _op: ServiceOp) -> Result<(), ApiError> {
        self.record("control_service");
        self.mutation_result()
    }

    async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.record("users");
        self.read_result()?;
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<(), ApiError> {
        self.record("create_user");
        self.mutation_result()?;
        self.users.lock().unwrap().push(user(&new_user.username));
        Ok(())
    }

    async fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        self.record("delete_user");
        self.mutation_result()?;
        self.users.lock().unwrap().retain(|u| u.username != username);
        Ok(())
    }

    async fn backups(&self) -> Result<Vec<Backup>, ApiError> {
        self.record("backups");
        self.read_result()?;
        Ok(vec![])
    }

    async fn create_backup(&self) -> Result<(), ApiError> {
        self.record("create_backup");
        self.mutation_result()
    }

    async fn update_info(&self) -> Result<UpdateInfo, ApiError> {
        self.record("update_info");
        self.read_result()?;
        Ok(UpdateInfo {
            current_version: "v1.98.0".to_string(),
            latest_version: "Latest".to_string(),
            update_available: self.update_available.load(Ordering::SeqCst),
        })
    }

    async fn check_updates(&self) -> Result<(), ApiError> {
        self.record("check_updates");
        self.mutation_result()
    }

    async fn perform_update(&self) -> Result<(), ApiError> {
        self.record("perform_update");
        self.mutation_result()
    }

    async fn update_progress(&self) -> Result<UpdateProgress, ApiError> {
        self.record("update_progress");
        let mut steps = self.progress.lock().unwrap();
        if steps.len() > 1 {
            steps.pop_front().unwrap()
        } else {
            steps
                .front()
                .cloned()
                .unwrap_or_else(|| Err(ApiError::Network("no script".to_string())))
        }
    }
}

fn client_with(api: &Arc<FakeApi>) -> (DashboardClient, Arc<MemoryView>) {
    let view = Arc::new(MemoryView::new());
    let config = RefreshConfig {
        interval_seconds: 10,
        progress_interval_ms: 1000,
        max_progress_failures: 3,
    };
    let client = DashboardClient::new(api.clone(), view.clone(), config);
    (client, view)
}

fn rendered_users(view: &MemoryView) -> Vec<String> {
    match view.region(Region::Users) {
        Some(RegionContent::Users(users)) => users.into_iter().map(|u| u.username).collect(),
        other => panic!("Expected users region, got {:?}", other),
    }
}

// ============================================================================
// Status
// ============================================================================

#[tokio::test]
async fn test_status_online_shows_connected() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    assert_eq!(client.refresh_status().await, ConnectionState::Connected);
    assert_eq!(
        view.region(Region::Status),
        Some(RegionContent::Status(ConnectionState::Connected))
    );
    assert!(!view.error_banner());
}

#[tokio::test]
async fn test_status_offline_shows_disconnected_without_banner() {
    let api = FakeApi::online();
    *api.status.lock().unwrap() = Some("offline".to_string());
    let (client, view) = client_with(&api);

    assert_eq!(client.refresh_status().await, ConnectionState::Disconnected);
    assert!(!view.error_banner());
}

#[tokio::test]
async fn test_status_failure_raises_banner_then_recovers() {
    let api = FakeApi::online();
    *api.status.lock().unwrap() = None;
    let (client, view) = client_with(&api);

    assert_eq!(client.refresh_status().await, ConnectionState::Disconnected);
    assert!(view.error_banner());

    *api.status.lock().unwrap() = Some("online".to_string());
    assert_eq!(client.refresh_status().await, ConnectionState::Connected);
    assert!(!view.error_banner());
}

// ============================================================================
// Lists and actions
// ============================================================================

#[tokio::test]
async fn test_load_list_failure_renders_no_data() {
    let api = FakeApi::online();
    api.fail_reads.store(true, Ordering::SeqCst);
    let (client, view) = client_with(&api);

    assert!(!client.load_list(ResourceKind::Backups).await);
    assert_eq!(view.region(Region::Backups), Some(RegionContent::NoData));
    assert!(view.error_banner());
}

#[tokio::test]
async fn test_create_user_refetches_list() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    assert!(client.create_user("carol", "secret", false).await);

    assert_eq!(api.calls("create_user"), 1);
    assert_eq!(api.calls("users"), 1);
    assert!(rendered_users(&view).contains(&"carol".to_string()));
    assert_eq!(view.last_notice(), Some(Notice::success("User carol created")));
}

#[tokio::test]
async fn test_failed_create_leaves_list_untouched() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);
    client.load_list(ResourceKind::Users).await;

    api.fail_mutations.store(true, Ordering::SeqCst);
    assert!(!client.create_user("carol", "secret", false).await);

    assert_eq!(api.calls("users"), 1);
    assert_eq!(view.render_count(Region::Users), 1);
    assert_eq!(rendered_users(&view), vec!["alice", "bob"]);
    assert!(view.last_notice().unwrap().is_error());
}

#[tokio::test]
async fn test_create_user_empty_input_sends_nothing() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    assert!(!client.create_user("   ", "secret", false).await);
    assert!(!client.create_user("carol", "", false).await);

    assert_eq!(api.calls("create_user"), 0);
    assert_eq!(view.notices().len(), 2);
}

#[tokio::test]
async fn test_delete_user_absent_from_next_render() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    let deleted = client
        .perform_action(Action::DeleteUser {
            username: "bob".to_string(),
        })
        .await;

    assert!(deleted);
    assert_eq!(rendered_users(&view), vec!["alice"]);
}

#[tokio::test]
async fn test_service_action_refetches_services() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    client
        .perform_action(Action::ControlService {
            name: "synapse".to_string(),
            op: ServiceOp::Restart,
        })
        .await;

    assert_eq!(api.calls("services"), 1);
    assert_eq!(view.render_count(Region::Services), 1);
}

// ============================================================================
// Sections
// ============================================================================

#[tokio::test]
async fn test_select_local_section_fetches_nothing() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    assert!(client.select_section(Section::Settings).await);

    assert_eq!(view.section(), Some(Section::Settings));
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_select_section_loads_its_data() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    client.select_section(Section::Services).await;

    assert_eq!(client.section(), Section::Services);
    assert_eq!(api.calls("services"), 1);
    assert!(matches!(
        view.region(Region::Services),
        Some(RegionContent::Services(_))
    ));
}

#[tokio::test(start_paused = true)]
async fn test_start_loads_status_and_section() {
    let api = FakeApi::online();
    let (client, view) = client_with(&api);

    client.start().await;

    assert_eq!(api.calls("status"), 1);
    assert_eq!(api.calls("overview"), 1);
    assert_eq!(view.section(), Some(Section::Overview));
    assert!(client.is_auto_refreshing());

    client.stop();
    assert!(!client.is_auto_refreshing());
}

// ============================================================================
// Auto-refresh
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_auto_refresh_one_fetch_per_tick() {
    let api = FakeApi::online();
    let (client, _view) = client_with(&api);

    client.start_auto_refresh(Duration::from_secs(10));
    tokio::time::sleep(Duration::from_secs(35)).await;

    assert_eq!(api.calls("status"), 3);
    // Overview is the active section, so it refreshes too
    assert_eq!(api.calls("overview"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_auto_refresh_skips_overview_when_inactive() {
    let api = FakeApi::online();
    let (client, _view) = client_with(&api);
    let client = client.with_section(Section::Users);

    client.start_auto_refresh(Duration::from_secs(10));
    tokio::time::sleep(Duration::from_secs(25)).await;

    assert_eq!(api.calls("status"), 2);
    assert_eq!(api.calls("overview"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_restarting_auto_refresh_does_not_double_poll() {
    let api = FakeApi::online();
    let (client, _view) = client_with(&api);

    client.start_auto_refresh(Duration::from_secs(10));
    client.start_auto_refresh(Duration::from_secs(10));
    tokio::time::sleep(Duration::from_secs(35)).await;

    assert_eq!(api.calls("status"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_stop_cancels_auto_refresh() {
    let api = FakeApi::online();
    let (client, _view) = client_with(&api);

    client.start_auto_refresh(Duration::from_secs(10));
    tokio::time::sleep(Duration::from_secs(15)).await;
    client.stop();
    tokio::time::sleep(Duration::from_secs(60)).await;

    assert_eq!(api.calls("status"), 1);
}

// ============================================================================
// Update flow
// ============================================================================

#[tokio::test]
async fn test_check_for_updates_available() {
    let api = FakeApi::online();
    api.update_available.store(true, Ordering::SeqCst);
    let (client, view) = client_with(&api);

    assert!(client.check_for_updates().await);

    assert_eq!(client.update_phase(), UpdatePhase::UpdateAvailable);
    assert_eq!(api.calls("check_updates"), 1);
    assert!(matches!(
        view.region(Region::Updates),
        Some(RegionContent::Updates(_))
    ));
}

#[tokio::test]
async fn test_check_for_updates_failure_returns_to_idle() {
    let api = FakeApi::online();
    api.fail_mutations.store(true, Ordering::SeqCst);
    let (client, view) = client_with(&api);

    assert!(!client.check_for_updates().await);
    assert_eq!(client.update_phase(), UpdatePhase::Idle);
    assert!(view.last_notice().unwrap().is_error());
}

#[tokio::test(start_paused = true)]
async fn test_progress_polling_stops_after_completion() {
    let api = FakeApi::online();
    api.script_progress(vec![progress(30, false), progress(70, false), progress(100, true)]);
    let (client, view) = client_with(&api);

    assert!(client.perform_update().await);
    assert_eq!(client.update_phase(), UpdatePhase::Updating);

    let phase = client.wait_for_update().await;
    assert_eq!(phase, UpdatePhase::Completed);
    assert_eq!(api.calls("update_progress"), 3);
    assert_eq!(api.calls("update_info"), 1);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(api.calls("update_progress"), 3);
    assert!(!client.is_monitoring_update());
    assert_eq!(
        view.region(Region::UpdateProgress),
        Some(RegionContent::Progress(UpdateProgress {
            progress: 100,
            message: "100%".to_string(),
            completed: true,
        }))
    );
}

#[tokio::test(start_paused = true)]
async fn test_second_monitor_replaces_first() {
    let api = FakeApi::online();
    api.script_progress(vec![progress(10, false)]);
    let (client, _view) = client_with(&api);

    client.monitor_update_progress();
    client.monitor_update_progress();
    tokio::time::sleep(Duration::from_millis(1500)).await;

    assert_eq!(api.calls("update_progress"), 1);
    assert!(client.is_monitoring_update());

    client.stop();
    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(api.calls("update_progress"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_progress_failures_fail_update() {
    let api = FakeApi::online();
    api.script_progress(vec![
        progress(10, false),
        Err(ApiError::Timeout(10)),
        Err(ApiError::Timeout(10)),
        Err(ApiError::Timeout(10)),
    ]);
    let (client, view) = client_with(&api);

    client.perform_update().await;
    let phase = client.wait_for_update().await;

    assert_eq!(phase, UpdatePhase::Failed);
    assert_eq!(api.calls("update_progress"), 4);
    assert_eq!(view.region(Region::UpdateProgress), Some(RegionContent::NoData));
    assert!(view.last_notice().unwrap().is_error());
}

#[tokio::test(start_paused = true)]
async fn test_monitor_started_while_idle_gives_up_on_dead_api() {
    let api = FakeApi::online();
    api.script_progress(vec![Err(ApiError::Network("connection refused".to_string()))]);
    let (client, view) = client_with(&api);
    assert_eq!(client.update_phase(), UpdatePhase::Idle);

    client.monitor_update_progress();
    assert_eq!(client.update_phase(), UpdatePhase::Updating);

    assert_eq!(client.wait_for_update().await, UpdatePhase::Failed);
    assert_eq!(api.calls("update_progress"), 3);
    assert!(view.last_notice().unwrap().is_error());

    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(api.calls("update_progress"), 3);
}

#[tokio::test(start_paused = true)]
async fn test_progress_failure_streak_resets_on_success() {
    let api = FakeApi::online();
    api.script_progress(vec![
        Err(ApiError::Timeout(10)),
        Err(ApiError::Timeout(10)),
        progress(50, false),
        Err(ApiError::Timeout(10)),
        Err(ApiError::Timeout(10)),
        progress(100, true),
    ]);
    let (client, _view) = client_with(&api);

    client.perform_update().await;
    assert_eq!(client.wait_for_update().await, UpdatePhase::Completed);
}

#[tokio::test]
async fn test_rejected_update_does_not_monitor() {
    let api = FakeApi::online();
    api.fail_mutations.store(true, Ordering::SeqCst);
    let (client, _view) = client_with(&api);

    assert!(!client.perform_update().await);
    assert_eq!(client.update_phase(), UpdatePhase::Failed);
    assert!(!client.is_monitoring_update());
}

#[tokio::test(start_paused = true)]
async fn test_leaving_updates_section_dismisses_outcome() {
    let api = FakeApi::online();
    api.script_progress(vec![progress(100, true)]);
    let (client, _view) = client_with(&api);

    client.select_section(Section::Updates).await;
    client.perform_update().await;
    assert_eq!(client.wait_for_update().await, UpdatePhase::Completed);

    client.select_section(Section::Overview).await;
    assert_eq!(client.update_phase(), UpdatePhase::Idle);
}
