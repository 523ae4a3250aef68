//! Shared test utilities for panelctl integration tests.
//!
//! Builds dashboard clients wired to a wiremock panel and provides canned
//! JSON bodies matching what the panel API returns.

#![allow(dead_code)]

use panelctl::api::HttpPanelApi;
use panelctl::config::RefreshConfig;
use panelctl::dashboard::DashboardClient;
use panelctl::view::MemoryView;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Refresh settings with short periods so tests finish quickly.
pub fn fast_refresh() -> RefreshConfig {
    RefreshConfig {
        interval_seconds: 30,
        progress_interval_ms: 20,
        max_progress_failures: 3,
    }
}

/// Create a dashboard client against `server`, rendering into a memory view.
pub fn make_client(server: &MockServer) -> (DashboardClient, Arc<MemoryView>) {
    let api = HttpPanelApi::with_client(&server.uri(), reqwest::Client::new(), 5)
        .expect("mock server URI is a valid base URL");
    let view = Arc::new(MemoryView::new());
    let client = DashboardClient::new(Arc::new(api), view.clone(), fast_refresh());
    (client, view)
}

/// Mount a GET handler returning `body` with status 200.
pub async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn status_body(status: &str) -> Value {
    json!({ "status": status })
}

pub fn overview_body() -> Value {
    json!({
        "activeUsers": 12,
        "totalRooms": 4,
        "runningServices": 5,
        "diskUsage": "42%"
    })
}

pub fn users_body(names: &[&str]) -> Value {
    Value::Array(
        names
            .iter()
            .map(|name| json!({ "username": name, "email": "", "status": "active" }))
            .collect(),
    )
}

pub fn update_info_body(update_available: bool) -> Value {
    json!({
        "currentVersion": "v1.98.0",
        "latestVersion": if update_available { "v1.99.0" } else { "v1.98.0" },
        "updateAvailable": update_available
    })
}

pub fn progress_body(progress: u8, completed: bool) -> Value {
    json!({ "progress": progress, "message": "Working", "completed": completed })
}
