//! reqwest implementation of [`PanelApi`].

use super::{
    ApiError, Backup, NewUser, OverviewStats, PanelApi, Service, ServiceOp, SystemStatus,
    UpdateInfo, UpdateProgress, User,
};
use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Error envelope the panel returns with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the panel API.
pub struct HttpPanelApi {
    /// Base URL, e.g. `http://localhost:8081`
    base_url: Url,
    /// Shared HTTP client for connection pooling
    client: Client,
    /// Per-request timeout
    timeout_seconds: u64,
}

impl HttpPanelApi {
    /// Create a client from configuration.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("panelctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {}", e)))?;

        Self::with_client(&config.base_url, client, config.timeout_seconds)
    }

    /// Create a client with a custom reqwest client (for testing).
    pub fn with_client(
        base_url: &str,
        client: Client,
        timeout_seconds: u64,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            client,
            timeout_seconds,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `{base}/api/{segments...}`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(url = %url, "GET");

        let body = self.execute(self.client.get(url)).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request and return the body of a 2xx response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request
            .timeout(Duration::from_secs(self.timeout_seconds))
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_seconds))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::from_reqwest(e, self.timeout_seconds))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or("").to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }

    async fn post(&self, segments: &[&str]) -> Result<(), ApiError> {
        let url = self.endpoint(segments)?;
        tracing::debug!(url = %url, "POST");
        self.execute(self.client.post(url)).await.map(|_| ())
    }
}

#[async_trait]
impl PanelApi for HttpPanelApi {
    async fn status(&self) -> Result<SystemStatus, ApiError> {
        self.get_json(&["status"]).await
    }

    async fn overview(&self) -> Result<OverviewStats, ApiError> {
        self.get_json(&["overview"]).await
    }

    async fn services(&self) -> Result<Vec<Service>, ApiError> {
        self.get_json(&["services"]).await
    }

    async fn control_service(&self, name: &str, op: ServiceOp) -> Result<(), ApiError> {
        self.post(&["services", name, op.as_str()]).await
    }

    async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json(&["users"]).await
    }

    async fn create_user(&self, user: &NewUser) -> Result<(), ApiError> {
        let url = self.endpoint(&["users"])?;
        tracing::debug!(url = %url, username = %user.username, "POST");
        self.execute(self.client.post(url).json(user))
            .await
            .map(|_| ())
    }

    async fn delete_user(&self, username: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["users", username])?;
        tracing::debug!(url = %url, "DELETE");
        self.execute(self.client.delete(url)).await.map(|_| ())
    }

    async fn backups(&self) -> Result<Vec<Backup>, ApiError> {
        self.get_json(&["backup"]).await
    }

    async fn create_backup(&self) -> Result<(), ApiError> {
        self.post(&["backup"]).await
    }

    async fn update_info(&self) -> Result<UpdateInfo, ApiError> {
        self.get_json(&["updates"]).await
    }

    async fn check_updates(&self) -> Result<(), ApiError> {
        self.post(&["updates", "check"]).await
    }

    async fn perform_update(&self) -> Result<(), ApiError> {
        self.post(&["updates", "perform"]).await
    }

    async fn update_progress(&self) -> Result<UpdateProgress, ApiError> {
        self.get_json(&["updates", "progress"]).await
    }
}
