use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Event, EventDraft},
    protocol::{HealthResponse, ListEventsResponse},
};
use tracing::{debug, warn};

pub mod actions;
pub mod config;
pub mod error;
pub mod selectors;
pub mod state;
pub mod store;
pub mod workflow;

pub use actions::{EventsAction, RequestKind};
pub use config::{load_settings, ClientSettings};
pub use error::ApiError;
pub use state::{reduce, EventsState, SubmitStatus};
pub use store::EventStore;
pub use workflow::{DispatchError, EventsHandle, EventsWorkflow, SubmitError};

pub const BACKEND_UNREACHABLE_STATUS: &str = "error - is the backend running?";

/// Network boundary for the events collection.
#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError>;
    async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError>;
}

/// [`EventsApi`] over HTTP/JSON.
pub struct HttpEventsClient {
    http: Client,
    base_url: String,
}

impl HttpEventsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Liveness probe against `GET /`.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let res = self.http.get(format!("{}/", self.base_url)).send().await?;
        decode_json(ensure_success(res)?).await
    }

    /// Status text for display: the reported status, or a fixed hint when the
    /// backend cannot be reached or answers with garbage.
    pub async fn backend_status_label(&self) -> String {
        match self.health().await {
            Ok(health) => health.status,
            Err(err) => {
                warn!(error = %err, base_url = %self.base_url, "backend health check failed");
                BACKEND_UNREACHABLE_STATUS.to_string()
            }
        }
    }
}

#[async_trait]
impl EventsApi for HttpEventsClient {
    async fn list_events(&self) -> Result<Vec<Event>, ApiError> {
        let res = self
            .http
            .get(format!("{}/events", self.base_url))
            .send()
            .await?;
        let body: ListEventsResponse = decode_json(ensure_success(res)?).await?;
        debug!(count = body.events.len(), "decoded events list");
        Ok(body.events)
    }

    async fn create_event(&self, draft: &EventDraft) -> Result<Event, ApiError> {
        let res = self
            .http
            .post(format!("{}/events", self.base_url))
            .json(draft)
            .send()
            .await?;
        decode_json(ensure_success(res)?).await
    }
}

fn ensure_success(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
        })
    }
}

async fn decode_json<T: DeserializeOwned>(res: Response) -> Result<T, ApiError> {
    let bytes = res.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
