//! Main Semaphore client with builder pattern.
//!
//! One client owns one configuration (base URLs, credential, timeouts) —
//! there is no process-wide state, so isolated clients can coexist, e.g. in
//! tests.

use crate::{
    auth::AuthProvider,
    error::{Result, SemaphoreLinkError},
    models::{Task, TaskRequest},
    monitor::{CompletionMonitor, MonitorHandlers, MonitorResult},
    stream::{resolve_ws_url, TaskEventStream},
    tasks::{ControlApiOracle, TaskApi},
    timeouts::LinkTimeouts,
};

/// Client for the Semaphore task API and its live event stream.
///
/// Use [`SemaphoreClient::builder`] to construct instances.
///
/// # Examples
///
/// ```rust,no_run
/// use semaphore_link::{MonitorHandlers, SemaphoreClient, TaskRequest};
///
/// # async fn example() -> semaphore_link::Result<()> {
/// let client = SemaphoreClient::builder()
///     .base_url("http://localhost:3000/api")
///     .api_token("f4ws0obik6...")
///     .build()?;
///
/// let task = client.start_task(1, &TaskRequest::new(44)).await?;
/// let result = client
///     .watch(1, task.id, MonitorHandlers::new().on_log(|line| println!("{}", line)))
///     .await?;
/// println!("task {} ended: {}", result.task_id, result.outcome.summary());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SemaphoreClient {
    base_url: String,
    ws_url: Option<String>,
    auth: AuthProvider,
    task_api: TaskApi,
    timeouts: LinkTimeouts,
}

impl SemaphoreClient {
    /// Create a new builder for configuring the client
    pub fn builder() -> SemaphoreClientBuilder {
        SemaphoreClientBuilder::new()
    }

    /// Launch a task from a template and return its server-side record.
    ///
    /// Fire-and-forget: the caller usually only keeps `task.id` and hands it
    /// to [`watch`](Self::watch).
    pub async fn start_task(&self, project_id: i64, request: &TaskRequest) -> Result<Task> {
        self.task_api.start(project_id, request).await
    }

    /// Fetch the current state of a single task (point-in-time, no retry).
    pub async fn task_status(&self, project_id: i64, task_id: i64) -> Result<Task> {
        self.task_api.get(project_id, task_id).await
    }

    /// Open the live event stream.
    pub async fn events(&self) -> Result<TaskEventStream> {
        let endpoint = resolve_ws_url(&self.base_url, self.ws_url.as_deref());
        TaskEventStream::connect(&endpoint, &self.auth, &self.timeouts).await
    }

    /// The status-query fallback for `project_id`, as used by the monitor.
    pub fn status_oracle(&self, project_id: i64) -> ControlApiOracle {
        ControlApiOracle::new(self.task_api.clone(), project_id)
    }

    /// Watch `task_id` until it reaches a terminal status or the stream
    /// closes.
    ///
    /// Opens the event stream, wires it to a [`CompletionMonitor`] together
    /// with the status-query fallback, and runs the session to completion.
    /// Only the initial connection can fail; once the stream is open the
    /// session always produces a [`MonitorResult`].
    pub async fn watch(
        &self,
        project_id: i64,
        task_id: i64,
        handlers: MonitorHandlers,
    ) -> Result<MonitorResult> {
        let stream = self.events().await?;
        let oracle = self.status_oracle(project_id);
        let monitor = CompletionMonitor::new(task_id, stream, oracle).with_handlers(handlers);
        Ok(monitor.run().await)
    }

    /// The configured timeouts
    pub fn timeouts(&self) -> &LinkTimeouts {
        &self.timeouts
    }
}

/// Builder for configuring [`SemaphoreClient`] instances.
pub struct SemaphoreClientBuilder {
    base_url: Option<String>,
    ws_url: Option<String>,
    auth: AuthProvider,
    timeouts: LinkTimeouts,
}

impl SemaphoreClientBuilder {
    fn new() -> Self {
        Self {
            base_url: None,
            ws_url: None,
            auth: AuthProvider::none(),
            timeouts: LinkTimeouts::default(),
        }
    }

    /// Set the base URL of the HTTP API (required), e.g.
    /// `http://localhost:3000/api`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the WebSocket base URL. When unset, it is derived from the
    /// base URL by rewriting the scheme.
    pub fn ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = Some(url.into());
        self
    }

    /// Set API token authentication
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.auth = AuthProvider::api_token(token);
        self
    }

    /// Set the authentication provider directly
    pub fn auth(mut self, auth: AuthProvider) -> Self {
        self.auth = auth;
        self
    }

    /// Set the timeout configuration
    pub fn timeouts(mut self, timeouts: LinkTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SemaphoreClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| SemaphoreLinkError::ConfigurationError("base_url is required".into()))?;

        let mut client_builder = reqwest::Client::builder();
        if !LinkTimeouts::is_no_timeout(self.timeouts.request_timeout) {
            client_builder = client_builder.timeout(self.timeouts.request_timeout);
        }
        if !LinkTimeouts::is_no_timeout(self.timeouts.connection_timeout) {
            client_builder = client_builder.connect_timeout(self.timeouts.connection_timeout);
        }
        let http_client = client_builder
            .build()
            .map_err(|e| SemaphoreLinkError::ConfigurationError(e.to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let task_api = TaskApi::new(base_url.clone(), http_client, self.auth.clone());

        Ok(SemaphoreClient {
            base_url,
            ws_url: self.ws_url,
            auth: self.auth,
            task_api,
            timeouts: self.timeouts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_builder_pattern() {
        let result = SemaphoreClient::builder()
            .base_url("http://localhost:3000/api")
            .api_token("test_token")
            .timeouts(LinkTimeouts::fast())
            .build();

        assert!(result.is_ok());
        let client = result.unwrap();
        assert!(client.auth.is_authenticated());
        assert_eq!(client.timeouts().request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_builder_missing_url() {
        let result = SemaphoreClient::builder().build();
        assert!(matches!(
            result,
            Err(SemaphoreLinkError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_builder_trims_trailing_slash() {
        let client = SemaphoreClient::builder()
            .base_url("http://localhost:3000/api/")
            .build()
            .unwrap();
        assert_eq!(client.base_url, "http://localhost:3000/api");
    }
}
