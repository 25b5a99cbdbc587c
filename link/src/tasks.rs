//! Task control over the HTTP API: launching a task and the point-in-time
//! status query.
//!
//! Neither call retries internally. The status query is used by the
//! completion monitor to break stream ambiguity, and its caller already
//! treats failures as non-fatal; layering retries underneath would only hide
//! that policy.

use crate::{
    auth::AuthProvider,
    error::{Result, SemaphoreLinkError},
    models::{ErrorDetail, Task, TaskRequest},
    monitor::StatusOracle,
};
use async_trait::async_trait;
use log::{debug, warn};

/// HTTP access to the task endpoints of a project.
#[derive(Clone)]
pub(crate) struct TaskApi {
    base_url: String,
    http_client: reqwest::Client,
    auth: AuthProvider,
}

impl TaskApi {
    pub(crate) fn new(base_url: String, http_client: reqwest::Client, auth: AuthProvider) -> Self {
        Self {
            base_url,
            http_client,
            auth,
        }
    }

    /// Launch a task from a template: `POST /project/{project_id}/tasks`.
    ///
    /// Returns the created task (status starts at `waiting`).
    pub(crate) async fn start(&self, project_id: i64, request: &TaskRequest) -> Result<Task> {
        let url = format!("{}/project/{}/tasks", self.base_url, project_id);
        debug!(
            "[LINK_HTTP] POST {} (template_id={})",
            url, request.template_id
        );

        let req_builder = self.http_client.post(&url).json(request);
        let response = self.auth.apply_to_request(req_builder).send().await?;
        Self::decode(response).await
    }

    /// Fetch the current state of a single task:
    /// `GET /project/{project_id}/tasks/{task_id}`.
    pub(crate) async fn get(&self, project_id: i64, task_id: i64) -> Result<Task> {
        let url = format!("{}/project/{}/tasks/{}", self.base_url, project_id, task_id);
        debug!("[LINK_HTTP] GET {}", url);

        let req_builder = self.http_client.get(&url);
        let response = self.auth.apply_to_request(req_builder).send().await?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Task> {
        let status = response.status();
        if status.is_success() {
            let task: Task = response.json().await?;
            debug!(
                "[LINK_HTTP] Response: status={} task={} ({})",
                status, task.id, task.status
            );
            return Ok(task);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = extract_error_message(&body);
        warn!(
            "[LINK_HTTP] Server error: status={} message=\"{}\"",
            status, message
        );
        Err(SemaphoreLinkError::ServerError {
            status_code: status.as_u16(),
            message,
        })
    }
}

/// The point-in-time status query, bound to one project.
///
/// This is the second source of truth the completion monitor falls back to
/// when the stream cannot attribute an event to the watched task.
#[derive(Clone)]
pub struct ControlApiOracle {
    api: TaskApi,
    project_id: i64,
}

impl ControlApiOracle {
    pub(crate) fn new(api: TaskApi, project_id: i64) -> Self {
        Self { api, project_id }
    }
}

#[async_trait]
impl StatusOracle for ControlApiOracle {
    async fn current_status(&mut self, task_id: i64) -> Result<Task> {
        self.api.get(self.project_id, task_id).await
    }
}

/// Pull the most descriptive detail out of an error body, falling back to the
/// raw text when it is not the structured `{error, status, message}` shape.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorDetail>(body)
        .ok()
        .and_then(|detail| detail.detail().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}
