use serde::{Deserialize, Serialize};

use super::task_status::TaskStatus;

/// A task as reported by the control API.
///
/// Owned by the server; this client only ever holds an eventually-consistent
/// read-only view. Timestamps are RFC 3339 strings and are passed through
/// opaquely — nothing in the monitoring protocol interprets them. Fields the
/// server adds in future versions are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task ID assigned by the server
    pub id: i64,

    /// Template the task was launched from
    pub template_id: i64,

    /// Project the task belongs to
    pub project_id: i64,

    /// Current lifecycle status
    pub status: TaskStatus,

    /// Whether the task runs in debug mode
    #[serde(default)]
    pub debug: bool,

    /// Whether the task is a dry run
    #[serde(default)]
    pub dry_run: bool,

    /// Creation timestamp (RFC 3339), if set
    #[serde(default)]
    pub created: Option<String>,

    /// Execution start timestamp (RFC 3339), absent until the task starts
    #[serde(default)]
    pub start: Option<String>,

    /// Execution end timestamp (RFC 3339), absent until the task finishes
    #[serde(default)]
    pub end: Option<String>,

    /// Server-side message attached to the task (usually empty)
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Captured from POST /project/1/tasks against a live server.
    const TASK_CREATED: &str = r#"{
        "id": 5205,
        "template_id": 44,
        "project_id": 1,
        "status": "waiting",
        "debug": false,
        "dry_run": false,
        "diff": false,
        "playbook": "",
        "environment": "{}",
        "limit": "",
        "user_id": 1,
        "created": "2025-12-04T11:38:43.290584995+02:00",
        "start": null,
        "end": null,
        "message": "",
        "commit_hash": null,
        "commit_message": "",
        "build_task_id": null,
        "version": null,
        "arguments": null
    }"#;

    #[test]
    fn test_parses_creation_response() {
        let task: Task = serde_json::from_str(TASK_CREATED).unwrap();
        assert_eq!(task.id, 5205);
        assert_eq!(task.template_id, 44);
        assert_eq!(task.project_id, 1);
        assert_eq!(task.status, TaskStatus::Waiting);
        assert!(task.start.is_none());
        assert!(task.end.is_none());
    }

    #[test]
    fn test_parses_finished_task() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": 1011,
                "template_id": 44,
                "project_id": 1,
                "status": "success",
                "created": "2024-03-25T13:13:12Z",
                "start": "2024-03-25T13:13:12Z",
                "end": "2024-03-25T13:16:18Z"
            }"#,
        )
        .unwrap();
        assert!(task.status.is_terminal());
        assert_eq!(task.end.as_deref(), Some("2024-03-25T13:16:18Z"));
        assert_eq!(task.message, "");
    }
}
