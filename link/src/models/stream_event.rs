use serde::{Deserialize, Serialize};

use super::task_status::TaskStatus;

/// A message received on the live event stream.
///
/// The stream multiplexes every task on the server, so each event carries the
/// task it is scoped to — except service-level events, which have no task id
/// at all and deserialize to [`Unknown`](StreamEvent::Unknown) or carry
/// `task_id: None`. Filtering is by identity only: an event without a task id
/// must never be assumed to belong to any particular task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum StreamEvent {
    /// A chunk of task output
    Log {
        /// Task the output belongs to, when scoped
        #[serde(default)]
        task_id: Option<i64>,

        /// Project the task belongs to
        #[serde(default)]
        project_id: Option<i64>,

        /// Emission timestamp (RFC 3339)
        #[serde(default)]
        time: Option<String>,

        /// Raw output text (may contain terminal escape sequences)
        #[serde(default)]
        output: String,
    },

    /// A status transition notification
    Update {
        /// Task the transition belongs to, when scoped
        #[serde(default)]
        task_id: Option<i64>,

        /// Project the task belongs to
        #[serde(default)]
        project_id: Option<i64>,

        /// Template the task was launched from
        #[serde(default)]
        template_id: Option<i64>,

        /// The status the task moved to
        status: TaskStatus,

        /// Execution start timestamp, once set
        #[serde(default)]
        start: Option<String>,

        /// Execution end timestamp, once set
        #[serde(default)]
        end: Option<String>,
    },

    /// Any message type this client does not know (service-level events)
    #[serde(other)]
    Unknown,
}

impl StreamEvent {
    /// The task this event is scoped to, if any.
    ///
    /// Absent ids stay `None` — they are never coerced to a sentinel that
    /// could alias a real task id.
    pub fn task_id(&self) -> Option<i64> {
        match self {
            StreamEvent::Log { task_id, .. } | StreamEvent::Update { task_id, .. } => *task_id,
            StreamEvent::Unknown => None,
        }
    }

    /// True when this event is scoped to exactly `task_id`.
    pub fn is_for(&self, task_id: i64) -> bool {
        self.task_id() == Some(task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_update_message() {
        // Captured from a live stream.
        let event: StreamEvent = serde_json::from_str(
            r#"{
                "end": null,
                "project_id": 1,
                "start": "2024-03-25T13:13:12.519270403+02:00",
                "status": "running",
                "task_id": 1011,
                "template_id": 44,
                "type": "update",
                "version": null,
                "output": ""
            }"#,
        )
        .unwrap();

        assert_eq!(event.task_id(), Some(1011));
        match event {
            StreamEvent::Update { status, start, end, .. } => {
                assert_eq!(status, TaskStatus::Running);
                assert!(start.is_some());
                assert!(end.is_none());
            }
            other => panic!("expected update event, got {:?}", other),
        }
    }

    #[test]
    fn test_parses_log_message() {
        let event: StreamEvent = serde_json::from_str(
            r#"{
                "output": "Started: 1011",
                "project_id": 1,
                "task_id": 1011,
                "time": "2024-03-25T13:13:12.518262242+02:00",
                "type": "log"
            }"#,
        )
        .unwrap();

        assert!(event.is_for(1011));
        match event {
            StreamEvent::Log { output, .. } => assert_eq!(output, "Started: 1011"),
            other => panic!("expected log event, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_task_id_is_none() {
        let event: StreamEvent = serde_json::from_str(
            r#"{"type": "log", "output": "service restarted"}"#,
        )
        .unwrap();

        assert_eq!(event.task_id(), None);
        assert!(!event.is_for(0), "absent id must not alias task id 0");
    }

    #[test]
    fn test_unknown_message_type() {
        let event: StreamEvent =
            serde_json::from_str(r#"{"type": "session", "user": "admin"}"#).unwrap();
        assert_eq!(event, StreamEvent::Unknown);
        assert_eq!(event.task_id(), None);
    }

    #[test]
    fn test_malformed_payload_is_an_error() {
        assert!(serde_json::from_str::<StreamEvent>("[1, 2, 3]").is_err());
        assert!(serde_json::from_str::<StreamEvent>(r#"{"type": "update"}"#).is_err());
    }
}
