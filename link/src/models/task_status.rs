use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Lifecycle status of a task, as reported by the server.
///
/// `Success` and `Error` are the only terminal values. Any status string this
/// client does not know is carried opaquely in [`Other`](TaskStatus::Other)
/// and treated as non-terminal, so new server-side states never break
/// monitoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// Queued, not yet picked up by a runner
    Waiting,
    /// Runner is preparing the task
    Starting,
    /// Task is executing
    Running,
    /// Task finished successfully (terminal)
    Success,
    /// Task failed (terminal)
    Error,
    /// Any other status value, passed through verbatim
    Other(String),
}

impl TaskStatus {
    /// Parse a wire status string. Never fails: unknown values map to `Other`.
    pub fn parse(value: &str) -> Self {
        match value {
            "waiting" => TaskStatus::Waiting,
            "starting" => TaskStatus::Starting,
            "running" => TaskStatus::Running,
            "success" => TaskStatus::Success,
            "error" => TaskStatus::Error,
            other => TaskStatus::Other(other.to_string()),
        }
    }

    /// The lowercase wire form of this status.
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Waiting => "waiting",
            TaskStatus::Starting => "starting",
            TaskStatus::Running => "running",
            TaskStatus::Success => "success",
            TaskStatus::Error => "error",
            TaskStatus::Other(s) => s.as_str(),
        }
    }

    /// True exactly for `success` and `error`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Error)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for TaskStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TaskStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(TaskStatus::parse(&value))
    }
}
