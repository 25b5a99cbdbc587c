//! Error types for semaphore-action.
//!
//! Keeps the messages shown to a pipeline operator short and free of nested
//! error-prefix noise.

use semaphore_link::SemaphoreLinkError;
use std::fmt;

/// Result type for the action binary
pub type Result<T> = std::result::Result<T, ActionError>;

/// Errors that can occur while running the action
#[derive(Debug)]
pub enum ActionError {
    /// Error from the semaphore-link library
    LinkError(SemaphoreLinkError),

    /// The output file could not be written
    OutputError(String),
}

impl ActionError {
    fn format_link_error(err: &SemaphoreLinkError) -> String {
        match err {
            SemaphoreLinkError::NetworkError(msg) => Self::clean_nested_message(msg),
            SemaphoreLinkError::WebSocketError(msg) => Self::clean_nested_message(msg),
            other => other.to_string(),
        }
    }

    fn clean_nested_message(message: &str) -> String {
        let mut cleaned = message.trim();
        let prefixes = [
            "Connection failed:",
            "connection failed:",
            "Network error:",
            "network error:",
        ];

        loop {
            let mut stripped = false;
            for prefix in &prefixes {
                if let Some(rest) = cleaned.strip_prefix(prefix) {
                    cleaned = rest.trim_start();
                    stripped = true;
                    break;
                }
            }

            if !stripped {
                break;
            }
        }

        cleaned.to_string()
    }
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::LinkError(e) => write!(f, "{}", Self::format_link_error(e)),
            ActionError::OutputError(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<SemaphoreLinkError> for ActionError {
    fn from(err: SemaphoreLinkError) -> Self {
        ActionError::LinkError(err)
    }
}
