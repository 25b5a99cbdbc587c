//! Error types for semaphore-link.

use thiserror::Error;

/// Result type for semaphore-link operations.
pub type Result<T> = std::result::Result<T, SemaphoreLinkError>;

/// Errors that can occur when talking to a Semaphore server.
#[derive(Debug, Error)]
pub enum SemaphoreLinkError {
    /// Transport-level HTTP failure (DNS, TCP, TLS, broken connection).
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Client was misconfigured (missing base URL, bad credential value).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The server answered with a non-success status code.
    #[error("Server error ({status_code}): {message}")]
    ServerError {
        /// HTTP status code returned by the server
        status_code: u16,
        /// Error detail extracted from the response body
        message: String,
    },

    /// WebSocket handshake or transport failure.
    #[error("WebSocket error: {0}")]
    WebSocketError(String),

    /// A payload could not be decoded from its wire encoding.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An operation did not complete within its configured timeout.
    #[error("Timeout: {0}")]
    TimeoutError(String),
}

impl From<reqwest::Error> for SemaphoreLinkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            SemaphoreLinkError::TimeoutError(err.to_string())
        } else if err.is_decode() {
            SemaphoreLinkError::SerializationError(err.to_string())
        } else {
            SemaphoreLinkError::NetworkError(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SemaphoreLinkError {
    fn from(err: serde_json::Error) -> Self {
        SemaphoreLinkError::SerializationError(err.to_string())
    }
}
