//! Timeout configuration for Semaphore client operations.

use std::time::Duration;

/// Timeouts applied to HTTP requests and the WebSocket handshake.
///
/// There is deliberately no overall session deadline: a monitoring session
/// runs until the watched task finishes or the stream closes, and operators
/// bound total runtime externally (process-level timeout).
///
/// # Examples
///
/// ```rust
/// use semaphore_link::LinkTimeouts;
///
/// // Defaults (recommended)
/// let timeouts = LinkTimeouts::default();
///
/// // Aggressive timeouts for local development
/// let timeouts = LinkTimeouts::fast();
///
/// // Custom values
/// let timeouts = LinkTimeouts::default()
///     .connection_timeout_secs(60)
///     .request_timeout_secs(120);
/// ```
#[derive(Debug, Clone)]
pub struct LinkTimeouts {
    /// Timeout for establishing connections (TCP + TLS + WS handshake).
    /// Zero disables the limit. Default: 10 seconds
    pub connection_timeout: Duration,

    /// Timeout for a single HTTP request/response round trip.
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl Default for LinkTimeouts {
    fn default() -> Self {
        Self {
            connection_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl LinkTimeouts {
    /// Timeouts optimized for localhost development and tests.
    pub fn fast() -> Self {
        Self {
            connection_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }

    /// Set the connection timeout in seconds (0 disables the limit).
    pub fn connection_timeout_secs(mut self, secs: u64) -> Self {
        self.connection_timeout = Duration::from_secs(secs);
        self
    }

    /// Set the request timeout in seconds.
    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = Duration::from_secs(secs);
        self
    }

    /// Check if a duration represents "no timeout".
    pub fn is_no_timeout(duration: Duration) -> bool {
        duration.is_zero()
    }
}
