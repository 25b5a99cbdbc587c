//! Authentication provider for the Semaphore client.
//!
//! Semaphore API tokens are presented as a static bearer credential on both
//! the REST API and the WebSocket handshake.

use crate::error::{Result, SemaphoreLinkError};
use tokio_tungstenite::tungstenite::http;

/// Authentication credentials for a Semaphore server.
///
/// # Examples
///
/// ```rust
/// use semaphore_link::AuthProvider;
///
/// // API token authentication
/// let auth = AuthProvider::api_token("f4ws0obik6...");
///
/// // No authentication (e.g. a server behind a trusted proxy)
/// let auth = AuthProvider::none();
/// ```
#[derive(Debug, Clone)]
pub enum AuthProvider {
    /// Static API token, sent as `Authorization: Bearer <token>`
    ApiToken(String),

    /// No authentication
    None,
}

impl AuthProvider {
    /// Create API token authentication
    pub fn api_token(token: impl Into<String>) -> Self {
        Self::ApiToken(token.into())
    }

    /// No authentication
    pub fn none() -> Self {
        Self::None
    }

    /// Attach the Authorization header to an HTTP request builder
    pub fn apply_to_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::ApiToken(token) => request.bearer_auth(token),
            Self::None => request,
        }
    }

    /// Attach the Authorization header to a WebSocket handshake request
    pub fn apply_to_ws_request(&self, request: &mut http::Request<()>) -> Result<()> {
        if let Self::ApiToken(token) = self {
            let value = format!("Bearer {}", token);
            let header_value = http::HeaderValue::from_str(&value).map_err(|e| {
                SemaphoreLinkError::ConfigurationError(format!(
                    "Invalid API token for Authorization header: {}",
                    e
                ))
            })?;
            request
                .headers_mut()
                .insert(http::header::AUTHORIZATION, header_value);
        }
        Ok(())
    }

    /// Check if authentication is configured
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::None)
    }
}
