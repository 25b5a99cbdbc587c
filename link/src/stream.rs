//! Live event stream client.
//!
//! Opens one persistent WebSocket connection to the server's `/ws` endpoint
//! and decodes each inbound text frame into a [`StreamEvent`]. The stream
//! multiplexes every task on the server; filtering is the consumer's job.

use crate::{
    auth::AuthProvider,
    error::{Result, SemaphoreLinkError},
    models::StreamEvent,
    timeouts::LinkTimeouts,
};
use futures_util::{SinkExt, StreamExt};
use log::debug;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{client::IntoClientRequest, error::Error as WsError, protocol::Message},
};

type WebSocketStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// Build the stream endpoint URL.
///
/// An explicit WS base URL wins; otherwise the HTTP base URL is reused with
/// its scheme rewritten. The stream always lives under `/ws`.
pub(crate) fn resolve_ws_url(base_url: &str, ws_url: Option<&str>) -> String {
    let ws_base = match ws_url {
        Some(url) => url.trim_end_matches('/').to_string(),
        None => base_url
            .trim_end_matches('/')
            .replace("http://", "ws://")
            .replace("https://", "wss://"),
    };
    format!("{}/ws", ws_base)
}

/// A single long-lived subscription to the server's event stream.
///
/// Events arrive in connection order and the sequence is unbounded until the
/// server closes the connection or a transport error occurs. Waiting for the
/// next message suspends only the calling task.
pub struct TaskEventStream {
    ws_stream: WebSocketStream,
    closed: bool,
}

impl TaskEventStream {
    /// Connect and authenticate with a bearer credential.
    pub(crate) async fn connect(
        endpoint: &str,
        auth: &AuthProvider,
        timeouts: &LinkTimeouts,
    ) -> Result<Self> {
        let mut request = endpoint.into_client_request().map_err(|e| {
            SemaphoreLinkError::WebSocketError(format!("Failed to build WebSocket request: {}", e))
        })?;
        auth.apply_to_ws_request(&mut request)?;

        debug!("[LINK_WS] Connecting to {}", endpoint);

        let connect_result = if !LinkTimeouts::is_no_timeout(timeouts.connection_timeout) {
            tokio::time::timeout(timeouts.connection_timeout, connect_async(request)).await
        } else {
            Ok(connect_async(request).await)
        };

        let ws_stream = match connect_result {
            Ok(Ok((stream, _))) => stream,
            Ok(Err(WsError::Http(response))) => {
                let status = response.status();
                let body_text = response
                    .into_body()
                    .as_ref()
                    .and_then(|b| {
                        if b.is_empty() {
                            None
                        } else {
                            Some(String::from_utf8_lossy(b).into_owned())
                        }
                    })
                    .unwrap_or_default();

                let message = match status.as_u16() {
                    401 => "Unauthorized: event stream requires a valid API token".to_string(),
                    403 => "Forbidden: access to the event stream denied".to_string(),
                    code => {
                        if body_text.is_empty() {
                            format!("WebSocket HTTP error: {}", code)
                        } else {
                            format!("WebSocket HTTP error {}: {}", code, body_text)
                        }
                    }
                };
                return Err(SemaphoreLinkError::WebSocketError(message));
            }
            Ok(Err(e)) => {
                return Err(SemaphoreLinkError::WebSocketError(format!(
                    "Connection failed: {}",
                    e
                )));
            }
            Err(_) => {
                return Err(SemaphoreLinkError::TimeoutError(format!(
                    "Connection timeout ({:?})",
                    timeouts.connection_timeout
                )));
            }
        };

        debug!("[LINK_WS] Connected");
        Ok(Self {
            ws_stream,
            closed: false,
        })
    }

    /// Receive the next decoded event.
    ///
    /// Returns `None` once the connection has closed (server close frame,
    /// stream end, or after a transport error — the stream fuses). A
    /// malformed payload yields `Some(Err(SerializationError))` and leaves
    /// the connection usable; the caller decides whether to skip or abort.
    pub async fn next_event(&mut self) -> Option<Result<StreamEvent>> {
        if self.closed {
            return None;
        }

        loop {
            match self.ws_stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return Some(
                        serde_json::from_str::<StreamEvent>(text.as_str()).map_err(|e| {
                            SemaphoreLinkError::SerializationError(format!(
                                "Malformed stream message: {}",
                                e
                            ))
                        }),
                    );
                }
                Some(Ok(Message::Close(_))) => {
                    debug!("[LINK_WS] Server closed the connection");
                    self.closed = true;
                    return None;
                }
                Some(Ok(Message::Ping(payload))) => {
                    // Keep the connection alive while the task runs.
                    let _ = self.ws_stream.send(Message::Pong(payload)).await;
                }
                Some(Ok(_)) => {
                    // Binary, Pong and raw frames carry no events.
                }
                Some(Err(e)) => {
                    self.closed = true;
                    return Some(Err(SemaphoreLinkError::WebSocketError(e.to_string())));
                }
                None => {
                    debug!("[LINK_WS] Stream ended");
                    self.closed = true;
                    return None;
                }
            }
        }
    }

    /// Close the connection gracefully. Safe to call more than once.
    pub async fn shutdown(&mut self) {
        if !self.closed {
            self.closed = true;
            let _ = self.ws_stream.close(None).await;
        }
    }

    /// Returns `true` once the connection is no longer usable.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
