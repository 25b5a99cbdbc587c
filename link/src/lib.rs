//! # semaphore-link: Semaphore task client library
//!
//! A client library for launching tasks on a Semaphore server and watching
//! them to completion over the live event stream.
//!
//! ## Features
//!
//! - **Task control**: launch a task from a template and query its state via
//!   the HTTP API
//! - **Live events**: subscribe to the server-wide event stream over
//!   WebSocket, authenticated with a bearer token
//! - **Completion monitoring**: an explicit state machine that filters the
//!   multiplexed stream by task id and falls back to a point-in-time status
//!   query whenever an event cannot be attributed to the watched task
//! - **Log sanitizing**: terminal escape sequences are stripped from task
//!   output before it reaches observers
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use semaphore_link::{MonitorHandlers, SemaphoreClient, TaskRequest};
//!
//! #[tokio::main]
//! async fn main() -> semaphore_link::Result<()> {
//!     let client = SemaphoreClient::builder()
//!         .base_url("http://localhost:3000/api")
//!         .api_token("your-api-token")
//!         .build()?;
//!
//!     // Launch a task from template 44 in project 1
//!     let task = client.start_task(1, &TaskRequest::new(44)).await?;
//!     println!("started task {}", task.id);
//!
//!     // Watch it until it finishes, printing its output as it arrives
//!     let handlers = MonitorHandlers::new()
//!         .on_log(|line| println!("{}", line))
//!         .on_status(|status| eprintln!("status: {}", status));
//!     let result = client.watch(1, task.id, handlers).await?;
//!
//!     println!("final status: {}", result.outcome.summary());
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod monitor;
pub mod sanitize;
pub mod stream;
pub mod tasks;
pub mod timeouts;

// Re-export main types for convenience
pub use auth::AuthProvider;
pub use client::{SemaphoreClient, SemaphoreClientBuilder};
pub use error::{Result, SemaphoreLinkError};
pub use models::{StreamEvent, Task, TaskRequest, TaskStatus};
pub use monitor::{
    CompletionMonitor, EventSource, MonitorHandlers, MonitorOutcome, MonitorResult, MonitorState,
    StatusOracle,
};
pub use sanitize::strip_ansi;
pub use stream::TaskEventStream;
pub use tasks::ControlApiOracle;
pub use timeouts::LinkTimeouts;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
