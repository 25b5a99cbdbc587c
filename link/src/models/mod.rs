//! Data models for the semaphore-link client library.
//!
//! Defines the task control DTOs and the wire format of live stream
//! messages.

pub mod error_detail;
pub mod stream_event;
pub mod task;
pub mod task_request;
pub mod task_status;

pub use error_detail::ErrorDetail;
pub use stream_event::StreamEvent;
pub use task::Task;
pub use task_request::TaskRequest;
pub use task_status::TaskStatus;
