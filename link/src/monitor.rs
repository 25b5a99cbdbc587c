//! Completion monitoring for a single launched task.
//!
//! The live stream and the point-in-time status query are two independent
//! sources of truth about the same task. [`CompletionMonitor`] reconciles
//! them with an explicit state machine: it consumes stream events one by
//! one, and whenever an event cannot be attributed to the watched task by
//! id, it consults the status query instead of guessing. The observed stream
//! has carried service-level events without any task scope, so an
//! unattributable event is a signal to re-check, not noise to drop blindly.

use crate::{
    error::{Result, SemaphoreLinkError},
    models::{StreamEvent, Task, TaskStatus},
    sanitize::strip_ansi,
    stream::TaskEventStream,
};
use async_trait::async_trait;
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Source of decoded stream events.
///
/// Implemented by [`TaskEventStream`](crate::stream::TaskEventStream); tests
/// substitute scripted fakes.
#[async_trait]
pub trait EventSource: Send {
    /// Next event, `Some(Err(_))` for a non-fatal decode failure, or `None`
    /// once the stream has closed.
    async fn next_event(&mut self) -> Option<Result<StreamEvent>>;

    /// Release the underlying connection. Called on every monitor exit path.
    async fn shutdown(&mut self) {}
}

#[async_trait]
impl EventSource for TaskEventStream {
    async fn next_event(&mut self) -> Option<Result<StreamEvent>> {
        TaskEventStream::next_event(self).await
    }

    async fn shutdown(&mut self) {
        TaskEventStream::shutdown(self).await;
    }
}

/// Point-in-time source of truth for a task's state.
///
/// Implemented by [`ControlApiOracle`](crate::tasks::ControlApiOracle) over
/// the control API; tests substitute fakes.
#[async_trait]
pub trait StatusOracle: Send {
    /// Fetch the current state of `task_id`. No retry: the monitor treats a
    /// failure as non-fatal and keeps watching.
    async fn current_status(&mut self, task_id: i64) -> Result<Task>;
}

/// States of a monitoring session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// Consuming stream events (initial state)
    Watching,
    /// An event could not be attributed to the watched task; consulting the
    /// status query
    Resolving,
    /// A terminal status was observed (final)
    Terminal,
    /// The stream closed before a terminal status was observed (final)
    Aborted,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitorState::Watching => write!(f, "watching"),
            MonitorState::Resolving => write!(f, "resolving"),
            MonitorState::Terminal => write!(f, "terminal"),
            MonitorState::Aborted => write!(f, "aborted"),
        }
    }
}

/// How a monitoring session ended.
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorOutcome {
    /// A terminal status (`success` or `error`) was observed.
    Finished(TaskStatus),

    /// The stream closed before any terminal status was seen.
    Aborted {
        /// The last status observed for the task, if any
        last_known: Option<TaskStatus>,
    },
}

impl MonitorOutcome {
    /// One-word summary suitable for a result sink: `success`, `error`, or
    /// `unknown`. Never log text — sinks do no escaping.
    pub fn summary(&self) -> &str {
        match self {
            MonitorOutcome::Finished(status) => status.as_str(),
            MonitorOutcome::Aborted { .. } => "unknown",
        }
    }

    /// True when a terminal `success` was observed.
    pub fn is_success(&self) -> bool {
        matches!(self, MonitorOutcome::Finished(TaskStatus::Success))
    }
}

/// The result of one monitoring session. Produced exactly once.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorResult {
    /// The task that was watched
    pub task_id: i64,
    /// How the session ended
    pub outcome: MonitorOutcome,
}

type OnLogCallback = Arc<dyn Fn(&str) + Send + Sync>;
type OnStatusCallback = Arc<dyn Fn(TaskStatus) + Send + Sync>;
type OnNoticeCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Observer hooks for a monitoring session.
///
/// All hooks are optional. `on_log` receives each sanitized output line in
/// arrival order; `on_status` each observed status transition; `on_notice`
/// non-fatal conditions (decode errors, failed status lookups, stream
/// closure). Reporting order matches arrival order.
///
/// # Example
///
/// ```rust
/// use semaphore_link::MonitorHandlers;
///
/// let handlers = MonitorHandlers::new()
///     .on_log(|line| println!("{}", line))
///     .on_status(|status| eprintln!("status: {}", status))
///     .on_notice(|msg| eprintln!("warning: {}", msg));
/// ```
#[derive(Clone, Default)]
pub struct MonitorHandlers {
    on_log: Option<OnLogCallback>,
    on_status: Option<OnStatusCallback>,
    on_notice: Option<OnNoticeCallback>,
}

impl fmt::Debug for MonitorHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonitorHandlers")
            .field("on_log", &self.on_log.is_some())
            .field("on_status", &self.on_status.is_some())
            .field("on_notice", &self.on_notice.is_some())
            .finish()
    }
}

impl MonitorHandlers {
    /// Create empty handlers (no callbacks registered).
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for each sanitized log line.
    pub fn on_log(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_log = Some(Arc::new(f));
        self
    }

    /// Register a callback for each observed status transition.
    pub fn on_status(mut self, f: impl Fn(TaskStatus) + Send + Sync + 'static) -> Self {
        self.on_status = Some(Arc::new(f));
        self
    }

    /// Register a callback for non-fatal conditions worth surfacing.
    pub fn on_notice(mut self, f: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.on_notice = Some(Arc::new(f));
        self
    }

    pub(crate) fn emit_log(&self, line: &str) {
        if let Some(cb) = &self.on_log {
            cb(line);
        }
    }

    pub(crate) fn emit_status(&self, status: TaskStatus) {
        if let Some(cb) = &self.on_status {
            cb(status);
        }
    }

    pub(crate) fn emit_notice(&self, message: &str) {
        if let Some(cb) = &self.on_notice {
            cb(message);
        }
    }
}

/// Drives one task to completion over an [`EventSource`], consulting a
/// [`StatusOracle`] whenever the stream alone cannot attribute an event to
/// the watched task.
///
/// One monitor owns one stream: a single sequential consumption loop, no
/// shared mutable state. [`run`](CompletionMonitor::run) consumes the
/// monitor, releases the stream on every exit path, and returns exactly one
/// [`MonitorResult`]; no event past the terminal one is processed.
pub struct CompletionMonitor<S, O> {
    task_id: i64,
    stream: S,
    oracle: O,
    handlers: MonitorHandlers,
    state: MonitorState,
    last_known: Option<TaskStatus>,
}

impl<S: EventSource, O: StatusOracle> CompletionMonitor<S, O> {
    /// Create a monitor for `task_id` over the given stream and oracle.
    pub fn new(task_id: i64, stream: S, oracle: O) -> Self {
        Self {
            task_id,
            stream,
            oracle,
            handlers: MonitorHandlers::new(),
            state: MonitorState::Watching,
            last_known: None,
        }
    }

    /// Attach observer hooks.
    pub fn with_handlers(mut self, handlers: MonitorHandlers) -> Self {
        self.handlers = handlers;
        self
    }

    /// Current state of the session.
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Watch until the task reaches a terminal status or the stream closes.
    pub async fn run(mut self) -> MonitorResult {
        let outcome = self.watch().await;
        self.stream.shutdown().await;
        debug!(
            "[MONITOR] task {} finished in state {} ({})",
            self.task_id,
            self.state,
            outcome.summary()
        );
        MonitorResult {
            task_id: self.task_id,
            outcome,
        }
    }

    async fn watch(&mut self) -> MonitorOutcome {
        loop {
            let event = match self.stream.next_event().await {
                Some(Ok(event)) => event,
                Some(Err(e)) => {
                    // Decode errors are non-fatal; the connection is intact.
                    // Transport errors are followed by closure on the next
                    // read.
                    let notice = match &e {
                        SemaphoreLinkError::SerializationError(_) => {
                            format!("Skipping undecodable stream message: {}", e)
                        }
                        other => format!("Stream error: {}", other),
                    };
                    self.handlers.emit_notice(&notice);
                    continue;
                }
                None => {
                    self.state = MonitorState::Aborted;
                    self.handlers.emit_notice(&format!(
                        "Stream closed before task {} reached a terminal status",
                        self.task_id
                    ));
                    return MonitorOutcome::Aborted {
                        last_known: self.last_known.clone(),
                    };
                }
            };

            if event.is_for(self.task_id) {
                if let Some(outcome) = self.observe_own_event(event) {
                    return outcome;
                }
            } else if let Some(outcome) = self.resolve_ambiguity().await {
                return outcome;
            }
        }
    }

    /// An event attributed to the watched task by id: its status is
    /// authoritative.
    fn observe_own_event(&mut self, event: StreamEvent) -> Option<MonitorOutcome> {
        match event {
            StreamEvent::Log { output, .. } => {
                self.handlers.emit_log(&strip_ansi(&output));
                None
            }
            StreamEvent::Update { status, .. } => self.record_status(status),
            // Unknown events carry no id and never match.
            StreamEvent::Unknown => None,
        }
    }

    /// The event belongs to another task, or to no task at all. The stream
    /// cannot disambiguate, so ask the control API for the truth; the
    /// ambiguous event itself is discarded either way.
    async fn resolve_ambiguity(&mut self) -> Option<MonitorOutcome> {
        self.state = MonitorState::Resolving;
        debug!(
            "[MONITOR] task {}: unattributable event, querying current status",
            self.task_id
        );

        match self.oracle.current_status(self.task_id).await {
            Ok(task) => {
                let outcome = self.record_status(task.status);
                if outcome.is_none() {
                    self.state = MonitorState::Watching;
                }
                outcome
            }
            Err(e) => {
                // Non-fatal: the ambiguity may resolve on a later message.
                self.handlers.emit_notice(&format!(
                    "Status lookup for task {} failed: {}",
                    self.task_id, e
                ));
                self.state = MonitorState::Watching;
                None
            }
        }
    }

    fn record_status(&mut self, status: TaskStatus) -> Option<MonitorOutcome> {
        self.handlers.emit_status(status.clone());
        self.last_known = Some(status.clone());
        if status.is_terminal() {
            self.state = MonitorState::Terminal;
            Some(MonitorOutcome::Finished(status))
        } else {
            None
        }
    }
}
