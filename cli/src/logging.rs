//! Logging setup for the action binary.
//!
//! Installs a tracing-subscriber fmt layer writing to **stderr** (stdout is
//! reserved for the task's own log output). The subscriber's log
//! compatibility layer captures the `log::*` records emitted by
//! semaphore-link. `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Safe to call once per process.
pub fn init(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
