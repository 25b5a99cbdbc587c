//! semaphore-action - launch a Semaphore task and wait for the result
//!
//! # Usage
//!
//! ```bash
//! # Flags
//! semaphore-action --api-url http://10.8.0.1:3000/api --api-key <TOKEN> --template-id 44
//!
//! # Environment (CI step inputs)
//! INPUT_API_URL=... INPUT_API_KEY=... INPUT_TEMPLATE_ID=44 semaphore-action
//! ```
//!
//! The task's sanitized log output goes to stdout as it arrives; status
//! transitions and diagnostics go to stderr. One `status=<summary>` line is
//! appended to the output file before exit.

use clap::Parser;
use semaphore_link::{
    LinkTimeouts, MonitorHandlers, MonitorOutcome, SemaphoreClient, TaskRequest, TaskStatus,
};

mod args;
mod error;
mod logging;
mod output;

use args::Cli;
use error::Result;
use output::OutputFile;

/// The task launch failed; no job exists on the server.
const EXIT_NOT_CREATED: i32 = 2;
/// The task failed, or monitoring could not be started.
const EXIT_FAILURE: i32 = 1;
/// The task succeeded, or the stream closed without a terminal status (the
/// caller reads the status value and owns any re-run policy).
const EXIT_OK: i32 = 0;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            log::error!("{}", e);
            EXIT_FAILURE
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<i32> {
    let sink = cli.output_file.as_ref().map(OutputFile::new);

    let timeouts = LinkTimeouts::default()
        .connection_timeout_secs(cli.connection_timeout)
        .request_timeout_secs(cli.request_timeout);
    let mut builder = SemaphoreClient::builder()
        .base_url(&cli.api_url)
        .api_token(&cli.api_key)
        .timeouts(timeouts);
    if let Some(ws_url) = &cli.ws_api_url {
        builder = builder.ws_url(ws_url);
    }
    let client = builder.build()?;

    // Launch. A failure here means no job was created at all, which the
    // calling pipeline must be able to tell apart from a job that ran and
    // failed.
    let mut request = TaskRequest::new(cli.template_id);
    if let Some(environment) = &cli.environment {
        request = request.with_environment(environment.clone());
    }
    let task = match client.start_task(cli.project_id, &request).await {
        Ok(task) => task,
        Err(e) => {
            log::error!(
                "Failed to start a task from template {}: {}",
                cli.template_id,
                e
            );
            write_status(&sink, &cli.output_name, "not-created")?;
            return Ok(EXIT_NOT_CREATED);
        }
    };
    log::info!(
        "Task {} created from template {} (status: {})",
        task.id,
        task.template_id,
        task.status
    );

    let task_id = task.id;
    let handlers = MonitorHandlers::new()
        .on_log(|line| println!("{}", line))
        .on_status(move |status| log::info!("Task {} status: {}", task_id, status))
        .on_notice(|message| log::warn!("{}", message));

    let result = match client.watch(cli.project_id, task.id, handlers).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Could not open the event stream: {}", e);
            write_status(&sink, &cli.output_name, "unknown")?;
            return Ok(EXIT_FAILURE);
        }
    };

    match &result.outcome {
        MonitorOutcome::Finished(status) => {
            log::info!("Task {} finished: {}", result.task_id, status);
        }
        MonitorOutcome::Aborted { last_known } => {
            log::warn!(
                "Stream closed before task {} finished (last known status: {})",
                result.task_id,
                last_known
                    .as_ref()
                    .map(TaskStatus::as_str)
                    .unwrap_or("unknown")
            );
        }
    }

    write_status(&sink, &cli.output_name, result.outcome.summary())?;

    Ok(match result.outcome {
        MonitorOutcome::Finished(TaskStatus::Error) => EXIT_FAILURE,
        _ => EXIT_OK,
    })
}

/// Publish the one status line of this invocation, if a sink is configured.
fn write_status(sink: &Option<OutputFile>, name: &str, value: &str) -> Result<()> {
    match sink {
        Some(output) => output.append(name, value),
        None => {
            log::debug!("No output file configured; {}={} not published", name, value);
            Ok(())
        }
    }
}
