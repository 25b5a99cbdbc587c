use clap::Parser;
use std::path::PathBuf;

/// Launch a Semaphore task and wait for it to finish.
///
/// Every connection parameter can come from a flag or from the environment,
/// following the `INPUT_*` convention CI runners use to pass step inputs.
/// The process streams the task's sanitized log output to stdout, then
/// appends one `<name>=<status>` line to the output file and exits.
#[derive(Parser, Debug)]
#[command(name = "semaphore-action")]
#[command(version)]
#[command(about = "Run a Semaphore task template and wait for the result", long_about = None)]
pub struct Cli {
    /// Base URL of the Semaphore API (e.g. http://10.8.0.1:3000/api)
    #[arg(long = "api-url", env = "INPUT_API_URL")]
    pub api_url: String,

    /// WebSocket base URL; derived from --api-url when omitted
    #[arg(long = "ws-api-url", env = "INPUT_WS_API_URL")]
    pub ws_api_url: Option<String>,

    /// API token used as the bearer credential
    #[arg(long = "api-key", env = "INPUT_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Project the template belongs to
    #[arg(long = "project-id", env = "INPUT_PROJECT_ID", default_value_t = 1)]
    pub project_id: i64,

    /// Template to launch
    #[arg(long = "template-id", env = "INPUT_TEMPLATE_ID")]
    pub template_id: i64,

    /// JSON-encoded extra environment passed to the task
    #[arg(long = "environment", env = "INPUT_ENVIRONMENT")]
    pub environment: Option<String>,

    /// File the final status line is appended to
    #[arg(long = "output-file", env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,

    /// Key name for the status line
    #[arg(long = "output-name", default_value = "status")]
    pub output_name: String,

    /// HTTP request timeout in seconds
    #[arg(long = "request-timeout", value_name = "SECONDS", default_value_t = 30)]
    pub request_timeout: u64,

    /// Connection timeout in seconds (TCP + TLS + WS handshake, 0 disables)
    #[arg(
        long = "connection-timeout",
        value_name = "SECONDS",
        default_value_t = 10
    )]
    pub connection_timeout: u64,

    /// Enable verbose logging
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}
