//! oltauth: issue one authenticated openolt RPC.
//!
//! Connects to an OLT agent or its authenticating proxy over a plaintext
//! channel, attaches Basic-Auth per-RPC credentials, and issues a single call
//! (`DisableOlt` unless a subcommand says otherwise). Any error is fatal and
//! exits with status 1, as does a malformed command line.

use std::process::ExitCode;

use oltauth_cli::run_cli;

/// Initializes structured logging with tracing.
///
/// Supports two output formats via `OLTAUTH_LOG_FORMAT` environment variable:
/// - `json`: Machine-readable JSON logs
/// - `pretty`: Human-readable formatted logs (default)
///
/// Log level is controlled via `RUST_LOG` environment variable. Logs are
/// written to stderr.
fn init_tracing() {
    use tracing_subscriber::{EnvFilter, fmt};

    let format = std::env::var("OLTAUTH_LOG_FORMAT")
        .unwrap_or_else(|_| "pretty".to_string())
        .to_lowercase();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("oltauth=info,oltauth_cli=info,oltauth_common=info"));

    match format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .init();
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    run_cli(std::env::args_os()).await
}
