//! Process-level flow: arguments in, exit status out.

use std::ffi::OsString;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use tracing::{error, info, warn};

use crate::client::run;
use crate::config::{Args, ClientConfig};

/// Parses `argv`, issues the selected RPC and maps the outcome to an exit status.
///
/// Help and version requests exit with success. Every other failure, including
/// a malformed command line, is logged and exits with [`ExitCode::FAILURE`].
pub async fn run_cli<I, T>(argv: I) -> ExitCode
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let args = match Args::try_parse_from(argv) {
        Ok(args) => args,
        Err(e) => return usage_exit(&e),
    };

    let command = args.command.unwrap_or_default();

    let config = match ClientConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e.report());
            return ExitCode::FAILURE;
        }
    };

    if !config.require_transport_security {
        warn!("Sending credentials over a plaintext channel");
    }

    info!(
        uri = %config.endpoint_uri(),
        username = %config.username,
        rpc = %command,
        "Issuing RPC"
    );

    match run(&config, command).await {
        Ok(response) => {
            info!(rpc = %command, %response, "RPC succeeded");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(rpc = %command, timeout = e.is_timeout(), "{}", e.report());
            ExitCode::FAILURE
        }
    }
}

fn usage_exit(e: &clap::Error) -> ExitCode {
    if let Err(io) = e.print() {
        warn!(error = %io, "Failed to print usage");
    }

    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
        kind => {
            error!(?kind, "Invalid command line");
            ExitCode::FAILURE
        }
    }
}
