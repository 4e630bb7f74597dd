//! Command-line harness for authenticated openolt management calls.
//!
//! Connects to an OLT agent (usually through an authenticating proxy), attaches
//! Basic-Auth per-RPC credentials, and issues a single unary RPC bounded by a
//! timeout.

#![warn(missing_docs)]

pub mod app;
pub mod client;
pub mod command;
pub mod config;
pub mod error;

#[cfg(test)]
mod testing;

pub use app::run_cli;
pub use client::{OltClient, run};
pub use command::{OltCommand, OltResponse};
pub use config::{Args, ClientConfig, FileConfig};
pub use error::{ClientError, Result};
