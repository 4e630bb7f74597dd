//! Error types for the oltauth client.

use std::path::PathBuf;

use thiserror::Error;
use tonic::{Code, Status};

/// Errors that end a client run.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Configuration failed validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The `--config` file could not be read.
    #[error("Failed to read config file {}", path.display())]
    ConfigFile {
        /// Path given with `--config`
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// TOML deserialization error.
    #[error("Invalid TOML in config file")]
    Toml(#[from] toml::de::Error),

    /// The endpoint URI could not be built from host and port.
    #[error("Invalid endpoint {uri}")]
    InvalidEndpoint {
        /// The rejected URI
        uri: String,
        /// Why tonic rejected it
        #[source]
        source: tonic::transport::Error,
    },

    /// Transport or dial failure.
    #[error("Did not connect to {uri}")]
    Connection {
        /// Endpoint that was dialled
        uri: String,
        /// Transport failure
        #[source]
        source: tonic::transport::Error,
    },

    /// The credentials demand an encrypted channel but the endpoint is plaintext.
    #[error("Credentials require transport level security, refusing plaintext channel to {uri}")]
    InsecureTransport {
        /// Plaintext endpoint that was refused
        uri: String,
    },

    /// The remote call failed or ran past its deadline.
    #[error("Could not {method}: {status}")]
    Rpc {
        /// RPC method name, e.g. `DisableOlt`
        method: &'static str,
        /// Status returned by the server or produced by the local deadline
        status: Box<Status>,
    },
}

/// Result type alias using `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

impl ClientError {
    pub(crate) fn rpc(method: &'static str, status: Status) -> Self {
        Self::Rpc {
            method,
            status: Box::new(status),
        }
    }

    /// The gRPC status of a failed call, if this is an RPC error.
    pub fn status(&self) -> Option<&Status> {
        match self {
            Self::Rpc { status, .. } => Some(status.as_ref()),
            _ => None,
        }
    }

    /// Renders this error followed by its chain of sources, `: `-separated.
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }

    /// Whether the call was cut off by its deadline.
    pub fn is_timeout(&self) -> bool {
        self.status()
            .is_some_and(|status| status.code() == Code::DeadlineExceeded)
    }
}
