//! Client configuration.
//!
//! Values are resolved once at startup into an immutable [`ClientConfig`].
//! A command-line flag wins over the TOML file passed with `--config`, which
//! wins over the built-in default.
//!
//! ## Example Configuration
//!
//! ```toml
//! server_host = "10.90.0.114"
//! server_port = 19191
//! username = "admin"
//! password = "voltha"
//! timeout_ms = 2000
//! connect_timeout_ms = 5000
//! require_transport_security = false
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use oltauth_common::BasicAuthCredentials;
use secrecy::SecretString;
use serde::Deserialize;

use crate::command::OltCommand;
use crate::error::{ClientError, Result};

/// Lab OLT address used when no host is configured.
pub const DEFAULT_SERVER_HOST: &str = "192.168.10.243";
/// Default openolt agent port.
pub const DEFAULT_SERVER_PORT: u16 = 19191;
/// Default Basic-Auth username.
pub const DEFAULT_USERNAME: &str = "user1";
/// Default Basic-Auth password.
pub const DEFAULT_PASSWORD: &str = "voltha";
/// Default per-RPC deadline in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 1_000;
/// Default connection timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Command-line arguments.
///
/// Every option is optional so that unset flags fall through to the
/// `--config` file and then to the defaults.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host / IP address of remote server [default: 192.168.10.243]
    #[arg(long = "server_host")]
    pub server_host: Option<String>,

    /// Listen port of remote server [default: 19191]
    #[arg(long = "server_port")]
    pub server_port: Option<String>,

    /// Username for authentication [default: user1]
    #[arg(long)]
    pub username: Option<String>,

    /// Password for authentication [default: voltha]
    #[arg(long)]
    pub password: Option<String>,

    /// RPC timeout in milliseconds [default: 1000]
    #[arg(long = "timeout_ms")]
    pub timeout_ms: Option<u64>,

    /// Connection timeout in milliseconds [default: 5000]
    #[arg(long = "connect_timeout_ms")]
    pub connect_timeout_ms: Option<u64>,

    /// Refuse to send credentials over a plaintext channel
    #[arg(long = "require_transport_security")]
    pub require_transport_security: bool,

    /// Path to a TOML file providing any of the options above
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// RPC to issue
    #[command(subcommand)]
    pub command: Option<OltCommand>,
}

/// Optional settings read from the `--config` file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Host or IP address of the remote server
    pub server_host: Option<String>,
    /// Port of the remote server, as an integer or a string
    pub server_port: Option<PortValue>,
    /// Username for authentication
    pub username: Option<String>,
    /// Password for authentication
    pub password: Option<String>,
    /// RPC timeout in milliseconds
    pub timeout_ms: Option<u64>,
    /// Connection timeout in milliseconds
    pub connect_timeout_ms: Option<u64>,
    /// Refuse to send credentials over a plaintext channel
    pub require_transport_security: Option<bool>,
}

/// A port written either as a TOML integer or as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortValue {
    /// `server_port = 19191`
    Number(i64),
    /// `server_port = "19191"`
    Text(String),
}

impl FileConfig {
    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| ClientError::ConfigFile {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(toml::from_str(&contents)?)
    }
}

/// Immutable settings for one client run.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Host or IP address of the remote server
    pub server_host: String,
    /// Non-zero port of the remote server
    pub server_port: u16,
    /// Username for authentication, without `:`
    pub username: String,
    /// Password for authentication, possibly empty
    pub password: SecretString,
    /// Deadline for the single RPC
    pub rpc_timeout: Duration,
    /// Upper bound on establishing the connection
    pub connect_timeout: Duration,
    /// Whether the credentials may only travel over an encrypted channel
    pub require_transport_security: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            username: DEFAULT_USERNAME.to_string(),
            password: SecretString::from(DEFAULT_PASSWORD.to_string()),
            rpc_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            connect_timeout: Duration::from_millis(DEFAULT_CONNECT_TIMEOUT_MS),
            require_transport_security: false,
        }
    }
}

impl ClientConfig {
    /// Builds the configuration from parsed arguments, loading `--config` if given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the merged
    /// values fail validation.
    pub fn from_args(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Self::resolve(args, file)
    }

    /// Merges flags over file values over defaults, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if the port is not a valid non-zero `u16` or any other
    /// value fails [`Self::validate`].
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self> {
        let server_port = match (args.server_port.as_deref(), file.server_port) {
            (Some(port), _) => parse_port(port)?,
            (None, Some(PortValue::Text(port))) => parse_port(&port)?,
            (None, Some(PortValue::Number(port))) => u16::try_from(port)
                .map_err(|_| ClientError::Config(format!("Invalid server port: {port}")))?,
            (None, None) => DEFAULT_SERVER_PORT,
        };

        let password = args
            .password
            .clone()
            .or(file.password)
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        let config = Self {
            server_host: args
                .server_host
                .clone()
                .or(file.server_host)
                .unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port,
            username: args
                .username
                .clone()
                .or(file.username)
                .unwrap_or_else(|| DEFAULT_USERNAME.to_string()),
            password: SecretString::from(password),
            rpc_timeout: Duration::from_millis(
                args.timeout_ms
                    .or(file.timeout_ms)
                    .unwrap_or(DEFAULT_TIMEOUT_MS),
            ),
            connect_timeout: Duration::from_millis(
                args.connect_timeout_ms
                    .or(file.connect_timeout_ms)
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_MS),
            ),
            require_transport_security: args.require_transport_security
                || file.require_transport_security.unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// An empty password is allowed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The host is empty
    /// - The port is zero
    /// - The username is empty or contains `:`
    /// - Either timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.server_host.trim().is_empty() {
            return Err(ClientError::Config("Server host must not be empty".to_string()));
        }

        if self.server_port == 0 {
            return Err(ClientError::Config("Server port must not be 0".to_string()));
        }

        if self.username.is_empty() {
            return Err(ClientError::Config("Username must not be empty".to_string()));
        }

        // RFC 7617: the user-id cannot contain a colon
        if self.username.contains(':') {
            return Err(ClientError::Config(format!(
                "Username '{}' must not contain ':'",
                self.username
            )));
        }

        if self.rpc_timeout.is_zero() {
            return Err(ClientError::Config("RPC timeout must be positive".to_string()));
        }

        if self.connect_timeout.is_zero() {
            return Err(ClientError::Config(
                "Connect timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// The plaintext endpoint URI, bracketing IPv6 literals.
    pub fn endpoint_uri(&self) -> String {
        let host = self.server_host.trim();
        if host.contains(':') && !host.starts_with('[') {
            format!("http://[{host}]:{}", self.server_port)
        } else {
            format!("http://{host}:{}", self.server_port)
        }
    }

    /// Per-RPC credentials derived from this configuration.
    pub fn credentials(&self) -> BasicAuthCredentials {
        BasicAuthCredentials::from_secret(self.username.clone(), self.password.clone())
            .with_transport_security(self.require_transport_security)
    }
}

fn parse_port(port: &str) -> Result<u16> {
    port.trim()
        .parse::<u16>()
        .map_err(|e| ClientError::Config(format!("Invalid server port '{port}': {e}")))
}
