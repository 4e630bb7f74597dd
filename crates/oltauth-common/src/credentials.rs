use std::collections::BTreeMap;

use base64::prelude::*;
use secrecy::{ExposeSecret, SecretString};

use crate::error::{CredentialsError, Result};

/// Metadata key carrying the encoded credentials.
pub const AUTHORIZATION_HEADER: &str = "Authorization";

const BASIC_SCHEME: &str = "Basic";

/// Metadata attached to a single outgoing call, keyed by header name.
pub type RequestMetadata = BTreeMap<String, String>;

/// Credentials applied to every individual remote call.
///
/// Implementations are asked for fresh metadata on each request rather than
/// once per connection.
pub trait PerRpcCredentials: Send + Sync + 'static {
    /// Returns the metadata to attach to a call made against `target_uri`.
    fn request_metadata(&self, target_uri: &str) -> RequestMetadata;

    /// Whether these credentials may only travel over an encrypted channel.
    fn require_transport_security(&self) -> bool;
}

/// Static username/password credentials using the Basic-Auth encoding.
///
/// The password is held as a [`SecretString`] and never shows up in `Debug`
/// output.
///
/// Transport security is not required by default. That is only acceptable
/// against a lab endpoint: the encoded header is trivially reversible.
#[derive(Debug, Clone)]
pub struct BasicAuthCredentials {
    username: String,
    password: SecretString,
    require_transport_security: bool,
}

impl BasicAuthCredentials {
    /// Creates credentials from a plain username and password.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::from_secret(username, SecretString::from(password.into()))
    }

    /// Creates credentials from a password that is already held as a secret.
    pub fn from_secret(username: impl Into<String>, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
            require_transport_security: false,
        }
    }

    /// Sets whether calls carrying these credentials need an encrypted channel.
    #[must_use]
    pub fn with_transport_security(mut self, required: bool) -> Self {
        self.require_transport_security = required;
        self
    }

    /// The username sent with each call.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The password sent with each call.
    pub const fn password(&self) -> &SecretString {
        &self.password
    }

    /// Builds `Basic <base64(username:password)>` using the standard alphabet
    /// with padding.
    pub fn authorization_value(&self) -> String {
        let pair = format!("{}:{}", self.username, self.password.expose_secret());
        format!("{BASIC_SCHEME} {}", BASE64_STANDARD.encode(pair))
    }

    /// Parses an `authorization` value produced by [`Self::authorization_value`].
    ///
    /// The scheme is matched case-insensitively. The decoded text is split at
    /// the first `:`, so a password may itself contain colons.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The value has no scheme or the scheme is not `Basic`
    /// - The token is not valid base64 or does not decode to UTF-8
    /// - The decoded text has no `:` separator
    pub fn from_authorization_value(value: &str) -> Result<Self> {
        let (scheme, token) = value
            .trim()
            .split_once(' ')
            .ok_or(CredentialsError::MissingScheme)?;

        if !scheme.eq_ignore_ascii_case(BASIC_SCHEME) {
            return Err(CredentialsError::UnsupportedScheme(scheme.to_string()));
        }

        let decoded = String::from_utf8(BASE64_STANDARD.decode(token.trim())?)?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or(CredentialsError::MissingSeparator)?;

        Ok(Self::new(username, password))
    }
}

impl PerRpcCredentials for BasicAuthCredentials {
    fn request_metadata(&self, _target_uri: &str) -> RequestMetadata {
        RequestMetadata::from([(
            AUTHORIZATION_HEADER.to_string(),
            self.authorization_value(),
        )])
    }

    fn require_transport_security(&self) -> bool {
        self.require_transport_security
    }
}
