use thiserror::Error;

/// Errors raised while decoding an `authorization` value back into credentials.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// The value has no `<scheme> <token>` shape.
    #[error("authorization value has no scheme")]
    MissingScheme,

    /// The scheme is something other than `Basic`.
    #[error("unsupported authorization scheme: {0}")]
    UnsupportedScheme(String),

    /// The token is not valid standard base64.
    #[error("invalid base64 in credentials: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The decoded token is not UTF-8.
    #[error("credentials are not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// The decoded token has no `:` between username and password.
    #[error("decoded credentials have no ':' separator")]
    MissingSeparator,
}

/// Result type alias using `CredentialsError`.
pub type Result<T> = std::result::Result<T, CredentialsError>;
