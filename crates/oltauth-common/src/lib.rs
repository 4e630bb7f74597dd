//! # oltauth-common
//!
//! Per-RPC credentials for calls made against an authenticating OLT proxy.
//!
//! Every outgoing call carries an `authorization` metadata entry built with
//! the HTTP Basic Authentication encoding (RFC 7617). The encoding is carried
//! in gRPC metadata instead of an HTTP header. This crate provides:
//! - [`PerRpcCredentials`]: the seam a transport calls once per request
//! - [`BasicAuthCredentials`]: a static username/password implementation
//! - [`CredentialsInterceptor`]: a tonic interceptor that applies any credentials
//!
//! ## Example
//!
//! ```
//! use oltauth_common::{BasicAuthCredentials, PerRpcCredentials};
//!
//! let creds = BasicAuthCredentials::new("user1", "voltha");
//! let metadata = creds.request_metadata("http://192.168.10.243:19191");
//!
//! assert_eq!(metadata["Authorization"], "Basic dXNlcjE6dm9sdGhh");
//! assert!(!creds.require_transport_security());
//! ```

/// Credential types and the Basic-Auth encoding.
pub mod credentials;
/// Error types for credential decoding.
pub mod error;
/// Tonic interceptor attaching credentials to each request.
pub mod interceptor;

pub use credentials::{
    AUTHORIZATION_HEADER, BasicAuthCredentials, PerRpcCredentials, RequestMetadata,
};
pub use error::{CredentialsError, Result};
pub use interceptor::CredentialsInterceptor;
