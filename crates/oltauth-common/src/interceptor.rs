use std::sync::Arc;

use tonic::metadata::{AsciiMetadataKey, AsciiMetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};
use tracing::trace;

use crate::credentials::PerRpcCredentials;

/// Applies [`PerRpcCredentials`] to every request sent through a tonic client.
///
/// Header names are lower-cased before insertion because gRPC metadata keys
/// are case-sensitive on the wire and must be lowercase.
pub struct CredentialsInterceptor<C> {
    credentials: Arc<C>,
    target_uri: Arc<str>,
}

impl<C: PerRpcCredentials> CredentialsInterceptor<C> {
    /// Creates an interceptor for calls made against `target_uri`.
    pub fn new(credentials: C, target_uri: impl Into<String>) -> Self {
        Self::from_arc(Arc::new(credentials), target_uri)
    }

    /// Creates an interceptor sharing already reference-counted credentials.
    pub fn from_arc(credentials: Arc<C>, target_uri: impl Into<String>) -> Self {
        Self {
            credentials,
            target_uri: Arc::from(target_uri.into()),
        }
    }

    /// The credentials applied to each request.
    pub fn credentials(&self) -> &C {
        &self.credentials
    }

    /// The URI passed to [`PerRpcCredentials::request_metadata`].
    pub fn target_uri(&self) -> &str {
        &self.target_uri
    }
}

impl<C> Clone for CredentialsInterceptor<C> {
    fn clone(&self) -> Self {
        Self {
            credentials: Arc::clone(&self.credentials),
            target_uri: Arc::clone(&self.target_uri),
        }
    }
}

impl<C> std::fmt::Debug for CredentialsInterceptor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsInterceptor")
            .field("target_uri", &self.target_uri)
            .finish_non_exhaustive()
    }
}

impl<C: PerRpcCredentials> Interceptor for CredentialsInterceptor<C> {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        let metadata = self.credentials.request_metadata(&self.target_uri);
        let entries = metadata.len();

        for (name, value) in metadata {
            let key = AsciiMetadataKey::from_bytes(name.to_ascii_lowercase().as_bytes())
                .map_err(|e| {
                    Status::unauthenticated(format!("invalid credential metadata key {name:?}: {e}"))
                })?;
            let value = AsciiMetadataValue::try_from(value.as_str()).map_err(|e| {
                Status::unauthenticated(format!("invalid credential metadata value for {name:?}: {e}"))
            })?;
            request.metadata_mut().insert(key, value);
        }

        trace!(uri = %self.target_uri, entries, "Attached per-RPC credentials");
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use crate::credentials::{BasicAuthCredentials, RequestMetadata};

    struct RawHeader(&'static str, &'static str);

    impl PerRpcCredentials for RawHeader {
        fn request_metadata(&self, _target_uri: &str) -> RequestMetadata {
            RequestMetadata::from([(self.0.to_string(), self.1.to_string())])
        }

        fn require_transport_security(&self) -> bool {
            false
        }
    }

    #[test]
    fn test_attaches_lowercase_authorization() {
        let mut interceptor = CredentialsInterceptor::new(
            BasicAuthCredentials::new("user1", "voltha"),
            "http://127.0.0.1:19191",
        );

        let request = interceptor.call(Request::new(())).unwrap();

        assert_eq!(
            request
                .metadata()
                .get("authorization")
                .map(|v| v.to_str().unwrap()),
            Some("Basic dXNlcjE6dm9sdGhh")
        );
    }

    #[test]
    fn test_replaces_existing_authorization() {
        let mut interceptor =
            CredentialsInterceptor::new(BasicAuthCredentials::new("user1", ""), "http://olt:1");

        let mut request = Request::new(());
        request
            .metadata_mut()
            .insert("authorization", "Basic stale".parse().unwrap());
        let request = interceptor.call(request).unwrap();

        let values: Vec<_> = request.metadata().get_all("authorization").iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0].to_str().unwrap(), "Basic dXNlcjE6");
    }

    #[test]
    fn test_rejects_invalid_metadata_locally() {
        let mut interceptor = CredentialsInterceptor::new(RawHeader("bad key", "v"), "http://olt:1");
        let status = interceptor.call(Request::new(())).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);

        let mut interceptor =
            CredentialsInterceptor::new(RawHeader("authorization", "line\nbreak"), "http://olt:1");
        let status = interceptor.call(Request::new(())).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unauthenticated);
    }

    #[test]
    fn test_clone_shares_credentials() {
        let interceptor = CredentialsInterceptor::new(
            BasicAuthCredentials::new("user1", "voltha"),
            "http://olt:19191",
        );
        let cloned = interceptor.clone();

        assert!(Arc::ptr_eq(&interceptor.credentials, &cloned.credentials));
        assert_eq!(cloned.target_uri(), "http://olt:19191");
        assert_eq!(cloned.credentials().username(), "user1");
    }

    #[test]
    fn test_debug_omits_credentials() {
        let interceptor =
            CredentialsInterceptor::new(BasicAuthCredentials::new("user1", "voltha"), "http://olt:1");
        let debug_str = format!("{interceptor:?}");

        assert!(debug_str.contains("http://olt:1"));
        assert!(!debug_str.contains("voltha"));
    }
}
