//! gRPC client for the openolt management service.

use std::future::Future;
use std::time::Duration;

use oltauth_common::{BasicAuthCredentials, CredentialsInterceptor, PerRpcCredentials};
use oltauth_proto::{OpenoltClient, proto};
use tonic::service::interceptor::InterceptedService;
use tonic::transport::{Channel, Endpoint};
use tonic::{Code, Request, Response, Status};
use tokio::time::Instant;
use tracing::{debug, info, instrument};

use crate::command::{OltCommand, OltResponse};
use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Channel that stamps every request with `C`'s metadata.
pub type AuthChannel<C> = InterceptedService<Channel, CredentialsInterceptor<C>>;

/// Client holding one plaintext connection to an OLT agent or its auth proxy.
///
/// The connection is released when the client is dropped.
pub struct OltClient<C = BasicAuthCredentials> {
    inner: OpenoltClient<AuthChannel<C>>,
    uri: String,
    rpc_timeout: Duration,
}

impl OltClient {
    /// Connects using the Basic-Auth credentials from `config`.
    ///
    /// # Errors
    ///
    /// See [`OltClient::connect_with_credentials`].
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        Self::connect_with_credentials(config, config.credentials()).await
    }
}

impl<C: PerRpcCredentials> OltClient<C> {
    /// Connects to the configured endpoint and attaches `credentials` to every call.
    ///
    /// Waits for the connection to be established, bounded by the configured
    /// connect timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The credentials require transport security (the channel is always plaintext)
    /// - The endpoint URI is invalid
    /// - The connection cannot be established
    pub async fn connect_with_credentials(config: &ClientConfig, credentials: C) -> Result<Self> {
        let uri = config.endpoint_uri();

        if credentials.require_transport_security() {
            return Err(ClientError::InsecureTransport { uri });
        }

        let endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|source| ClientError::InvalidEndpoint {
                uri: uri.clone(),
                source,
            })?
            .connect_timeout(config.connect_timeout);

        debug!(%uri, timeout = ?config.connect_timeout, "Connecting");
        let channel = endpoint
            .connect()
            .await
            .map_err(|source| ClientError::Connection {
                uri: uri.clone(),
                source,
            })?;
        info!(%uri, "Connected");

        let interceptor = CredentialsInterceptor::new(credentials, uri.clone());

        Ok(Self {
            inner: OpenoltClient::with_interceptor(channel, interceptor),
            uri,
            rpc_timeout: config.rpc_timeout,
        })
    }

    /// The endpoint this client is connected to.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Issues `command` once, bounded by the RPC timeout.
    ///
    /// The timeout is also sent to the server as `grpc-timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Rpc`] with the remote status if the call fails,
    /// or with `DeadlineExceeded` if no reply arrives in time.
    #[instrument(skip(self), fields(uri = %self.uri))]
    pub async fn execute(&mut self, command: OltCommand) -> Result<OltResponse> {
        let method = command.rpc_name();
        let timeout = self.rpc_timeout;
        let mut request = Request::new(proto::Empty {});
        request.set_timeout(timeout);

        debug!(?timeout, "Issuing RPC");
        let response = match command {
            OltCommand::DisableOlt => {
                OltResponse::Empty(unary(method, timeout, self.inner.disable_olt(request)).await?)
            }
            OltCommand::ReenableOlt => {
                OltResponse::Empty(unary(method, timeout, self.inner.reenable_olt(request)).await?)
            }
            OltCommand::Reboot => {
                OltResponse::Empty(unary(method, timeout, self.inner.reboot(request)).await?)
            }
            OltCommand::CollectStatistics => OltResponse::Empty(
                unary(method, timeout, self.inner.collect_statistics(request)).await?,
            ),
            OltCommand::HeartbeatCheck => OltResponse::Heartbeat(
                unary(method, timeout, self.inner.heartbeat_check(request)).await?,
            ),
            OltCommand::GetDeviceInfo => OltResponse::DeviceInfo(
                unary(method, timeout, self.inner.get_device_info(request)).await?,
            ),
        };

        Ok(response)
    }
}

/// Connects with the configured credentials and issues `command` once.
///
/// # Errors
///
/// Returns the connection or RPC error unchanged.
pub async fn run(config: &ClientConfig, command: OltCommand) -> Result<OltResponse> {
    let mut client = OltClient::connect(config).await?;
    client.execute(command).await
}

async fn unary<R>(
    method: &'static str,
    timeout: Duration,
    call: impl Future<Output = std::result::Result<Response<R>, Status>>,
) -> Result<R> {
    let started = Instant::now();
    match tokio::time::timeout(timeout, call).await {
        Ok(Ok(response)) => Ok(response.into_inner()),
        Ok(Err(status)) => Err(ClientError::rpc(
            method,
            classify_status(status, started.elapsed(), timeout),
        )),
        Err(_) => Err(ClientError::rpc(method, deadline_exceeded(timeout))),
    }
}

/// Maps a `Cancelled` status received after the deadline to `DeadlineExceeded`.
///
/// Both the server and the channel enforce `grpc-timeout` by cancelling the
/// call, so either may answer before the local timer fires.
fn classify_status(status: Status, elapsed: Duration, timeout: Duration) -> Status {
    if status.code() == Code::Cancelled && elapsed >= timeout {
        deadline_exceeded(timeout)
    } else {
        status
    }
}

fn deadline_exceeded(timeout: Duration) -> Status {
    Status::deadline_exceeded(format!("No response within {}ms", timeout.as_millis()))
}
