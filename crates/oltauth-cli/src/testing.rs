//! In-process openolt server used by the client and CLI tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::net::SocketAddr;
use std::time::Duration;

use oltauth_common::BasicAuthCredentials;
use oltauth_proto::{Openolt, OpenoltServer, proto};
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};

use crate::config::ClientConfig;

/// Stand-in for the authenticating proxy.
#[derive(Clone)]
pub struct MockOlt {
    pub username: &'static str,
    pub password: &'static str,
    pub delay: Duration,
}

impl MockOlt {
    pub const fn new() -> Self {
        Self {
            username: "user1",
            password: "voltha",
            delay: Duration::ZERO,
        }
    }

    fn authenticate(&self, request: &Request<proto::Empty>) -> Result<(), Status> {
        let value = request.metadata().get("authorization").ok_or_else(|| {
            Status::invalid_argument("Unable to find credentials in incoming request")
        })?;
        let value = value
            .to_str()
            .map_err(|e| Status::invalid_argument(e.to_string()))?;
        let creds = BasicAuthCredentials::from_authorization_value(value)
            .map_err(|e| Status::invalid_argument(e.to_string()))?;

        if creds.username() == self.username && creds.password().expose_secret() == self.password {
            Ok(())
        } else {
            Err(Status::unauthenticated("Authentication failed"))
        }
    }

    async fn reply<R: Send>(
        &self,
        request: Request<proto::Empty>,
        response: R,
    ) -> Result<Response<R>, Status> {
        self.authenticate(&request)?;
        tokio::time::sleep(self.delay).await;
        Ok(Response::new(response))
    }
}

#[tonic::async_trait]
impl Openolt for MockOlt {
    async fn disable_olt(
        &self,
        request: Request<proto::Empty>,
    ) -> Result<Response<proto::Empty>, Status> {
        self.reply(request, proto::Empty {}).await
    }

    async fn reenable_olt(
        &self,
        request: Request<proto::Empty>,
    ) -> Result<Response<proto::Empty>, Status> {
        self.reply(request, proto::Empty {}).await
    }

    async fn reboot(&self, request: Request<proto::Empty>) -> Result<Response<proto::Empty>, Status> {
        self.reply(request, proto::Empty {}).await
    }

    async fn collect_statistics(
        &self,
        request: Request<proto::Empty>,
    ) -> Result<Response<proto::Empty>, Status> {
        self.reply(request, proto::Empty {}).await
    }

    async fn heartbeat_check(
        &self,
        request: Request<proto::Empty>,
    ) -> Result<Response<proto::Heartbeat>, Status> {
        self.reply(
            request,
            proto::Heartbeat {
                heartbeat_signature: 0xbeef,
            },
        )
        .await
    }

    async fn get_device_info(
        &self,
        request: Request<proto::Empty>,
    ) -> Result<Response<proto::DeviceInfo>, Status> {
        self.reply(
            request,
            proto::DeviceInfo {
                vendor: "BRCM".to_string(),
                model: "asfvolt16".to_string(),
                pon_ports: 16,
                ..Default::default()
            },
        )
        .await
    }
}

/// Serves `olt` on an ephemeral loopback port.
pub async fn spawn_server(olt: MockOlt) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(OpenoltServer::new(olt))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
    });

    addr
}

/// Default configuration pointed at `addr`.
pub fn config_for(addr: SocketAddr) -> ClientConfig {
    ClientConfig {
        server_host: addr.ip().to_string(),
        server_port: addr.port(),
        connect_timeout: Duration::from_secs(2),
        ..ClientConfig::default()
    }
}
