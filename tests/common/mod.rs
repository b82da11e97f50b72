//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use users_api::config::ServiceConfig;
use users_api::http::HttpServer;
use users_api::lifecycle::{startup, Shutdown};
use users_api::UsersClient;

/// A server running on an ephemeral port, stopped when dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: UsersClient,
    shutdown: Shutdown,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// A reqwest client that ignores proxy settings from the environment.
pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// Start a server for `config` on 127.0.0.1 with an OS-assigned port.
pub async fn spawn_server(config: ServiceConfig) -> TestServer {
    let config = config.with_port(0);
    let listener = startup::bind_listener(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = HttpServer::new(config).run(listener, server_shutdown).await;
    });

    TestServer {
        addr,
        client: UsersClient::with_client(http(), &format!("http://{addr}")),
        shutdown,
    }
}
