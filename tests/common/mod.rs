//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use chat_relay::config::RelayConfig;
use chat_relay::http::HttpServer;
use chat_relay::lifecycle::Shutdown;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A relay instance bound to an ephemeral port.
///
/// The server shuts down when the handle is dropped.
pub struct TestServer {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    #[allow(dead_code)]
    pub fn ws_url(&self, query: &str) -> String {
        format!("ws://{}/ws?{}", self.addr, query)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Defaults suitable for tests: no metrics exporter, fixed secret.
pub fn test_config() -> RelayConfig {
    let mut config = RelayConfig::default();
    config.observability.metrics_enabled = false;
    config.auth.jwt_secret = "integration-test-secret".into();
    config
}

/// Spawn a relay on 127.0.0.1:0 and wait until it accepts connections.
pub async fn spawn_server(config: RelayConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (_config_tx, config_updates) = mpsc::unbounded_channel();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, config_updates, server_shutdown).await;
    });

    for _ in 0..50 {
        if TcpStream::connect(addr).await.is_ok() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    TestServer { addr, shutdown }
}

/// Register an account and return a login token for it.
#[allow(dead_code)]
pub async fn obtain_token(server: &TestServer, username: &str) -> String {
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/register"))
        .form(&[("username", username), ("password", "test-password")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let res = client
        .post(server.url("/login"))
        .form(&[("username", username), ("password", "test-password")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let json: serde_json::Value = res.json().await.unwrap();
    json["access_token"].as_str().unwrap().to_string()
}
