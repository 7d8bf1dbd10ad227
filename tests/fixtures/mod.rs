//! Shared test fixtures.

use std::time::Duration;

use marubatsu_server::config::Config;

/// A real server instance running on a dedicated port for one test.
pub struct TestServer {
    port: u16,
}

impl TestServer {
    /// Boot the server on the given port and wait until it accepts connections.
    pub async fn start(port: u16) -> Self {
        let config = Config { port };
        tokio::spawn(async move {
            if let Err(e) = marubatsu_server::run_server(config).await {
                eprintln!("test server error: {e}");
            }
        });

        let server = Self { port };
        server.wait_until_ready().await;
        server
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    async fn wait_until_ready(&self) {
        for _ in 0..50 {
            if tokio::net::TcpStream::connect(("127.0.0.1", self.port))
                .await
                .is_ok()
            {
                return;
            }
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        panic!("Test server did not become ready on port {}", self.port);
    }
}
