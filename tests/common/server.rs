//! Test server management.
//!
//! Runs a chatterd gateway inside the test's runtime on an ephemeral port.

use chatterd::config::Config;
use chatterd::network::Gateway;
use chatterd::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// A test server instance. The gateway task is aborted on drop.
pub struct TestServer {
    addr: SocketAddr,
    hub: Arc<Hub>,
    task: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// Spawn a server with default settings.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with("").await
    }

    /// Spawn a server with extra TOML appended after the `[listen]` table.
    pub async fn spawn_with(extra: &str) -> anyhow::Result<Self> {
        let content = format!("[listen]\naddress = \"127.0.0.1:0\"\n\n{extra}");
        let config: Config = content.parse()?;

        let hub = Arc::new(Hub::new(&config));
        let gateway = Gateway::bind(config.listen.address, Arc::clone(&hub))
            .await?;
        let addr = gateway.local_addr()?;
        let task = tokio::spawn(gateway.run());

        Ok(Self { addr, hub, task })
    }

    /// Get the server address.
    #[allow(dead_code)]
    pub fn address(&self) -> SocketAddr {
        self.addr
    }

    /// Shared state, for asserting on the registry directly.
    #[allow(dead_code)]
    pub fn hub(&self) -> &Arc<Hub> {
        &self.hub
    }

    /// Connect a client without logging in.
    pub async fn connect(&self) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(self.addr).await
    }

    /// Connect a client and log in as `name`.
    pub async fn join(&self, name: &str) -> anyhow::Result<super::client::TestClient> {
        let mut client = self.connect().await?;
        client.login(name).await?;
        Ok(client)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}
