//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds a socket and spawns a Connection task for each
//! incoming client.

use crate::handlers::Commands;
use crate::network::Connection;
use crate::state::Hub;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    hub: Arc<Hub>,
    commands: Arc<Commands>,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    pub async fn bind(addr: SocketAddr, hub: Arc<Hub>) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            hub,
            commands: Arc::new(Commands::new()),
        })
    }

    /// The address actually bound (useful when binding port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    if let Err(e) = stream.set_nodelay(true) {
                        error!(%addr, error = %e, "Failed to set TCP_NODELAY");
                    }
                    info!(%addr, "Connection accepted");

                    let connection = Connection::new(
                        stream,
                        addr,
                        Arc::clone(&self.hub),
                        Arc::clone(&self.commands),
                    );
                    tokio::spawn(connection.run());
                }
                Err(e) => {
                    // Usually fd exhaustion; back off instead of spinning
                    error!(error = %e, "Failed to accept connection");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                }
            }
        }
    }
}
