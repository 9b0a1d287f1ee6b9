//! chatterd - line-oriented TCP chat daemon.

use chatterd::config::Config;
use chatterd::network::Gateway;
use chatterd::state::Hub;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.toml".to_string());

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    info!(
        server = %config.server.name,
        address = %config.listen.address,
        ansi = config.display.ansi,
        "Starting chatterd"
    );

    let hub = Arc::new(Hub::new(&config));
    let gateway = Gateway::bind(config.listen.address, Arc::clone(&hub))
        .await?;

    tokio::select! {
        result = gateway.run() => result?,
        signal = tokio::signal::ctrl_c() => {
            signal?;
            info!(users = hub.registry.len(), "Shutting down");
        }
    }

    Ok(())
}
