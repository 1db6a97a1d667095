//! Tile server binary.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from the environment
//! 3. Compile and register the tile statement, connect the pool
//! 4. Serve tiles until `Ctrl-C`

use geotile_server::{startup, AppConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the tile server.
///
/// # Errors
///
/// Returns an error if configuration, statement registration, or the
/// HTTP listener fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("geotile-server starting");

    let config = AppConfig::from_env()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "geotile-server failed");
        return Err(e.into());
    }

    info!("geotile-server stopped");
    Ok(())
}
