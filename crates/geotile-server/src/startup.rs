//! Startup sequence for the tile server.
//!
//! 1. Compile the multi-layer tile statement from the reference layers
//! 2. Connect to `PostgreSQL`, registering the statement (fatal if rejected)
//! 3. Build the tile service and serve HTTP until shutdown
//! 4. Close the pool

use std::sync::Arc;

use geotile_core::{CompiledQuery, LayerSet, TileService};
use geotile_db::PostgresPool;
use tracing::info;

use crate::config::AppConfig;
use crate::error::StartupError;
use crate::server::start_server;
use crate::state::AppState;

/// Compile the statement for `layers`, exactly once per process.
pub fn compile_layers(layers: &LayerSet) -> Arc<CompiledQuery> {
    let query = Arc::new(CompiledQuery::compile(layers));
    info!(
        statement = query.name(),
        layers = ?query.layer_names(),
        "Tile statement compiled"
    );
    query
}

/// Run the tile server with the reference layer set until shutdown.
///
/// # Errors
///
/// Returns [`StartupError::Tile`] if the database rejects the compiled
/// statement, [`StartupError::Database`] if it cannot be reached, and
/// [`StartupError::Server`] if the listener fails.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let query = compile_layers(&LayerSet::reference());

    let pool = PostgresPool::connect(&config.database, Arc::clone(&query)).await?;

    let service = TileService::new(query, pool.fragment_source());
    let state = Arc::new(AppState::new(service));

    let served = start_server(&config.server, state).await;
    pool.close().await;
    served?;

    Ok(())
}
