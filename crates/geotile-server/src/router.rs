//! Axum router construction for the tile server.
//!
//! Assembles the tile and health routes into a single [`Router`] with
//! CORS enabled so map clients on any origin can fetch tiles.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use geotile_core::FragmentSource;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router for the tile server.
///
/// The router includes:
/// - `GET /tiles/{z}/{x}/{y}.pbf` -- multi-layer vector tile
/// - `GET /health` -- liveness check
pub fn build_router<S>(state: Arc<AppState<S>>) -> Router
where
    S: FragmentSource + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/tiles/{z}/{x}/{y}", get(handlers::get_tile::<S>))
        .route("/health", get(handlers::health::<S>))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
