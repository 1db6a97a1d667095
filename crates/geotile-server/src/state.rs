//! Shared application state for the tile server.
//!
//! [`AppState`] holds the [`TileService`], which owns the compiled
//! statement and the fragment source. Nothing in it is mutated after
//! startup, so handlers read it without locking.

use geotile_core::{FragmentSource, TileService};

/// Shared state for the Axum application.
///
/// Wrapped in [`Arc`](std::sync::Arc) and injected via Axum's `State`
/// extractor.
pub struct AppState<S> {
    /// The tile pipeline.
    pub tiles: TileService<S>,
}

impl<S: FragmentSource> AppState<S> {
    /// Create application state around a tile service.
    pub const fn new(tiles: TileService<S>) -> Self {
        Self { tiles }
    }

    /// Names of the layers every tile is built from.
    pub fn layer_names(&self) -> &[String] {
        self.tiles.query().layer_names()
    }
}
