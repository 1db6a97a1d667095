//! The `getTile` pipeline.
//!
//! [`TileService`] wires the pure stages together around a
//! [`FragmentSource`], the only stage that touches the database and the
//! only point where a request waits:
//!
//! ```text
//! text coords --> TileCoordinate::parse --> resolve + scale_denominator
//!     --> FragmentSource::fetch_fragments --> assemble --> TileResponse
//! ```
//!
//! The service holds no mutable state, so one instance can serve any
//! number of concurrent requests.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use crate::assemble::{assemble, present_layers};
use crate::coord::TileCoordinate;
use crate::error::TileError;
use crate::projection::{resolve, scale_denominator, BoundingBox};
use crate::query::CompiledQuery;

/// One slot per layer, in layer order. `None` when the layer had no
/// geometry inside the bounding box.
pub type Fragments = Vec<Option<Vec<u8>>>;

/// Executes the compiled tile statement for one bounding box.
///
/// Implemented by the `PostgreSQL` executor in production and by fakes
/// in tests.
pub trait FragmentSource: Send + Sync {
    /// Fetch the encoded fragment for every layer.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::QueryExecutionFailed`] if the statement could
    /// not be executed for this request.
    fn fetch_fragments(
        &self,
        bbox: &BoundingBox,
        scale_denominator: f64,
    ) -> impl Future<Output = Result<Fragments, TileError>> + Send;
}

impl<S: FragmentSource> FragmentSource for Arc<S> {
    fn fetch_fragments(
        &self,
        bbox: &BoundingBox,
        scale_denominator: f64,
    ) -> impl Future<Output = Result<Fragments, TileError>> + Send {
        (**self).fetch_fragments(bbox, scale_denominator)
    }
}

/// An assembled tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileResponse {
    /// Concatenated layer fragments.
    pub bytes: Vec<u8>,
    /// Number of layers that contributed data.
    pub layers_present: usize,
}

impl TileResponse {
    /// Whether the tile carries no layers at all.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Serves tiles from a compiled statement and a fragment source.
#[derive(Debug)]
pub struct TileService<S> {
    query: Arc<CompiledQuery>,
    source: S,
}

impl<S: FragmentSource> TileService<S> {
    /// Create a service over an already compiled and registered statement.
    pub const fn new(query: Arc<CompiledQuery>, source: S) -> Self {
        Self { query, source }
    }

    /// The compiled statement this service was built with.
    pub const fn query(&self) -> &Arc<CompiledQuery> {
        &self.query
    }

    /// Fetch and assemble the tile at the given text coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidCoordinate`] before any database work
    /// if a component is not numeric, or [`TileError::QueryExecutionFailed`]
    /// if the fragment source fails or returns the wrong number of slots.
    pub async fn get_tile(&self, zoom: &str, x: &str, y: &str) -> Result<TileResponse, TileError> {
        let coord = TileCoordinate::parse(zoom, x, y)?;
        self.get_tile_at(&coord).await
    }

    /// Fetch and assemble the tile at an already parsed coordinate.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::QueryExecutionFailed`] if the fragment source
    /// fails or returns the wrong number of slots.
    pub async fn get_tile_at(&self, coord: &TileCoordinate) -> Result<TileResponse, TileError> {
        let started = Instant::now();
        let bbox = resolve(coord);
        let scale = scale_denominator(coord.zoom);

        let fragments = self.source.fetch_fragments(&bbox, scale).await?;
        if fragments.len() != self.query.layer_count() {
            return Err(TileError::QueryExecutionFailed(format!(
                "expected {} layer slots, got {}",
                self.query.layer_count(),
                fragments.len()
            )));
        }

        let response = TileResponse {
            bytes: assemble(&fragments),
            layers_present: present_layers(&fragments),
        };

        tracing::debug!(
            zoom = coord.zoom,
            x = coord.x,
            y = coord.y,
            %bbox,
            bytes = response.bytes.len(),
            layers = response.layers_present,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "tile generated"
        );

        Ok(response)
    }
}
