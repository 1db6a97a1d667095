//! Error types for the tile pipeline.
//!
//! [`TileError`] separates the two per-request failures (a bad coordinate
//! and a failed query) so the HTTP boundary can map them to different
//! status codes, plus the startup failures that stop the process before
//! it serves anything.

/// Errors that can occur while compiling, fetching, or assembling a tile.
#[derive(Debug, thiserror::Error)]
pub enum TileError {
    /// A zoom, x, or y value could not be parsed as a finite number.
    #[error("invalid tile coordinate: {field} = {value:?}")]
    InvalidCoordinate {
        /// Which coordinate component failed (`zoom`, `x`, or `y`).
        field: &'static str,
        /// The raw text that was rejected.
        value: String,
    },

    /// The database could not execute the compiled statement for a request.
    #[error("tile query failed: {0}")]
    QueryExecutionFailed(String),

    /// The database rejected the compiled statement at registration time.
    #[error("tile statement rejected at startup: {0}")]
    StartupCompilationFailed(String),

    /// The layer list is empty or contains a duplicate name.
    #[error("invalid layer set: {0}")]
    InvalidLayerSet(String),
}

impl TileError {
    /// Whether the error was caused by the client's request rather than
    /// the server.
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidCoordinate { .. })
    }
}
