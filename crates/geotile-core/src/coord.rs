//! Tile coordinate parsing.
//!
//! Coordinates arrive as untrusted text from the request path. Each
//! component is parsed as a floating-point number before anything else
//! happens; a failure on any of the three rejects the whole request.

use crate::error::TileError;

/// A tile address as received from a request.
///
/// Values are not range-checked. Negative or very large components are
/// valid input and simply resolve to a bounding box with no data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileCoordinate {
    /// Zoom level.
    pub zoom: f64,
    /// Tile column.
    pub x: f64,
    /// Tile row.
    pub y: f64,
}

impl TileCoordinate {
    /// Create a coordinate from already-numeric values.
    pub const fn new(zoom: f64, x: f64, y: f64) -> Self {
        Self { zoom, x, y }
    }

    /// Parse a coordinate from its three text components.
    ///
    /// # Errors
    ///
    /// Returns [`TileError::InvalidCoordinate`] naming the first component
    /// that is not a finite number.
    pub fn parse(zoom: &str, x: &str, y: &str) -> Result<Self, TileError> {
        Ok(Self {
            zoom: parse_component("zoom", zoom)?,
            x: parse_component("x", x)?,
            y: parse_component("y", y)?,
        })
    }
}

fn parse_component(field: &'static str, text: &str) -> Result<f64, TileError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TileError::InvalidCoordinate {
            field,
            value: text.to_owned(),
        })
}
