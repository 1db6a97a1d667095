//! Tile coordinate to bounding box resolution and scale denominators.
//!
//! The map uses a simplified equirectangular grid 180 units wide, not
//! Web-Mercator. Tile indices are re-centred so that the grid origin sits
//! left of the antimeridian, and the resulting `south`/`north` values are
//! inverted relative to north-up conventions. Deployed clients render
//! against exactly this arithmetic, so it is reproduced as-is.

use std::fmt;

use crate::coord::TileCoordinate;

/// Width of the map in grid units.
pub const MAP_WIDTH: f64 = 180.0;

/// Width of one rendered tile in pixels.
pub const TILE_WIDTH_PIXELS: f64 = 512.0;

/// Standardized rendering pixel size in metres (OGC 0.28 mm).
pub const STANDARDIZED_PIXEL_SIZE: f64 = 0.00028;

/// Spatial reference identifier attached to every bounding box.
pub const SRID: i32 = 4326;

/// The geographic area covered by one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Western edge.
    pub west: f64,
    /// Southern edge (as computed; may exceed `north`).
    pub south: f64,
    /// Eastern edge.
    pub east: f64,
    /// Northern edge (as computed; may be below `south`).
    pub north: f64,
}

impl BoundingBox {
    /// Render the box as an SRID-tagged polygon in EWKT.
    ///
    /// This is the geometry literal bound into the tile statement. Floats
    /// use Rust's shortest round-trip formatting so no precision is lost.
    pub fn to_ewkt(&self) -> String {
        let Self {
            west: w,
            south: s,
            east: e,
            north: n,
        } = *self;
        format!("SRID={SRID};POLYGON(({w} {s},{e} {s},{e} {n},{w} {n},{w} {s}))")
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[w={}, s={}, e={}, n={}]",
            self.west, self.south, self.east, self.north
        )
    }
}

/// Resolve a tile coordinate into the bounding box it covers.
pub fn resolve(coord: &TileCoordinate) -> BoundingBox {
    let tiles = 2f64.powf(coord.zoom);
    // The single zoom-0 tile is not shifted by half a row.
    let half_tiles = if coord.zoom.abs() < f64::EPSILON {
        0.0
    } else {
        tiles / 2.0
    };

    let x = coord.x - tiles;
    let y = -(coord.y - tiles) - 1.0 - half_tiles;

    tracing::trace!(zoom = coord.zoom, x, y, "re-centred tile indices");

    let tile_width = MAP_WIDTH / tiles;
    let tile_height = MAP_WIDTH / tiles;

    BoundingBox {
        west: x * tile_width,
        south: (y + 1.0) * tile_height,
        east: (x + 1.0) * tile_height,
        north: y * tile_width,
    }
}

/// Scale denominator for a zoom level, used by the database to pick a
/// geometry simplification.
pub fn scale_denominator(zoom: f64) -> f64 {
    let map_width_pixels = TILE_WIDTH_PIXELS * 2f64.powf(zoom);
    MAP_WIDTH / (map_width_pixels * STANDARDIZED_PIXEL_SIZE)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    fn bbox(zoom: f64, x: f64, y: f64) -> BoundingBox {
        resolve(&TileCoordinate::new(zoom, x, y))
    }

    #[test]
    fn zoom_zero_origin_tile() {
        let b = bbox(0.0, 0.0, 0.0);
        assert_eq!(
            b,
            BoundingBox {
                west: -180.0,
                south: 180.0,
                east: 0.0,
                north: 0.0,
            }
        );
    }

    #[test]
    fn zoom_one_tiles_are_ninety_units_wide() {
        // tiles = 2, x' = 1 - 2 = -1, y' = -(0 - 2) - 1 - 1 = 0
        let b = bbox(1.0, 1.0, 0.0);
        assert_eq!(b.west, -90.0);
        assert_eq!(b.east, 0.0);
        assert_eq!(b.south, 90.0);
        assert_eq!(b.north, 0.0);
    }

    #[test]
    fn zoom_two_arbitrary_tile() {
        // tiles = 4, x' = 3 - 4 = -1, y' = -(1 - 4) - 1 - 2 = 0, width = 45
        let b = bbox(2.0, 3.0, 1.0);
        assert_eq!(b.west, -45.0);
        assert_eq!(b.east, 0.0);
        assert_eq!(b.south, 45.0);
        assert_eq!(b.north, 0.0);
    }

    #[test]
    fn negative_zoom_keeps_half_tile_offset() {
        // tiles = 0.5, x' = -0.5, y' = -(0 - 0.5) - 1 - 0.25 = -0.75, width = 360
        let b = bbox(-1.0, 0.0, 0.0);
        assert_eq!(
            b,
            BoundingBox {
                west: -180.0,
                south: 90.0,
                east: 180.0,
                north: -270.0,
            }
        );
    }

    #[test]
    fn fractional_zoom_below_one_keeps_half_tile_offset() {
        let zoom = 0.5_f64;
        let tiles = 2f64.powf(zoom);
        let y = -(0.0 - tiles) - 1.0 - tiles / 2.0;
        let width = MAP_WIDTH / tiles;
        let b = bbox(zoom, 0.0, 0.0);
        assert_eq!(b.north, y * width);
        assert_eq!(b.south, (y + 1.0) * width);
    }

    #[test]
    fn resolve_is_deterministic() {
        for zoom in 0..8 {
            let tiles = 1_u32 << zoom;
            for x in [0, tiles / 2, tiles.saturating_sub(1)] {
                let coord = TileCoordinate::new(f64::from(zoom), f64::from(x), f64::from(x));
                let a = resolve(&coord);
                let b = resolve(&coord);
                assert_eq!(a.west.to_bits(), b.west.to_bits());
                assert_eq!(a.south.to_bits(), b.south.to_bits());
                assert_eq!(a.east.to_bits(), b.east.to_bits());
                assert_eq!(a.north.to_bits(), b.north.to_bits());
            }
        }
    }

    #[test]
    fn out_of_range_coordinates_still_resolve() {
        let b = bbox(3.0, -50.0, 10_000.0);
        assert!(b.west.is_finite());
        assert!(b.north.is_finite());
        assert!(b.east > b.west);
    }

    #[test]
    fn scale_denominator_at_zoom_zero() {
        let expected = 180.0 / (512.0 * 0.00028);
        assert_eq!(scale_denominator(0.0), expected);
        assert!((scale_denominator(0.0) - 1255.58).abs() < 0.01);
    }

    #[test]
    fn scale_denominator_halves_each_zoom() {
        for zoom in 0..20 {
            let z = f64::from(zoom);
            let ratio = scale_denominator(z) / scale_denominator(z + 1.0);
            assert!((ratio - 2.0).abs() < 1e-12, "zoom {zoom}: ratio {ratio}");
        }
    }

    #[test]
    fn ewkt_renders_closed_polygon() {
        let b = bbox(0.0, 0.0, 0.0);
        assert_eq!(
            b.to_ewkt(),
            "SRID=4326;POLYGON((-180 180,0 180,0 0,-180 0,-180 180))"
        );
    }

    #[test]
    fn ewkt_keeps_fractional_precision() {
        let b = BoundingBox {
            west: -22.5,
            south: 0.703125,
            east: 1.0e-7,
            north: 11.25,
        };
        assert_eq!(
            b.to_ewkt(),
            "SRID=4326;POLYGON((-22.5 0.703125,0.0000001 0.703125,0.0000001 11.25,-22.5 11.25,-22.5 0.703125))"
        );
    }
}
