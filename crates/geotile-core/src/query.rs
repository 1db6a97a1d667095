//! Multi-layer tile statement compiler.
//!
//! Builds, once at startup, the single parameterized statement that
//! returns one encoded fragment per layer. The statement takes four
//! positional parameters:
//!
//! | Param | Type | Meaning |
//! |-------|------|---------|
//! | `$1` | `text` | Tile bounding box as EWKT |
//! | `$2` | `float8` | Scale denominator |
//! | `$3` | `float8` | Pixel width |
//! | `$4` | `float8` | Pixel height |
//!
//! Every parameter is cast explicitly inside a `params` CTE so the server
//! can infer all four types when the statement is prepared without bound
//! values. Each row carries its `layer_index`, and the result is ordered
//! by it, so fragment order follows the [`LayerSet`] rather than whatever
//! order the planner happens to emit union branches in.

use std::fmt::Write as _;

use crate::layer::{LayerDefinition, LayerSet};

/// Name under which the statement is registered.
pub const STATEMENT_NAME: &str = "gettile";

/// Tile extent in tessellated units.
pub const TILE_EXTENT: u32 = 4096;

/// Tessellation buffer in tile units.
pub const TILE_BUFFER: u32 = 0;

/// Pixel width and height bound into `$3` and `$4`.
pub const PIXEL_SIZE: f64 = 512.0;

/// Column alias of the tessellated geometry inside each layer subquery.
const MVT_GEOMETRY: &str = "mvtgeometry";

/// The compiled statement plus the layer order it was built from.
///
/// Immutable after construction. Share it behind an `Arc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    name: String,
    sql: String,
    layer_names: Vec<String>,
}

impl CompiledQuery {
    /// Compile a statement covering every layer in `layers`, in order.
    pub fn compile(layers: &LayerSet) -> Self {
        let mut sql = String::from(
            "WITH params AS (SELECT ST_GeomFromEWKT($1::text) AS bbox, \
             $2::float8 AS scale_denominator, \
             $3::float8 AS pixel_width, \
             $4::float8 AS pixel_height) ",
        );

        for (index, layer) in layers.iter().enumerate() {
            if index > 0 {
                sql.push_str(" UNION ALL ");
            }
            push_layer(&mut sql, index, layer);
        }
        sql.push_str(" ORDER BY layer_index");

        tracing::debug!(
            statement = STATEMENT_NAME,
            layers = layers.len(),
            sql = %sql,
            "compiled tile statement"
        );

        Self {
            name: STATEMENT_NAME.to_owned(),
            sql,
            layer_names: layers.names(),
        }
    }

    /// Statement name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Full statement text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Layer names in result order.
    pub fn layer_names(&self) -> &[String] {
        &self.layer_names
    }

    /// Number of layers, and so the number of fragment slots per tile.
    pub fn layer_count(&self) -> usize {
        self.layer_names.len()
    }
}

fn push_layer(sql: &mut String, index: usize, layer: &LayerDefinition) {
    let tessellated = format!(
        "ST_AsMVTGeom({geom}, params.bbox, {TILE_EXTENT}, {TILE_BUFFER}, true)",
        geom = layer.geometry_column
    );
    let columns = layer.columns.join(", ");

    // Writing to a String cannot fail.
    let _ = write!(
        sql,
        "SELECT {index} AS layer_index, \
         ST_AsMVT(tile, '{name}', {TILE_EXTENT}, '{MVT_GEOMETRY}') AS fragment \
         FROM (SELECT {columns}, {tessellated} AS {MVT_GEOMETRY} \
         FROM {from} CROSS JOIN params \
         WHERE {tessellated} IS NOT NULL) AS tile",
        name = quote_literal(&layer.name),
        from = layer.from,
    );
}

/// Escape a value for use inside a single-quoted SQL literal.
fn quote_literal(value: &str) -> String {
    value.replace('\'', "''")
}
