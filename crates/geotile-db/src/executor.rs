//! Tile statement execution against `PostgreSQL`.
//!
//! [`PgFragmentSource`] binds a bounding box and scale denominator into
//! the compiled statement and maps the returned rows back onto one slot
//! per layer. A failed execution affects only the request that issued it;
//! the pool and the registered statement are left as they were.

use std::sync::Arc;

use geotile_core::query::PIXEL_SIZE;
use geotile_core::{BoundingBox, CompiledQuery, FragmentSource, Fragments, TileError};
use sqlx::PgPool;

/// One result row: the layer's position and its encoded fragment.
type FragmentRow = (i32, Option<Vec<u8>>);

/// Executes the compiled tile statement through a shared pool.
#[derive(Clone)]
pub struct PgFragmentSource {
    pool: PgPool,
    query: Arc<CompiledQuery>,
}

impl PgFragmentSource {
    /// Create an executor over a pool whose connections have the
    /// statement registered.
    pub const fn new(pool: PgPool, query: Arc<CompiledQuery>) -> Self {
        Self { pool, query }
    }
}

impl FragmentSource for PgFragmentSource {
    async fn fetch_fragments(
        &self,
        bbox: &BoundingBox,
        scale_denominator: f64,
    ) -> Result<Fragments, TileError> {
        let rows = sqlx::query_as::<_, FragmentRow>(self.query.sql())
            .bind(bbox.to_ewkt())
            .bind(scale_denominator)
            .bind(PIXEL_SIZE)
            .bind(PIXEL_SIZE)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    statement = self.query.name(),
                    %bbox,
                    scale_denominator,
                    error = %e,
                    "tile statement execution failed"
                );
                TileError::QueryExecutionFailed(e.to_string())
            })?;

        slot_rows(rows, self.query.layer_count())
    }
}

/// Place rows into per-layer slots by their `layer_index`.
///
/// Layers with no row stay `None`. An index outside the layer range, or
/// one that appears twice, means the result does not match the compiled
/// statement.
fn slot_rows(rows: Vec<FragmentRow>, layer_count: usize) -> Result<Fragments, TileError> {
    let mut slots: Fragments = vec![None; layer_count];
    let mut seen = vec![false; layer_count];

    for (index, fragment) in rows {
        let position = usize::try_from(index)
            .ok()
            .filter(|i| *i < layer_count)
            .ok_or_else(|| {
                TileError::QueryExecutionFailed(format!("unexpected layer index {index}"))
            })?;

        match (slots.get_mut(position), seen.get_mut(position)) {
            (Some(slot), Some(taken)) if !*taken => {
                *taken = true;
                *slot = fragment;
            }
            _ => {
                return Err(TileError::QueryExecutionFailed(format!(
                    "duplicate row for layer index {index}"
                )));
            }
        }
    }

    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_fill_slots_by_index() {
        let rows = vec![(1, Some(b"EEZ".to_vec())), (0, Some(b"POL".to_vec()))];
        let slots = slot_rows(rows, 2);
        assert!(matches!(
            slots,
            Ok(s) if s == vec![Some(b"POL".to_vec()), Some(b"EEZ".to_vec())]
        ));
    }

    #[test]
    fn null_and_missing_rows_stay_empty() {
        let rows = vec![(0, None)];
        let slots = slot_rows(rows, 2);
        assert!(matches!(slots, Ok(s) if s == vec![None, None]));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert!(matches!(
            slot_rows(vec![(2, None)], 2),
            Err(TileError::QueryExecutionFailed(_))
        ));
        assert!(matches!(
            slot_rows(vec![(-1, None)], 2),
            Err(TileError::QueryExecutionFailed(_))
        ));
    }

    #[test]
    fn duplicate_index_is_rejected() {
        let rows = vec![(0, Some(b"A".to_vec())), (0, Some(b"B".to_vec()))];
        assert!(matches!(
            slot_rows(rows, 2),
            Err(TileError::QueryExecutionFailed(msg)) if msg.contains("duplicate")
        ));
    }
}
