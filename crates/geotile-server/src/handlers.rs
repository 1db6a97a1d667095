//! Endpoint handlers for the tile server.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/tiles/{z}/{x}/{y}.pbf` | Multi-layer vector tile |
//! | `GET` | `/health` | Liveness check with the served layers |

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use geotile_core::FragmentSource;

use crate::error::ApiError;
use crate::state::AppState;

/// Media type of an encoded vector tile.
pub const TILE_CONTENT_TYPE: &str = "application/x-protobuf";

/// File suffix expected on the `y` path segment.
const TILE_SUFFIX: &str = ".pbf";

/// Body of the `GET /health` response.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct HealthResponse {
    /// Always `ok` when the server answers.
    pub status: String,
    /// Layers included in every tile, in output order.
    pub layers: Vec<String>,
}

/// Serve one tile.
///
/// The three path segments are handed to the tile service as text; it
/// decides whether they are valid coordinates.
pub async fn get_tile<S: FragmentSource>(
    State(state): State<Arc<AppState<S>>>,
    Path((z, x, y_file)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let y = y_file
        .strip_suffix(TILE_SUFFIX)
        .ok_or_else(|| ApiError::NotFound(format!("/tiles/{z}/{x}/{y_file}")))?;

    let tile = state.tiles.get_tile(&z, &x, y).await?;

    Ok((
        [
            (header::CONTENT_TYPE, TILE_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, "attachment"),
        ],
        tile.bytes,
    )
        .into_response())
}

/// Report liveness and the layer list.
pub async fn health<S: FragmentSource>(
    State(state): State<Arc<AppState<S>>>,
) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
        layers: state.layer_names().to_vec(),
    })
}
