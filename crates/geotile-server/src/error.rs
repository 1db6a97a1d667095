//! Error types for the HTTP layer.
//!
//! [`ApiError`] maps per-request failures onto HTTP responses via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation. A bad
//! coordinate is the client's fault (400); a failed tile query is ours
//! (500). [`StartupError`] covers everything that stops the process
//! before it starts serving.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use geotile_core::TileError;
use geotile_db::DbError;

use crate::config::ConfigError;
use crate::server::ServerError;

/// Errors returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The requested path does not name a tile.
    #[error("not found: {0}")]
    NotFound(String),

    /// The tile pipeline failed.
    #[error(transparent)]
    Tile(#[from] TileError),
}

impl ApiError {
    /// HTTP status for this error.
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Tile(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Tile(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "tile request failed");
        } else {
            tracing::warn!(error = %self, "tile request rejected");
        }

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Errors that stop the server during startup or while serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// Configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The database could not be reached.
    #[error("database error: {0}")]
    Database(DbError),

    /// The tile statement was rejected, or the layer set is invalid.
    #[error("tile error: {0}")]
    Tile(#[from] TileError),

    /// The HTTP server failed to bind or serve.
    #[error("server error: {0}")]
    Server(#[from] ServerError),
}

impl From<DbError> for StartupError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Registration { .. } => Self::Tile(TileError::from(err)),
            DbError::Postgres(_) | DbError::Config(_) => Self::Database(err),
        }
    }
}
