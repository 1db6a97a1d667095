//! Error types for the database layer.
//!
//! [`DbError`] wraps the underlying [`sqlx`] errors with context about
//! which stage failed. A rejected tile statement is reported separately
//! from connection failures.

use geotile_core::TileError;

/// Driver error type wrapped by [`DbError`].
pub use sqlx::Error as SqlxError;

/// Errors that can occur in the database layer.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` operation failed.
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sqlx::Error),

    /// The server rejected the compiled tile statement.
    #[error("failed to register statement '{statement}': {source}")]
    Registration {
        /// Name of the rejected statement.
        statement: String,
        /// The underlying database error.
        source: sqlx::Error,
    },

    /// A configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<DbError> for TileError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Registration { .. } => Self::StartupCompilationFailed(err.to_string()),
            DbError::Postgres(_) | DbError::Config(_) => {
                Self::QueryExecutionFailed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_maps_to_startup_failure() {
        let err = DbError::Registration {
            statement: String::from("gettile"),
            source: sqlx::Error::Protocol(String::from("syntax error at or near \"UNION\"")),
        };
        let tile_err = TileError::from(err);
        assert!(matches!(
            tile_err,
            TileError::StartupCompilationFailed(msg) if msg.contains("gettile")
        ));
    }

    #[test]
    fn query_failure_maps_to_execution_failure() {
        let err = DbError::Postgres(sqlx::Error::PoolTimedOut);
        assert!(matches!(
            TileError::from(err),
            TileError::QueryExecutionFailed(_)
        ));
    }
}
