//! Server configuration loaded from the environment.
//!
//! Database variables follow the `OpenMapTiles` conventions so the server
//! drops into the same compose setup as the tile database:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `DATABASE_URL` | assembled from the `POSTGRES_*` variables |
//! | `POSTGRES_USER` | `openmaptiles` |
//! | `POSTGRES_PASSWORD` | `openmaptiles` |
//! | `POSTGRES_HOST` | `postgres` |
//! | `POSTGRES_PORT` | `5432` |
//! | `POSTGRES_DB` | `openmaptiles` |
//! | `DB_MAX_CONNECTIONS` | `10` |
//! | `DB_CONNECT_TIMEOUT_SECS` | `5` |
//! | `GEOTILE_HOST` | `0.0.0.0` |
//! | `GEOTILE_PORT` | `8080` |

use std::str::FromStr;
use std::time::Duration;

use geotile_db::PostgresConfig;

use crate::server::ServerConfig;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to a value that does not parse.
    #[error("invalid {key}: {message}")]
    Invalid {
        /// The offending variable.
        key: &'static str,
        /// Why it was rejected.
        message: String,
    },
}

/// Complete configuration for the tile server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Database pool settings.
    pub database: PostgresConfig,
}

impl AppConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not
    /// parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a numeric variable does not
    /// parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        let url = lookup("DATABASE_URL").unwrap_or_else(|| {
            format!(
                "postgresql://{}:{}@{}:{}/{}",
                var("POSTGRES_USER", "openmaptiles"),
                var("POSTGRES_PASSWORD", "openmaptiles"),
                var("POSTGRES_HOST", "postgres"),
                var("POSTGRES_PORT", "5432"),
                var("POSTGRES_DB", "openmaptiles"),
            )
        });

        let max_connections: u32 = parse_var(&lookup, "DB_MAX_CONNECTIONS", "10")?;
        let connect_timeout_secs: u64 = parse_var(&lookup, "DB_CONNECT_TIMEOUT_SECS", "5")?;
        let port: u16 = parse_var(&lookup, "GEOTILE_PORT", "8080")?;

        Ok(Self {
            server: ServerConfig {
                host: var("GEOTILE_HOST", "0.0.0.0"),
                port,
            },
            database: PostgresConfig::new(&url)
                .with_max_connections(max_connections)
                .with_connect_timeout(Duration::from_secs(connect_timeout_secs)),
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: &str) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .unwrap_or_else(|| default.to_owned())
        .parse()
        .map_err(|e: T::Err| ConfigError::Invalid {
            key,
            message: e.to_string(),
        })
}
