//! `PostgreSQL`/`PostGIS` boundary for geotile.
//!
//! Registers the compiled multi-layer tile statement on every pooled
//! connection and executes it per request.
//!
//! # Architecture
//!
//! ```text
//! startup
//!     |
//!     +-- CompiledQuery --> verify on one connection (fatal if rejected)
//!     +-- PgPool (after_connect: register statement per connection)
//!
//! request
//!     |
//!     +-- PgFragmentSource --> bind bbox, scale, 512, 512 --> rows --> slots
//! ```
//!
//! # Modules
//!
//! - [`postgres`] -- Connection pool, configuration, and registration
//! - [`executor`] -- Statement execution and row slotting
//! - [`error`] -- Shared error types

pub mod error;
pub mod executor;
pub mod postgres;

// Re-export primary types for convenience.
pub use error::DbError;
pub use executor::PgFragmentSource;
pub use postgres::{PostgresConfig, PostgresPool};
