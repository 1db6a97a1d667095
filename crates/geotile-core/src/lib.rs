//! Core tile pipeline for geotile.
//!
//! Turns a `(zoom, x, y)` request into a multi-layer vector tile:
//!
//! ```text
//! TileCoordinate --> resolve / scale_denominator --> BoundingBox + scale
//!     --> FragmentSource (compiled multi-layer statement) --> fragments
//!     --> assemble --> tile bytes
//! ```
//!
//! This crate holds no I/O. The database side lives behind the
//! [`FragmentSource`] trait, implemented for `PostgreSQL` by `geotile-db`.
//!
//! # Modules
//!
//! - [`coord`] -- Parsing untrusted text coordinates
//! - [`projection`] -- Bounding box resolution and scale denominators
//! - [`layer`] -- Static layer definitions and the ordered [`LayerSet`]
//! - [`query`] -- The one-time multi-layer statement compiler
//! - [`assemble`] -- Fragment concatenation
//! - [`service`] -- The `getTile` pipeline
//! - [`error`] -- Shared error types

pub mod assemble;
pub mod coord;
pub mod error;
pub mod layer;
pub mod projection;
pub mod query;
pub mod service;

// Re-export primary types for convenience.
pub use assemble::assemble;
pub use coord::TileCoordinate;
pub use error::TileError;
pub use layer::{LayerDefinition, LayerSet};
pub use projection::{resolve, scale_denominator, BoundingBox};
pub use query::CompiledQuery;
pub use service::{FragmentSource, Fragments, TileResponse, TileService};
