//! HTTP tile server for geotile.
//!
//! This crate is thin plumbing around the core tile pipeline. It exposes
//! a single tile endpoint:
//!
//! - **`GET /tiles/{z}/{x}/{y}.pbf`** returns the multi-layer vector tile
//!   as `application/x-protobuf`, with cross-origin access allowed
//! - **`GET /health`** returns the served layer names
//!
//! # Architecture
//!
//! [`AppState`] wraps a [`TileService`](geotile_core::TileService) built
//! once at startup. Handlers share it read-only, so requests run fully in
//! parallel and only wait on the database pool. Bad coordinates map to
//! `400`, failed tile queries to `500`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use config::AppConfig;
pub use error::{ApiError, StartupError};
pub use router::build_router;
pub use server::{start_server, ServerConfig, ServerError};
pub use state::AppState;
