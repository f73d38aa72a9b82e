//! # trails-service
//!
//! HTTP CRUD service for walking trails and the regions they belong to.
//!
//! - **Trails**: list with name filtering, sorting by name or length, and
//!   paging; create and update check that the referenced difficulty and
//!   region exist.
//! - **Regions**: plain CRUD; mutations require a bearer token carrying the
//!   writer role.
//! - **Difficulties**: read-only reference data.
//! - **Persistence**: in-memory engine by default, PostgreSQL with the
//!   `database` feature.
//!
//! ## Example
//!
//! ```rust,no_run
//! use trails_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let auth = JwtAuth::new(&config.auth)?;
//!     let state = AppState::new(config.clone(), MemoryStorage::seeded());
//!     let app = build_router(state, auth);
//!
//!     Server::new(config).serve(app).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod health;
pub mod ids;
pub mod middleware;
pub mod observability;
pub mod repository;
pub mod routes;
pub mod server;
pub mod state;

#[cfg(feature = "database")]
pub mod database;

pub use routes::build_router;
pub use server::Server;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::domain::{Difficulty, Region, RegionDraft, Trail, TrailDraft};
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{ApiError, ApiErrorKind};
    pub use crate::health::{health, readiness};
    pub use crate::ids::{DifficultyId, RegionId, TrailId};
    pub use crate::middleware::{Claims, JwtAuth, RequireRole};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        DifficultyRepository, MemoryStorage, RegionRepository, Repository, RepositoryError,
        Storage, TrailListParams, TrailRepository,
    };
    pub use crate::routes::build_router;
    pub use crate::server::Server;
    pub use crate::state::AppState;

    #[cfg(feature = "database")]
    pub use crate::database::create_pool;
    #[cfg(feature = "database")]
    pub use crate::repository::PgStorage;

    pub use axum::{
        extract::{Path, Query, State},
        routing::{delete, get, post, put},
        Json, Router,
    };
}
