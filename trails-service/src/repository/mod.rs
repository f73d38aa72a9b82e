//! Persistence and query layer
//!
//! - [`EntityStore`] / [`Storage`]: keyed collections backed by an engine
//!   ([`MemoryStorage`] by default, `PgStorage` with the `database` feature)
//! - [`TrailQuery`]: filter and sort built from caller-supplied field names
//! - [`Pagination`]: offset/limit slicing with clamped page inputs
//! - [`TrailRepository`], [`RegionRepository`], [`DifficultyRepository`]:
//!   the facades handlers talk to
//!
//! ```rust
//! use trails_service::repository::{MemoryStorage, TrailListParams, TrailRepository};
//!
//! let repo = TrailRepository::new(MemoryStorage::seeded());
//! let params = TrailListParams::default()
//!     .with_filter("Name", "track")
//!     .with_sort("Length", true)
//!     .with_page(1, 10);
//! # let _ = (repo, params);
//! ```

mod error;
pub mod memory;
mod pagination;
#[cfg(feature = "database")]
pub mod postgres;
mod query;
mod regions;
mod store;
mod traits;
mod trails;

pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
pub use memory::MemoryStorage;
pub use pagination::{Pagination, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};
#[cfg(feature = "database")]
pub use postgres::PgStorage;
pub use query::{SortDirection, TrailFilter, TrailFilterField, TrailQuery, TrailSortField};
pub use regions::{DifficultyRepository, RegionRepository};
pub use store::{DifficultyRow, EntityStore, RegionRow, Row, Storage, TrailRow};
pub use traits::{Repository, RepositoryResult};
pub use trails::{TrailListParams, TrailRepository};
