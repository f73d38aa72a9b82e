//! REST handlers for trails, regions, and difficulties
//!
//! Handlers are generic over the [`Storage`](crate::repository::Storage)
//! engine and talk to the repositories held in
//! [`AppState`](crate::state::AppState). Request bodies pass through
//! [`ValidatedJson`] and query strings through [`ApiQuery`], so malformed
//! input is rejected with a 400 before any repository call. Failures are
//! reported as [`ApiError`].

pub mod difficulties;
mod dto;
mod error;
mod query;
pub mod regions;
pub mod trails;

pub use dto::{
    parse_id, DifficultyDto, RegionDto, RegionRequest, TrailDto, TrailRequest, Validate,
    ValidatedJson, MAX_DESCRIPTION_LEN, MAX_NAME_LEN, REGION_CODE_LEN,
};
pub use error::{ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation};
pub use query::{ApiQuery, ListTrailsQuery};
