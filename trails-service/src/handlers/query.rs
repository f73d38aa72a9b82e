//! Query-string types for list operations
//!
//! ```rust
//! use trails_service::handlers::ListTrailsQuery;
//! use trails_service::repository::TrailListParams;
//!
//! let query = ListTrailsQuery {
//!     filter_on: Some("Name".to_string()),
//!     filter_query: Some("track".to_string()),
//!     page_size: Some(10),
//!     ..Default::default()
//! };
//! let params = TrailListParams::from(query);
//! assert!(params.is_ascending);
//! assert_eq!(params.page_number, 1);
//! assert_eq!(params.page_size, 10);
//! ```

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::error::{ApiError, ApiOperation};
use crate::repository::{TrailListParams, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE};

/// Query parameters accepted by `GET /trails`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTrailsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_on: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_query: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Defaults to ascending
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_ascending: Option<bool>,

    /// 1-indexed; values below 1 are clamped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_number: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,
}

impl From<ListTrailsQuery> for TrailListParams {
    fn from(query: ListTrailsQuery) -> Self {
        Self {
            filter_on: query.filter_on,
            filter_query: query.filter_query,
            sort_by: query.sort_by,
            is_ascending: query.is_ascending.unwrap_or(true),
            page_number: query.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            page_size: query.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Query-string extractor that rejects malformed input with a 400 [`ApiError`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::bad_request(rejection.body_text()).with_operation(ApiOperation::List)
            })?;
        Ok(Self(value))
    }
}
