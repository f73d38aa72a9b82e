//! `/regions` handlers
//!
//! Mutations sit behind the authentication and role layers installed by the
//! router; these handlers assume the caller has already been authorized.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};
use http::{header::LOCATION, HeaderValue, StatusCode};

use super::{
    dto::{parse_id, RegionDto, RegionRequest, ValidatedJson},
    error::{ApiError, ApiOperation},
};
use crate::{
    ids::RegionId,
    repository::{Repository, Storage},
    state::AppState,
};

const ENTITY: &str = "Region";

/// `GET /regions`
pub async fn list<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<RegionDto>>, ApiError> {
    let regions = state.regions().find_all(()).await?;
    Ok(Json(regions.into_iter().map(RegionDto::from).collect()))
}

/// `GET /regions/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<RegionDto>, ApiError> {
    let id: RegionId = parse_id(ENTITY, &raw_id)?;
    state
        .regions()
        .find_by_id(&id)
        .await?
        .map(|region| Json(region.into()))
        .ok_or_else(|| ApiError::not_found(ENTITY, id.to_string()))
}

/// `POST /regions`: 201 with a `Location` header naming the new region
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    ValidatedJson(request): ValidatedJson<RegionRequest>,
) -> Result<Response, ApiError> {
    let region = state.regions().create(request.into()).await?;
    tracing::info!(region_id = %region.id, code = %region.code, "Region created");

    let location = HeaderValue::try_from(format!("/regions/{}", region.id)).map_err(|e| {
        ApiError::internal(format!("invalid location header: {}", e))
            .with_operation(ApiOperation::Create)
    })?;

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(RegionDto::from(region)),
    )
        .into_response())
}

/// `PUT /regions/{id}`
pub async fn update<S: Storage>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
    ValidatedJson(request): ValidatedJson<RegionRequest>,
) -> Result<Json<RegionDto>, ApiError> {
    let id: RegionId = parse_id(ENTITY, &raw_id)?;
    let region = state
        .regions()
        .update(&id, request.into())
        .await?
        .ok_or_else(|| {
            ApiError::not_found(ENTITY, id.to_string()).with_operation(ApiOperation::Update)
        })?;
    tracing::info!(region_id = %region.id, "Region updated");
    Ok(Json(region.into()))
}

/// `DELETE /regions/{id}`, responding with the removed region
pub async fn delete<S: Storage>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<RegionDto>, ApiError> {
    let id: RegionId = parse_id(ENTITY, &raw_id)?;
    let region = state.regions().delete(&id).await?.ok_or_else(|| {
        ApiError::not_found(ENTITY, id.to_string()).with_operation(ApiOperation::Delete)
    })?;
    tracing::info!(region_id = %region.id, "Region deleted");
    Ok(Json(region.into()))
}
