//! `/trails` handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::{
    dto::{parse_id, TrailDto, TrailRequest, ValidatedJson},
    error::{ApiError, ApiOperation},
    query::{ApiQuery, ListTrailsQuery},
};
use crate::{
    ids::TrailId,
    repository::{Repository, Storage, TrailListParams},
    state::AppState,
};

const ENTITY: &str = "Trail";

/// `GET /trails`
pub async fn list<S: Storage>(
    State(state): State<AppState<S>>,
    ApiQuery(query): ApiQuery<ListTrailsQuery>,
) -> Result<Json<Vec<TrailDto>>, ApiError> {
    let params = TrailListParams::from(query);
    let trails = state.trails().find_all(params).await?;
    Ok(Json(trails.into_iter().map(TrailDto::from).collect()))
}

/// `GET /trails/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TrailDto>, ApiError> {
    let id: TrailId = parse_id(ENTITY, &raw_id)?;
    state
        .trails()
        .find_by_id(&id)
        .await?
        .map(|trail| Json(trail.into()))
        .ok_or_else(|| ApiError::not_found(ENTITY, id.to_string()))
}

/// `POST /trails`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    ValidatedJson(request): ValidatedJson<TrailRequest>,
) -> Result<Json<TrailDto>, ApiError> {
    let trail = state.trails().create(request.into()).await?;
    tracing::info!(trail_id = %trail.id, region_id = %trail.region_id, "Trail created");
    Ok(Json(trail.into()))
}

/// `PUT /trails/{id}`
pub async fn update<S: Storage>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
    ValidatedJson(request): ValidatedJson<TrailRequest>,
) -> Result<Json<TrailDto>, ApiError> {
    let id: TrailId = parse_id(ENTITY, &raw_id)?;
    let trail = state
        .trails()
        .update(&id, request.into())
        .await?
        .ok_or_else(|| {
            ApiError::not_found(ENTITY, id.to_string()).with_operation(ApiOperation::Update)
        })?;
    tracing::info!(trail_id = %trail.id, "Trail updated");
    Ok(Json(trail.into()))
}

/// `DELETE /trails/{id}`, responding with the removed trail
pub async fn delete<S: Storage>(
    State(state): State<AppState<S>>,
    Path(raw_id): Path<String>,
) -> Result<Json<TrailDto>, ApiError> {
    let id: TrailId = parse_id(ENTITY, &raw_id)?;
    let trail = state.trails().delete(&id).await?.ok_or_else(|| {
        ApiError::not_found(ENTITY, id.to_string()).with_operation(ApiOperation::Delete)
    })?;
    tracing::info!(trail_id = %trail.id, "Trail deleted");
    Ok(Json(trail.into()))
}
