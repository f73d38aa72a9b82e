use axum::{extract::State, Json};

use super::{dto::DifficultyDto, error::ApiError};
use crate::{repository::Storage, state::AppState};

/// `GET /difficulties`
pub async fn list<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<DifficultyDto>>, ApiError> {
    let difficulties = state.difficulties().find_all().await?;
    Ok(Json(difficulties.into_iter().map(DifficultyDto::from).collect()))
}
