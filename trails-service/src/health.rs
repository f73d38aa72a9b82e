//! Health check handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{repository::Storage, state::AppState};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service name
    pub service: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    pub timestamp: DateTime<Utc>,
}

/// Readiness check response with dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    pub service: String,

    /// Dependency statuses
    pub dependencies: HashMap<String, DependencyStatus>,
}

/// Individual dependency status
#[derive(Debug, Serialize, Deserialize)]
pub struct DependencyStatus {
    pub healthy: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Liveness probe: 200 whenever the process is serving requests.
pub async fn health<S: Storage>(State(state): State<AppState<S>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        service: state.config().service.name.clone(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: Utc::now(),
    };

    (StatusCode::OK, Json(response))
}

/// Readiness probe: 200 if the persistence engine answers, 503 otherwise.
pub async fn readiness<S: Storage>(State(state): State<AppState<S>>) -> impl IntoResponse {
    let mut dependencies = HashMap::new();

    let storage = match state.storage().ping().await {
        Ok(()) => DependencyStatus {
            healthy: true,
            message: Some("Connected".to_string()),
        },
        Err(e) => {
            tracing::error!(kind = %e.kind, "Storage health check failed: {}", e.message);
            DependencyStatus {
                healthy: false,
                message: Some(format!("Unavailable: {}", e.kind)),
            }
        }
    };
    let ready = storage.healthy;
    dependencies.insert("storage".to_string(), storage);

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let response = ReadinessResponse {
        ready,
        service: state.config().service.name.clone(),
        dependencies,
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::repository::MemoryStorage;

    #[tokio::test]
    async fn test_health_is_ok() {
        let state = AppState::new(Config::default(), MemoryStorage::new());
        let response = health(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_memory_storage_is_ready() {
        let state = AppState::new(Config::default(), MemoryStorage::new());
        let response = readiness(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ReadinessResponse = serde_json::from_slice(&bytes).unwrap();
        assert!(body.ready);
        assert!(body.dependencies["storage"].healthy);
    }
}
