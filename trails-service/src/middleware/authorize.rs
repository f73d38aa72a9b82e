//! Role-based authorization
//!
//! Runs after [`super::JwtAuth::middleware`] and checks the [`Claims`] it
//! injected. A request that reaches this layer without claims is treated as
//! unauthenticated.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::token::Claims;
use crate::handlers::{ApiError, ApiOperation};

/// Requires the authenticated caller to hold a given role.
#[derive(Debug, Clone)]
pub struct RequireRole {
    role: Arc<str>,
}

impl RequireRole {
    pub fn new(role: impl Into<Arc<str>>) -> Self {
        Self { role: role.into() }
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub async fn middleware(
        State(required): State<Self>,
        request: Request<Body>,
        next: Next,
    ) -> Result<Response, ApiError> {
        let operation = ApiOperation::from_method(request.method());
        let claims = request.extensions().get::<Claims>().ok_or_else(|| {
            ApiError::unauthorized("Authentication required").with_operation(operation)
        })?;

        if !claims.has_role(required.role()) {
            tracing::warn!(
                sub = %claims.sub,
                required_role = %required.role(),
                path = %request.uri().path(),
                "Caller lacks required role"
            );
            return Err(
                ApiError::forbidden(format!("Role '{}' is required", required.role()))
                    .with_operation(operation),
            );
        }

        Ok(next.run(request).await)
    }
}
