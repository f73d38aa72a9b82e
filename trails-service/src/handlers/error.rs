//! API error types for handler operations
//!
//! Handlers return [`ApiError`], which maps onto an HTTP status through
//! [`ApiErrorKind::status_code`] and renders a JSON body.
//!
//! ```rust
//! use trails_service::handlers::{ApiError, ApiErrorKind};
//!
//! let error = ApiError::not_found("Trail", "6f1c");
//! assert!(matches!(error.kind, ApiErrorKind::NotFound));
//! assert_eq!(error.entity_id, Some("6f1c".to_string()));
//! ```

use std::fmt;

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};

/// Operation being performed when the API error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiOperation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl fmt::Display for ApiOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::List => write!(f, "list"),
            Self::Get => write!(f, "get"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

impl From<RepositoryOperation> for ApiOperation {
    fn from(op: RepositoryOperation) -> Self {
        match op {
            RepositoryOperation::FindById => Self::Get,
            RepositoryOperation::FindAll => Self::List,
            RepositoryOperation::Create => Self::Create,
            RepositoryOperation::Update => Self::Update,
            RepositoryOperation::Delete => Self::Delete,
        }
    }
}

impl ApiOperation {
    /// Operation implied by an HTTP method, used where no handler has run yet
    #[must_use]
    pub fn from_method(method: &Method) -> Self {
        match *method {
            Method::POST => Self::Create,
            Method::PUT | Method::PATCH => Self::Update,
            Method::DELETE => Self::Delete,
            _ => Self::Get,
        }
    }
}

/// Category of API error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
    /// Entity was not found
    NotFound,
    /// The request references an entity that does not exist
    UnprocessableEntity,
    /// Invalid request format, parameters, or field values
    BadRequest,
    /// Missing or invalid bearer token
    Unauthorized,
    /// Authenticated caller lacks the required role
    Forbidden,
    /// Internal server error
    InternalError,
    /// Persistence engine temporarily unavailable
    ServiceUnavailable,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::UnprocessableEntity => write!(f, "unprocessable_entity"),
            Self::BadRequest => write!(f, "bad_request"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::Forbidden => write!(f, "forbidden"),
            Self::InternalError => write!(f, "internal_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
        }
    }
}

impl ApiErrorKind {
    /// Get the HTTP status code for this error kind
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the error code string for this error kind
    #[must_use]
    pub fn error_code(&self) -> String {
        format!("{}", self).to_uppercase()
    }
}

/// Structured API error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub operation: ApiOperation,
    pub kind: ApiErrorKind,
    /// Human-readable error message, sent to the client
    pub message: String,
    /// The type of entity involved (e.g. "Trail", "Region")
    pub entity_type: Option<String>,
    pub entity_id: Option<String>,
}

impl ApiError {
    pub fn new(operation: ApiOperation, kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::NotFound, "Entity not found")
            .with_entity(entity_type, entity_id)
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::BadRequest, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::InternalError, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::Unauthorized, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ApiOperation::Get, ApiErrorKind::Forbidden, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    #[must_use]
    pub fn with_operation(mut self, operation: ApiOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(self.kind, ApiErrorKind::ServiceUnavailable)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "API {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Response body for API errors
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorResponse {
    pub error: String,
    pub code: String,
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_id: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.kind.status_code();
        let code = self.kind.error_code();

        if status.is_server_error() {
            tracing::error!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                retriable = self.is_retriable(),
                "API error: {}", self.message
            );
        } else {
            tracing::info!(
                operation = %self.operation,
                kind = %self.kind,
                entity_type = ?self.entity_type,
                entity_id = ?self.entity_id,
                "Request rejected: {}", self.message
            );
        }

        let response = ApiErrorResponse {
            error: self.message,
            code,
            status: status.as_u16(),
            operation: Some(self.operation.to_string()),
            entity_type: self.entity_type,
            entity_id: self.entity_id,
        };

        (status, Json(response)).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        let operation = ApiOperation::from(err.operation);

        let kind = match err.kind {
            RepositoryErrorKind::ReferentialIntegrity => ApiErrorKind::UnprocessableEntity,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout => {
                ApiErrorKind::ServiceUnavailable
            }
            RepositoryErrorKind::DatabaseError | RepositoryErrorKind::SerializationError => {
                ApiErrorKind::InternalError
            }
        };

        // Persistence details stay in the logs
        let message = match kind {
            ApiErrorKind::ServiceUnavailable => {
                tracing::warn!(operation = %err.operation, "{}", err);
                "Service temporarily unavailable".to_string()
            }
            ApiErrorKind::InternalError => {
                tracing::error!(operation = %err.operation, "{}", err);
                "An internal error occurred".to_string()
            }
            _ => err.message,
        };

        Self {
            operation,
            kind,
            message,
            entity_type: err.entity_type,
            entity_id: err.entity_id,
        }
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Unauthorized(message) => Self::unauthorized(message),
            Error::Jwt(e) => Self::unauthorized(format!("Invalid token: {}", e)),
            other => {
                tracing::error!("{}", other);
                Self::internal("An internal error occurred")
            }
        }
    }
}
