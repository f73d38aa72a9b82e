//! Repository error types
//!
//! Not-found is not an error at this layer: lookups, updates, and deletes
//! return `Ok(None)` when the id does not resolve. Errors are reserved for
//! broken references and persistence failures.
//!
//! ```rust
//! use trails_service::repository::{RepositoryError, RepositoryErrorKind, RepositoryOperation};
//!
//! let error = RepositoryError::referential_integrity(RepositoryOperation::Create, "Region", "abc");
//! assert_eq!(error.kind, RepositoryErrorKind::ReferentialIntegrity);
//! assert!(!error.is_retriable());
//! ```

use std::fmt;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Finding a single entity by ID
    FindById,
    /// Listing entities
    FindAll,
    /// Creating a new entity
    Create,
    /// Replacing an existing entity
    Update,
    /// Removing an entity
    Delete,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FindById => write!(f, "find_by_id"),
            Self::FindAll => write!(f, "find_all"),
            Self::Create => write!(f, "create"),
            Self::Update => write!(f, "update"),
            Self::Delete => write!(f, "delete"),
        }
    }
}

/// Category of repository error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryErrorKind {
    /// A referenced entity (difficulty, region) does not exist
    ReferentialIntegrity,
    /// Failed to reach the persistence engine
    ConnectionFailed,
    /// Operation timed out
    Timeout,
    /// Underlying database error
    DatabaseError,
    /// A stored row could not be converted to an entity
    SerializationError,
}

impl fmt::Display for RepositoryErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReferentialIntegrity => write!(f, "referential_integrity"),
            Self::ConnectionFailed => write!(f, "connection_failed"),
            Self::Timeout => write!(f, "timeout"),
            Self::DatabaseError => write!(f, "database_error"),
            Self::SerializationError => write!(f, "serialization_error"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: RepositoryErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of entity involved (e.g. "Region")
    pub entity_type: Option<String>,
    /// The ID of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    pub fn new(
        operation: RepositoryOperation,
        kind: RepositoryErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// A reference to `entity_type` with id `entity_id` did not resolve.
    pub fn referential_integrity(
        operation: RepositoryOperation,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        let entity_type = entity_type.into();
        let entity_id = entity_id.into();
        Self {
            operation,
            kind: RepositoryErrorKind::ReferentialIntegrity,
            message: format!("Referenced {} {} does not exist", entity_type, entity_id),
            entity_type: Some(entity_type),
            entity_id: Some(entity_id),
        }
    }

    pub fn connection_failed(message: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::FindAll,
            RepositoryErrorKind::ConnectionFailed,
            message,
        )
    }

    pub fn timeout(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::Timeout, message)
    }

    pub fn database_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::DatabaseError, message)
    }

    pub fn serialization_error(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, RepositoryErrorKind::SerializationError, message)
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

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }

    /// Transient errors that may succeed if the caller tries again.
    ///
    /// The repository itself never retries.
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            RepositoryErrorKind::ConnectionFailed | RepositoryErrorKind::Timeout
        )
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}

#[cfg(feature = "database")]
impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::Error as E;
        match err {
            E::PoolTimedOut => Self::timeout(RepositoryOperation::FindAll, "Connection pool timed out"),
            E::PoolClosed => Self::connection_failed("Connection pool is closed"),
            E::Io(e) => Self::connection_failed(e.to_string()),
            E::Tls(e) => Self::connection_failed(format!("TLS error: {}", e)),
            E::WorkerCrashed => Self::connection_failed("Database worker crashed"),
            E::ColumnDecode { index, source } => Self::serialization_error(
                RepositoryOperation::FindAll,
                format!("Failed to decode column {}: {}", index, source),
            ),
            E::Decode(e) => Self::serialization_error(RepositoryOperation::FindAll, e.to_string()),
            E::Database(db_err) if db_err.is_foreign_key_violation() => Self::new(
                RepositoryOperation::Create,
                RepositoryErrorKind::ReferentialIntegrity,
                db_err.to_string(),
            ),
            other => Self::database_error(RepositoryOperation::FindAll, other.to_string()),
        }
    }
}
