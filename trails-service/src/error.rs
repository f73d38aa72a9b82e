//! Service-level errors
//!
//! Startup, configuration and authentication failures. Request handlers use
//! [`crate::handlers::ApiError`]; authentication failures are converted into
//! it before they reach the client.

use thiserror::Error;

/// Sanitize a database URL by removing credentials
pub fn sanitize_url(url: &str) -> String {
    if let (Some(at_pos), Some(scheme_end)) = (url.find('@'), url.find("://")) {
        if scheme_end < at_pos {
            let scheme = &url[..scheme_end + 3];
            let after_at = &url[at_pos + 1..];
            return format!("{}<redacted>@{}", scheme, after_at);
        }
    }
    url.to_string()
}

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
///
/// Large error variants are boxed to reduce stack size
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    /// Token failed signature, expiry or claim validation
    #[error("JWT error: {0}")]
    Jwt(Box<jsonwebtoken::errors::Error>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed credentials
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Error::Config(Box::new(err))
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error::Jwt(Box::new(err))
    }
}
