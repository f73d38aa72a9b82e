//! Middleware for authentication, authorization, and request tracking
//!
//! Region mutation routes are wrapped, outermost first, in
//! [`JwtAuth::middleware`] then [`RequireRole::middleware`].

mod authorize;
mod jwt;
mod request_tracking;
mod token;

pub use authorize::RequireRole;
pub use jwt::JwtAuth;
pub use request_tracking::{
    request_id_layer, request_id_propagation_layer, sensitive_headers_layer, SENSITIVE_HEADERS,
};
pub use token::{extract_token, Claims, TokenValidator};
