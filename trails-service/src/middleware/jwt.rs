//! JWT authentication middleware

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::{fs, sync::Arc};

use super::token::{extract_token, Claims, TokenValidator};
use crate::{
    config::AuthConfig,
    error::Error,
    handlers::{ApiError, ApiOperation},
};

fn config_error(message: String) -> Error {
    Error::Config(Box::new(figment::Error::from(message)))
}

/// JWT authentication middleware state
#[derive(Clone)]
pub struct JwtAuth {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl std::fmt::Debug for JwtAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtAuth")
            .field("algorithms", &self.validation.algorithms)
            .finish_non_exhaustive()
    }
}

impl JwtAuth {
    /// Build the validator from the key file named in `config`.
    pub fn new(config: &AuthConfig) -> Result<Self, Error> {
        let key = fs::read(&config.key_path).map_err(|e| {
            let path_display = config.key_path.display().to_string();
            config_error(format!(
                "Failed to read JWT key from path '{}'\n\n\
                Troubleshooting:\n\
                1. Verify the file exists: ls -la {}\n\
                2. Check file permissions (must be readable)\n\
                3. For RS*/ES*: use a PEM format public key\n\
                4. For HS*: use a raw secret file\n\n\
                Error: {}",
                path_display, path_display, e
            ))
        })?;

        Self::from_key(&key, config)
    }

    /// Build the validator from key material already in memory.
    pub fn from_key(key: &[u8], config: &AuthConfig) -> Result<Self, Error> {
        let algorithm = match config.algorithm.to_uppercase().as_str() {
            "RS256" => Algorithm::RS256,
            "RS384" => Algorithm::RS384,
            "RS512" => Algorithm::RS512,
            "ES256" => Algorithm::ES256,
            "ES384" => Algorithm::ES384,
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            alg => return Err(config_error(format!("Unsupported JWT algorithm: {}", alg))),
        };

        let decoding_key = match algorithm {
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => DecodingKey::from_rsa_pem(key)?,
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(key)?,
            _ => DecodingKey::from_secret(key),
        };

        // Configured issuer and audience must also be present in the token
        let mut required = vec!["exp"];
        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
            required.push("iss");
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
            required.push("aud");
        }
        validation.set_required_spec_claims(&required);

        Ok(Self {
            decoding_key: Arc::new(decoding_key),
            validation,
        })
    }

    /// Middleware function to validate the bearer token and inject [`Claims`]
    pub async fn middleware(
        State(auth): State<Self>,
        mut request: Request<Body>,
        next: Next,
    ) -> Result<Response, ApiError> {
        let operation = ApiOperation::from_method(request.method());
        let claims = extract_token(request.headers())
            .and_then(|token| auth.validate_token(&token))
            .map_err(|e| {
                tracing::warn!(path = %request.uri().path(), "Rejected bearer token: {}", e);
                ApiError::from(e).with_operation(operation)
            })?;

        tracing::debug!(sub = %claims.sub, "Authenticated request");
        request.extensions_mut().insert(claims);

        Ok(next.run(request).await)
    }
}

impl TokenValidator for JwtAuth {
    fn validate_token(&self, token: &str) -> Result<Claims, Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::io::Write;

    const SECRET: &[u8] = b"unit-test-secret-unit-test-secret";

    fn claims(roles: &[&str], exp_offset: i64) -> Claims {
        let now = chrono::Utc::now().timestamp();
        Claims {
            sub: "user:7".to_string(),
            roles: roles.iter().map(|r| r.to_string()).collect(),
            exp: now + exp_offset,
            iat: Some(now),
            iss: None,
            aud: None,
        }
    }

    fn sign(secret: &[u8], claims: &Claims) -> String {
        encode(&Header::default(), claims, &EncodingKey::from_secret(secret)).unwrap()
    }

    fn token(secret: &[u8], roles: &[&str], exp_offset: i64) -> String {
        sign(secret, &claims(roles, exp_offset))
    }

    #[test]
    fn test_valid_token_yields_claims() {
        let auth = JwtAuth::from_key(SECRET, &Config::default().auth).unwrap();
        let claims = auth.validate_token(&token(SECRET, &["Writer"], 600)).unwrap();
        assert_eq!(claims.sub, "user:7");
        assert!(claims.has_role("Writer"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let auth = JwtAuth::from_key(SECRET, &Config::default().auth).unwrap();
        let result = auth.validate_token(&token(b"another-secret-another-secret!!", &[], 600));
        assert!(matches!(result, Err(Error::Jwt(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let auth = JwtAuth::from_key(SECRET, &Config::default().auth).unwrap();
        assert!(auth.validate_token(&token(SECRET, &["Writer"], -3600)).is_err());
    }

    #[test]
    fn test_issuer_is_enforced_when_configured() {
        let mut config = Config::default().auth;
        config.issuer = Some("trails-auth".to_string());
        let auth = JwtAuth::from_key(SECRET, &config).unwrap();
        assert!(matches!(
            auth.validate_token(&token(SECRET, &[], 600)),
            Err(Error::Jwt(_))
        ));

        let mut wrong = claims(&[], 600);
        wrong.iss = Some("someone-else".to_string());
        assert!(auth.validate_token(&sign(SECRET, &wrong)).is_err());

        let mut right = claims(&[], 600);
        right.iss = Some("trails-auth".to_string());
        assert!(auth.validate_token(&sign(SECRET, &right)).is_ok());
    }

    #[test]
    fn test_audience_is_enforced_when_configured() {
        let mut config = Config::default().auth;
        config.audience = Some("trails-api".to_string());
        let auth = JwtAuth::from_key(SECRET, &config).unwrap();
        assert!(auth.validate_token(&token(SECRET, &[], 600)).is_err());

        let mut with_aud = claims(&[], 600);
        with_aud.aud = Some("trails-api".to_string());
        assert!(auth.validate_token(&sign(SECRET, &with_aud)).is_ok());
    }

    #[test]
    fn test_issuer_is_optional_when_not_configured() {
        let auth = JwtAuth::from_key(SECRET, &Config::default().auth).unwrap();
        let mut with_iss = claims(&[], 600);
        with_iss.iss = Some("anyone".to_string());
        assert!(auth.validate_token(&sign(SECRET, &with_iss)).is_ok());
        assert!(auth.validate_token(&token(SECRET, &[], 600)).is_ok());
    }

    #[test]
    fn test_unsupported_algorithm() {
        let mut config = Config::default().auth;
        config.algorithm = "none".to_string();
        assert!(matches!(JwtAuth::from_key(SECRET, &config), Err(Error::Config(_))));
    }

    #[test]
    fn test_new_reads_key_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SECRET).unwrap();
        let mut config = Config::default().auth;
        config.key_path = file.path().to_path_buf();

        let auth = JwtAuth::new(&config).unwrap();
        assert!(auth.validate_token(&token(SECRET, &[], 600)).is_ok());

        config.key_path = "/nonexistent/trails/key".into();
        assert!(matches!(JwtAuth::new(&config), Err(Error::Config(_))));
    }
}
