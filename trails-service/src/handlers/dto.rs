//! Wire representations and request validation
//!
//! Request bodies are decoded and checked by [`ValidatedJson`] before a
//! handler runs; anything malformed or out of range is a 400. Responses are
//! built from domain entities with plain `From` conversions.

use std::str::FromStr;

use axum::{
    extract::{FromRequest, Request},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::error::ApiError;
use crate::domain::{Difficulty, Region, RegionDraft, Trail, TrailDraft};
use crate::ids::{DifficultyId, RegionId, TrailId};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 1000;
pub const REGION_CODE_LEN: usize = 3;

/// Field-level checks on a decoded request body
pub trait Validate {
    /// Returns a client-facing message describing the first violation.
    fn validate(&self) -> Result<(), String>;
}

fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    if value.chars().count() > max_len {
        return Err(format!("{} must be at most {} characters", field, max_len));
    }
    Ok(())
}

fn optional_url(field: &str, value: Option<&str>) -> Result<(), String> {
    match value {
        Some(url) if url.trim().is_empty() => Err(format!("{} must not be empty", field)),
        _ => Ok(()),
    }
}

/// JSON body extractor that also runs [`Validate`]
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        value.validate().map_err(ApiError::bad_request)?;
        Ok(Self(value))
    }
}

/// Parse a path segment as an entity id, rejecting anything that is not a UUID.
pub fn parse_id<Id: FromStr>(entity_type: &str, raw: &str) -> Result<Id, ApiError> {
    raw.parse().map_err(|_| {
        ApiError::bad_request(format!("'{}' is not a valid {} id", raw, entity_type))
            .with_entity(entity_type, raw)
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailDto {
    pub id: TrailId,
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_image_url: Option<String>,
    pub difficulty_id: DifficultyId,
    pub region_id: RegionId,
}

impl From<Trail> for TrailDto {
    fn from(trail: Trail) -> Self {
        Self {
            id: trail.id,
            name: trail.name,
            description: trail.description,
            length_in_km: trail.length_in_km,
            trail_image_url: trail.image_url,
            difficulty_id: trail.difficulty_id,
            region_id: trail.region_id,
        }
    }
}

/// Body of `POST /trails` and `PUT /trails/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrailRequest {
    pub name: String,
    pub description: String,
    pub length_in_km: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trail_image_url: Option<String>,
    pub difficulty_id: DifficultyId,
    pub region_id: RegionId,
}

impl Validate for TrailRequest {
    fn validate(&self) -> Result<(), String> {
        require_text("name", &self.name, MAX_NAME_LEN)?;
        require_text("description", &self.description, MAX_DESCRIPTION_LEN)?;
        if !self.length_in_km.is_finite() || self.length_in_km < 0.0 {
            return Err("lengthInKm must be a non-negative number".to_string());
        }
        optional_url("trailImageUrl", self.trail_image_url.as_deref())
    }
}

impl From<TrailRequest> for TrailDraft {
    fn from(request: TrailRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            length_in_km: request.length_in_km,
            image_url: request.trail_image_url,
            difficulty_id: request.difficulty_id,
            region_id: request.region_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDto {
    pub id: RegionId,
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_image_url: Option<String>,
}

impl From<Region> for RegionDto {
    fn from(region: Region) -> Self {
        Self {
            id: region.id,
            code: region.code,
            name: region.name,
            region_image_url: region.image_url,
        }
    }
}

/// Body of `POST /regions` and `PUT /regions/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionRequest {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_image_url: Option<String>,
}

impl Validate for RegionRequest {
    fn validate(&self) -> Result<(), String> {
        if self.code.chars().count() != REGION_CODE_LEN || self.code.trim() != self.code {
            return Err(format!(
                "code must be exactly {} characters",
                REGION_CODE_LEN
            ));
        }
        require_text("name", &self.name, MAX_NAME_LEN)?;
        optional_url("regionImageUrl", self.region_image_url.as_deref())
    }
}

impl From<RegionRequest> for RegionDraft {
    fn from(request: RegionRequest) -> Self {
        Self {
            code: request.code,
            name: request.name,
            image_url: request.region_image_url,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDto {
    pub id: DifficultyId,
    pub name: String,
}

impl From<Difficulty> for DifficultyDto {
    fn from(difficulty: Difficulty) -> Self {
        Self {
            id: difficulty.id,
            name: difficulty.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;
    use axum::{
        body::Body,
        http::{header::CONTENT_TYPE, Request},
    };
    use serde_json::json;

    fn trail_request() -> TrailRequest {
        TrailRequest {
            name: "Coast Track".to_string(),
            description: "Cliff-top walk".to_string(),
            length_in_km: 12.5,
            trail_image_url: None,
            difficulty_id: DifficultyId::new(),
            region_id: RegionId::new(),
        }
    }

    fn region_request() -> RegionRequest {
        RegionRequest {
            code: "AKL".to_string(),
            name: "Auckland".to_string(),
            region_image_url: None,
        }
    }

    #[test]
    fn test_trail_request_validation() {
        assert!(trail_request().validate().is_ok());

        let mut r = trail_request();
        r.name = "   ".to_string();
        assert!(r.validate().unwrap_err().contains("name"));

        let mut r = trail_request();
        r.name = "x".repeat(MAX_NAME_LEN + 1);
        assert!(r.validate().is_err());

        let mut r = trail_request();
        r.description = "d".repeat(MAX_DESCRIPTION_LEN + 1);
        assert!(r.validate().is_err());

        let mut r = trail_request();
        r.length_in_km = -0.1;
        assert!(r.validate().is_err());

        let mut r = trail_request();
        r.length_in_km = 0.0;
        assert!(r.validate().is_ok());

        let mut r = trail_request();
        r.trail_image_url = Some(String::new());
        assert!(r.validate().is_err());
    }

    #[test]
    fn test_region_code_length() {
        assert!(region_request().validate().is_ok());
        for code in ["AK", "AKLD", "", " AK"] {
            let mut r = region_request();
            r.code = code.to_string();
            assert!(r.validate().is_err(), "code {:?} accepted", code);
        }
    }

    #[test]
    fn test_trail_wire_format() {
        let request = trail_request();
        let region_id = request.region_id;
        let dto = TrailDto::from(TrailDraft::from(request).into_trail(TrailId::new()));
        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["lengthInKm"], json!(12.5));
        assert_eq!(value["regionId"], json!(region_id.to_string()));
        assert!(value.get("trailImageUrl").is_none());
    }

    #[test]
    fn test_region_request_accepts_missing_image() {
        let request: RegionRequest =
            serde_json::from_value(json!({ "code": "WGN", "name": "Wellington" })).unwrap();
        let draft = RegionDraft::from(request);
        assert_eq!(draft.image_url, None);
    }

    #[test]
    fn test_parse_id() {
        let id = TrailId::new();
        assert_eq!(parse_id::<TrailId>("Trail", &id.to_string()).unwrap(), id);

        let error = parse_id::<TrailId>("Trail", "not-a-uuid").unwrap_err();
        assert_eq!(error.kind, ApiErrorKind::BadRequest);
    }

    async fn extract(body: serde_json::Value) -> Result<RegionRequest, ApiError> {
        let request = Request::builder()
            .method("POST")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        ValidatedJson::<RegionRequest>::from_request(request, &())
            .await
            .map(|ValidatedJson(r)| r)
    }

    #[tokio::test]
    async fn test_validated_json_extractor() {
        assert!(extract(json!({ "code": "NSN", "name": "Nelson" })).await.is_ok());

        let invalid = extract(json!({ "code": "NELSON", "name": "Nelson" })).await.unwrap_err();
        assert_eq!(invalid.kind, ApiErrorKind::BadRequest);

        let malformed = extract(json!({ "name": "Nelson" })).await.unwrap_err();
        assert_eq!(malformed.kind, ApiErrorKind::BadRequest);
    }
}
