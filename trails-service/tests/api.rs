//! End-to-end tests driving the full router in-process

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use trails_service::{
    build_router,
    config::Config,
    handlers::{DifficultyDto, RegionDto, TrailDto},
    middleware::{Claims, JwtAuth},
    repository::{
        memory::{DIFFICULTY_EASY, DIFFICULTY_HARD},
        MemoryStorage,
    },
    state::AppState,
    Server,
};

const SECRET: &[u8] = b"integration-test-secret-integration";

fn app() -> Router {
    app_with(Config::default())
}

fn app_with(config: Config) -> Router {
    let auth = JwtAuth::from_key(SECRET, &config.auth).unwrap();
    let state = AppState::new(config.clone(), MemoryStorage::seeded());
    Server::new(config).apply_middleware(build_router(state, auth))
}

fn token(roles: &[&str]) -> String {
    token_from(roles, None)
}

fn token_from(roles: &[&str], issuer: Option<&str>) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "editor@example.com".to_string(),
        roles: roles.iter().map(|r| r.to_string()).collect(),
        exp: now + 600,
        iat: Some(now),
        iss: issuer.map(str::to_string),
        aud: None,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET)).unwrap()
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    bearer: Option<&str>,
) -> (StatusCode, axum::http::HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, headers, value)
}

async fn first_region(app: &Router) -> RegionDto {
    let (_, _, body) = send(app, Method::GET, "/regions", None, None).await;
    let regions: Vec<RegionDto> = serde_json::from_value(body).unwrap();
    regions.into_iter().next().unwrap()
}

async fn create_trail(app: &Router, name: &str, length: f64) -> TrailDto {
    let region = first_region(app).await;
    let (status, _, body) = send(
        app,
        Method::POST,
        "/trails",
        Some(json!({
            "name": name,
            "description": "A walk",
            "lengthInKm": length,
            "difficultyId": DIFFICULTY_EASY,
            "regionId": region.id,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    serde_json::from_value(body).unwrap()
}

fn names(body: Value) -> Vec<String> {
    let trails: Vec<TrailDto> = serde_json::from_value(body).unwrap();
    trails.into_iter().map(|t| t.name).collect()
}

#[tokio::test]
async fn test_health_and_readiness() {
    let app = app();
    let (status, _, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, _, body) = send(&app, Method::GET, "/ready", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ready"], true);
}

#[tokio::test]
async fn test_difficulties_are_seeded() {
    let app = app();
    let (status, _, body) = send(&app, Method::GET, "/difficulties", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let difficulties: Vec<DifficultyDto> = serde_json::from_value(body).unwrap();
    let names: Vec<_> = difficulties.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["Easy", "Medium", "Hard"]);
}

#[tokio::test]
async fn test_filter_sort_page_over_http() {
    let app = app();
    create_trail(&app, "Coast Track", 12.0).await;
    create_trail(&app, "Summit Route", 5.0).await;
    create_trail(&app, "River Track", 3.5).await;

    let (status, _, body) = send(
        &app,
        Method::GET,
        "/trails?filterOn=Name&filterQuery=Track&sortBy=Length&isAscending=true&pageNumber=1&pageSize=10",
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(body), ["River Track", "Coast Track"]);

    let (_, _, body) = send(
        &app,
        Method::GET,
        "/trails?filterOn=name&filterQuery=track&sortBy=length&isAscending=false",
        None,
        None,
    )
    .await;
    assert_eq!(names(body), ["Coast Track", "River Track"]);
}

#[tokio::test]
async fn test_paging_clamps_to_first_page() {
    let app = app();
    for (name, length) in [("A", 1.0), ("B", 2.0), ("C", 3.0)] {
        create_trail(&app, name, length).await;
    }

    let (_, _, body) = send(&app, Method::GET, "/trails?pageNumber=0&pageSize=2", None, None).await;
    assert_eq!(names(body), ["A", "B"]);

    let (_, _, body) = send(&app, Method::GET, "/trails?pageNumber=2&pageSize=2", None, None).await;
    assert_eq!(names(body), ["C"]);

    let (_, _, body) = send(&app, Method::GET, "/trails?pageNumber=-4&pageSize=-1", None, None).await;
    assert_eq!(names(body), ["A"]);

    let (status, _, _) = send(&app, Method::GET, "/trails?pageNumber=first", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trail_lifecycle() {
    let app = app();
    let trail = create_trail(&app, "Ridge Walk", 8.25).await;
    let uri = format!("/trails/{}", trail.id);

    let (status, _, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<TrailDto>(body).unwrap(), trail);

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({
            "name": "Ridge Walk Loop",
            "description": "Now a loop",
            "lengthInKm": 9.0,
            "trailImageUrl": "https://img.example.com/ridge.jpg",
            "difficultyId": DIFFICULTY_HARD,
            "regionId": trail.region_id,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: TrailDto = serde_json::from_value(body).unwrap();
    assert_eq!(updated.id, trail.id);
    assert_eq!(updated.difficulty_id, DIFFICULTY_HARD);
    assert_eq!(updated.trail_image_url.as_deref(), Some("https://img.example.com/ridge.jpg"));

    let (status, _, body) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_value::<TrailDto>(body).unwrap(), updated);

    let (status, _, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _, _) = send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_trail_with_unknown_region_leaves_no_trace() {
    let app = app();
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/trails",
        Some(json!({
            "name": "Lost Track",
            "description": "Nowhere",
            "lengthInKm": 1.0,
            "difficultyId": DIFFICULTY_EASY,
            "regionId": uuid::Uuid::new_v4(),
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["entityType"], "Region");

    let (_, _, body) = send(&app, Method::GET, "/trails", None, None).await;
    assert!(names(body).is_empty());
}

#[tokio::test]
async fn test_update_unknown_trail_is_not_found() {
    let app = app();
    let region = first_region(&app).await;
    let (status, _, _) = send(
        &app,
        Method::PUT,
        &format!("/trails/{}", uuid::Uuid::new_v4()),
        Some(json!({
            "name": "Ghost",
            "description": "Never existed",
            "lengthInKm": 2.0,
            "difficultyId": DIFFICULTY_EASY,
            "regionId": region.id,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_input_is_rejected() {
    let app = app();
    let (status, _, _) = send(&app, Method::GET, "/trails/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let region = first_region(&app).await;
    let (status, _, body) = send(
        &app,
        Method::POST,
        "/trails",
        Some(json!({
            "name": "",
            "description": "Blank name",
            "lengthInKm": 1.0,
            "difficultyId": DIFFICULTY_EASY,
            "regionId": region.id,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "BAD_REQUEST");

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/trails",
        Some(json!({ "name": "No length" })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_region_reads_are_public() {
    let app = app();
    let (status, _, body) = send(&app, Method::GET, "/regions", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let regions: Vec<RegionDto> = serde_json::from_value(body).unwrap();
    assert_eq!(regions.len(), 6);
    assert_eq!(regions[0].code, "AKL");

    let (status, _, body) = send(&app, Method::GET, &format!("/regions/{}", regions[3].id), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Wellington");
}

#[tokio::test]
async fn test_region_mutations_require_writer() {
    let app = app();
    let body = json!({ "code": "OTA", "name": "Otago" });

    let (status, _, error) = send(&app, Method::POST, "/regions", Some(body.clone()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHORIZED");
    assert_eq!(error["status"], 401);
    assert_eq!(error["operation"], "create");

    let (status, _, error) = send(&app, Method::POST, "/regions", Some(body.clone()), Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHORIZED");

    let reader = token(&["Reader"]);
    let (status, _, error) = send(&app, Method::POST, "/regions", Some(body.clone()), Some(&reader)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "FORBIDDEN");
    assert_eq!(error["operation"], "create");

    let region = first_region(&app).await;
    let (status, _, _) = send(&app, Method::DELETE, &format!("/regions/{}", region.id), None, Some(&reader)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, _, listed) = send(&app, Method::GET, "/regions", None, None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(6));
}

#[tokio::test]
async fn test_configured_issuer_is_required() {
    let mut config = Config::default();
    config.auth.issuer = Some("trails-auth".to_string());
    let app = app_with(config);
    let body = json!({ "code": "STL", "name": "Southland" });

    let unissued = token(&["Writer"]);
    let (status, _, error) = send(&app, Method::POST, "/regions", Some(body.clone()), Some(&unissued)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error["code"], "UNAUTHORIZED");

    let foreign = token_from(&["Writer"], Some("elsewhere"));
    let (status, _, _) = send(&app, Method::POST, "/regions", Some(body.clone()), Some(&foreign)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, _, listed) = send(&app, Method::GET, "/regions", None, None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(6));

    let issued = token_from(&["Writer"], Some("trails-auth"));
    let (status, _, _) = send(&app, Method::POST, "/regions", Some(body), Some(&issued)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn test_region_lifecycle_with_writer() {
    let app = app();
    let writer = token(&["Reader", "Writer"]);

    let (status, headers, body) = send(
        &app,
        Method::POST,
        "/regions",
        Some(json!({ "code": "OTA", "name": "Otago", "regionImageUrl": "https://img.example.com/ota.png" })),
        Some(&writer),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created: RegionDto = serde_json::from_value(body).unwrap();
    let location = format!("/regions/{}", created.id);
    assert_eq!(headers.get(header::LOCATION).unwrap(), location.as_str());

    let (status, _, body) = send(
        &app,
        Method::PUT,
        &location,
        Some(json!({ "code": "OTG", "name": "Otago Central" })),
        Some(&writer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let updated: RegionDto = serde_json::from_value(body).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.region_image_url, None);

    let (status, _, _) = send(
        &app,
        Method::PUT,
        &location,
        Some(json!({ "code": "OTAGO", "name": "Otago" })),
        Some(&writer),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) = send(&app, Method::DELETE, &location, None, Some(&writer)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "OTG");

    let (status, _, _) = send(&app, Method::GET, &location, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, Method::DELETE, &location, None, Some(&writer)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleted_region_blocks_new_trails_but_keeps_existing() {
    let app = app();
    let writer = token(&["Writer"]);
    let trail = create_trail(&app, "Harbour Walk", 4.0).await;

    let (status, _, _) = send(
        &app,
        Method::DELETE,
        &format!("/regions/{}", trail.region_id),
        None,
        Some(&writer),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(&app, Method::GET, &format!("/trails/{}", trail.id), None, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = send(
        &app,
        Method::POST,
        "/trails",
        Some(json!({
            "name": "Second Walk",
            "description": "Same region",
            "lengthInKm": 2.0,
            "difficultyId": DIFFICULTY_EASY,
            "regionId": trail.region_id,
        })),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = app();
    let (_, headers, _) = send(&app, Method::GET, "/regions", None, None).await;
    assert!(headers.contains_key("x-request-id"));
}
