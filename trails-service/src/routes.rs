//! Router assembly

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::{
    handlers::{difficulties, regions, trails},
    health,
    middleware::{JwtAuth, RequireRole},
    repository::Storage,
    state::AppState,
};

/// Build the application router.
///
/// Trail routes and region reads are open. Region mutations run through
/// bearer token authentication, then a check for the configured writer role.
/// The returned router carries no server-level middleware; see
/// [`crate::Server::apply_middleware`].
pub fn build_router<S: Storage>(state: AppState<S>, auth: JwtAuth) -> Router {
    let writer = RequireRole::new(state.config().auth.writer_role.as_str());

    let trail_routes = Router::new()
        .route("/trails", get(trails::list::<S>).post(trails::create::<S>))
        .route(
            "/trails/{id}",
            get(trails::get::<S>)
                .put(trails::update::<S>)
                .delete(trails::delete::<S>),
        );

    let region_reads = Router::new()
        .route("/regions", get(regions::list::<S>))
        .route("/regions/{id}", get(regions::get::<S>));

    let region_writes = Router::new()
        .route("/regions", post(regions::create::<S>))
        .route(
            "/regions/{id}",
            put(regions::update::<S>).delete(regions::delete::<S>),
        )
        .route_layer(from_fn_with_state(writer, RequireRole::middleware))
        .route_layer(from_fn_with_state(auth, JwtAuth::middleware));

    Router::new()
        .route("/health", get(health::health::<S>))
        .route("/ready", get(health::readiness::<S>))
        .route("/difficulties", get(difficulties::list::<S>))
        .merge(trail_routes)
        .merge(region_reads)
        .merge(region_writes)
        .with_state(state)
}
