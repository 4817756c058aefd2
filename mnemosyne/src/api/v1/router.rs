use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::api::state::AppState;

use super::handlers;
use super::middleware::v1_auth_middleware;

pub fn v1_router(state: AppState) -> Router<AppState> {
    let public_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/openapi.json", get(super::openapi::openapi_json))
        .merge(super::openapi::redoc_router());

    let protected_routes = Router::new()
        .route("/memories", get(handlers::memories::list_memories))
        .route("/memories/{memoryId}", get(handlers::memories::get_memory))
        .route(
            "/memories:ingest",
            post(handlers::memories::ingest_memories),
        )
        .route("/answer", post(handlers::query::answer))
        .route("/sessions", post(handlers::query::create_session))
        .route("/graph", post(handlers::analytics::belief_graph))
        .route("/timeline", post(handlers::analytics::timeline))
        .route_layer(middleware::from_fn_with_state(state, v1_auth_middleware));

    Router::new().merge(public_routes).merge(protected_routes)
}
