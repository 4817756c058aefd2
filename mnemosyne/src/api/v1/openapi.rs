use axum::Json;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use super::dto;
use super::handlers;
use super::response;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Mnemosyne API",
        version = "1.0.0",
        description = "Personal memory log. Ingest text, ask time-aware questions and trace how beliefs change.",
    ),
    paths(
        handlers::health::health_check,
        handlers::memories::ingest_memories,
        handlers::memories::list_memories,
        handlers::memories::get_memory,
        handlers::query::answer,
        handlers::query::create_session,
        handlers::analytics::belief_graph,
        handlers::analytics::timeline,
    ),
    components(schemas(
        response::ErrorCode,
        response::ApiError,
        response::ResponseMeta,
        dto::IngestMemoriesRequest,
        dto::ListMemoriesResponse,
        dto::AnswerRequest,
        dto::SessionRequest,
        dto::GraphRequest,
        dto::TimelineRequest,
        dto::TimelineResponse,
        crate::models::Memory,
        crate::models::MemoryType,
        crate::models::IngestProfile,
        crate::models::RevisionLink,
        crate::models::Contradiction,
        crate::models::ConflictingMemory,
        crate::models::ContradictionStatus,
        crate::models::BeliefGraph,
        crate::models::GraphNode,
        crate::models::GraphEdge,
        crate::models::GraphNodeType,
        crate::models::GraphEdgeType,
        crate::services::IngestSummary,
        crate::services::AnswerResponse,
        crate::services::ThinkingSession,
        handlers::health::HealthData,
    )),
    tags(
        (name = "health", description = "Health check"),
        (name = "memories", description = "Ingestion and listing of the memory log"),
        (name = "query", description = "Time-aware answers and thinking sessions"),
        (name = "analytics", description = "Belief graph and timeline"),
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            utoipa::openapi::security::SecurityScheme::Http(utoipa::openapi::security::Http::new(
                utoipa::openapi::security::HttpAuthScheme::Bearer,
            )),
        );
    }
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn redoc_router<S: Clone + Send + Sync + 'static>() -> axum::Router<S> {
    Redoc::with_url("/docs", ApiDoc::openapi()).into()
}
