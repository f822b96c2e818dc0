use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id)),
        )
        .with_state(state)
}

/// Routes under /api/v1
fn api_routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/courses", get(handlers::list_courses))
        .route("/courses/:course_id", get(handlers::get_course))
        .route("/survey/skills", get(handlers::list_skills))
        // Recommendations
        .route(
            "/recommendations/content-based/:course_id",
            get(handlers::content_based_recommendations),
        )
        .route("/dependency-graph", get(handlers::dependency_graph))
        // Users
        .route("/users", post(handlers::create_user))
        .route("/users/:user_id", get(handlers::get_user))
        .route("/users/:user_id/survey", post(handlers::submit_survey))
        .route("/users/:user_id/progress", put(handlers::update_progress))
        .route("/users/:user_id/skill-gap", get(handlers::skill_gap))
        .route(
            "/users/:user_id/personalized-path",
            get(handlers::personalized_path),
        )
}

/// CORS policy allowing the configured frontend origin
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", origin, e))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(tower_http::cors::Any))
}
