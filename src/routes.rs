//! Router Assembly
//! Mission: Wire the REST surface, session gates, and SPA fallback

use axum::{
    middleware as axum_middleware,
    response::Json,
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use crate::auth::{api as auth_api, auth_middleware, require_admin, AuthState};
use crate::feedback::{api as feedback_api, FeedbackService};
use crate::middleware::request_logging;

/// Create the API router
pub fn create_router(auth_state: AuthState, service: Arc<FeedbackService>) -> Router {
    let auth_routes = Router::new()
        .route("/api/auth/signup", post(auth_api::signup))
        .route("/api/auth/login", post(auth_api::login))
        .with_state(auth_state.clone());

    // Routes any authenticated user may call
    let user_routes = Router::new()
        .route("/api/feedback", post(feedback_api::create_feedback))
        .route(
            "/api/feedback/my-feedback",
            get(feedback_api::get_my_feedback),
        )
        .route("/api/feedback/:id", get(feedback_api::get_feedback_by_id))
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(service.clone());

    // Admin routes: the admin gate runs after authentication
    let admin_routes = Router::new()
        .route("/api/feedback", get(feedback_api::get_all_feedback))
        .route(
            "/api/feedback/:id/status",
            put(feedback_api::update_feedback_status),
        )
        .route_layer(axum_middleware::from_fn(require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(service);

    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/api/health", get(health_check));

    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(user_routes)
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(request_logging))
        .layer(CorsLayer::permissive())
}

/// Serve the static frontend bundle for non-API paths (single-page fallback)
pub fn with_spa_fallback(router: Router, dist: &Path) -> Router {
    let index = dist.join("index.html");
    router.fallback_service(ServeDir::new(dist).not_found_service(ServeFile::new(index)))
}

/// Health check endpoint - liveness only
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "message": "Server is running", "status": "OK" }))
}
