//! API route handlers.

pub mod auth;

use crate::auth::middleware::AppState;
use axum::{
    routing::{get, patch, post},
    Json, Router,
};

/// Build the API router with all endpoints.
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth endpoints
        .route("/api/v1/auth/signup", post(auth::signup))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/profile", patch(auth::update_profile))
        // Liveness probe
        .route("/health", get(health))
}

/// GET /health — liveness probe
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
