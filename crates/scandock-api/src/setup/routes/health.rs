//! Health check route and handler.

use crate::state::AppState;
use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

/// Liveness probe. Does not contact the scanner or the archive.
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

pub(super) fn health_routes() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health))
}
