//! Route configuration and setup.

mod health;

use crate::handlers::{autoscan, scan};
use crate::state::AppState;
use axum::{routing::get, Router};
use scandock_infra::request_id_middleware;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router<()> {
    Router::new()
        .route(
            "/scan",
            get(scan::scan_with_query).post(scan::scan_with_body),
        )
        .nest("/autoscan", autoscan_routes())
        .merge(health::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

fn autoscan_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/enable",
            get(autoscan::enable_autoscan).post(autoscan::enable_autoscan),
        )
        .route(
            "/disable",
            get(autoscan::disable_autoscan).post(autoscan::disable_autoscan),
        )
        .route("/status", get(autoscan::autoscan_status))
}
