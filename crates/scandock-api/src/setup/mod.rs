//! Application setup and initialization
//!
//! Everything `main` needs before serving: telemetry, the scanner and archive
//! clients, the scan service, the auto-scan supervisor and the router.

pub mod routes;
pub mod server;
pub mod services;

use crate::state::AppState;
use anyhow::Result;
use scandock_core::Config;
use scandock_worker::{AutoScanHandle, AutoScanSupervisor};
use std::sync::Arc;

/// Initialize the entire application
///
/// The returned [`AutoScanHandle`] must be handed to
/// [`server::start_server`] so the supervisor stops with the server.
pub async fn initialize_app(
    config: Config,
) -> Result<(Arc<AppState>, axum::Router, AutoScanHandle)> {
    scandock_infra::init_telemetry(config.is_production())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    tracing::info!(
        scanner = %config.scanner_base_url(),
        paperless_url = %config.paperless_url,
        listen_addr = %config.listen_addr(),
        environment = %config.environment,
        "Configuration loaded and validated successfully"
    );
    if config.paperless_token.is_empty() {
        tracing::warn!("PAPERLESS_TOKEN is not set; uploads will be rejected by Paperless-ngx");
    }

    let state = services::initialize_services(&config)?;

    let supervisor = AutoScanSupervisor::start(
        state.scan_service.clone(),
        state.autoscan.clone(),
        config.autoscan,
    );

    let router = routes::setup_routes(state.clone());

    Ok((state, router, supervisor))
}
