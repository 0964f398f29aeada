//! Auto-scan toggle endpoints

use crate::state::AppState;
use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub success: bool,
    pub message: String,
    pub autoscan: bool,
}

#[derive(Debug, Serialize)]
pub struct AutoScanStatusResponse {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_scan_at: Option<DateTime<Utc>>,
}

#[tracing::instrument(skip(state))]
pub async fn enable_autoscan(State(state): State<Arc<AppState>>) -> Json<ToggleResponse> {
    state.autoscan.enable();
    tracing::info!("Auto-scan enabled");
    Json(ToggleResponse {
        success: true,
        message: "Auto-scan enabled".to_string(),
        autoscan: state.autoscan.is_enabled(),
    })
}

#[tracing::instrument(skip(state))]
pub async fn disable_autoscan(State(state): State<Arc<AppState>>) -> Json<ToggleResponse> {
    state.autoscan.disable();
    tracing::info!("Auto-scan disabled");
    Json(ToggleResponse {
        success: true,
        message: "Auto-scan disabled".to_string(),
        autoscan: state.autoscan.is_enabled(),
    })
}

#[tracing::instrument(skip(state))]
pub async fn autoscan_status(State(state): State<Arc<AppState>>) -> Json<AutoScanStatusResponse> {
    Json(AutoScanStatusResponse {
        enabled: state.autoscan.is_enabled(),
        last_scan_at: state.autoscan.last_scan_at(),
    })
}
