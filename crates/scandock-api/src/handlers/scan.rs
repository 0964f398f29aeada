//! Manual scan endpoint (`GET|POST /scan`)

use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Json,
};
use scandock_core::{ColorMode, InputSource, ScanError, ScanRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Query string of `GET /scan`. Values arrive as text and are validated by
/// [`ScanParams::into_request`] so malformed values answer with the JSON error body.
#[derive(Debug, Default, Deserialize)]
pub struct ScanQuery {
    pub resolution: Option<String>,
    pub color_mode: Option<String>,
    pub source: Option<String>,
    pub title: Option<String>,
}

/// JSON body of `POST /scan`. Every field is optional; an empty body means defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ScanParams {
    pub resolution: Option<u32>,
    pub color_mode: Option<String>,
    pub source: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub success: bool,
    pub message: String,
    pub filename: String,
    pub source: InputSource,
}

impl ScanQuery {
    fn into_params(self) -> Result<ScanParams, ScanError> {
        let resolution = match self.resolution.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(value.parse::<u32>().map_err(|_| {
                ScanError::InvalidInput(format!(
                    "Invalid resolution '{}': expected a positive integer",
                    value
                ))
            })?),
        };

        Ok(ScanParams {
            resolution,
            color_mode: self.color_mode,
            source: self.source,
            title: self.title,
        })
    }
}

impl ScanParams {
    /// Apply defaults (300 dpi, RGB24, auto-detected source) and validate.
    pub fn into_request(self) -> Result<ScanRequest, ScanError> {
        let defaults = ScanRequest::default();

        let color_mode = match non_empty(self.color_mode) {
            Some(value) => value.parse::<ColorMode>()?,
            None => defaults.color_mode,
        };
        let source = non_empty(self.source)
            .map(|value| value.parse::<InputSource>())
            .transpose()?;

        let request = ScanRequest {
            resolution: self.resolution.unwrap_or(defaults.resolution),
            color_mode,
            source,
            title: non_empty(self.title),
        };
        request.validate()?;
        Ok(request)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Trigger a scan with parameters from the query string
#[tracing::instrument(skip(state))]
pub async fn scan_with_query(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScanQuery>,
) -> Result<Json<ScanResponse>, HttpAppError> {
    let request = query.into_params()?.into_request()?;
    run_scan(state, request).await
}

/// Trigger a scan with parameters from an optional JSON body
#[tracing::instrument(skip(state, body), fields(body_len = body.len()))]
pub async fn scan_with_body(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ScanResponse>, HttpAppError> {
    let params = if body.iter().all(u8::is_ascii_whitespace) {
        ScanParams::default()
    } else {
        serde_json::from_slice::<Option<ScanParams>>(&body)
            .map_err(|e| ScanError::InvalidInput(format!("Invalid request body: {}", e)))?
            .unwrap_or_default()
    };
    run_scan(state, params.into_request()?).await
}

/// The scan runs on its own task so a client that disconnects mid-scan does not
/// cancel it; the scanner job is still cleaned up and the document still uploaded.
async fn run_scan(
    state: Arc<AppState>,
    request: ScanRequest,
) -> Result<Json<ScanResponse>, HttpAppError> {
    let service = state.scan_service.clone();
    let result = tokio::spawn(async move { service.perform_scan(request).await }).await??;

    Ok(Json(ScanResponse {
        success: true,
        message: result.message(),
        filename: result.filename,
        source: result.source,
    }))
}
