//! HTTP error response conversion
//!
//! Handlers return `Result<_, HttpAppError>`; scan failures and invalid parameters
//! both render as `{success: false, error, code}` with the status chosen by
//! [`ScanError::http_status_code`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use scandock_core::{LogLevel, ScanError};
use scandock_infra::ErrorResponse;
use tokio::task::JoinError;

#[derive(Debug)]
pub enum HttpAppError {
    Scan(ScanError),
    /// The request could not be served for reasons unrelated to the scanner or archive.
    Internal(String),
}

impl From<ScanError> for HttpAppError {
    fn from(err: ScanError) -> Self {
        HttpAppError::Scan(err)
    }
}

impl From<JoinError> for HttpAppError {
    fn from(err: JoinError) -> Self {
        HttpAppError::Internal(format!("Scan task failed: {}", err))
    }
}

fn log_error(error: &ScanError) {
    let code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, code, "Error occurred");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, code, "Error occurred");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, code, "Error occurred");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpAppError::Scan(error) => {
                log_error(&error);
                let status = StatusCode::from_u16(error.http_status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                (status, ErrorResponse::new(error.to_string(), error.error_code()))
            }
            HttpAppError::Internal(message) => {
                tracing::error!(error = %message, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(message, "INTERNAL_ERROR"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
