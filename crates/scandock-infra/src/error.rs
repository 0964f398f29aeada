//! HTTP error response body
//!
//! The `IntoResponse` conversion lives in the gateway crate; this crate only owns
//! the JSON shape so every service answers failures the same way.

use serde::Serialize;

/// Standard error response format for HTTP APIs
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`; lets clients branch on the same field as success bodies.
    pub success: bool,
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            code: code.into(),
        }
    }
}
