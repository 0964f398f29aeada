//! Error types module
//!
//! Every failure a scan can produce is represented by [`ScanError`]. Advisory calls
//! (status, capabilities, feeder checks) never return it; they degrade to a safe
//! default instead. Job-critical calls (create, fetch, upload) return it unchanged
//! to the caller of the scan. Transport failures on those calls are wrapped into
//! the variant of the step that failed.

use std::time::Duration;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like invalid input
    Debug,
    /// Warning level - for recoverable issues like a busy scanner
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The scanner answered with a status other than success or "not ready".
    #[error("Scanner returned unexpected status {status}: {message}")]
    Protocol { status: u16, message: String },

    #[error("Error creating scan job: {0}")]
    JobCreation(String),

    #[error(
        "Scan timed out after {} seconds ({attempts} attempts)",
        .budget.as_secs_f64()
    )]
    RetrievalTimeout { attempts: u32, budget: Duration },

    #[error("Error retrieving scanned document: {0}")]
    Retrieval(String),

    #[error("Error uploading to Paperless-ngx: {0}")]
    Upload(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ScanError {
    /// Machine-readable error code (e.g., "JOB_CREATION_FAILED")
    pub fn error_code(&self) -> &'static str {
        match self {
            ScanError::Protocol { .. } => "SCANNER_PROTOCOL_ERROR",
            ScanError::JobCreation(_) => "JOB_CREATION_FAILED",
            ScanError::RetrievalTimeout { .. } => "SCAN_TIMEOUT",
            ScanError::Retrieval(_) => "RETRIEVAL_FAILED",
            ScanError::Upload(_) => "UPLOAD_FAILED",
            ScanError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    /// HTTP status code the gateway should answer with
    pub fn http_status_code(&self) -> u16 {
        match self {
            ScanError::InvalidInput(_) => 400,
            _ => 500,
        }
    }

    pub fn log_level(&self) -> LogLevel {
        match self {
            ScanError::InvalidInput(_) => LogLevel::Debug,
            ScanError::RetrievalTimeout { .. } => LogLevel::Warn,
            _ => LogLevel::Error,
        }
    }

    /// Whether the scanned bytes were lost after a successful scan
    pub fn is_data_loss(&self) -> bool {
        matches!(self, ScanError::Upload(_))
    }
}
