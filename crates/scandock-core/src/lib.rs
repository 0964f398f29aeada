//! Scandock Core Library
//!
//! This crate provides the domain models, eSCL request documents, error types and
//! configuration shared by every scandock component.

pub mod config;
pub mod error;
pub mod escl;
pub mod models;

// Re-export commonly used types
pub use config::{AutoScanConfig, Config, RetryPolicy};
pub use error::{LogLevel, ScanError};
pub use models::{
    AutoScanState, ColorMode, InputSource, Intent, ScanJobHandle, ScanRequest, ScanResult,
    ScanSettings,
};
