//! Scandock Services Layer
//!
//! This crate is the **scan service layer**: the eSCL scan-job client, the Paperless
//! uploader, and the [`ScanService`] that composes them into one "perform a scan"
//! operation. The gateway and the auto-scan supervisor both go through
//! [`ScanService`], which serialises all scanner access.

pub mod services;
pub mod traits;

pub use services::escl::EsclClient;
pub use services::paperless::PaperlessClient;
pub use services::scan::ScanService;
pub use traits::{DocumentArchive, ScanDevice};
