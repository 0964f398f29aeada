//! Seams between the scan orchestrator and the outside world.
//!
//! [`ScanDevice`] is implemented by [`crate::EsclClient`] and [`DocumentArchive`]
//! by [`crate::PaperlessClient`]. Tests provide in-memory implementations.

use async_trait::async_trait;
use bytes::Bytes;
use scandock_core::escl::status_reports_adf_loaded;
use scandock_core::{ScanError, ScanJobHandle, ScanSettings};

/// One scanner, driven one job at a time.
///
/// Advisory methods (`status`, `has_adf`, `adf_loaded`) never fail; they fall back
/// to `None`/`false`. Job methods return [`ScanError`], except `delete_job`, which
/// swallows every failure so cleanup never masks the outcome of a scan.
#[async_trait]
pub trait ScanDevice: Send + Sync {
    /// Raw `ScannerStatus` document, or `None` if the scanner could not be reached.
    async fn status(&self) -> Option<String>;

    /// Whether the scanner advertises a document feeder. `false` on any failure.
    async fn has_adf(&self) -> bool;

    /// Whether paper is waiting in the feeder. `false` on any failure.
    async fn adf_loaded(&self) -> bool {
        self.status()
            .await
            .map(|status| status_reports_adf_loaded(&status))
            .unwrap_or(false)
    }

    /// Open a scan job; the scanner holds it until [`ScanDevice::delete_job`].
    async fn create_job(&self, settings: &ScanSettings) -> Result<ScanJobHandle, ScanError>;

    /// Wait for and download the rendered document of an open job.
    async fn fetch_document(&self, job: &ScanJobHandle) -> Result<Bytes, ScanError>;

    /// Best-effort removal of a job.
    async fn delete_job(&self, job: &ScanJobHandle);
}

/// Destination for finished documents.
#[async_trait]
pub trait DocumentArchive: Send + Sync {
    async fn upload(
        &self,
        document: Bytes,
        filename: &str,
        title: Option<&str>,
    ) -> Result<(), ScanError>;
}
