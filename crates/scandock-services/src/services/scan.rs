//! Scan orchestration: one logical "perform a scan" operation.

use chrono::Local;
use scandock_core::models::scan_filename;
use scandock_core::{InputSource, ScanError, ScanRequest, ScanResult, ScanSettings};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

use crate::traits::{DocumentArchive, ScanDevice};

/// Composes a [`ScanDevice`] and a [`DocumentArchive`].
///
/// The scanner is a single shared device, so every interaction with it (source
/// detection, job creation, polling, cleanup) happens while holding `scanner_lock`.
/// Manual and automatic scans therefore never have two jobs open at once. The
/// upload runs after the lock is released.
pub struct ScanService {
    device: Arc<dyn ScanDevice>,
    archive: Arc<dyn DocumentArchive>,
    scanner_lock: Mutex<()>,
}

impl ScanService {
    pub fn new(device: Arc<dyn ScanDevice>, archive: Arc<dyn DocumentArchive>) -> Self {
        Self {
            device,
            archive,
            scanner_lock: Mutex::new(()),
        }
    }

    pub fn device(&self) -> &Arc<dyn ScanDevice> {
        &self.device
    }

    /// Scan one document and upload it.
    ///
    /// All-or-nothing for the caller: any job or upload failure is returned as is.
    /// The scanner job is deleted on every path once it has been created.
    #[tracing::instrument(skip(self, request), fields(resolution = request.resolution, color_mode = %request.color_mode))]
    pub async fn perform_scan(&self, request: ScanRequest) -> Result<ScanResult, ScanError> {
        request.validate()?;

        let guard = self.scanner_lock.lock().await;
        self.scan_locked(guard, request).await
    }

    /// Scan from the feeder if paper is still there once the scanner is free.
    ///
    /// The feeder is checked while holding the scanner lock, so a page already
    /// taken by a scan that held the lock first never starts a second job.
    /// Returns `Ok(None)` when the feeder is empty.
    #[tracing::instrument(skip(self))]
    pub async fn scan_loaded_feeder(&self) -> Result<Option<ScanResult>, ScanError> {
        let guard = self.scanner_lock.lock().await;

        if !self.device.adf_loaded().await {
            tracing::debug!("Feeder empty once the scanner was free, skipping");
            return Ok(None);
        }

        self.scan_locked(guard, ScanRequest::from_feeder())
            .await
            .map(Some)
    }

    async fn scan_locked(
        &self,
        guard: MutexGuard<'_, ()>,
        request: ScanRequest,
    ) -> Result<ScanResult, ScanError> {
        let source = match request.source {
            Some(source) => source,
            None => {
                let source = if self.device.has_adf().await {
                    InputSource::Adf
                } else {
                    InputSource::Platen
                };
                tracing::info!(source = %source, "Auto-detected source");
                source
            }
        };

        let settings = ScanSettings::document(request.resolution, request.color_mode, source);
        let job = self.device.create_job(&settings).await?;
        let document = self.device.fetch_document(&job).await;
        self.device.delete_job(&job).await;
        drop(guard);
        let document = document?;

        let filename = scan_filename(&Local::now());
        self.archive
            .upload(document.clone(), &filename, request.title.as_deref())
            .await?;

        let result = ScanResult {
            document,
            source,
            filename,
        };
        tracing::info!(
            filename = %result.filename,
            source = %result.source,
            bytes = result.byte_count(),
            "Scan completed and uploaded"
        );
        Ok(result)
    }
}
