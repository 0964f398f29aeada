//! Test helpers: in-memory scanner/archive fakes and a fake eSCL HTTP server.

pub mod escl_server;

use async_trait::async_trait;
use bytes::Bytes;
use regex::Regex;
use scandock_core::{ScanError, ScanJobHandle, ScanSettings};
use scandock_services::{DocumentArchive, ScanDevice};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{LazyLock, Mutex};
use std::time::Duration;

/// How the fake scanner answers `create_job`/`fetch_document`.
#[derive(Clone, Debug)]
pub enum JobOutcome {
    Document(&'static [u8]),
    NoLocation,
    FetchFails,
}

/// Records every call; optionally holds each job open for `fetch_delay`.
pub struct FakeScanner {
    pub has_adf: bool,
    pub adf_loaded: bool,
    pub outcome: JobOutcome,
    pub fetch_delay: Duration,
    pub created: Mutex<Vec<ScanSettings>>,
    pub fetches: AtomicUsize,
    pub deletes: AtomicUsize,
    pub open_jobs: AtomicUsize,
    pub max_open_jobs: AtomicUsize,
}

impl FakeScanner {
    pub fn new(has_adf: bool, outcome: JobOutcome) -> Self {
        Self {
            has_adf,
            adf_loaded: false,
            outcome,
            fetch_delay: Duration::ZERO,
            created: Mutex::new(Vec::new()),
            fetches: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
            open_jobs: AtomicUsize::new(0),
            max_open_jobs: AtomicUsize::new(0),
        }
    }

    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = delay;
        self
    }

    pub fn created_sources(&self) -> Vec<scandock_core::InputSource> {
        self.created
            .lock()
            .unwrap()
            .iter()
            .map(|s| s.input_source)
            .collect()
    }
}

#[async_trait]
impl ScanDevice for FakeScanner {
    async fn status(&self) -> Option<String> {
        if self.adf_loaded {
            Some("<scan:AdfState>ScannerAdfLoaded</scan:AdfState>".to_string())
        } else {
            Some("<scan:AdfState>ScannerAdfEmpty</scan:AdfState>".to_string())
        }
    }

    async fn has_adf(&self) -> bool {
        self.has_adf
    }

    async fn create_job(&self, settings: &ScanSettings) -> Result<ScanJobHandle, ScanError> {
        self.created.lock().unwrap().push(settings.clone());
        if matches!(self.outcome, JobOutcome::NoLocation) {
            return Err(ScanError::JobCreation("No job location returned".to_string()));
        }
        let open = self.open_jobs.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_open_jobs.fetch_max(open, Ordering::SeqCst);
        Ok(ScanJobHandle::new("http://scanner/eSCL/ScanJobs/1"))
    }

    async fn fetch_document(&self, _job: &ScanJobHandle) -> Result<Bytes, ScanError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        match self.outcome {
            JobOutcome::Document(bytes) => Ok(Bytes::from_static(bytes)),
            _ => Err(ScanError::Protocol {
                status: 500,
                message: "jammed".to_string(),
            }),
        }
    }

    async fn delete_job(&self, _job: &ScanJobHandle) {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.open_jobs.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Archive fake that keeps uploads in memory or rejects them all.
#[derive(Default)]
pub struct FakeArchive {
    pub reject: bool,
    pub uploads: Mutex<Vec<(String, Option<String>, usize)>>,
}

impl FakeArchive {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }
}

#[async_trait]
impl DocumentArchive for FakeArchive {
    async fn upload(
        &self,
        document: Bytes,
        filename: &str,
        title: Option<&str>,
    ) -> Result<(), ScanError> {
        if self.reject {
            return Err(ScanError::Upload("403 Forbidden - bad token".to_string()));
        }
        self.uploads.lock().unwrap().push((
            filename.to_string(),
            title.map(str::to_string),
            document.len(),
        ));
        Ok(())
    }
}

static SCAN_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^scan_\d{8}_\d{6}\.pdf$").unwrap());

/// `scan_YYYYMMDD_HHMMSS.pdf`
pub fn is_scan_filename(name: &str) -> bool {
    SCAN_FILENAME.is_match(name)
}
