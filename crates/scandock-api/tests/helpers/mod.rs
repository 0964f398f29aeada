//! Gateway test helpers: in-memory scanner/archive fakes and a `TestServer` over
//! the real router.

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use regex::Regex;
use scandock_api::setup::routes::setup_routes;
use scandock_api::state::AppState;
use scandock_core::{ScanError, ScanJobHandle, ScanSettings};
use scandock_services::{DocumentArchive, ScanDevice, ScanService};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

pub const DOCUMENT: &[u8] = b"%PDF";

static SCAN_FILENAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^scan_\d{8}_\d{6}\.pdf$").unwrap());

/// `scan_YYYYMMDD_HHMMSS.pdf`
pub fn is_scan_filename(name: &str) -> bool {
    SCAN_FILENAME.is_match(name)
}

pub struct FakeScanner {
    pub has_adf: bool,
    pub jammed: bool,
    pub created: Mutex<Vec<ScanSettings>>,
    pub deletes: AtomicUsize,
}

impl FakeScanner {
    pub fn flatbed() -> Self {
        Self {
            has_adf: false,
            jammed: false,
            created: Mutex::new(Vec::new()),
            deletes: AtomicUsize::new(0),
        }
    }

    pub fn with_feeder() -> Self {
        Self {
            has_adf: true,
            ..Self::flatbed()
        }
    }

    pub fn jammed() -> Self {
        Self {
            jammed: true,
            ..Self::flatbed()
        }
    }

    pub fn job_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl ScanDevice for FakeScanner {
    async fn status(&self) -> Option<String> {
        None
    }

    async fn has_adf(&self) -> bool {
        self.has_adf
    }

    async fn create_job(&self, settings: &ScanSettings) -> Result<ScanJobHandle, ScanError> {
        self.created.lock().unwrap().push(settings.clone());
        Ok(ScanJobHandle::new("http://scanner/eSCL/ScanJobs/7"))
    }

    async fn fetch_document(&self, _job: &ScanJobHandle) -> Result<Bytes, ScanError> {
        if self.jammed {
            return Err(ScanError::Protocol {
                status: 409,
                message: "Conflict".to_string(),
            });
        }
        Ok(Bytes::from_static(DOCUMENT))
    }

    async fn delete_job(&self, _job: &ScanJobHandle) {
        self.deletes.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeArchive {
    pub reject: bool,
    pub uploads: Mutex<Vec<(String, Option<String>)>>,
}

impl FakeArchive {
    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl DocumentArchive for FakeArchive {
    async fn upload(
        &self,
        _document: Bytes,
        filename: &str,
        title: Option<&str>,
    ) -> Result<(), ScanError> {
        if self.reject {
            return Err(ScanError::Upload(
                "401 Unauthorized - Invalid token.".to_string(),
            ));
        }
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), title.map(str::to_string)));
        Ok(())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub state: Arc<AppState>,
    pub scanner: Arc<FakeScanner>,
    pub archive: Arc<FakeArchive>,
}

pub fn test_app(scanner: FakeScanner, archive: FakeArchive) -> TestApp {
    let scanner = Arc::new(scanner);
    let archive = Arc::new(archive);
    let service = Arc::new(ScanService::new(scanner.clone(), archive.clone()));
    let state = Arc::new(AppState::new(service));
    let server = TestServer::new(setup_routes(state.clone())).unwrap();

    TestApp {
        server,
        state,
        scanner,
        archive,
    }
}
