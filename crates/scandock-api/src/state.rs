//! Application state shared by all handlers.

use scandock_core::AutoScanState;
use scandock_services::ScanService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub scan_service: Arc<ScanService>,
    /// Toggle read by the auto-scan supervisor on every tick.
    pub autoscan: Arc<AutoScanState>,
}

impl AppState {
    pub fn new(scan_service: Arc<ScanService>) -> Self {
        Self {
            scan_service,
            autoscan: Arc::new(AutoScanState::new()),
        }
    }
}
