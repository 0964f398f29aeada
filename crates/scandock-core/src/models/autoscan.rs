use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

/// Process-wide auto-scan toggle.
///
/// Starts disabled and is never persisted. The gateway flips `enabled`; the
/// supervisor reads it every tick and records when it last triggered a scan.
#[derive(Debug, Default)]
pub struct AutoScanState {
    enabled: AtomicBool,
    last_scan_at: RwLock<Option<DateTime<Utc>>>,
}

impl AutoScanState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(&self) {
        self.enabled.store(true, Ordering::SeqCst);
    }

    pub fn disable(&self) {
        self.enabled.store(false, Ordering::SeqCst);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn record_scan(&self, at: DateTime<Utc>) {
        // A poisoned lock only means a reader panicked; the timestamp is still usable.
        let mut last = self
            .last_scan_at
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(at);
    }

    pub fn last_scan_at(&self) -> Option<DateTime<Utc>> {
        *self
            .last_scan_at
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
