//! Auto-scan supervisor: polls the feeder and scans when paper is loaded.

use chrono::Utc;
use scandock_core::{AutoScanConfig, AutoScanState};
use scandock_services::ScanService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Treats repeated feeder detections inside `window` as one event.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window: Duration,
    last: Option<Instant>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    /// True when nothing has been recorded yet or strictly more than the window
    /// has passed since the last recorded trigger.
    pub fn should_trigger(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) > self.window,
        }
    }

    pub fn record(&mut self, at: Instant) {
        self.last = Some(at);
    }
}

/// What one poll tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Disabled,
    FeederEmpty,
    Debounced,
    Scanned { filename: String },
    Failed { error: String },
}

pub struct AutoScanSupervisor;

impl AutoScanSupervisor {
    /// Spawn the supervisor loop. It runs until [`AutoScanHandle::shutdown`] is
    /// called or the handle is dropped.
    pub fn start(
        service: Arc<ScanService>,
        state: Arc<AutoScanState>,
        config: AutoScanConfig,
    ) -> AutoScanHandle {
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let task = tokio::spawn(async move {
            Self::worker_loop(service, state, config, shutdown_rx).await;
        });

        AutoScanHandle { shutdown_tx, task }
    }

    async fn worker_loop(
        service: Arc<ScanService>,
        state: Arc<AutoScanState>,
        config: AutoScanConfig,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        tracing::info!(
            poll_interval_ms = config.poll_interval.as_millis() as u64,
            debounce_ms = config.debounce.as_millis() as u64,
            "Auto-scan supervisor started"
        );

        let mut poll_interval = interval_at(
            Instant::now() + config.poll_interval,
            config.poll_interval,
        );
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut debouncer = Debouncer::new(config.debounce);

        loop {
            tokio::select! {
                _ = poll_interval.tick() => {
                    Self::tick(&service, &state, &mut debouncer).await;
                }
                _ = shutdown_rx.recv() => {
                    tracing::info!("Auto-scan supervisor shutting down");
                    break;
                }
            }
        }
    }

    /// One poll: check the toggle, the feeder and the debounce window, then scan.
    ///
    /// The feeder is checked again once the scanner is free, so a page consumed by
    /// a manual scan that was already running is not scanned twice. Scan failures
    /// are logged and never end the loop. Only a successful scan starts a new
    /// debounce window.
    pub async fn tick(
        service: &ScanService,
        state: &AutoScanState,
        debouncer: &mut Debouncer,
    ) -> TickOutcome {
        if !state.is_enabled() {
            return TickOutcome::Disabled;
        }

        if !service.device().adf_loaded().await {
            return TickOutcome::FeederEmpty;
        }

        let detected_at = Instant::now();
        if !debouncer.should_trigger(detected_at) {
            tracing::debug!("Feeder still loaded inside debounce window, skipping");
            return TickOutcome::Debounced;
        }

        tracing::info!("Document detected in ADF, auto-scanning...");
        match service.scan_loaded_feeder().await {
            Ok(None) => TickOutcome::FeederEmpty,
            Ok(Some(result)) => {
                tracing::info!(
                    filename = %result.filename,
                    bytes = result.byte_count(),
                    "Auto-scan completed"
                );
                debouncer.record(detected_at);
                state.record_scan(Utc::now());
                TickOutcome::Scanned {
                    filename: result.filename,
                }
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    error_code = e.error_code(),
                    data_loss = e.is_data_loss(),
                    "Auto-scan error"
                );
                TickOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Owner of the running supervisor task.
pub struct AutoScanHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

impl AutoScanHandle {
    pub fn is_running(&self) -> bool {
        !self.task.is_finished()
    }

    /// Stop the loop and wait for it to exit.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Err(e) = self.task.await {
            tracing::error!(error = %e, "Auto-scan supervisor task ended abnormally");
        }
    }
}
