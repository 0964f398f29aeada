//! Client and service construction

use crate::state::AppState;
use anyhow::{Context, Result};
use scandock_core::Config;
use scandock_services::{EsclClient, PaperlessClient, ScanService};
use std::sync::Arc;

/// Build the eSCL client, the Paperless uploader and the scan service around them.
pub fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let scanner = EsclClient::from_config(config).context("Failed to build eSCL client")?;
    tracing::info!(base_url = %scanner.base_url(), "eSCL client ready");

    let archive =
        PaperlessClient::from_config(config).context("Failed to build Paperless-ngx client")?;
    tracing::info!(upload_url = %archive.upload_url(), "Paperless-ngx client ready");

    let scan_service = Arc::new(ScanService::new(Arc::new(scanner), Arc::new(archive)));

    Ok(Arc::new(AppState::new(scan_service)))
}
