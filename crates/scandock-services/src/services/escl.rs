//! eSCL scan-job client.
//!
//! One job goes through `create_job` → `fetch_document` → `delete_job`. Only the
//! "not ready yet" answer (HTTP 503) from `NextDocument` is retried; every other
//! failure aborts the job.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::LOCATION, Client, StatusCode, Url};
use scandock_core::escl::{
    capabilities_report_adf, SCANNER_CAPABILITIES_PATH, SCANNER_STATUS_PATH, SCAN_JOBS_PATH,
};
use scandock_core::{Config, RetryPolicy, ScanError, ScanJobHandle, ScanSettings};
use std::time::Duration;
use tokio::time::sleep;

use crate::traits::ScanDevice;

#[derive(Clone, Debug)]
pub struct EsclClient {
    http_client: Client,
    base_url: String,
    request_timeout: Duration,
    document_timeout: Duration,
    retry: RetryPolicy,
}

impl EsclClient {
    /// Create a client for the eSCL root at `base_url` (e.g. `http://printer.local/eSCL`).
    pub fn new(
        base_url: impl Into<String>,
        request_timeout: Duration,
        document_timeout: Duration,
        retry: RetryPolicy,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .build()
            .context("Failed to create HTTP client for eSCL scanner")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout,
            document_timeout,
            retry,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.scanner_base_url(),
            config.scanner_request_timeout,
            config.document_timeout,
            config.retry,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Scanners may answer with an absolute URL or a path; paths are resolved
    /// against the eSCL root.
    fn resolve_location(&self, location: &str) -> String {
        Url::parse(&format!("{}/", self.base_url))
            .and_then(|base| base.join(location))
            .map(|url| url.to_string())
            .unwrap_or_else(|_| location.to_string())
    }

    async fn get_text(&self, path: &str) -> Result<String, reqwest::Error> {
        self.http_client
            .get(self.url(path))
            .timeout(self.request_timeout)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

#[async_trait]
impl ScanDevice for EsclClient {
    async fn status(&self) -> Option<String> {
        match self.get_text(SCANNER_STATUS_PATH).await {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::debug!(error = %e, scanner = %self.base_url, "Scanner status unavailable");
                None
            }
        }
    }

    async fn has_adf(&self) -> bool {
        match self.get_text(SCANNER_CAPABILITIES_PATH).await {
            Ok(capabilities) => capabilities_report_adf(&capabilities),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    scanner = %self.base_url,
                    "Scanner capabilities unavailable, assuming no document feeder"
                );
                false
            }
        }
    }

    #[tracing::instrument(skip(self, settings), fields(source = %settings.input_source))]
    async fn create_job(&self, settings: &ScanSettings) -> Result<ScanJobHandle, ScanError> {
        let response = self
            .http_client
            .post(self.url(SCAN_JOBS_PATH))
            .header("Content-Type", "text/xml")
            .body(settings.to_escl_xml())
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ScanError::JobCreation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ScanError::Protocol {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ScanError::JobCreation("No job location returned".to_string()))?;

        let job = ScanJobHandle::new(self.resolve_location(location.trim()));
        tracing::info!(job = %job, "Scan job created");
        Ok(job)
    }

    #[tracing::instrument(skip(self, job), fields(job = %job))]
    async fn fetch_document(&self, job: &ScanJobHandle) -> Result<Bytes, ScanError> {
        let url = job.next_document_url();
        let max_attempts = self.retry.max_attempts;

        for attempt in 1..=max_attempts {
            let response = self
                .http_client
                .get(&url)
                .timeout(self.document_timeout)
                .send()
                .await
                .map_err(|e| ScanError::Retrieval(e.to_string()))?;

            let status = response.status();
            if status.is_success() {
                let document = response
                    .bytes()
                    .await
                    .map_err(|e| ScanError::Retrieval(e.to_string()))?;
                tracing::info!(attempt, bytes = document.len(), "Scanned document retrieved");
                return Ok(document);
            }

            if status != StatusCode::SERVICE_UNAVAILABLE {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(ScanError::Protocol {
                    status: status.as_u16(),
                    message: error_text,
                });
            }

            if attempt < max_attempts {
                tracing::debug!(attempt, max_attempts, "Document not ready, retrying");
                sleep(self.retry.interval).await;
            }
        }

        Err(ScanError::RetrievalTimeout {
            attempts: max_attempts,
            budget: self.retry.budget(),
        })
    }

    async fn delete_job(&self, job: &ScanJobHandle) {
        match self
            .http_client
            .delete(job.location())
            .timeout(self.request_timeout)
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(job = %job, "Scan job deleted");
            }
            Ok(response) => {
                tracing::debug!(job = %job, status = %response.status(), "Scanner refused job deletion");
            }
            Err(e) => {
                tracing::debug!(job = %job, error = %e, "Scan job deletion failed");
            }
        }
    }
}
