//! Paperless-ngx document upload.

use anyhow::{Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use scandock_core::models::PDF_MIME;
use scandock_core::{Config, ScanError};
use std::time::Duration;

use crate::traits::DocumentArchive;

const POST_DOCUMENT_PATH: &str = "/api/documents/post_document/";

/// Uploads finished scans to Paperless-ngx with token auth.
///
/// There is no retry: a failed upload is returned to the caller, because the
/// scanned bytes exist nowhere else.
#[derive(Clone)]
pub struct PaperlessClient {
    http_client: Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for PaperlessClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaperlessClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PaperlessClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for Paperless")?;

        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            config.paperless_url.clone(),
            config.paperless_token.clone(),
            config.document_timeout,
        )
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, POST_DOCUMENT_PATH)
    }
}

#[async_trait]
impl DocumentArchive for PaperlessClient {
    #[tracing::instrument(skip(self, document), fields(bytes = document.len()))]
    async fn upload(
        &self,
        document: Bytes,
        filename: &str,
        title: Option<&str>,
    ) -> Result<(), ScanError> {
        let length = document.len() as u64;
        let part = Part::stream_with_length(document, length)
            .file_name(filename.to_string())
            .mime_str(PDF_MIME)
            .map_err(|e| ScanError::Upload(e.to_string()))?;

        let mut form = Form::new().part("document", part);
        if let Some(title) = title {
            form = form.text("title", title.to_string());
        }

        let response = self
            .http_client
            .post(self.upload_url())
            .header("Authorization", format!("Token {}", self.token))
            .multipart(form)
            .send()
            .await
            .map_err(|e| ScanError::Upload(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ScanError::Upload(format!("{} - {}", status, error_text)));
        }

        tracing::info!(filename = %filename, "Document uploaded to Paperless");
        Ok(())
    }
}
