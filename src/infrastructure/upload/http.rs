//! HTTP upload adapter

use std::time::Duration as StdDuration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, warn};

use crate::application::ports::{UploadOutcome, Uploader};
use crate::domain::receipt::ReceiptImage;

/// Upload path on the backend
const UPLOAD_PATH: &str = "extractTextAndStore";

/// Error when the configured endpoint is not a valid URL
#[derive(Debug, Clone, Error)]
#[error("Invalid endpoint URL: {0}")]
pub struct InvalidEndpoint(pub String);

/// Receipt uploader over plain HTTP POST.
///
/// Sends the raw JPEG bytes as the request body; exactly HTTP 200 counts
/// as success. Performs zero retries and never touches the local file
/// beyond reading it.
pub struct HttpUploader {
    client: reqwest::Client,
    upload_url: reqwest::Url,
    timeout: Option<StdDuration>,
}

impl HttpUploader {
    /// Create an uploader targeting `<endpoint>/extractTextAndStore`
    pub fn new(endpoint: &str) -> Result<Self, InvalidEndpoint> {
        let raw = format!("{}/{}", endpoint.trim_end_matches('/'), UPLOAD_PATH);
        let upload_url =
            reqwest::Url::parse(&raw).map_err(|_| InvalidEndpoint(endpoint.to_string()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            upload_url,
            timeout: None,
        })
    }

    /// Set a per-request timeout. Without one, the transport default
    /// applies.
    pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The full upload URL
    pub fn upload_url(&self) -> &reqwest::Url {
        &self.upload_url
    }
}

#[async_trait]
impl Uploader for HttpUploader {
    async fn upload(&self, receipt: &ReceiptImage) -> UploadOutcome {
        // Whole file in memory; receipts are single scanned pages
        let bytes = match tokio::fs::read(receipt.path()).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(name = receipt.name(), error = %e, "failed to read receipt file");
                return UploadOutcome::ReadError {
                    reason: e.to_string(),
                };
            }
        };

        debug!(
            name = receipt.name(),
            size = bytes.len(),
            url = %self.upload_url,
            "uploading receipt"
        );

        let mut request = self
            .client
            .post(self.upload_url.clone())
            .header(reqwest::header::CONTENT_TYPE, "image/jpeg")
            .body(bytes);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(name = receipt.name(), error = %e, "upload transport error");
                return UploadOutcome::TransportError {
                    reason: e.to_string(),
                };
            }
        };

        let status = response.status().as_u16();
        if status == 200 {
            debug!(name = receipt.name(), status, "upload succeeded");
            UploadOutcome::Success { status }
        } else {
            warn!(name = receipt.name(), status, "upload rejected by server");
            UploadOutcome::ServerError { status }
        }
    }
}
