//! Upload port interface

use async_trait::async_trait;

use crate::domain::receipt::ReceiptImage;

/// Outcome of a single receipt upload attempt.
///
/// Uploads are best-effort with zero retries; every attempt resolves to
/// exactly one of these, and the caller decides what (if anything) to do
/// about failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The server accepted the image (HTTP 200)
    Success { status: u16 },
    /// The server answered with any non-200 status
    ServerError { status: u16 },
    /// The request never completed (DNS, connection, timeout)
    TransportError { reason: String },
    /// The local file could not be read; no request was made
    ReadError { reason: String },
}

impl UploadOutcome {
    /// Whether the upload was accepted by the server
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// User-facing status line for this outcome
    pub fn status_message(&self, name: &str) -> String {
        match self {
            Self::Success { .. } => format!("Uploaded: {}", name),
            Self::ServerError { status } => {
                format!("Upload failed: {} - HTTP {}", name, status)
            }
            Self::TransportError { .. } => {
                format!("Network error while uploading: {}", name)
            }
            Self::ReadError { .. } => format!("Failed to read receipt: {}", name),
        }
    }
}

/// Port for pushing a single receipt image to the backend
#[async_trait]
pub trait Uploader: Send + Sync {
    /// Upload one receipt image.
    ///
    /// Reads the image bytes in full, performs one HTTP POST, and
    /// classifies the result. Never retries and never deletes the file.
    async fn upload(&self, receipt: &ReceiptImage) -> UploadOutcome;
}
