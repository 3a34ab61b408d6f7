//! Receipt store port interface

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::receipt::ReceiptImage;

/// Receipt store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Cannot read receipt directory {dir}: {reason}")]
    DirectoryUnreadable { dir: String, reason: String },

    #[error("Failed to save receipt: {0}")]
    WriteFailed(String),

    #[error("Failed to remove receipt {name}: {reason}")]
    RemoveFailed { name: String, reason: String },
}

/// Port for local receipt image storage
#[async_trait]
pub trait ReceiptStore: Send + Sync {
    /// Enumerate stored images matching the receipt naming convention.
    /// Enumeration order is platform-dependent; callers must not rely on it.
    async fn list_unsynced(&self) -> Result<Vec<ReceiptImage>, StoreError>;

    /// Persist new receipt bytes under a freshly generated name.
    async fn save(&self, bytes: &[u8]) -> Result<ReceiptImage, StoreError>;

    /// Remove a single stored receipt.
    async fn remove(&self, receipt: &ReceiptImage) -> Result<(), StoreError>;

    /// Remove every stored receipt, returning how many were deleted.
    async fn clear_all(&self) -> Result<usize, StoreError>;
}
