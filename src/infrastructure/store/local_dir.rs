//! Local directory receipt store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, info};

use crate::application::ports::{ReceiptStore, StoreError};
use crate::domain::receipt::ReceiptImage;

/// Receipt store backed by a single local directory.
///
/// Only entries whose file name matches the receipt naming convention
/// are visible; anything else in the directory is ignored.
pub struct LocalDirStore {
    dir: PathBuf,
}

impl LocalDirStore {
    /// Create a store over the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store scans
    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    fn unreadable(&self, reason: impl ToString) -> StoreError {
        StoreError::DirectoryUnreadable {
            dir: self.dir.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl ReceiptStore for LocalDirStore {
    async fn list_unsynced(&self) -> Result<Vec<ReceiptImage>, StoreError> {
        debug!(dir = %self.dir.display(), "scanning receipt directory");

        let mut entries = fs::read_dir(&self.dir)
            .await
            .map_err(|e| self.unreadable(e))?;

        let mut receipts = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    if let Some(receipt) = ReceiptImage::from_path(entry.path()) {
                        receipts.push(receipt);
                    }
                }
                Ok(None) => break,
                Err(e) => return Err(self.unreadable(e)),
            }
        }

        debug!(count = receipts.len(), "found receipt images");
        Ok(receipts)
    }

    async fn save(&self, bytes: &[u8]) -> Result<ReceiptImage, StoreError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        let receipt = ReceiptImage::generate(&self.dir);
        fs::write(receipt.path(), bytes)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        info!(path = %receipt.path().display(), "saved receipt image");
        Ok(receipt)
    }

    async fn remove(&self, receipt: &ReceiptImage) -> Result<(), StoreError> {
        fs::remove_file(receipt.path())
            .await
            .map_err(|e| StoreError::RemoveFailed {
                name: receipt.name().to_string(),
                reason: e.to_string(),
            })?;

        debug!(name = receipt.name(), "removed receipt image");
        Ok(())
    }

    async fn clear_all(&self) -> Result<usize, StoreError> {
        let receipts = self.list_unsynced().await?;
        let mut removed = 0;
        for receipt in &receipts {
            self.remove(receipt).await?;
            removed += 1;
        }

        info!(count = removed, "cleared saved receipts");
        Ok(removed)
    }
}
