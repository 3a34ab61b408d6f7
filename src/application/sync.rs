//! Receipt sync use case

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::ports::{ReceiptStore, Uploader};
use crate::application::status::StatusChannel;

/// Status published when the store holds nothing to upload
pub const NO_RECEIPTS_STATUS: &str = "No receipts to sync.";

/// Status published right after dispatching a batch of uploads
pub const SYNCING_STATUS: &str = "Receipts syncing in background...";

/// Handle to a dispatched sync pass.
///
/// The coordinator never blocks on upload completion; callers that need
/// to (the CLI, tests) can await the batch instead.
#[derive(Debug)]
pub struct SyncBatch {
    dispatched: usize,
    handles: Vec<JoinHandle<()>>,
}

impl SyncBatch {
    fn empty() -> Self {
        Self {
            dispatched: 0,
            handles: Vec::new(),
        }
    }

    /// Number of uploads dispatched by this pass
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Wait for every dispatched upload to resolve
    pub async fn wait(self) {
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}

/// Sync coordinator: find unsynced images, upload each, report status.
///
/// Uploads run as independent background tasks with no ordering
/// guarantee; their outcomes overwrite the shared status channel in
/// whatever order they resolve.
pub struct SyncReceipts<S, U>
where
    S: ReceiptStore + 'static,
    U: Uploader + 'static,
{
    store: Arc<S>,
    uploader: Arc<U>,
    status: Arc<StatusChannel>,
    delete_after_upload: bool,
}

impl<S, U> SyncReceipts<S, U>
where
    S: ReceiptStore + 'static,
    U: Uploader + 'static,
{
    /// Create a new sync use case instance
    pub fn new(
        store: Arc<S>,
        uploader: Arc<U>,
        status: Arc<StatusChannel>,
        delete_after_upload: bool,
    ) -> Self {
        Self {
            store,
            uploader,
            status,
            delete_after_upload,
        }
    }

    /// Run one sync pass.
    ///
    /// Scans the store, dispatches one upload task per receipt, and
    /// publishes the optimistic "syncing" status immediately after
    /// dispatch, before any upload resolves. An empty or unreadable
    /// store publishes "No receipts to sync." and makes no network call.
    pub async fn sync_all(&self) -> SyncBatch {
        let receipts = match self.store.list_unsynced().await {
            Ok(receipts) => receipts,
            Err(e) => {
                warn!(error = %e, "receipt scan failed, treating store as empty");
                Vec::new()
            }
        };

        if receipts.is_empty() {
            info!("no receipts found for syncing");
            self.status.publish(NO_RECEIPTS_STATUS);
            return SyncBatch::empty();
        }

        info!(count = receipts.len(), "found receipts to sync");

        let mut handles = Vec::with_capacity(receipts.len());
        for receipt in receipts {
            let uploader = Arc::clone(&self.uploader);
            let store = Arc::clone(&self.store);
            let status = Arc::clone(&self.status);
            let delete_after_upload = self.delete_after_upload;

            handles.push(tokio::spawn(async move {
                debug!(name = receipt.name(), "attempting upload");
                let outcome = uploader.upload(&receipt).await;
                status.publish(outcome.status_message(receipt.name()));

                if delete_after_upload && outcome.is_success() {
                    match store.remove(&receipt).await {
                        Ok(()) => debug!(name = receipt.name(), "deleted synced receipt"),
                        Err(e) => {
                            warn!(name = receipt.name(), error = %e, "failed to delete synced receipt")
                        }
                    }
                }
            }));
        }

        let dispatched = handles.len();
        self.status.publish(SYNCING_STATUS);

        SyncBatch {
            dispatched,
            handles,
        }
    }
}
