//! Transient status channel
//!
//! Status messages are a toast, not a ledger: the channel holds at most
//! one status, the latest writer wins, and every status clears itself
//! after the display TTL unless a newer one has superseded it.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::watch;

use crate::domain::duration::Duration;
use crate::domain::status::SyncStatus;

#[derive(Debug)]
struct Inner {
    tx: watch::Sender<Option<SyncStatus>>,
    generation: AtomicU64,
}

/// Observable channel of transient status messages.
///
/// Publishes `(message, expiry)` pairs over a watch channel. Each publish
/// bumps a generation counter; the expiry task it arms only clears the
/// channel if its generation is still current, so a stale expiry never
/// wipes a newer status.
#[derive(Debug, Clone)]
pub struct StatusChannel {
    inner: Arc<Inner>,
    ttl: std::time::Duration,
}

impl StatusChannel {
    /// Create a channel whose statuses display for `ttl`
    pub fn new(ttl: Duration) -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                tx,
                generation: AtomicU64::new(0),
            }),
            ttl: ttl.as_std(),
        }
    }

    /// Publish a status, superseding the current one.
    /// The status auto-clears after the TTL unless superseded sooner.
    ///
    /// Must be called from within a tokio runtime.
    pub fn publish(&self, message: impl Into<String>) {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let status = SyncStatus::new(message, Instant::now() + self.ttl);
        self.inner.tx.send_replace(Some(status));

        let inner = Arc::clone(&self.inner);
        let ttl = self.ttl;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            if inner.generation.load(Ordering::SeqCst) == generation {
                inner.tx.send_replace(None);
            }
        });
    }

    /// Clear the current status immediately (logout/reset path)
    pub fn clear(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.tx.send_replace(None);
    }

    /// Subscribe to status updates
    pub fn subscribe(&self) -> watch::Receiver<Option<SyncStatus>> {
        self.inner.tx.subscribe()
    }

    /// Snapshot of the current status
    pub fn current(&self) -> Option<SyncStatus> {
        self.inner.tx.borrow().clone()
    }
}
