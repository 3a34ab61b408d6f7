//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod capture;
pub mod ports;
pub mod status;
pub mod sync;

// Re-export use cases
pub use capture::{CaptureController, CaptureError, TranscriptHandler};
pub use status::StatusChannel;
pub use sync::{SyncBatch, SyncReceipts, NO_RECEIPTS_STATUS, SYNCING_STATUS};
