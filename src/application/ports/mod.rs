//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod notifier;
pub mod query;
pub mod speech;
pub mod store;
pub mod uploader;

// Re-export common types
pub use config::ConfigStore;
pub use notifier::{NotificationError, NotificationIcon, Notifier};
pub use query::{QueryClient, QueryError};
pub use speech::{RecognitionEvent, SpeechError, SpeechSource};
pub use store::{ReceiptStore, StoreError};
pub use uploader::{UploadOutcome, Uploader};
