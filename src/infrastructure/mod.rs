//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the filesystem, the ShopSense backend, and the
//! desktop environment.

pub mod config;
pub mod notification;
pub mod query;
pub mod speech;
pub mod store;
pub mod upload;

// Re-export adapters
pub use config::XdgConfigStore;
pub use notification::NotifyRustNotifier;
pub use query::HttpQueryClient;
pub use speech::LineSpeechSource;
pub use store::LocalDirStore;
pub use upload::{HttpUploader, InvalidEndpoint};
