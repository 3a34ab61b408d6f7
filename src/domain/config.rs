//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::duration::Duration;

/// Default backend base URL
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub endpoint: Option<String>,
    pub receipts_dir: Option<String>,
    pub status_ttl: Option<String>,
    pub silence_threshold: Option<String>,
    pub upload_timeout: Option<String>,
    pub delete_after_upload: Option<bool>,
    pub notify: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            endpoint: Some(DEFAULT_ENDPOINT.to_string()),
            receipts_dir: None,
            status_ttl: Some("3s".to_string()),
            silence_threshold: Some("3s".to_string()),
            upload_timeout: None,
            delete_after_upload: Some(false),
            notify: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            endpoint: other.endpoint.or(self.endpoint),
            receipts_dir: other.receipts_dir.or(self.receipts_dir),
            status_ttl: other.status_ttl.or(self.status_ttl),
            silence_threshold: other.silence_threshold.or(self.silence_threshold),
            upload_timeout: other.upload_timeout.or(self.upload_timeout),
            delete_after_upload: other.delete_after_upload.or(self.delete_after_upload),
            notify: other.notify.or(self.notify),
        }
    }

    /// Default receipt storage directory (XDG data dir)
    pub fn default_receipts_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shop-sense")
            .join("receipts")
    }

    /// Get the backend endpoint, or the default if not set
    pub fn endpoint_or_default(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Get the receipts directory, or the default if not set
    pub fn receipts_dir_or_default(&self) -> PathBuf {
        self.receipts_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_receipts_dir)
    }

    /// Get status_ttl as parsed Duration, or default if not set/invalid
    pub fn status_ttl_or_default(&self) -> Duration {
        self.status_ttl
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_status_ttl)
    }

    /// Get silence_threshold as parsed Duration, or default if not set/invalid
    pub fn silence_threshold_or_default(&self) -> Duration {
        self.silence_threshold
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(Duration::default_silence_threshold)
    }

    /// Get upload_timeout as parsed Duration, if set and valid.
    /// None means the transport default applies.
    pub fn upload_timeout_or_default(&self) -> Option<Duration> {
        self.upload_timeout.as_ref().and_then(|s| s.parse().ok())
    }

    /// Get delete_after_upload setting, or false if not set
    pub fn delete_after_upload_or_default(&self) -> bool {
        self.delete_after_upload.unwrap_or(false)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }
}
