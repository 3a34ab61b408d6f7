//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::duration::Duration;

/// ShopSense companion - receipt sync and voice capture
#[derive(Parser, Debug)]
#[command(name = "shop-sense")]
#[command(version)]
#[command(about = "Receipt sync and voice capture companion for the ShopSense backend")]
#[command(long_about = None)]
pub struct Cli {
    /// Backend base URL (overrides config)
    #[arg(long, value_name = "URL", global = true)]
    pub endpoint: Option<String>,

    /// Receipt storage directory (overrides config)
    #[arg(long, value_name = "DIR", global = true)]
    pub receipts_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload all unsynced receipt images to the backend
    Sync {
        /// Show desktop notifications for sync status
        #[arg(short = 'n', long)]
        notify: bool,

        /// Delete local files after a confirmed upload
        #[arg(long)]
        delete: bool,
    },
    /// Run a voice capture session (reads lines from stdin)
    Capture {
        /// Send the finalized transcript to the chat endpoint
        #[arg(long)]
        ask: bool,

        /// Silence auto-stop threshold (e.g., 3s, 1m)
        #[arg(long, value_name = "TIME")]
        silence: Option<String>,
    },
    /// Ask the backend chat endpoint a question
    Ask {
        /// Question text
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Inspect or clear locally saved receipts
    Receipts {
        #[command(subcommand)]
        action: ReceiptsAction,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Receipt store actions
#[derive(Subcommand, Debug, Clone)]
pub enum ReceiptsAction {
    /// Save a scanned JPEG image into the receipt store
    Add {
        /// Path to the image file
        file: PathBuf,
    },
    /// List saved receipt images
    List,
    /// Delete all saved receipt images
    Clear,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed sync options
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub endpoint: String,
    pub receipts_dir: PathBuf,
    pub status_ttl: Duration,
    pub upload_timeout: Option<Duration>,
    pub delete_after_upload: bool,
    pub notify: bool,
}

/// Parsed capture options
#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub endpoint: String,
    pub silence_threshold: Duration,
    pub ask: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "endpoint",
    "receipts_dir",
    "status_ttl",
    "silence_threshold",
    "upload_timeout",
    "delete_after_upload",
    "notify",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
