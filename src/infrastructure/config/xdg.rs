//! XDG config store adapter

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// XDG-compliant config store
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    /// Create a new XDG config store with default path
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("shop-sense");

        Self {
            path: config_dir.join("config.toml"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn parse_toml(content: &str) -> Result<AppConfig, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    fn to_toml(config: &AppConfig) -> Result<String, ConfigError> {
        toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.exists() {
            // Return empty config if file doesn't exist
            return Ok(AppConfig::empty());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        Self::parse_toml(&content)
    }

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content = Self::to_toml(config)?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        if self.exists() {
            return Err(ConfigError::AlreadyExists(
                self.path.to_string_lossy().to_string(),
            ));
        }

        let defaults = AppConfig::defaults();
        self.save(&defaults).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_path_is_xdg() {
        let store = XdgConfigStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("shop-sense"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn custom_path() {
        let store = XdgConfigStore::with_path("/custom/path/config.toml");
        assert_eq!(store.path(), PathBuf::from("/custom/path/config.toml"));
    }

    #[test]
    fn parse_toml_flat_format() {
        let content = r#"
endpoint = "http://example.test:8080"
status_ttl = "5s"
delete_after_upload = true
"#;

        let config = XdgConfigStore::parse_toml(content).unwrap();
        assert_eq!(config.endpoint, Some("http://example.test:8080".to_string()));
        assert_eq!(config.status_ttl, Some("5s".to_string()));
        assert_eq!(config.delete_after_upload, Some(true));
    }

    #[test]
    fn parse_toml_rejects_garbage() {
        assert!(XdgConfigStore::parse_toml("endpoint = [").is_err());
    }

    #[test]
    fn to_toml_round_trip() {
        let config = AppConfig {
            endpoint: Some("http://example.test:8080".to_string()),
            silence_threshold: Some("2s".to_string()),
            notify: Some(true),
            ..Default::default()
        };

        let serialized = XdgConfigStore::to_toml(&config).unwrap();
        let parsed = XdgConfigStore::parse_toml(&serialized).unwrap();

        assert_eq!(config.endpoint, parsed.endpoint);
        assert_eq!(config.silence_threshold, parsed.silence_threshold);
        assert_eq!(config.notify, parsed.notify);
    }

    #[tokio::test]
    async fn load_missing_file_returns_empty() {
        let dir = tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        let config = store.load().await.unwrap();
        assert!(config.endpoint.is_none());
    }

    #[tokio::test]
    async fn save_then_load() {
        let dir = tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"));

        let config = AppConfig {
            endpoint: Some("http://example.test".to_string()),
            ..Default::default()
        };
        store.save(&config).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.endpoint, Some("http://example.test".to_string()));
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        store.init().await.unwrap();
        let config = store.load().await.unwrap();
        assert_eq!(config.endpoint, Some("http://localhost:8080".to_string()));

        assert!(matches!(
            store.init().await,
            Err(ConfigError::AlreadyExists(_))
        ));
    }
}
