//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::duration::Duration;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    validate_config_value(key, value)?;

    let mut config = store.load().await?;

    match key {
        "endpoint" => config.endpoint = Some(value.to_string()),
        "receipts_dir" => config.receipts_dir = Some(value.to_string()),
        "status_ttl" => config.status_ttl = Some(value.to_string()),
        "silence_threshold" => config.silence_threshold = Some(value.to_string()),
        "upload_timeout" => config.upload_timeout = Some(value.to_string()),
        "delete_after_upload" => {
            config.delete_after_upload =
                Some(parse_bool(value).map_err(|_| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: "Value must be 'true' or 'false'".to_string(),
                })?)
        }
        "notify" => {
            config.notify = Some(parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?)
        }
        _ => unreachable!(), // Already validated
    }

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "endpoint" => config.endpoint,
        "receipts_dir" => config.receipts_dir,
        "status_ttl" => config.status_ttl,
        "silence_threshold" => config.silence_threshold,
        "upload_timeout" => config.upload_timeout,
        "delete_after_upload" => config.delete_after_upload.map(|b| b.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value("endpoint", config.endpoint.as_deref().unwrap_or("(not set)"));
    presenter.key_value(
        "receipts_dir",
        config.receipts_dir.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "status_ttl",
        config.status_ttl.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "silence_threshold",
        config.silence_threshold.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "upload_timeout",
        config.upload_timeout.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "delete_after_upload",
        &config
            .delete_after_upload
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );
    presenter.key_value(
        "notify",
        &config
            .notify
            .map(|b| b.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "status_ttl" | "silence_threshold" | "upload_timeout" => {
            value
                .parse::<Duration>()
                .map_err(|e| ConfigError::ValidationError {
                    key: key.to_string(),
                    message: e.to_string(),
                })?;
        }
        "delete_after_upload" | "notify" => {
            parse_bool(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: "Value must be 'true' or 'false'".to_string(),
            })?;
        }
        "endpoint" => {
            reqwest::Url::parse(value).map_err(|_| ConfigError::ValidationError {
                key: key.to_string(),
                message: format!("'{}' is not a valid URL", value),
            })?;
        }
        _ => {} // receipts_dir accepts any string
    }
    Ok(())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
