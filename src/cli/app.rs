//! Command runners

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::application::ports::{ConfigStore, NotificationIcon, Notifier, QueryClient, ReceiptStore};
use crate::application::{
    CaptureController, StatusChannel, SyncReceipts, TranscriptHandler, NO_RECEIPTS_STATUS,
    SYNCING_STATUS,
};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    HttpQueryClient, HttpUploader, LineSpeechSource, LocalDirStore, NotifyRustNotifier,
    XdgConfigStore,
};

use super::args::{CaptureOptions, ReceiptsAction, SyncOptions};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// How long to keep draining late status updates after a batch resolves
const STATUS_DRAIN_WINDOW: StdDuration = StdDuration::from_millis(100);

/// Run one receipt sync pass
pub async fn run_sync(options: SyncOptions) -> ExitCode {
    let presenter = Presenter::new();

    let uploader = match HttpUploader::new(&options.endpoint) {
        Ok(uploader) => match options.upload_timeout {
            Some(t) => uploader.with_timeout(t.as_std()),
            None => uploader,
        },
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    let store = Arc::new(LocalDirStore::new(options.receipts_dir.clone()));
    let status = Arc::new(StatusChannel::new(options.status_ttl));
    let mut updates = status.subscribe();
    let notifier = options.notify.then(NotifyRustNotifier::new);

    let use_case = SyncReceipts::new(
        store,
        Arc::new(uploader),
        Arc::clone(&status),
        options.delete_after_upload,
    );

    let batch = use_case.sync_all().await;
    let dispatched = batch.dispatched();

    // Echo status updates while the batch runs; the channel keeps only
    // the latest toast, so rapid completions may coalesce.
    let mut wait = Box::pin(batch.wait());
    loop {
        tokio::select! {
            _ = &mut wait => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let current = updates.borrow_and_update().clone();
                if let Some(s) = current {
                    show_status(&presenter, notifier.as_ref(), s.message()).await;
                }
            }
        }
    }

    // Catch outcomes published just before the batch resolved
    while let Ok(Ok(())) = timeout(STATUS_DRAIN_WINDOW, updates.changed()).await {
        let current = updates.borrow_and_update().clone();
        if let Some(s) = current {
            show_status(&presenter, notifier.as_ref(), s.message()).await;
        }
    }

    if dispatched > 0 {
        presenter.success(&format!(
            "Sync pass finished ({} upload(s) dispatched)",
            dispatched
        ));
    }
    ExitCode::from(EXIT_SUCCESS)
}

async fn show_status(
    presenter: &Presenter,
    notifier: Option<&NotifyRustNotifier>,
    message: &str,
) {
    presenter.info(message);

    if let Some(notifier) = notifier {
        let icon = if message.starts_with("Uploaded") {
            NotificationIcon::Success
        } else if message == NO_RECEIPTS_STATUS {
            NotificationIcon::Info
        } else if message == SYNCING_STATUS {
            NotificationIcon::Syncing
        } else {
            NotificationIcon::Error
        };
        if let Err(e) = notifier.notify("ShopSense", message, icon).await {
            tracing::debug!(error = %e, "desktop notification failed");
        }
    }
}

/// Run a voice capture session fed by stdin lines
pub async fn run_capture(options: CaptureOptions) -> ExitCode {
    let presenter = Presenter::new();

    let source = Arc::new(LineSpeechSource::new(BufReader::new(tokio::io::stdin())));
    let (final_tx, mut final_rx) = mpsc::channel::<String>(1);
    let on_final: TranscriptHandler = Arc::new(move |text| {
        let _ = final_tx.try_send(text);
    });

    let controller = CaptureController::new(source, options.silence_threshold, Some(on_final));

    presenter.info("Listening... type lines, Ctrl-D to finish");
    let mut worker = match controller.start().await {
        Ok(worker) => worker,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    // Echo partial transcripts until the session ends (final result,
    // silence, or input error)
    let mut transcript = controller.transcript();
    loop {
        tokio::select! {
            _ = &mut worker => break,
            changed = transcript.changed() => {
                if changed.is_err() {
                    break;
                }
                let text = transcript.borrow_and_update().clone();
                if !text.is_empty() {
                    presenter.info(&format!("Transcript: {}", text));
                }
            }
        }
    }

    let Ok(text) = final_rx.try_recv() else {
        presenter.info("Nothing captured");
        return ExitCode::from(EXIT_SUCCESS);
    };

    presenter.output(&text);

    if options.ask {
        return run_ask(&options.endpoint, &text).await;
    }
    ExitCode::from(EXIT_SUCCESS)
}

/// Send one question to the chat endpoint and print the answer
pub async fn run_ask(endpoint: &str, text: &str) -> ExitCode {
    let mut presenter = Presenter::new();

    let client = match HttpQueryClient::new(endpoint) {
        Ok(client) => client,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    presenter.start_spinner("Asking ShopSense...");
    match client.ask(text).await {
        Ok(answer) => {
            presenter.spinner_success("Answer received");
            presenter.output(&answer);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Inspect or clear the local receipt store
pub async fn run_receipts(action: ReceiptsAction, receipts_dir: PathBuf) -> ExitCode {
    let presenter = Presenter::new();
    let store = LocalDirStore::new(receipts_dir);

    match action {
        ReceiptsAction::Add { file } => {
            let bytes = match tokio::fs::read(&file).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    presenter.error(&format!("Failed to read {}: {}", file.display(), e));
                    return ExitCode::from(EXIT_ERROR);
                }
            };
            match store.save(&bytes).await {
                Ok(receipt) => {
                    presenter.success(&format!("Receipt saved: {}", receipt.name()));
                    ExitCode::from(EXIT_SUCCESS)
                }
                Err(e) => {
                    presenter.error(&e.to_string());
                    ExitCode::from(EXIT_ERROR)
                }
            }
        }
        ReceiptsAction::List => match store.list_unsynced().await {
            Ok(receipts) if receipts.is_empty() => {
                presenter.info("No saved receipts");
                ExitCode::from(EXIT_SUCCESS)
            }
            Ok(receipts) => {
                for receipt in receipts {
                    presenter.output(receipt.name());
                }
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        },
        ReceiptsAction::Clear => match store.clear_all().await {
            Ok(removed) => {
                presenter.success(&format!("Removed {} receipt(s)", removed));
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                presenter.error(&e.to_string());
                ExitCode::from(EXIT_ERROR)
            }
        },
    }
}

/// Load and merge configuration from file, env, and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    let env_config = AppConfig {
        endpoint: env::var("SHOP_SENSE_ENDPOINT").ok().filter(|s| !s.is_empty()),
        ..Default::default()
    };

    // Merge: defaults < file < env < cli
    AppConfig::defaults()
        .merge(file_config)
        .merge(env_config)
        .merge(cli_config)
}
