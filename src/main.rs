//! ShopSense companion CLI entry point

use std::process::ExitCode;

use clap::Parser;

use shop_sense::cli::{
    app::{
        load_merged_config, run_ask, run_capture, run_receipts, run_sync, EXIT_ERROR,
        EXIT_USAGE_ERROR,
    },
    args::{CaptureOptions, Cli, Commands, SyncOptions},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use shop_sense::domain::config::AppConfig;
use shop_sense::domain::duration::Duration;
use shop_sense::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Build CLI config from global args
    let cli_config = AppConfig {
        endpoint: cli.endpoint.clone(),
        receipts_dir: cli.receipts_dir.clone(),
        ..Default::default()
    };

    // Merge config: defaults < file < env < cli
    let config = load_merged_config(cli_config).await;

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Sync { notify, delete } => {
            let options = SyncOptions {
                endpoint: config.endpoint_or_default(),
                receipts_dir: config.receipts_dir_or_default(),
                status_ttl: config.status_ttl_or_default(),
                upload_timeout: config.upload_timeout_or_default(),
                delete_after_upload: delete || config.delete_after_upload_or_default(),
                notify: notify || config.notify_or_default(),
            };

            run_sync(options).await
        }
        Commands::Capture { ask, silence } => {
            let silence_threshold = match silence {
                Some(s) => match s.parse::<Duration>() {
                    Ok(d) => d,
                    Err(e) => {
                        presenter.error(&e.to_string());
                        return ExitCode::from(EXIT_USAGE_ERROR);
                    }
                },
                None => config.silence_threshold_or_default(),
            };

            let options = CaptureOptions {
                endpoint: config.endpoint_or_default(),
                silence_threshold,
                ask,
            };

            run_capture(options).await
        }
        Commands::Ask { text } => run_ask(&config.endpoint_or_default(), &text.join(" ")).await,
        Commands::Receipts { action } => {
            run_receipts(action, config.receipts_dir_or_default()).await
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,shop_sense=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
