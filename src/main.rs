// src/main.rs
use clap::Parser;
use league_browser::cli::{Args, is_config_update};
use league_browser::config::Config;
use league_browser::data_fetcher::{HttpCatalogSource, QueryClient};
use league_browser::error::AppError;
use league_browser::{app, commands, logging};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // The guard must be kept alive for the duration of the program
    let (log_file_path, _guard) = logging::setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    // Configuration commands work without a valid config
    if args.list_config {
        return commands::handle_list_config_command().await;
    }
    if is_config_update(&args) {
        return commands::handle_config_update_command(&args).await;
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;
    let client = QueryClient::new(HttpCatalogSource::from_config(&config)?);
    tracing::debug!("Using API base URL {}", config.api_base_url);

    if args.once {
        return commands::handle_once_command(&args, &client).await;
    }
    if args.list_sports {
        return commands::handle_sports_command(&args, &client).await;
    }
    if let Some(league_id) = &args.badge {
        return commands::handle_badge_command(&args, league_id, &client).await;
    }

    app::run_interactive(&args, client).await
}
