use crate::cli::Args;
use crate::commands::{TERMINAL_TITLE, initial_filter};
use crate::data_fetcher::api::CatalogSource;
use crate::data_fetcher::cache::QueryClient;
use crate::error::AppError;
use crate::ui;
use crossterm::{execute, terminal::SetTitle};
use std::io::stdout;

/// Run the interactive application flow.
///
/// Terminal setup and cleanup happen inside the UI so the terminal is
/// restored even when the loop fails.
pub async fn run_interactive<S: CatalogSource>(
    args: &Args,
    client: QueryClient<S>,
) -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;

    ui::run_interactive_ui(client, initial_filter(args), args.plain, args.debug).await
}
