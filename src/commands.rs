use crate::catalog_ui::{Line, Span, Tone, catalog_listing, page_to_string};
use crate::cli::Args;
use crate::config::Config;
use crate::config::user_prompts::prompt_for_api_base_url;
use crate::data_fetcher::api::CatalogSource;
use crate::data_fetcher::cache::QueryClient;
use crate::data_fetcher::models::{League, SeasonBadge};
use crate::error::{AppError, QueryError};
use crate::filter::{FilterState, unique_sports};
use crossterm::{execute, terminal::SetTitle};
use std::io::{Write, stdout};
use std::sync::Arc;

pub const TERMINAL_TITLE: &str = "League Browser";

/// Filter requested with --search and --sport.
pub fn initial_filter(args: &Args) -> FilterState {
    FilterState::new(
        args.search.clone().unwrap_or_default(),
        args.sport.clone().unwrap_or_default(),
    )
}

fn print_lines(lines: &[Line], plain: bool) -> Result<(), AppError> {
    let mut out = stdout().lock();
    writeln!(out, "{}", page_to_string(lines, plain, "\n"))?;
    out.flush()?;
    Ok(())
}

fn error_line(message: String) -> Line {
    Line::from_span(Span::new(message, Tone::Error).bold())
}

/// Output of --once: the filtered listing, or an error line.
pub fn once_lines(result: &Result<Arc<Vec<League>>, QueryError>, filter: &FilterState) -> Vec<Line> {
    match result {
        Ok(leagues) => {
            let visible = filter.apply(leagues);
            catalog_listing(&visible, leagues.len())
        }
        Err(e) => vec![
            error_line(format!("Failed to load leagues: {e}")),
            Line::from_span(Span::new("Please try again later", Tone::Muted)),
        ],
    }
}

/// Output of --sports: one sport per line.
pub fn sports_lines(result: &Result<Arc<Vec<League>>, QueryError>) -> Vec<Line> {
    match result {
        Ok(leagues) => {
            let sports = unique_sports(leagues);
            let mut lines: Vec<Line> = sports
                .iter()
                .map(|sport| Line::from_span(Span::new(sport.as_str(), Tone::Sport)))
                .collect();
            lines.push(Line::new());
            lines.push(Line::from_span(Span::new(
                format!("{} sports across {} leagues", sports.len(), leagues.len()),
                Tone::Accent,
            )));
            lines
        }
        Err(e) => vec![error_line(format!("Failed to load leagues: {e}"))],
    }
}

/// Output of --badge. Failures read as "No badge available", as in the UI.
pub fn badge_lines(league_id: &str, result: &Result<Option<SeasonBadge>, QueryError>) -> Vec<Line> {
    let badge = match result {
        Ok(badge) => badge.as_ref(),
        Err(e) => {
            tracing::warn!("Badge lookup for league {} failed: {}", league_id, e);
            None
        }
    };

    match badge.and_then(|badge| badge.badge_image_url.as_deref().map(|url| (badge, url))) {
        Some((badge, url)) => {
            let mut line = Line::from_span(Span::new(format!("League {league_id}"), Tone::Text).bold());
            if !badge.season.is_empty() {
                line.push(Span::new(format!("  Season {}", badge.season), Tone::Muted));
            }
            vec![line, Line::from_span(Span::link(url, url))]
        }
        None => vec![Line::from_span(Span::new(
            format!("League {league_id}: No badge available"),
            Tone::Muted,
        ))],
    }
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    Config::display().await
}

/// Handles configuration update commands (--config, --set-log-file, --clear-log-file).
///
/// `--config` without a value prompts for the new base URL.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let mut config = Config::load().await.unwrap_or_else(|e| {
        tracing::warn!("Existing config could not be loaded, starting from defaults: {}", e);
        Config::default()
    });

    if let Some(new_api_base_url) = &args.new_api_base_url {
        config.api_base_url = if new_api_base_url.trim().is_empty() {
            prompt_for_api_base_url(&config.api_base_url).await?
        } else {
            new_api_base_url.clone()
        };
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");
    Ok(())
}

/// Handles the --once command: prints the filtered catalog and exits.
///
/// A failed load prints an error instead and still exits successfully.
pub async fn handle_once_command<S: CatalogSource>(
    args: &Args,
    client: &QueryClient<S>,
) -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    let result = client.fetch_leagues().await;
    if let Err(e) = &result {
        tracing::error!("Once mode could not load leagues: {}", e);
    }
    print_lines(&once_lines(&result, &initial_filter(args)), args.plain)
}

/// Handles the --sports command.
pub async fn handle_sports_command<S: CatalogSource>(
    args: &Args,
    client: &QueryClient<S>,
) -> Result<(), AppError> {
    let result = client.fetch_leagues().await;
    print_lines(&sports_lines(&result), args.plain)
}

/// Handles the --badge command.
pub async fn handle_badge_command<S: CatalogSource>(
    args: &Args,
    league_id: &str,
    client: &QueryClient<S>,
) -> Result<(), AppError> {
    let result = client.fetch_badge(league_id).await;
    print_lines(&badge_lines(league_id, &result), args.plain)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;
    use clap::Parser;

    fn texts(lines: &[Line]) -> Vec<String> {
        lines.iter().map(Line::plain_text).collect()
    }

    #[test]
    fn test_initial_filter_from_args() {
        let args = Args::parse_from(["league_browser", "-s", "liga", "--sport", "Soccer"]);
        assert_eq!(initial_filter(&args), FilterState::new("liga", "Soccer"));
        assert!(!initial_filter(&Args::default()).is_active());
    }

    #[test]
    fn test_once_lines_filter_catalog() {
        let result = Ok(Arc::new(TestDataBuilder::sample_leagues()));
        let lines = texts(&once_lines(&result, &FilterState::new("liga", "Soccer")));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Spanish La Liga"));
        assert_eq!(lines[2], "Showing 1 of 8 leagues");
    }

    #[test]
    fn test_once_lines_on_error() {
        let result = Err(QueryError::fetch_failed("HTTP 503"));
        let lines = texts(&once_lines(&result, &FilterState::default()));
        assert!(lines[0].contains("Failed to load leagues"));
        assert!(lines[0].contains("HTTP 503"));
    }

    #[test]
    fn test_sports_lines() {
        let result = Ok(Arc::new(TestDataBuilder::sample_leagues()));
        let lines = texts(&sports_lines(&result));
        assert_eq!(lines[0], "American Football");
        assert_eq!(lines[5], "Soccer");
        assert_eq!(lines.last().map(String::as_str), Some("6 sports across 8 leagues"));
    }

    #[test]
    fn test_badge_lines() {
        let found = Ok(Some(TestDataBuilder::badge("2024-2025")));
        let lines = texts(&badge_lines("4328", &found));
        assert_eq!(lines[0], "League 4328  Season 2024-2025");
        assert!(lines[1].ends_with("2024-2025.png"));

        let missing = texts(&badge_lines("1", &Ok(None)));
        assert_eq!(missing, vec!["League 1: No badge available"]);

        let failed = texts(&badge_lines("1", &Err(QueryError::fetch_failed("timeout"))));
        assert_eq!(failed, vec!["League 1: No badge available"]);
    }
}
