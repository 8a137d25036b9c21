//! Main interactive UI loop.
//!
//! Each iteration applies a due search, re-reads the cache snapshots (which
//! starts fetches for missing or stale data), renders when something
//! changed, drains terminal input and then sleeps so spawned fetches on the
//! current-thread runtime can progress.

use std::io::Stdout;

use tokio::time::Instant;

use super::event_handler::{EventHandler, EventResult};
use super::refresh_manager::{CACHE_MONITOR_INTERVAL, needs_animation, next_wakeup};
use super::state_manager::InteractiveState;
use super::terminal_manager::{TerminalConfig, TerminalManager};
use crate::catalog_ui::{ModalView, PageView, render_buffered, render_page};
use crate::constants::ui::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::data_fetcher::api::CatalogSource;
use crate::data_fetcher::cache::{BadgeState, CacheInfo, QueryClient};
use crate::error::AppError;
use crate::filter::FilterState;

fn usage_percent(info: &CacheInfo) -> usize {
    if info.capacity > 0 {
        (info.size * 100) / info.capacity
    } else {
        0
    }
}

/// Monitor cache usage and log statistics for long-running sessions
fn monitor_cache_usage<S: CatalogSource>(client: &QueryClient<S>) {
    let stats = client.stats();
    tracing::debug!(
        "Cache status - Leagues: {}/{} ({}%, {} in flight), Badges: {}/{} ({}%, {} in flight)",
        stats.league_cache.size,
        stats.league_cache.capacity,
        usage_percent(&stats.league_cache),
        stats.league_cache.in_flight,
        stats.badge_cache.size,
        stats.badge_cache.capacity,
        usage_percent(&stats.badge_cache),
        stats.badge_cache.in_flight,
    );
}

fn draw(
    state: &InteractiveState,
    badge: Option<&BadgeState>,
    stdout: &mut Stdout,
    plain: bool,
) -> Result<(), AppError> {
    let visible = state.visible();
    let spinner = state.ui.spinner.current_frame();
    let modal = state
        .modal
        .league_name()
        .zip(badge)
        .map(|(league_name, badge)| ModalView {
            league_name,
            badge,
            spinner,
        });

    let view = PageView {
        catalog: &state.catalog,
        visible: &visible,
        search_input: &state.search.input,
        search_pending: state.search.is_pending(),
        sport_label: state.sport_label(),
        filters_active: state.filter.is_active(),
        selected: state.selected,
        scroll_row: state.scroll_row,
        spinner,
        updated_label: state.ui.updated_label.as_deref(),
        modal,
    };

    let lines = render_page(&view, state.ui.width, state.ui.height);
    render_buffered(stdout, &lines, plain)
}

async fn run_loop<S: CatalogSource>(
    state: &mut InteractiveState,
    client: &QueryClient<S>,
    event_handler: &EventHandler,
    stdout: &mut Stdout,
    plain: bool,
) -> Result<(), AppError> {
    loop {
        let now = Instant::now();
        state.apply_due_search(now);

        let catalog = client.leagues();
        state.set_catalog(catalog, client.generation());

        // Only an open modal enables the badge query
        let badge = state.modal.league_id().map(|id| client.badge(id, true));
        let badge_loading = badge.as_ref().is_some_and(|badge| badge.is_loading);
        if needs_animation(state.catalog.is_fetching, badge_loading) {
            state.tick_spinner(now);
        }

        if state.needs_render() {
            draw(state, badge.as_ref(), stdout, plain)?;
            state.ui.clear_render_flag();
        }

        if event_handler.process_events(state, client)? == EventResult::Exit {
            tracing::info!("Exit requested through event handler");
            return Ok(());
        }

        if now.saturating_duration_since(state.timers.cache_monitor_timer) >= CACHE_MONITOR_INTERVAL {
            monitor_cache_usage(client);
            state.timers.update_cache_monitor(now);
        }

        let wait = next_wakeup(
            event_handler.poll_interval(state, now),
            state.search.time_until_due(now),
        );
        tokio::time::sleep(wait).await;
    }
}

/// Runs the interactive catalog browser until the user quits.
///
/// The terminal is restored even when the loop fails.
pub async fn run_interactive_ui<S: CatalogSource>(
    client: QueryClient<S>,
    initial_filter: FilterState,
    plain: bool,
    debug_mode: bool,
) -> Result<(), AppError> {
    let terminal = TerminalManager::with_config(TerminalConfig { debug_mode });
    let mut stdout = terminal.setup_terminal()?;

    let (width, height) = crossterm::terminal::size().unwrap_or((DEFAULT_WIDTH, DEFAULT_HEIGHT));
    let mut state = InteractiveState::new(initial_filter, width, height, Instant::now());
    let event_handler = EventHandler::new();

    tracing::info!("Starting interactive UI at {}x{}", width, height);
    let result = run_loop(&mut state, &client, &event_handler, &mut stdout, plain).await;

    state.teardown();
    terminal.cleanup_terminal(stdout)?;
    if let Err(e) = &result {
        tracing::error!("Interactive UI stopped with an error: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_percent() {
        let info = CacheInfo {
            size: 128,
            capacity: 512,
            in_flight: 0,
        };
        assert_eq!(usage_percent(&info), 25);

        let empty = CacheInfo {
            size: 0,
            capacity: 0,
            in_flight: 0,
        };
        assert_eq!(usage_percent(&empty), 0);
    }
}
