//! Event handling coordination for interactive UI
//!
//! Drains pending terminal events without blocking, so fetches spawned on
//! the same current-thread runtime keep making progress between polls, and
//! applies them to the [`InteractiveState`].

use super::input_handler::{UiAction, map_key};
use super::refresh_manager::calculate_poll_interval;
use super::state_manager::InteractiveState;
use crate::catalog_ui::{BODY_TOP, Direction, body_height, modal_rect};
use crate::data_fetcher::api::CatalogSource;
use crate::data_fetcher::cache::QueryClient;
use crate::error::AppError;
use crossterm::event::{self, Event, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;
use tokio::time::Instant;

/// Result of processing an event
#[derive(Debug, PartialEq)]
pub enum EventResult {
    /// Nothing happened
    Continue,
    /// Exit the application
    Exit,
    /// Event was handled, continue processing
    Handled,
}

/// Main event handler for interactive UI
#[derive(Debug, Default)]
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    /// Sleep between loop iterations, adapted to user activity
    pub fn poll_interval(&self, state: &InteractiveState, now: Instant) -> Duration {
        calculate_poll_interval(state.timers.time_since_activity(now))
    }

    /// Processes every event that is already queued.
    pub fn process_events<S: CatalogSource>(
        &self,
        state: &mut InteractiveState,
        client: &QueryClient<S>,
    ) -> Result<EventResult, AppError> {
        let mut result = EventResult::Continue;

        while event::poll(Duration::ZERO)? {
            let now = Instant::now();
            state.timers.update_activity(now);

            let outcome = match event::read()? {
                Event::Key(key_event) => handle_key_event(state, client, &key_event, now),
                Event::Mouse(mouse_event) => handle_mouse_event(state, &mouse_event),
                Event::Resize(width, height) => {
                    tracing::debug!("Resize event received: {}x{}", width, height);
                    state.handle_resize(width, height);
                    EventResult::Handled
                }
                _ => EventResult::Continue,
            };

            match outcome {
                EventResult::Exit => return Ok(EventResult::Exit),
                EventResult::Handled => result = EventResult::Handled,
                EventResult::Continue => {}
            }
        }

        Ok(result)
    }
}

pub(super) fn handle_key_event<S: CatalogSource>(
    state: &mut InteractiveState,
    client: &QueryClient<S>,
    key_event: &KeyEvent,
    now: Instant,
) -> EventResult {
    match map_key(key_event, state.modal.is_open()) {
        Some(action) => apply_action(state, client, action, now),
        None => EventResult::Continue,
    }
}

pub(super) fn apply_action<S: CatalogSource>(
    state: &mut InteractiveState,
    client: &QueryClient<S>,
    action: UiAction,
    now: Instant,
) -> EventResult {
    match action {
        UiAction::Quit => {
            tracing::info!("Quit requested");
            return EventResult::Exit;
        }
        UiAction::Retry => {
            tracing::info!("Manual league refetch requested");
            let snapshot = client.refetch_leagues();
            state.set_catalog(snapshot, client.generation());
            state.request_render();
        }
        UiAction::ClearFilters => state.clear_filters(),
        UiAction::ClearSearch => state.clear_search(),
        UiAction::Insert(c) => state.insert_char(c, now),
        UiAction::Backspace => state.backspace(now),
        UiAction::NextSport => state.cycle_sport(true),
        UiAction::PreviousSport => state.cycle_sport(false),
        UiAction::Move(direction) => state.move_selection(direction),
        UiAction::OpenBadge => {
            state.open_badge();
        }
        UiAction::CloseModal => state.close_modal(),
    }
    EventResult::Handled
}

/// Clicks on the backdrop close the modal; clicks on a card open its badge.
pub(super) fn handle_mouse_event(state: &mut InteractiveState, mouse_event: &MouseEvent) -> EventResult {
    let (column, row) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) if state.modal.is_open() => {
            if modal_rect(state.ui.width, state.ui.height).contains(column, row) {
                return EventResult::Continue;
            }
            state.close_modal();
            EventResult::Handled
        }
        MouseEventKind::Down(MouseButton::Left) => {
            let body_row = (row as usize).checked_sub(BODY_TOP);
            let card = body_row
                .filter(|body_row| *body_row < body_height(state.ui.height))
                .and_then(|body_row| {
                    state.layout().card_at(
                        column as usize,
                        body_row,
                        state.scroll_row,
                        state.visible().len(),
                    )
                });
            match card {
                Some(index) if state.open_badge_at(index) => EventResult::Handled,
                _ => EventResult::Continue,
            }
        }
        MouseEventKind::ScrollDown if !state.modal.is_open() => {
            state.move_selection(Direction::Down);
            EventResult::Handled
        }
        MouseEventKind::ScrollUp if !state.modal.is_open() => {
            state.move_selection(Direction::Up);
            EventResult::Handled
        }
        _ => EventResult::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::QueryState;
    use crate::filter::FilterState;
    use crate::testing_utils::{FakeCatalogSource, TestDataBuilder};
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::sync::Arc;

    fn loaded_state() -> InteractiveState {
        let now = Instant::now();
        let mut state = InteractiveState::new(FilterState::default(), 100, 30, now);
        let mut catalog = QueryState::idle();
        catalog.data = Some(Arc::new(TestDataBuilder::sample_leagues()));
        state.set_catalog(catalog, 1);
        state
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_opens_and_esc_closes_modal() {
        let client = QueryClient::new(FakeCatalogSource::new(Vec::new()));
        let mut state = loaded_state();
        let now = Instant::now();

        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(handle_key_event(&mut state, &client, &enter, now), EventResult::Handled);
        assert_eq!(state.modal.league_id(), Some("4328"));

        // Typing goes nowhere while the modal is open
        let typed = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(handle_key_event(&mut state, &client, &typed, now), EventResult::Continue);
        assert_eq!(state.search.input, "");

        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        handle_key_event(&mut state, &client, &esc, now);
        assert!(!state.modal.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_exits() {
        let client = QueryClient::new(FakeCatalogSource::new(Vec::new()));
        let mut state = loaded_state();
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert_eq!(
            handle_key_event(&mut state, &client, &quit, Instant::now()),
            EventResult::Exit
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_starts_a_fetch() {
        let source = FakeCatalogSource::new(TestDataBuilder::sample_leagues());
        let client = QueryClient::new(source);
        let mut state = loaded_state();

        apply_action(&mut state, &client, UiAction::Retry, Instant::now());
        assert!(state.catalog.is_fetching);

        let leagues = client.fetch_leagues().await.unwrap();
        assert_eq!(leagues.len(), 8);
        assert_eq!(client.source().league_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backdrop_click_closes_modal() {
        let mut state = loaded_state();
        state.open_badge();
        let rect = modal_rect(100, 30);

        // Inside the box: stays open
        assert_eq!(
            handle_mouse_event(&mut state, &click(rect.x + 1, rect.y + 1)),
            EventResult::Continue
        );
        assert!(state.modal.is_open());

        // Backdrop: closes
        assert_eq!(handle_mouse_event(&mut state, &click(0, 0)), EventResult::Handled);
        assert!(!state.modal.is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_card_click_opens_badge() {
        let mut state = loaded_state();

        // Second column of the first card row
        let row = BODY_TOP as u16 + 2;
        assert_eq!(handle_mouse_event(&mut state, &click(60, row)), EventResult::Handled);
        assert_eq!(state.modal.league_id(), Some("4387"));
        assert_eq!(state.selected, 1);

        state.close_modal();
        assert_eq!(handle_mouse_event(&mut state, &click(60, 1)), EventResult::Continue);
        assert!(!state.modal.is_open());
    }
}
