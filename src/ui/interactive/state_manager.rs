//! State management for interactive UI
//!
//! This module groups the interactive state into timers, render bookkeeping,
//! the search box, the applied filter, the grid selection and the badge
//! modal. Every method takes the current time instead of reading a clock so
//! the behavior can be driven from tests.

use std::time::Duration;

use chrono::Local;
use tokio::time::Instant;

use super::badge_modal::BadgeModal;
use crate::catalog_ui::{Direction, GridLayout, LoadingIndicator, body_height};
use crate::constants::ui::SEARCH_DEBOUNCE_MS;
use crate::data_fetcher::cache::QueryState;
use crate::data_fetcher::models::League;
use crate::filter::{FilterState, unique_sports};
use crate::scheduling::Debouncer;

pub const ALL_SPORTS: &str = "All Sports";

const SPINNER_FRAME: Duration = Duration::from_millis(120);

/// Timer state for various interactive UI operations
#[derive(Debug)]
pub struct TimerState {
    pub last_activity: Instant,
    pub cache_monitor_timer: Instant,
    pub last_spinner_frame: Instant,
}

impl TimerState {
    pub fn new(now: Instant) -> Self {
        Self {
            last_activity: now,
            cache_monitor_timer: now,
            last_spinner_frame: now,
        }
    }

    pub fn update_activity(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn time_since_activity(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    pub fn update_cache_monitor(&mut self, now: Instant) {
        self.cache_monitor_timer = now;
    }
}

/// UI rendering state
#[derive(Debug)]
pub struct UIState {
    pub needs_render: bool,
    pub width: u16,
    pub height: u16,
    /// Cache generation of the last rendered frame
    pub last_generation: Option<u64>,
    pub spinner: LoadingIndicator,
    /// Local time of the last catalog update, e.g. "14:05"
    pub updated_label: Option<String>,
    last_updated_at: Option<Instant>,
}

impl UIState {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            needs_render: true,
            width,
            height,
            last_generation: None,
            spinner: LoadingIndicator::new("Loading leagues..."),
            updated_label: None,
            last_updated_at: None,
        }
    }

    pub fn request_render(&mut self) {
        self.needs_render = true;
    }

    pub fn clear_render_flag(&mut self) {
        self.needs_render = false;
    }
}

/// The search box. Its text is applied to the filter after the debounce.
#[derive(Debug)]
pub struct SearchState {
    pub input: String,
    debouncer: Debouncer<String>,
}

impl SearchState {
    fn new(initial: &str) -> Self {
        Self {
            input: initial.to_string(),
            debouncer: Debouncer::new(Duration::from_millis(SEARCH_DEBOUNCE_MS)),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_until_due(now)
    }
}

/// Complete interactive UI state
#[derive(Debug)]
pub struct InteractiveState {
    pub timers: TimerState,
    pub ui: UIState,
    pub search: SearchState,
    /// Filter the grid is currently showing
    pub filter: FilterState,
    pub catalog: QueryState<Vec<League>>,
    pub selected: usize,
    pub scroll_row: usize,
    pub modal: BadgeModal,
}

impl InteractiveState {
    pub fn new(initial_filter: FilterState, width: u16, height: u16, now: Instant) -> Self {
        Self {
            timers: TimerState::new(now),
            ui: UIState::new(width, height),
            search: SearchState::new(&initial_filter.search_text),
            filter: initial_filter,
            catalog: QueryState::idle(),
            selected: 0,
            scroll_row: 0,
            modal: BadgeModal::Closed,
        }
    }

    pub fn request_render(&mut self) {
        self.ui.request_render();
    }

    pub fn needs_render(&self) -> bool {
        self.ui.needs_render
    }

    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.ui.width, body_height(self.ui.height))
    }

    /// Leagues passing the applied filter, in catalog order.
    pub fn visible(&self) -> Vec<&League> {
        self.catalog
            .data
            .as_deref()
            .map(|leagues| self.filter.apply(leagues))
            .unwrap_or_default()
    }

    /// Sport options, "All Sports" (empty) first.
    pub fn sport_options(&self) -> Vec<String> {
        let sports = self
            .catalog
            .data
            .as_deref()
            .map(|leagues| unique_sports(leagues))
            .unwrap_or_default();
        std::iter::once(String::new()).chain(sports).collect()
    }

    pub fn sport_label(&self) -> &str {
        if self.filter.selected_sport.is_empty() {
            ALL_SPORTS
        } else {
            &self.filter.selected_sport
        }
    }

    /// Stores a new catalog snapshot. Returns whether anything visible changed.
    pub fn set_catalog(&mut self, catalog: QueryState<Vec<League>>, generation: u64) -> bool {
        if catalog.updated_at.is_some() && catalog.updated_at != self.ui.last_updated_at {
            self.ui.last_updated_at = catalog.updated_at;
            self.ui.updated_label = Some(Local::now().format("%H:%M").to_string());
        }
        self.catalog = catalog;
        self.clamp_selection();

        let changed = self.ui.last_generation != Some(generation);
        if changed {
            self.ui.last_generation = Some(generation);
            self.request_render();
        }
        changed
    }

    pub fn insert_char(&mut self, c: char, now: Instant) {
        self.search.input.push(c);
        self.schedule_search(now);
    }

    pub fn backspace(&mut self, now: Instant) {
        if self.search.input.pop().is_some() {
            self.schedule_search(now);
        }
    }

    fn schedule_search(&mut self, now: Instant) {
        self.search.debouncer.schedule(self.search.input.clone(), now);
        self.request_render();
    }

    /// Applies the search text once its debounce has elapsed.
    pub fn apply_due_search(&mut self, now: Instant) -> bool {
        match self.search.debouncer.poll(now) {
            Some(text) => {
                tracing::debug!("Applying search '{}'", text);
                self.filter.search_text = text;
                self.reset_selection();
                true
            }
            None => false,
        }
    }

    /// Empties the search box and applies it right away.
    pub fn clear_search(&mut self) {
        self.search.debouncer.cancel();
        self.search.input.clear();
        self.filter.search_text.clear();
        self.reset_selection();
    }

    pub fn clear_filters(&mut self) {
        self.search.debouncer.cancel();
        self.search.input.clear();
        self.filter.clear();
        self.reset_selection();
    }

    /// Moves to the next (or previous) sport option, wrapping around.
    pub fn cycle_sport(&mut self, forward: bool) {
        let options = self.sport_options();
        let current = options
            .iter()
            .position(|sport| *sport == self.filter.selected_sport)
            .unwrap_or(0);
        let next = if forward {
            (current + 1) % options.len()
        } else {
            (current + options.len() - 1) % options.len()
        };
        self.filter.selected_sport = options[next].clone();
        self.reset_selection();
    }

    pub fn move_selection(&mut self, direction: Direction) {
        let count = self.visible().len();
        let layout = self.layout();
        self.selected = layout.move_selection(self.selected, count, direction);
        self.scroll_row = layout.scroll_to_show(self.scroll_row, self.selected);
        self.request_render();
    }

    /// Opens the badge modal for the selected card, if there is one.
    pub fn open_badge(&mut self) -> bool {
        self.open_badge_at(self.selected)
    }

    pub fn open_badge_at(&mut self, index: usize) -> bool {
        let Some(modal) = self.visible().get(index).map(|league| BadgeModal::open(league)) else {
            return false;
        };
        tracing::debug!("Opening badge modal for league {:?}", modal.league_id());
        self.modal = modal;
        self.selected = index;
        self.request_render();
        true
    }

    pub fn close_modal(&mut self) {
        self.modal.close();
        self.request_render();
    }

    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.ui.width = width;
        self.ui.height = height;
        self.clamp_selection();
        self.request_render();
    }

    /// Advances the spinner when a frame is due.
    pub fn tick_spinner(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.timers.last_spinner_frame) < SPINNER_FRAME {
            return false;
        }
        self.timers.last_spinner_frame = now;
        self.ui.spinner.next_frame();
        self.request_render();
        true
    }

    /// Drops pending timers before the view goes away.
    pub fn teardown(&mut self) {
        if self.search.debouncer.cancel().is_some() {
            tracing::debug!("Cancelled pending search on exit");
        }
    }

    fn reset_selection(&mut self) {
        self.selected = 0;
        self.scroll_row = 0;
        self.request_render();
    }

    fn clamp_selection(&mut self) {
        let count = self.visible().len();
        let layout = self.layout();
        self.selected = self.selected.min(count.saturating_sub(1));
        self.scroll_row = self
            .scroll_row
            .min(layout.total_rows(count).saturating_sub(1));
        self.scroll_row = layout.scroll_to_show(self.scroll_row, self.selected);
    }
}
