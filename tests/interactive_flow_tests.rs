//! Drives the interactive state through a whole browsing session against an
//! in-memory catalog, with Tokio's clock paused.

use std::time::Duration;

use league_browser::QueryClient;
use league_browser::catalog_ui::{Direction, ModalPhase, ModalView, PageView, render_page};
use league_browser::filter::FilterState;
use league_browser::testing_utils::{FakeCatalogSource, TestDataBuilder};
use league_browser::ui::interactive::{ALL_SPORTS, InteractiveState};
use tokio::time::Instant;

async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

fn sample_client() -> QueryClient<FakeCatalogSource> {
    QueryClient::new(
        FakeCatalogSource::new(TestDataBuilder::sample_leagues())
            .with_badge("4328", TestDataBuilder::badge("2025-2026")),
    )
}

fn sync_catalog(state: &mut InteractiveState, client: &QueryClient<FakeCatalogSource>) {
    let snapshot = client.leagues();
    state.set_catalog(snapshot, client.generation());
}

fn visible_ids(state: &InteractiveState) -> Vec<String> {
    state.visible().iter().map(|league| league.id.clone()).collect()
}

fn render_text(state: &InteractiveState, client: &QueryClient<FakeCatalogSource>) -> Vec<String> {
    let visible = state.visible();
    let badge = state
        .modal
        .league_id()
        .map(|id| client.badge(id, true))
        .unwrap_or_default();
    let view = PageView {
        catalog: &state.catalog,
        visible: &visible,
        search_input: &state.search.input,
        search_pending: state.search.is_pending(),
        sport_label: state.sport_label(),
        filters_active: state.filter.is_active(),
        selected: state.selected,
        scroll_row: state.scroll_row,
        spinner: state.ui.spinner.current_frame(),
        updated_label: state.ui.updated_label.as_deref(),
        modal: state.modal.league_name().map(|name| ModalView {
            league_name: name,
            badge: &badge,
            spinner: state.ui.spinner.current_frame(),
        }),
    };
    render_page(&view, state.ui.width, state.ui.height)
        .iter()
        .map(|line| line.plain_text())
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_initial_load_then_grid() {
    let client = sample_client();
    let mut state = InteractiveState::new(FilterState::default(), 100, 40, Instant::now());

    sync_catalog(&mut state, &client);
    assert!(state.catalog.is_loading);
    assert!(render_text(&state, &client).iter().any(|line| line.contains("Loading leagues")));

    settle().await;
    sync_catalog(&mut state, &client);
    assert!(!state.catalog.is_loading);
    assert_eq!(state.visible().len(), 8);
    assert!(state.ui.updated_label.is_some());

    let page = render_text(&state, &client);
    assert!(page.iter().any(|line| line.contains("English Premier League")));
    assert!(page.iter().any(|line| line.contains("Showing all 8 leagues")));
}

#[tokio::test(start_paused = true)]
async fn test_search_is_debounced() {
    let client = sample_client();
    let start = Instant::now();
    let mut state = InteractiveState::new(FilterState::default(), 100, 40, start);
    client.fetch_leagues().await.unwrap();
    sync_catalog(&mut state, &client);

    for c in "liga".chars() {
        state.insert_char(c, Instant::now());
    }
    assert!(state.search.is_pending());
    assert!(!state.apply_due_search(Instant::now()));
    assert_eq!(state.visible().len(), 8);

    tokio::time::advance(Duration::from_millis(299)).await;
    assert!(!state.apply_due_search(Instant::now()));

    tokio::time::advance(Duration::from_millis(1)).await;
    assert!(state.apply_due_search(Instant::now()));
    assert_eq!(state.filter.search_text, "liga");
    assert_eq!(visible_ids(&state), vec!["4335"]);
}

#[tokio::test(start_paused = true)]
async fn test_sport_cycle_and_clear_filters() {
    let client = sample_client();
    let mut state = InteractiveState::new(FilterState::default(), 100, 40, Instant::now());
    client.fetch_leagues().await.unwrap();
    sync_catalog(&mut state, &client);

    assert_eq!(state.sport_label(), ALL_SPORTS);
    state.cycle_sport(true);
    assert_eq!(state.sport_label(), "American Football");
    assert_eq!(visible_ids(&state), vec!["4391"]);

    state.cycle_sport(false);
    state.cycle_sport(false);
    assert_eq!(state.sport_label(), "Soccer");
    assert_eq!(visible_ids(&state), vec!["4328", "4335", "4346"]);

    state.insert_char('x', Instant::now());
    state.clear_filters();
    assert!(!state.filter.is_active());
    assert!(!state.search.is_pending());
    assert_eq!(state.visible().len(), 8);
}

#[tokio::test(start_paused = true)]
async fn test_badge_modal_lifecycle() {
    let client = sample_client();
    let mut state = InteractiveState::new(FilterState::default(), 100, 40, Instant::now());
    client.fetch_leagues().await.unwrap();
    sync_catalog(&mut state, &client);

    // Closed modal keeps the badge query disabled
    assert_eq!(client.badge("4328", false), Default::default());
    assert_eq!(client.source().badge_calls(), 0);

    assert!(state.open_badge());
    assert_eq!(state.modal.league_id(), Some("4328"));
    let loading = client.badge("4328", true);
    assert_eq!(ModalPhase::of(&loading), ModalPhase::Loading);

    settle().await;
    let page = render_text(&state, &client);
    assert!(page.iter().any(|line| line.contains("English Premier League Badge")));
    assert!(page.iter().any(|line| line.contains("2025-2026")));

    state.close_modal();
    assert!(!state.modal.is_open());

    // Reopening is served from the cache
    assert!(state.open_badge());
    assert_eq!(ModalPhase::of(&client.badge("4328", true)), ModalPhase::Loaded);
    assert_eq!(client.source().badge_calls(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_league_without_seasons_shows_no_badge() {
    let client = sample_client();
    let mut state = InteractiveState::new(FilterState::new("nba", ""), 100, 40, Instant::now());
    client.fetch_leagues().await.unwrap();
    sync_catalog(&mut state, &client);

    assert!(state.open_badge());
    client.badge("4387", true);
    settle().await;

    assert_eq!(ModalPhase::of(&client.badge("4387", true)), ModalPhase::Empty);
    let page = render_text(&state, &client);
    assert!(page.iter().any(|line| line.contains("No badge available")));
}

#[tokio::test(start_paused = true)]
async fn test_keyboard_navigation_follows_grid() {
    let client = QueryClient::new(FakeCatalogSource::new(
        TestDataBuilder::create_multiple_leagues(30),
    ));
    // Width 100 lays out two columns
    let mut state = InteractiveState::new(FilterState::default(), 100, 40, Instant::now());
    client.fetch_leagues().await.unwrap();
    sync_catalog(&mut state, &client);
    assert_eq!(state.layout().columns, 2);

    state.move_selection(Direction::Right);
    state.move_selection(Direction::Down);
    assert_eq!(state.selected, 3);

    state.move_selection(Direction::End);
    assert_eq!(state.selected, 29);
    assert!(state.scroll_row > 0);

    state.move_selection(Direction::Home);
    assert_eq!((state.selected, state.scroll_row), (0, 0));

    // Narrowing to one column keeps the selection valid
    state.move_selection(Direction::End);
    state.handle_resize(60, 20);
    assert_eq!(state.layout().columns, 1);
    assert_eq!(state.selected, 29);
}

#[tokio::test(start_paused = true)]
async fn test_failed_load_recovers_after_manual_retry() {
    let client = QueryClient::new(
        FakeCatalogSource::new(TestDataBuilder::sample_leagues()).failing_leagues(4),
    );
    let mut state = InteractiveState::new(FilterState::default(), 100, 40, Instant::now());

    client.fetch_leagues().await.unwrap_err();
    sync_catalog(&mut state, &client);
    assert!(state.catalog.error.is_some());
    assert!(render_text(&state, &client).iter().any(|line| line.contains("Failed to load leagues")));

    client.refetch_leagues();
    settle().await;
    sync_catalog(&mut state, &client);
    assert!(state.catalog.error.is_none());
    assert_eq!(state.visible().len(), 8);
    assert_eq!(client.source().league_calls(), 5);
}
