//! Full-screen page composition and buffered output.

use std::io::{Stdout, Write};

use crossterm::{cursor::Hide, execute, style::Print};

use super::cards::{join_cards, league_card, skeleton_card};
use super::layout::{GRID_MARGIN, GridLayout, modal_rect};
use super::modal::{ModalView, modal_lines};
use super::text::{Line, Span, Tone, display_width};
use crate::constants::ui::{CARD_GAP, CHROME_ROWS, SKELETON_CARDS};
use crate::data_fetcher::cache::QueryState;
use crate::data_fetcher::models::League;
use crate::error::{AppError, QueryError};
use crate::filter::results_summary;

pub const TITLE: &str = "LEAGUE BROWSER";
pub const LOADING_LEAGUES: &str = "Loading leagues...";
pub const LOAD_FAILED: &str = "Failed to load leagues";
pub const NO_RESULTS: &str = "No leagues found";

/// First screen row of the card grid
pub const BODY_TOP: usize = 4;

const FOOTER_HINTS: &str =
    "←↑↓→ Move  Enter Badge  Tab Sport  Esc Clear search  ^R Retry  ^L Clear filters  ^Q Quit";
const MODAL_FOOTER_HINTS: &str = "Enter / Esc Close badge  ^Q Quit";

/// Everything the page needs for one frame.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub catalog: &'a QueryState<Vec<League>>,
    /// Filtered leagues, in catalog order
    pub visible: &'a [&'a League],
    /// Raw search box contents, which may be ahead of the applied filter
    pub search_input: &'a str,
    pub search_pending: bool,
    pub sport_label: &'a str,
    pub filters_active: bool,
    pub selected: usize,
    pub scroll_row: usize,
    pub spinner: &'a str,
    /// Wall-clock time of the last successful fetch, e.g. "14:05"
    pub updated_label: Option<&'a str>,
    pub modal: Option<ModalView<'a>>,
}

enum Body<'a> {
    Loading,
    Failed(&'a QueryError),
    Empty,
    Grid,
}

impl<'a> PageView<'a> {
    fn body(&self) -> Body<'a> {
        let catalog: &'a QueryState<Vec<League>> = self.catalog;
        match (&catalog.data, &catalog.error) {
            (None, Some(error)) if !catalog.is_fetching => Body::Failed(error),
            (None, _) => Body::Loading,
            (Some(_), _) if self.visible.is_empty() => Body::Empty,
            (Some(_), _) => Body::Grid,
        }
    }
}

/// Rows available to cards on a screen `height` rows tall.
pub fn body_height(height: u16) -> usize {
    (height as usize).saturating_sub(CHROME_ROWS)
}

fn title_bar(view: &PageView<'_>, width: usize) -> Line {
    let left = format!(" {TITLE}");
    let right = view
        .updated_label
        .map(|time| format!("Updated {time} "))
        .unwrap_or_default();
    let gap = width.saturating_sub(display_width(&left) + display_width(&right));
    Line::new()
        .with(Span::new(left, Tone::Title).bold())
        .with(Span::new(" ".repeat(gap), Tone::Title))
        .with(Span::new(right, Tone::Title))
        .fit(width)
}

fn controls(view: &PageView<'_>, width: usize) -> Line {
    let mut line = Line::new()
        .with(Span::new(" Search: ", Tone::Muted))
        .with(Span::new(view.search_input, Tone::Text))
        .with(Span::new("▏", Tone::Accent));
    if view.search_pending {
        line.push(Span::new(" …", Tone::Muted));
    }
    line.with(Span::new("    Sport: ", Tone::Muted))
        .with(Span::new("◀ ", Tone::Accent))
        .with(Span::new(view.sport_label, Tone::Sport).bold())
        .with(Span::new(" ▶", Tone::Accent))
        .fit(width)
}

fn status(view: &PageView<'_>, width: usize) -> Line {
    let catalog = view.catalog;
    let line = match &catalog.data {
        None if catalog.error.is_some() && !catalog.is_fetching => {
            Line::from_span(Span::new(" Could not load the league catalog", Tone::Error))
        }
        None => Line::from_span(Span::new(
            format!(" {} {}", view.spinner, LOADING_LEAGUES),
            Tone::Muted,
        )),
        Some(leagues) => {
            let mut line = Line::from_span(Span::new(
                format!(" {}", results_summary(view.visible.len(), leagues.len())),
                Tone::Text,
            ));
            if catalog.is_fetching {
                line.push(Span::new(
                    format!("  {} refreshing...", view.spinner),
                    Tone::Muted,
                ));
            } else if catalog.error.is_some() {
                line.push(Span::new(
                    "  refresh failed, showing cached data",
                    Tone::Error,
                ));
            }
            line
        }
    };
    line.fit(width)
}

fn grid_rows(cards: Vec<Vec<Line>>, layout: &GridLayout, width: usize) -> Vec<Line> {
    cards
        .chunks(layout.columns)
        .flat_map(|row| join_cards(row, GRID_MARGIN, CARD_GAP, width))
        .collect()
}

fn centered_message(lines: Vec<Line>, width: usize, height: usize) -> Vec<Line> {
    let top = height.saturating_sub(lines.len()) / 3;
    let mut body = vec![Line::blank(width); top];
    body.extend(lines.into_iter().map(|line| line.centered(width)));
    body
}

fn body_lines(view: &PageView<'_>, width: u16, height: usize) -> Vec<Line> {
    let w = width as usize;
    let layout = GridLayout::new(width, height);

    let mut lines = match view.body() {
        Body::Loading => {
            let count = SKELETON_CARDS.min(layout.columns * layout.visible_rows);
            let cards = (0..count).map(|_| skeleton_card(layout.card_width)).collect();
            grid_rows(cards, &layout, w)
        }
        Body::Failed(error) => centered_message(
            vec![
                Line::from_span(Span::new(LOAD_FAILED, Tone::Error).bold()),
                Line::from_span(Span::new("Please try again later", Tone::Text)),
                Line::from_span(Span::new(error.to_string(), Tone::Muted)),
                Line::new(),
                Line::from_span(Span::new("[ Ctrl+R ] Try Again", Tone::Accent).bold()),
            ],
            w,
            height,
        ),
        Body::Empty => {
            let mut message = vec![
                Line::from_span(Span::new(NO_RESULTS, Tone::Text).bold()),
                Line::from_span(Span::new("Try adjusting your search or filter", Tone::Muted)),
            ];
            if view.filters_active {
                message.push(Line::new());
                message.push(Line::from_span(
                    Span::new("[ Ctrl+L ] Clear Filters", Tone::Accent).bold(),
                ));
            }
            centered_message(message, w, height)
        }
        Body::Grid => {
            let count = view.visible.len();
            let scroll_row = view
                .scroll_row
                .min(layout.total_rows(count).saturating_sub(1));
            let first = scroll_row * layout.columns;
            let last = (first + layout.visible_rows * layout.columns).min(count);
            let cards = (first..last)
                .map(|index| league_card(view.visible[index], layout.card_width, index == view.selected))
                .collect();
            grid_rows(cards, &layout, w)
        }
    };

    lines.truncate(height);
    lines.resize_with(height, || Line::blank(w));
    lines
}

/// Lays out a whole frame: exactly `height` lines, each `width` columns.
pub fn render_page(view: &PageView<'_>, width: u16, height: u16) -> Vec<Line> {
    let w = width as usize;
    let footer = if view.modal.is_some() {
        MODAL_FOOTER_HINTS
    } else {
        FOOTER_HINTS
    };

    let mut lines = vec![
        title_bar(view, w),
        controls(view, w),
        status(view, w),
        Line::blank(w),
    ];
    debug_assert_eq!(lines.len(), BODY_TOP);
    lines.extend(body_lines(view, width, body_height(height)));
    lines.push(Line::blank(w));
    lines.push(Line::from_span(Span::new(format!(" {footer}"), Tone::Muted)).fit(w));
    lines.truncate(height as usize);

    if let Some(modal) = &view.modal {
        lines = lines.into_iter().map(Line::dimmed).collect();
        let rect = modal_rect(width, height);
        let boxed = modal_lines(modal, rect.width as usize, rect.height as usize);
        for (offset, modal_line) in boxed.into_iter().enumerate() {
            if let Some(row) = lines.get_mut(rect.y as usize + offset) {
                let mut overlay = Line::from_span(Span::new(" ".repeat(rect.x as usize), Tone::Dim));
                overlay.extend(modal_line);
                *row = overlay.fit(w);
            }
        }
    }

    lines
}

/// Joins the frame into one string with the given line separator.
pub fn page_to_string(lines: &[Line], plain: bool, separator: &str) -> String {
    lines
        .iter()
        .map(|line| line.render(plain))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Draws the frame in one write, replacing the previous one.
pub fn render_buffered(stdout: &mut Stdout, lines: &[Line], plain: bool) -> Result<(), AppError> {
    let mut buffer = String::with_capacity(lines.iter().map(Line::width).sum::<usize>() * 2);
    buffer.push_str("\x1b[H"); // Move to home position
    buffer.push_str("\x1b[0J"); // Clear from cursor down
    // Raw mode does not translate \n into a carriage return
    buffer.push_str(&page_to_string(lines, plain, "\r\n"));

    execute!(stdout, Hide, Print(buffer))?;
    stdout.flush()?;
    Ok(())
}

/// Plain listing for `--once`: one league per line and the summary.
pub fn catalog_listing(visible: &[&League], total: usize) -> Vec<Line> {
    let mut lines: Vec<Line> = visible
        .iter()
        .map(|league| {
            let mut line = Line::new()
                .with(Span::new(format!("{:>6}  ", league.id), Tone::Muted))
                .with(Span::new(league.name.as_str(), Tone::Text).bold());
            if let Some(alternate) = league.display_alternate_name() {
                line.push(Span::new(format!("  ({alternate})"), Tone::Muted));
            }
            if !league.sport.is_empty() {
                line.push(Span::new(format!("  [{}]", league.sport), Tone::Sport));
            }
            line
        })
        .collect();

    if !lines.is_empty() {
        lines.push(Line::new());
    }
    lines.push(Line::from_span(Span::new(
        results_summary(visible.len(), total),
        Tone::Accent,
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_fetcher::cache::BadgeState;
    use crate::testing_utils::TestDataBuilder;
    use std::sync::Arc;

    fn catalog(leagues: Option<Vec<League>>) -> QueryState<Vec<League>> {
        let mut state = QueryState::idle();
        state.data = leagues.map(Arc::new);
        state
    }

    fn view<'a>(catalog: &'a QueryState<Vec<League>>, visible: &'a [&'a League]) -> PageView<'a> {
        PageView {
            catalog,
            visible,
            search_input: "",
            search_pending: false,
            sport_label: "All Sports",
            filters_active: false,
            selected: 0,
            scroll_row: 0,
            spinner: "|",
            updated_label: None,
            modal: None,
        }
    }

    fn text(lines: &[Line]) -> String {
        page_to_string(lines, true, "\n")
    }

    fn assert_frame(lines: &[Line], width: u16, height: u16) {
        assert_eq!(lines.len(), height as usize);
        assert!(lines.iter().all(|line| line.width() == width as usize));
    }

    #[test]
    fn test_loading_page_shows_skeletons() {
        let mut state = catalog(None);
        state.is_loading = true;
        state.is_fetching = true;
        let lines = render_page(&view(&state, &[]), 100, 30);

        assert_frame(&lines, 100, 30);
        let page = text(&lines);
        assert!(page.contains(TITLE));
        assert!(page.contains(LOADING_LEAGUES));
        assert!(page.contains('░'));
    }

    #[test]
    fn test_error_page_offers_retry() {
        let mut state = catalog(None);
        state.error = Some(QueryError::fetch_failed("HTTP 503"));
        let lines = render_page(&view(&state, &[]), 100, 30);

        assert_frame(&lines, 100, 30);
        let page = text(&lines);
        assert!(page.contains(LOAD_FAILED));
        assert!(page.contains("Please try again later"));
        assert!(page.contains("HTTP 503"));
        assert!(page.contains("Try Again"));
    }

    #[test]
    fn test_grid_page_lists_leagues() {
        let leagues = TestDataBuilder::sample_leagues();
        let state = catalog(Some(leagues.clone()));
        let visible: Vec<&League> = leagues.iter().collect();
        let mut page_view = view(&state, &visible);
        page_view.updated_label = Some("14:05");

        let lines = render_page(&page_view, 130, 40);
        assert_frame(&lines, 130, 40);
        let page = text(&lines);
        assert!(page.contains("Showing all 8 leagues"));
        assert!(page.contains("English Premier League"));
        assert!(page.contains("[Basketball]"));
        assert!(page.contains("Updated 14:05"));
    }

    #[test]
    fn test_grid_scrolls_to_selected_row() {
        let leagues = TestDataBuilder::create_multiple_leagues(30);
        let state = catalog(Some(leagues.clone()));
        let visible: Vec<&League> = leagues.iter().collect();
        let mut page_view = view(&state, &visible);
        page_view.scroll_row = 27;
        page_view.selected = 28;

        // One column with 3 card rows visible
        let page = text(&render_page(&page_view, 60, 24));
        assert!(page.contains(&leagues[27].name));
        assert!(page.contains(&leagues[29].name));
        assert!(!page.contains(&leagues[26].name));

        // Scrolling past the end clamps to the last row
        page_view.scroll_row = 100;
        let page = text(&render_page(&page_view, 60, 24));
        assert!(page.contains(&leagues[29].name));
        assert!(!page.contains(&leagues[28].name));
    }

    #[test]
    fn test_empty_page_with_filters() {
        let leagues = TestDataBuilder::sample_leagues();
        let state = catalog(Some(leagues));
        let mut page_view = view(&state, &[]);
        page_view.search_input = "zzz";

        let page = text(&render_page(&page_view, 100, 30));
        assert!(page.contains(NO_RESULTS));
        assert!(!page.contains("Clear Filters"));

        page_view.filters_active = true;
        let page = text(&render_page(&page_view, 100, 30));
        assert!(page.contains("Showing 0 of 8 leagues"));
        assert!(page.contains("[ Ctrl+L ] Clear Filters"));
    }

    #[test]
    fn test_refresh_failure_keeps_grid() {
        let leagues = TestDataBuilder::sample_leagues();
        let mut state = catalog(Some(leagues.clone()));
        state.error = Some(QueryError::fetch_failed("HTTP 500"));
        let visible: Vec<&League> = leagues.iter().collect();

        let page = text(&render_page(&view(&state, &visible), 100, 30));
        assert!(page.contains("refresh failed, showing cached data"));
        assert!(page.contains("English Premier League"));
        assert!(!page.contains(LOAD_FAILED));
    }

    #[test]
    fn test_modal_overlay() {
        let leagues = TestDataBuilder::sample_leagues();
        let state = catalog(Some(leagues.clone()));
        let visible: Vec<&League> = leagues.iter().collect();
        let badge = BadgeState {
            badge: None,
            is_loading: true,
        };
        let mut page_view = view(&state, &visible);
        page_view.modal = Some(ModalView {
            league_name: "NBA",
            badge: &badge,
            spinner: "/",
        });

        let lines = render_page(&page_view, 100, 30);
        assert_frame(&lines, 100, 30);
        let page = text(&lines);
        assert!(page.contains("NBA Badge"));
        assert!(page.contains("/ Loading badge..."));
        assert!(page.contains(MODAL_FOOTER_HINTS));
        assert_eq!(lines[0].spans[0].tone, Tone::Dim);
    }

    #[test]
    fn test_tiny_terminal_is_clipped() {
        let state = catalog(Some(Vec::new()));
        let lines = render_page(&view(&state, &[]), 20, 4);
        assert_frame(&lines, 20, 4);
    }

    #[test]
    fn test_catalog_listing() {
        let leagues = TestDataBuilder::sample_leagues();
        let visible: Vec<&League> = leagues.iter().take(2).collect();
        let listing = catalog_listing(&visible, leagues.len());
        let rendered: Vec<String> = listing.iter().map(Line::plain_text).collect();

        assert_eq!(rendered.len(), 4);
        assert_eq!(
            rendered[0],
            "  4328  English Premier League  (Premier League, EPL)  [Soccer]"
        );
        assert_eq!(
            rendered[1],
            "  4387  NBA  (National Basketball Association)  [Basketball]"
        );
        assert_eq!(rendered[3], "Showing 2 of 8 leagues");

        let empty = catalog_listing(&[], 8);
        assert_eq!(empty.len(), 1);
    }
}
