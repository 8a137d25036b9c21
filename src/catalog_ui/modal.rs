//! The season badge modal box.

use super::text::{Line, Span, Tone, truncate_to_width};
use crate::data_fetcher::cache::BadgeState;

pub const LOADING_BADGE: &str = "Loading badge...";
pub const NO_BADGE: &str = "No badge available";
pub const SEASON_BADGE: &str = "Season Badge";
const CLOSE_HINT: &str = "[ Close ]  Enter / Esc / click outside";

/// What the modal shows for one league.
#[derive(Debug, Clone, Copy)]
pub struct ModalView<'a> {
    pub league_name: &'a str,
    pub badge: &'a BadgeState,
    /// Spinner frame shown next to the loading message
    pub spinner: &'a str,
}

/// What an open modal currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Loading,
    Loaded,
    Empty,
}

impl ModalPhase {
    pub fn of(badge: &BadgeState) -> Self {
        if badge.is_loading {
            ModalPhase::Loading
        } else if badge
            .badge
            .as_ref()
            .is_some_and(|badge| badge.badge_image_url.is_some())
        {
            ModalPhase::Loaded
        } else {
            ModalPhase::Empty
        }
    }
}

fn body_lines(view: &ModalView<'_>) -> Vec<Line> {
    let loaded = match ModalPhase::of(view.badge) {
        ModalPhase::Loading => {
            return vec![Line::from_span(Span::new(
                format!("{} {}", view.spinner, LOADING_BADGE),
                Tone::Muted,
            ))];
        }
        ModalPhase::Empty => None,
        ModalPhase::Loaded => view.badge.badge.as_ref(),
    };

    match loaded {
        Some(badge) => {
            let url = badge.badge_image_url.as_deref().unwrap_or_default();
            let mut lines = vec![Line::from_span(Span::new(SEASON_BADGE, Tone::Accent).bold())];
            if !badge.season.is_empty() {
                lines.push(
                    Line::from_span(Span::new("Season ", Tone::Muted))
                        .with(Span::new(badge.season.as_str(), Tone::Text)),
                );
            }
            lines.push(Line::new());
            lines.push(Line::from_span(Span::link(url, url)));
            lines
        }
        None => vec![Line::from_span(Span::new(NO_BADGE, Tone::Muted))],
    }
}

/// Lines of the modal box, `width` x `height`.
pub fn modal_lines(view: &ModalView<'_>, width: usize, height: usize) -> Vec<Line> {
    let inner = width.saturating_sub(4);
    let framed = |content: Line| {
        let mut line = Line::from_span(Span::new("│ ", Tone::Accent));
        line.extend(content.fit(inner));
        line.with(Span::new(" │", Tone::Accent))
    };

    let title = truncate_to_width(&format!(" {} Badge ", view.league_name), width.saturating_sub(4));
    let title_fill = width.saturating_sub(3 + super::text::display_width(&title));
    let mut lines = vec![
        Line::new()
            .with(Span::new("┌─", Tone::Accent))
            .with(Span::new(title, Tone::Text).bold())
            .with(Span::new(format!("{}┐", "─".repeat(title_fill)), Tone::Accent))
            .fit(width),
    ];

    let content_rows = height.saturating_sub(4);
    let body = body_lines(view);
    let top_padding = content_rows.saturating_sub(body.len()) / 2;
    for row in 0..content_rows {
        let content = row
            .checked_sub(top_padding)
            .and_then(|index| body.get(index))
            .cloned()
            .map(|line| line.centered(inner))
            .unwrap_or_default();
        lines.push(framed(content));
    }

    lines.push(framed(Line::from_span(Span::new(CLOSE_HINT, Tone::Muted)).centered(inner)));
    lines.push(Line::from_span(Span::new(
        format!("└{}┘", "─".repeat(width.saturating_sub(2))),
        Tone::Accent,
    )));
    lines.truncate(height);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    fn plain(lines: &[Line]) -> String {
        lines
            .iter()
            .map(Line::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_phases() {
        let loading = BadgeState {
            badge: None,
            is_loading: true,
        };
        assert_eq!(ModalPhase::of(&loading), ModalPhase::Loading);

        let loaded = BadgeState {
            badge: Some(TestDataBuilder::badge("2024")),
            is_loading: false,
        };
        assert_eq!(ModalPhase::of(&loaded), ModalPhase::Loaded);
        assert_eq!(ModalPhase::of(&BadgeState::default()), ModalPhase::Empty);
    }

    #[test]
    fn test_loading_modal() {
        let badge = BadgeState {
            badge: None,
            is_loading: true,
        };
        let view = ModalView {
            league_name: "NBA",
            badge: &badge,
            spinner: "|",
        };
        let lines = modal_lines(&view, 56, 11);

        assert_eq!(lines.len(), 11);
        assert!(lines.iter().all(|line| line.width() == 56));
        let text = plain(&lines);
        assert!(text.contains("NBA Badge"));
        assert!(text.contains("| Loading badge..."));
        assert!(text.contains("[ Close ]"));
    }

    #[test]
    fn test_loaded_modal_links_badge() {
        let badge = BadgeState {
            badge: Some(TestDataBuilder::badge("2024-2025")),
            is_loading: false,
        };
        let view = ModalView {
            league_name: "English Premier League",
            badge: &badge,
            spinner: "|",
        };
        let lines = modal_lines(&view, 56, 11);
        let text = plain(&lines);

        assert!(text.contains(SEASON_BADGE));
        assert!(text.contains("Season 2024-2025"));
        assert!(lines.iter().all(|line| line.width() == 56));
        assert!(lines.iter().any(|line| {
            line.spans
                .iter()
                .any(|span| span.link.as_deref().is_some_and(|url| url.ends_with("2024-2025.png")))
        }));
    }

    #[test]
    fn test_missing_badge_modal() {
        let badge = BadgeState::default();
        let view = ModalView {
            league_name: "Obscure League",
            badge: &badge,
            spinner: "|",
        };
        assert!(plain(&modal_lines(&view, 56, 11)).contains(NO_BADGE));

        let empty_url = BadgeState {
            badge: Some(crate::data_fetcher::models::SeasonBadge {
                badge_image_url: None,
                season: "2024".to_string(),
            }),
            is_loading: false,
        };
        let view = ModalView {
            badge: &empty_url,
            ..view
        };
        assert!(plain(&modal_lines(&view, 56, 11)).contains(NO_BADGE));
    }
}
