//! League cards and their loading placeholders.

use super::text::{Line, Span, Tone};
use crate::constants::ui::CARD_HEIGHT;
use crate::data_fetcher::models::League;

pub const CARD_HINT: &str = "Press Enter to view season badge";

fn border_tone(selected: bool) -> Tone {
    if selected { Tone::Selected } else { Tone::Muted }
}

fn top_border(width: usize, tone: Tone) -> Line {
    let inner = width.saturating_sub(2);
    Line::from_span(Span::new(format!("┌{}┐", "─".repeat(inner)), tone))
}

fn bottom_border(width: usize, tone: Tone) -> Line {
    let inner = width.saturating_sub(2);
    Line::from_span(Span::new(format!("└{}┘", "─".repeat(inner)), tone))
}

/// `│ content │` with the content fitted to the card.
fn framed(content: Line, width: usize, tone: Tone) -> Line {
    let inner = width.saturating_sub(4);
    let mut line = Line::from_span(Span::new("│ ", tone));
    line.extend(content.fit(inner));
    line.with(Span::new(" │", tone))
}

/// The lines of one league card, each exactly `width` columns wide.
pub fn league_card(league: &League, width: usize, selected: bool) -> Vec<Line> {
    let tone = border_tone(selected);
    let name_tone = if selected { Tone::Selected } else { Tone::Text };

    let alternate = league
        .display_alternate_name()
        .map(|alternate| Line::from_span(Span::new(alternate, Tone::Muted)))
        .unwrap_or_default();
    let sport = if league.sport.is_empty() {
        Line::new()
    } else {
        Line::from_span(Span::new(format!("[{}]", league.sport), Tone::Sport))
    };
    let hint_tone = if selected { Tone::Accent } else { Tone::Muted };

    let lines = vec![
        top_border(width, tone),
        framed(
            Line::from_span(Span::new(league.name.as_str(), name_tone).bold()),
            width,
            tone,
        ),
        framed(alternate, width, tone),
        framed(sport, width, tone),
        framed(Line::from_span(Span::new(CARD_HINT, hint_tone)), width, tone),
        bottom_border(width, tone),
    ];
    debug_assert_eq!(lines.len(), CARD_HEIGHT);
    lines
}

/// Placeholder card shown while the catalog loads.
pub fn skeleton_card(width: usize) -> Vec<Line> {
    let inner = width.saturating_sub(4);
    let bar = |fraction_num: usize, fraction_den: usize| {
        let len = (inner * fraction_num / fraction_den).max(1);
        Line::from_span(Span::new("░".repeat(len), Tone::Dim))
    };

    vec![
        top_border(width, Tone::Dim),
        framed(bar(3, 4), width, Tone::Dim),
        framed(bar(1, 2), width, Tone::Dim),
        framed(Line::from_span(Span::new("░".repeat(inner.min(8)), Tone::Dim)), width, Tone::Dim),
        framed(bar(1, 3).centered(inner), width, Tone::Dim),
        bottom_border(width, Tone::Dim),
    ]
}

/// Lays cards side by side. Every row of the result spans `total_width`.
pub fn join_cards(cards: &[Vec<Line>], margin: usize, gap: usize, total_width: usize) -> Vec<Line> {
    (0..CARD_HEIGHT)
        .map(|row| {
            let mut line = Line::from_span(Span::new(" ".repeat(margin), Tone::Text));
            for (i, card) in cards.iter().enumerate() {
                if i > 0 {
                    line.push(Span::new(" ".repeat(gap), Tone::Text));
                }
                if let Some(card_line) = card.get(row) {
                    line.extend(card_line.clone());
                }
            }
            line.fit(total_width)
        })
        .collect()
}
