//! Styled text primitives for the catalog page.
//!
//! Pages are built as [`Line`]s of [`Span`]s and only turned into escape
//! sequences at the very end, so the same page renders to plain text for
//! `--plain` and for tests.

use crossterm::style::Color;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::colors::*;

const ELLIPSIS: char = '…';

/// Semantic color of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Title,
    Text,
    Muted,
    Accent,
    Sport,
    Selected,
    Error,
    Link,
    Dim,
}

impl Tone {
    fn foreground(self) -> Color {
        match self {
            Tone::Title => title_fg(),
            Tone::Text => text_fg(),
            Tone::Muted => muted_fg(),
            Tone::Accent => accent_fg(),
            Tone::Sport => sport_fg(),
            Tone::Selected => selected_fg(),
            Tone::Error => error_fg(),
            Tone::Link => link_fg(),
            Tone::Dim => dim_fg(),
        }
    }

    fn background(self) -> Option<Color> {
        match self {
            Tone::Title => Some(title_bg()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Tone,
    pub bold: bool,
    /// Target of an OSC 8 hyperlink around the text
    pub link: Option<String>,
}

impl Span {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: false,
            link: None,
        }
    }

    pub fn link(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            link: Some(url.into()),
            ..Self::new(text, Tone::Link)
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn width(&self) -> usize {
        display_width(&self.text)
    }

    fn render_into(&self, buffer: &mut String, plain: bool) {
        if plain {
            buffer.push_str(&self.text);
            return;
        }

        buffer.push_str(&format!(
            "\x1b[38;5;{}m",
            get_ansi_code(self.tone.foreground(), 231)
        ));
        if let Some(bg) = self.tone.background() {
            buffer.push_str(&format!("\x1b[48;5;{}m", get_ansi_code(bg, 21)));
        }
        if self.bold {
            buffer.push_str("\x1b[1m");
        }
        match &self.link {
            Some(url) => buffer.push_str(&format!("\x1b]8;;{url}\x07{}\x1b]8;;\x07", self.text)),
            None => buffer.push_str(&self.text),
        }
        buffer.push_str("\x1b[0m");
    }
}

/// One terminal row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_span(span: Span) -> Self {
        Self { spans: vec![span] }
    }

    pub fn blank(width: usize) -> Self {
        Self::from_span(Span::new(" ".repeat(width), Tone::Text))
    }

    pub fn with(mut self, span: Span) -> Self {
        self.spans.push(span);
        self
    }

    pub fn push(&mut self, span: Span) {
        self.spans.push(span);
    }

    pub fn extend(&mut self, other: Line) {
        self.spans.extend(other.spans);
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }

    /// Truncates or pads the line to exactly `width` columns.
    pub fn fit(self, width: usize) -> Self {
        let mut remaining = width;
        let mut spans = Vec::with_capacity(self.spans.len() + 1);
        let mut pad_tone = Tone::Text;

        for span in self.spans {
            if remaining == 0 {
                break;
            }
            pad_tone = if span.tone == Tone::Title {
                Tone::Title
            } else {
                Tone::Text
            };
            let span_width = span.width();
            if span_width <= remaining {
                remaining -= span_width;
                spans.push(span);
            } else {
                let text = truncate_to_width(&span.text, remaining);
                remaining = remaining.saturating_sub(display_width(&text));
                spans.push(Span { text, ..span });
                break;
            }
        }

        if remaining > 0 {
            spans.push(Span::new(" ".repeat(remaining), pad_tone));
        }
        Self { spans }
    }

    /// Centers the line within `width` columns.
    pub fn centered(self, width: usize) -> Self {
        let left = width.saturating_sub(self.width()) / 2;
        let mut line = Line::from_span(Span::new(" ".repeat(left), Tone::Text));
        line.extend(self);
        line.fit(width)
    }

    /// Backdrop version of the line: everything grey, no links.
    pub fn dimmed(self) -> Self {
        Self {
            spans: self
                .spans
                .into_iter()
                .map(|span| Span {
                    tone: Tone::Dim,
                    bold: false,
                    link: None,
                    ..span
                })
                .collect(),
        }
    }

    pub fn render(&self, plain: bool) -> String {
        let mut buffer = String::with_capacity(self.width() + self.spans.len() * 16);
        for span in &self.spans {
            span.render_into(&mut buffer, plain);
        }
        buffer
    }
}

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `max_width` columns, ending in an ellipsis when
/// anything was removed.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let budget = max_width - 1;
    let mut used = 0;
    let mut truncated = String::new();
    for c in text.chars() {
        let char_width = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + char_width > budget {
            break;
        }
        used += char_width;
        truncated.push(c);
    }
    truncated.push(ELLIPSIS);
    truncated
}
