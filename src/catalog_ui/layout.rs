//! Responsive grid geometry and modal placement.

use crate::constants::ui::{
    CARD_GAP, CARD_HEIGHT, DOUBLE_COLUMN_MAX_WIDTH, MODAL_HEIGHT, MODAL_WIDTH,
    SINGLE_COLUMN_MAX_WIDTH,
};

/// Left and right margin around the grid
pub const GRID_MARGIN: usize = 1;

const MIN_CARD_WIDTH: usize = 16;

/// Card columns for a terminal `width` columns wide.
pub fn column_count(width: u16) -> usize {
    if width < SINGLE_COLUMN_MAX_WIDTH {
        1
    } else if width < DOUBLE_COLUMN_MAX_WIDTH {
        2
    } else {
        3
    }
}

/// Selection movement within the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub columns: usize,
    pub card_width: usize,
    /// Card rows that fit in the body
    pub visible_rows: usize,
}

impl GridLayout {
    pub fn new(width: u16, body_height: usize) -> Self {
        let columns = column_count(width);
        let usable = (width as usize).saturating_sub(2 * GRID_MARGIN);
        let card_width = (usable.saturating_sub(CARD_GAP * (columns - 1)) / columns).max(MIN_CARD_WIDTH);
        Self {
            columns,
            card_width,
            visible_rows: (body_height / CARD_HEIGHT).max(1),
        }
    }

    pub fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    pub fn total_rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns)
    }

    /// First visible card row after scrolling just enough to show `selected`.
    pub fn scroll_to_show(&self, scroll_row: usize, selected: usize) -> usize {
        let row = self.row_of(selected);
        if row < scroll_row {
            row
        } else if row >= scroll_row + self.visible_rows {
            row + 1 - self.visible_rows
        } else {
            scroll_row
        }
    }

    /// Card under a click at `x`, `y` (relative to the top of the body),
    /// if any.
    pub fn card_at(&self, x: usize, y: usize, scroll_row: usize, count: usize) -> Option<usize> {
        let x = x.checked_sub(GRID_MARGIN)?;
        let pitch = self.card_width + CARD_GAP;
        let column = x / pitch;
        let row = y / CARD_HEIGHT;
        if column >= self.columns || x % pitch >= self.card_width || row >= self.visible_rows {
            return None;
        }
        let index = (scroll_row + row) * self.columns + column;
        (index < count).then_some(index)
    }

    /// New selection after moving in `direction` among `count` cards.
    pub fn move_selection(&self, selected: usize, count: usize, direction: Direction) -> usize {
        if count == 0 {
            return 0;
        }
        let last = count - 1;
        let selected = selected.min(last);
        match direction {
            Direction::Left => selected.saturating_sub(1),
            Direction::Right => (selected + 1).min(last),
            Direction::Up => selected.checked_sub(self.columns).unwrap_or(selected),
            Direction::Down => {
                if selected + self.columns <= last {
                    selected + self.columns
                } else if self.row_of(last) > self.row_of(selected) {
                    last
                } else {
                    selected
                }
            }
            Direction::Home => 0,
            Direction::End => last,
        }
    }
}

/// Screen area in zero-based terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }
}

/// Where the badge modal box sits on a `width` x `height` screen.
/// Everything outside it is backdrop.
pub fn modal_rect(width: u16, height: u16) -> Rect {
    let modal_width = (MODAL_WIDTH as u16).min(width.saturating_sub(2)).max(1);
    let modal_height = (MODAL_HEIGHT as u16).min(height).max(1);
    Rect {
        x: width.saturating_sub(modal_width) / 2,
        y: height.saturating_sub(modal_height) / 2,
        width: modal_width,
        height: modal_height,
    }
}
