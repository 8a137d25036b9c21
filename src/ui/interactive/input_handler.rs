//! Keyboard input mapping for the interactive UI.
//!
//! Keys are translated into [`UiAction`]s without touching any state, so the
//! bindings can be tested on their own. While the badge modal is open it
//! captures every key except quit.

use crate::catalog_ui::Direction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum UiAction {
    Quit,
    /// Re-run the full league fetch, clearing any error
    Retry,
    ClearFilters,
    ClearSearch,
    Insert(char),
    Backspace,
    NextSport,
    PreviousSport,
    Move(Direction),
    OpenBadge,
    CloseModal,
}

fn is_ctrl(key_event: &KeyEvent, c: char) -> bool {
    key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char(pressed) if pressed.eq_ignore_ascii_case(&c))
}

/// Maps a key press to an action. Releases and unbound keys map to `None`.
pub(super) fn map_key(key_event: &KeyEvent, modal_open: bool) -> Option<UiAction> {
    if key_event.kind == KeyEventKind::Release {
        return None;
    }

    if is_ctrl(key_event, 'c') || is_ctrl(key_event, 'q') {
        return Some(UiAction::Quit);
    }

    if modal_open {
        return match key_event.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiAction::CloseModal),
            _ => None,
        };
    }

    if is_ctrl(key_event, 'r') {
        return Some(UiAction::Retry);
    }
    if is_ctrl(key_event, 'l') {
        return Some(UiAction::ClearFilters);
    }

    let action = match key_event.code {
        KeyCode::Esc => UiAction::ClearSearch,
        KeyCode::Enter => UiAction::OpenBadge,
        KeyCode::Tab => UiAction::NextSport,
        KeyCode::BackTab => UiAction::PreviousSport,
        KeyCode::Up => UiAction::Move(Direction::Up),
        KeyCode::Down => UiAction::Move(Direction::Down),
        KeyCode::Left => UiAction::Move(Direction::Left),
        KeyCode::Right => UiAction::Move(Direction::Right),
        KeyCode::Home => UiAction::Move(Direction::Home),
        KeyCode::End => UiAction::Move(Direction::End),
        KeyCode::Backspace => UiAction::Backspace,
        KeyCode::Char(c)
            if !key_event
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            UiAction::Insert(c)
        }
        _ => return None,
    };
    Some(action)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn test_quit_keys_work_everywhere() {
        for modal_open in [false, true] {
            assert_eq!(map_key(&ctrl('c'), modal_open), Some(UiAction::Quit));
            assert_eq!(map_key(&ctrl('q'), modal_open), Some(UiAction::Quit));
            assert_eq!(map_key(&ctrl('Q'), modal_open), Some(UiAction::Quit));
        }
    }

    #[test]
    fn test_typing_edits_search() {
        assert_eq!(map_key(&key(KeyCode::Char('n')), false), Some(UiAction::Insert('n')));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('N'), KeyModifiers::SHIFT), false),
            Some(UiAction::Insert('N'))
        );
        assert_eq!(map_key(&key(KeyCode::Backspace), false), Some(UiAction::Backspace));
        assert_eq!(map_key(&key(KeyCode::Esc), false), Some(UiAction::ClearSearch));
        assert_eq!(
            map_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT), false),
            None
        );
    }

    #[test]
    fn test_catalog_bindings() {
        assert_eq!(map_key(&ctrl('r'), false), Some(UiAction::Retry));
        assert_eq!(map_key(&ctrl('l'), false), Some(UiAction::ClearFilters));
        assert_eq!(map_key(&key(KeyCode::Tab), false), Some(UiAction::NextSport));
        assert_eq!(map_key(&key(KeyCode::BackTab), false), Some(UiAction::PreviousSport));
        assert_eq!(map_key(&key(KeyCode::Enter), false), Some(UiAction::OpenBadge));
        assert_eq!(
            map_key(&key(KeyCode::Down), false),
            Some(UiAction::Move(Direction::Down))
        );
        assert_eq!(
            map_key(&key(KeyCode::End), false),
            Some(UiAction::Move(Direction::End))
        );
        assert_eq!(map_key(&key(KeyCode::F(5)), false), None);
    }

    #[test]
    fn test_modal_captures_keys() {
        assert_eq!(map_key(&key(KeyCode::Esc), true), Some(UiAction::CloseModal));
        assert_eq!(map_key(&key(KeyCode::Enter), true), Some(UiAction::CloseModal));
        assert_eq!(map_key(&key(KeyCode::Char('a')), true), None);
        assert_eq!(map_key(&key(KeyCode::Down), true), None);
        assert_eq!(map_key(&ctrl('r'), true), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut release = key(KeyCode::Enter);
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(&release, false), None);
    }
}
