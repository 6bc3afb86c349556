//! Key mapping from terminal events to raw game keys.

use crate::types::Key;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a terminal key code onto one of the eight game keys.
///
/// Anything else is not a game key and yields `None`.
pub fn map_key_code(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Esc => Some(Key::Esc),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::P),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        _ => None,
    }
}

pub fn map_key_event(key: KeyEvent) -> Option<Key> {
    map_key_code(key.code)
}

/// Ctrl-C, which a raw-mode terminal no longer turns into a signal.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
