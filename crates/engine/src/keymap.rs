//! Fixed key to action table.

use crate::types::{Action, Key};

pub fn action_for(key: Key) -> Action {
    match key {
        Key::Space => Action::Action,
        Key::Esc => Action::Terminate,
        Key::Enter => Action::Start,
        Key::P => Action::Pause,
        Key::Left => Action::Left,
        Key::Right => Action::Right,
        Key::Up => Action::Up,
        Key::Down => Action::Down,
    }
}
