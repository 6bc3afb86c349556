//! Collaborators the controller drives.
//!
//! A front end implements [`Renderer`] and [`GameSelector`]; anything that
//! does both is a [`View`]. [`GameMenu`] is the selection logic a front end
//! can reuse so that drawing is all it has to add.

use std::io;
use std::sync::mpsc::Receiver;

use crate::core::GameSnapshot;
use crate::types::{GameKind, InputEvent, Key, Phase};

/// Draws one game state
pub trait Renderer {
    /// Called synchronously after every tick and every forwarded input
    fn render(&mut self, snapshot: &GameSnapshot, phase: Phase, kind: GameKind) -> io::Result<()>;
}

/// Picks the next game to play
pub trait GameSelector {
    /// Block until the player picks a game; `None` ends the session.
    ///
    /// Keys arrive on `events`, the same channel the controller reads.
    fn select_game_kind(&mut self, events: &Receiver<InputEvent>) -> io::Result<Option<GameKind>>;
}

pub trait View: Renderer + GameSelector {}

impl<T: Renderer + GameSelector> View for T {}

/// Result of feeding one key to a [`GameMenu`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOutcome {
    Pending,
    Chosen(GameKind),
    Cancelled,
}

/// Cursor over [`GameKind::ALL`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameMenu {
    cursor: usize,
}

impl GameMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> GameKind {
        GameKind::ALL[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Up/Down move the cursor (wrapping), Enter or Space picks, Esc cancels.
    pub fn apply(&mut self, event: InputEvent) -> MenuOutcome {
        let len = GameKind::ALL.len();
        match event.key {
            Key::Up | Key::Left => {
                self.cursor = (self.cursor + len - 1) % len;
                MenuOutcome::Pending
            }
            Key::Down | Key::Right => {
                self.cursor = (self.cursor + 1) % len;
                MenuOutcome::Pending
            }
            Key::Enter | Key::Space => MenuOutcome::Chosen(self.selected()),
            Key::Esc if !event.held => MenuOutcome::Cancelled,
            Key::Esc | Key::P => MenuOutcome::Pending,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_navigation() {
        let mut menu = GameMenu::new();
        assert_eq!(menu.selected(), GameKind::Tetris);
        assert_eq!(menu.apply(InputEvent::pressed(Key::Down)), MenuOutcome::Pending);
        assert_eq!(menu.selected(), GameKind::Snake);
        menu.apply(InputEvent::pressed(Key::Down));
        assert_eq!(menu.selected(), GameKind::Tetris);
        menu.apply(InputEvent::pressed(Key::Up));
        assert_eq!(
            menu.apply(InputEvent::pressed(Key::Enter)),
            MenuOutcome::Chosen(GameKind::Snake)
        );
    }

    #[test]
    fn test_menu_cancel_ignores_held_esc() {
        let mut menu = GameMenu::new();
        assert_eq!(
            menu.apply(InputEvent::new(Key::Esc, true)),
            MenuOutcome::Pending
        );
        assert_eq!(
            menu.apply(InputEvent::pressed(Key::Esc)),
            MenuOutcome::Cancelled
        );
    }
}
