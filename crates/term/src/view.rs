//! TerminalView: the controller's collaborator on a real terminal.

use std::io::{self, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::core::GameSnapshot;
use crate::engine::{GameMenu, GameSelector, MenuOutcome, Renderer};
use crate::fb::FrameBuffer;
use crate::game_view::{GameView, Viewport};
use crate::screen::Screen;
use crate::types::{GameKind, InputEvent, Phase};

/// How often the menu re-checks the terminal size while idle
const MENU_REFRESH: Duration = Duration::from_millis(250);

pub struct TerminalView<W: Write> {
    screen: Screen<W>,
    painter: GameView,
    frame: FrameBuffer,
    fixed: Option<Viewport>,
}

impl TerminalView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(Screen::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(screen: Screen<W>) -> Self {
        Self {
            screen,
            painter: GameView::default(),
            frame: FrameBuffer::new(0, 0),
            fixed: None,
        }
    }

    /// Draw at a fixed size instead of querying the terminal
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.fixed = Some(viewport);
        self
    }

    pub fn screen(&self) -> &Screen<W> {
        &self.screen
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    fn viewport(&self) -> Viewport {
        self.fixed.unwrap_or_else(|| {
            let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
            Viewport::new(w, h)
        })
    }

    fn present_menu(&mut self, menu: &GameMenu) -> io::Result<()> {
        let viewport = self.viewport();
        self.painter.draw_menu(menu, viewport, &mut self.frame);
        self.screen.present(&self.frame)
    }
}

impl<W: Write> Renderer for TerminalView<W> {
    fn render(&mut self, snapshot: &GameSnapshot, phase: Phase, kind: GameKind) -> io::Result<()> {
        let viewport = self.viewport();
        self.painter
            .draw_game(snapshot, phase, kind, viewport, &mut self.frame);
        self.screen.present(&self.frame)
    }
}

impl<W: Write> GameSelector for TerminalView<W> {
    fn select_game_kind(&mut self, events: &Receiver<InputEvent>) -> io::Result<Option<GameKind>> {
        let mut menu = GameMenu::new();
        self.present_menu(&menu)?;

        loop {
            let event = match events.recv_timeout(MENU_REFRESH) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => {
                    self.present_menu(&menu)?;
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => return Ok(None),
            };

            match menu.apply(event) {
                MenuOutcome::Pending => self.present_menu(&menu)?,
                MenuOutcome::Chosen(kind) => {
                    log::debug!("menu: {} chosen", kind.title());
                    return Ok(Some(kind));
                }
                MenuOutcome::Cancelled => return Ok(None),
            }
        }
    }
}
