//! GameView: paints snapshots and the game menu into a framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snake::{is_body, is_head, FOOD};
use crate::core::{Field, GameSnapshot, Preview};
use crate::engine::GameMenu;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Cell, GameKind, Phase, EMPTY, FIELD_HEIGHT, FIELD_WIDTH, PREVIEW_SIZE};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);

const TEXT: Style = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);
const LABEL: Style = Style::plain(Rgb::new(220, 220, 220), SCREEN_BG).bold();
const BORDER: Style = Style::plain(Rgb::new(200, 200, 200), SCREEN_BG);
const BANNER: Style = Style::plain(Rgb::new(255, 255, 255), SCREEN_BG).bold();
const GRID_DOT: Style = Style::plain(Rgb::new(90, 90, 100), WELL_BG).dim();

const BLOCK: Style = Style::plain(Rgb::new(80, 220, 220), WELL_BG).bold();
const FOOD_STYLE: Style = Style::plain(Rgb::new(220, 80, 80), WELL_BG).bold();
const HEAD_STYLE: Style = Style::plain(Rgb::new(240, 220, 80), WELL_BG).bold();
const BODY_STYLE: Style = Style::plain(Rgb::new(100, 220, 120), WELL_BG);

const HELP: [&str; 6] = [
    "ARROWS  move / turn",
    "UP      rotate (puzzle)",
    "DOWN    drop (puzzle)",
    "SPACE   action",
    "P       pause",
    "ESC     back",
];

/// Lays out the well, the side panel and phase banners.
pub struct GameView {
    /// Well cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    fn frame_size(&self) -> (u16, u16) {
        (FIELD_WIDTH as u16 * self.cell_w + 2, FIELD_HEIGHT as u16 + 2)
    }

    fn origin(&self, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size();
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    /// Paint one game state.
    pub fn draw_game(
        &self,
        snap: &GameSnapshot,
        phase: Phase,
        kind: GameKind,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT);

        let (frame_w, frame_h) = self.frame_size();
        let (x0, y0) = self.origin(viewport);

        draw_border(fb, x0, y0, frame_w, frame_h);
        fb.put_centered(x0, frame_w, y0, &format!(" {} ", kind.title()), LABEL);
        self.draw_field(fb, &snap.field, kind, x0 + 1, y0 + 1);
        self.draw_panel(fb, snap, kind, viewport, x0 + frame_w + 2, y0);

        let mid = y0 + frame_h / 2;
        match phase {
            Phase::Game => {}
            Phase::Init => {
                fb.put_centered(x0, frame_w, mid - 1, "PRESS ENTER", BANNER);
                fb.put_centered(x0, frame_w, mid + 1, "UP: HELP", TEXT);
                fb.put_centered(x0, frame_w, mid + 2, "ESC: MENU", TEXT);
            }
            Phase::Instruction => {
                for (i, line) in HELP.iter().enumerate() {
                    fb.put_str(x0 + 1, y0 + 2 + i as u16, line, TEXT);
                }
                fb.put_centered(x0, frame_w, mid + 3, "ENTER: START", BANNER);
            }
            Phase::Pause => fb.put_centered(x0, frame_w, mid, "PAUSED", BANNER),
            Phase::GameOver => {
                fb.put_centered(x0, frame_w, mid, "GAME OVER", BANNER);
                fb.put_centered(x0, frame_w, mid + 2, "ENTER: RETRY", TEXT);
            }
            Phase::Win => {
                fb.put_centered(x0, frame_w, mid, "YOU WIN", BANNER);
                fb.put_centered(x0, frame_w, mid + 2, "ENTER: AGAIN", TEXT);
            }
        }
    }

    /// Paint the game selection menu.
    pub fn draw_menu(&self, menu: &GameMenu, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(TEXT);

        let (frame_w, frame_h) = self.frame_size();
        let (x0, y0) = self.origin(viewport);
        draw_border(fb, x0, y0, frame_w, frame_h);
        fb.put_centered(x0, frame_w, y0 + 2, "SELECT GAME", BANNER);

        for (i, kind) in GameKind::ALL.iter().enumerate() {
            let marker = if i == menu.cursor() { '>' } else { ' ' };
            let line = format!("{} {}", marker, kind.title());
            let style = if i == menu.cursor() { LABEL } else { TEXT };
            fb.put_str(x0 + 4, y0 + 5 + 2 * i as u16, &line, style);
        }

        fb.put_centered(x0, frame_w, y0 + frame_h - 3, "ENTER: PLAY", TEXT);
        fb.put_centered(x0, frame_w, y0 + frame_h - 2, "ESC: QUIT", TEXT);
    }

    fn draw_field(&self, fb: &mut FrameBuffer, field: &Field, kind: GameKind, x0: u16, y0: u16) {
        for (x, y, cell) in field.cells() {
            let (ch, style) = cell_glyph(kind, cell);
            fb.fill_rect(x0 + x as u16 * self.cell_w, y0 + y as u16, self.cell_w, 1, ch, style);
        }
    }

    fn draw_preview(&self, fb: &mut FrameBuffer, preview: &Preview, x0: u16, y0: u16) {
        for (x, y, cell) in preview.cells() {
            let (ch, style) = if cell == EMPTY {
                (' ', TEXT)
            } else {
                ('█', BLOCK)
            };
            fb.fill_rect(x0 + x as u16 * self.cell_w, y0 + y as u16, self.cell_w, 1, ch, style);
        }
    }

    fn draw_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        kind: GameKind,
        viewport: Viewport,
        x: u16,
        y0: u16,
    ) {
        if x >= viewport.width || viewport.width - x < 10 {
            return;
        }

        let mut y = y0;
        for (label, value) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LEVEL", snap.level),
            ("SPEED", snap.speed),
        ] {
            fb.put_str(x, y, label, LABEL);
            fb.put_str(x, y + 1, &value.to_string(), TEXT);
            y += 3;
        }

        if kind == GameKind::Tetris {
            fb.put_str(x, y, "NEXT", LABEL);
            self.draw_preview(fb, &snap.preview, x, y + 1);
            y += PREVIEW_SIZE as u16 + 2;
        }

        if snap.paused {
            fb.put_str(x, y, "paused", TEXT.dim());
        }
    }
}

fn cell_glyph(kind: GameKind, cell: Cell) -> (char, Style) {
    if cell == EMPTY {
        return ('·', GRID_DOT);
    }
    match kind {
        GameKind::Tetris => ('█', BLOCK),
        GameKind::Snake if cell == FOOD => ('█', FOOD_STYLE),
        GameKind::Snake if is_head(cell) => ('█', HEAD_STYLE),
        GameKind::Snake if is_body(cell) => ('█', BODY_STYLE),
        GameKind::Snake => ('?', TEXT),
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put(x, y, '┌', BORDER);
    fb.put(x + w - 1, y, '┐', BORDER);
    fb.put(x, y + h - 1, '└', BORDER);
    fb.put(x + w - 1, y + h - 1, '┘', BORDER);

    for dx in 1..w - 1 {
        fb.put(x + dx, y, '─', BORDER);
        fb.put(x + dx, y + h - 1, '─', BORDER);
    }
    for dy in 1..h - 1 {
        fb.put(x, y + dy, '│', BORDER);
        fb.put(x + w - 1, y + dy, '│', BORDER);
    }
}
