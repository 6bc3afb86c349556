//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the arcade.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (game engines, loop controller, terminal front end).
//!
//! # Field Dimensions
//!
//! Both games play on the same field:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Preview**: 4x4 grid showing the next puzzle shape
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DELAY_MS` | 1000 | Tick delay at level 1 |
//! | `MIN_DELAY_MS` | 100 | Tick delay at level 10 |
//! | `HOLD_THRESHOLD_MS` | 80 | Same key within this window counts as held |
//! | `INPUT_TIMEOUT_MS` | 1000 | Raw key read timeout |
//!
//! # Examples
//!
//! ```
//! use retro_arcade_types::{Action, GameKind, Key, Phase, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! // Keys and actions carry a lowercase name for logs
//! assert_eq!(Key::Esc.as_str(), "esc");
//! assert_eq!(Action::Terminate.as_str(), "terminate");
//!
//! // Each game has a fixed high-score id
//! assert_eq!(GameKind::Tetris.db_id(), 211);
//!
//! assert_eq!(Phase::default(), Phase::Init);
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Field height in cells (20 rows)
pub const FIELD_HEIGHT: usize = 20;

/// Side of the square next-shape preview grid
pub const PREVIEW_SIZE: usize = 4;

/// Highest regular level; the puzzle game is won by levelling past it
pub const MAX_LEVEL: u32 = 10;

/// Tick delay at level 1
pub const BASE_DELAY_MS: u64 = 1000;

/// Tick delay at level 10 (a tenth of the base delay)
pub const MIN_DELAY_MS: u64 = 100;

/// Repeats of the same key closer than this are flagged as held
pub const HOLD_THRESHOLD_MS: u64 = 80;

/// Raw key read timeout; bounds how long a stop request takes to be noticed
pub const INPUT_TIMEOUT_MS: u64 = 1000;

/// Points awarded for clearing 0-4 rows with a single lock
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 700, 1500];

/// Puzzle game: level N is left once the score reaches `N * TETRIS_LEVEL_STEP`
pub const TETRIS_LEVEL_STEP: u32 = 600;

/// Growth game: level N is left once the score reaches `N * SNAKE_LEVEL_STEP`
pub const SNAKE_LEVEL_STEP: u32 = 5;

/// A field or preview cell value.
///
/// The meaning of non-zero values is game specific; see the engine modules.
pub type Cell = i32;

/// Empty cell in every grid
pub const EMPTY: Cell = 0;


/// Coarse state-machine state shared by both games
///
/// - **Init**: title screen, nothing in play
/// - **Instruction**: help screen reached from Init
/// - **Game**: a round is running
/// - **Pause**: a round is suspended
/// - **GameOver** / **Win**: the round ended; Start replays, Terminate leaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Init,
    Instruction,
    Game,
    Pause,
    GameOver,
    Win,
}

impl Phase {
    /// Convert to a lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Init => "init",
            Phase::Instruction => "instruction",
            Phase::Game => "game",
            Phase::Pause => "pause",
            Phase::GameOver => "game_over",
            Phase::Win => "win",
        }
    }

    /// Whether the round has finished (lost or won)
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::GameOver | Phase::Win)
    }
}

/// The two games the arcade can run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    /// Falling-block puzzle game
    Tetris,
    /// Grid-movement growth game
    Snake,
}

impl GameKind {
    /// Every selectable game, in menu order
    pub const ALL: [GameKind; 2] = [GameKind::Tetris, GameKind::Snake];

    /// Fixed identifier of this game's record in the high-score file
    ///
    /// # Examples
    ///
    /// ```
    /// use retro_arcade_types::GameKind;
    ///
    /// assert_eq!(GameKind::Tetris.db_id(), 211);
    /// assert_eq!(GameKind::Snake.db_id(), 212);
    /// ```
    pub fn db_id(&self) -> i32 {
        match self {
            GameKind::Tetris => 211,
            GameKind::Snake => 212,
        }
    }

    /// Human readable title
    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Tetris => "Tetris",
            GameKind::Snake => "Snake",
        }
    }
}

/// Abstract actions routed into an engine's state machine
///
/// The controller maps raw keys onto these; engines never see keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Begin (or restart) a round
    Start,
    /// Toggle pause
    Pause,
    /// Leave the current screen
    Terminate,
    Left,
    Right,
    Up,
    Down,
    /// Game specific primary action (rotate / step)
    Action,
}

impl Action {
    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Pause => "pause",
            Action::Terminate => "terminate",
            Action::Left => "left",
            Action::Right => "right",
            Action::Up => "up",
            Action::Down => "down",
            Action::Action => "action",
        }
    }

    /// Actions a running round drops while their key is auto-repeating
    pub fn ignored_when_held(&self) -> bool {
        matches!(self, Action::Pause | Action::Terminate)
    }
}

/// Raw key surface consumed by the loop controller
///
/// Input back ends translate whatever they read into one of these; codes
/// outside this set never leave the back end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    Esc,
    Enter,
    P,
    Left,
    Right,
    Up,
    Down,
}

impl Key {
    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Key::Space => "space",
            Key::Esc => "esc",
            Key::Enter => "enter",
            Key::P => "p",
            Key::Left => "left",
            Key::Right => "right",
            Key::Up => "up",
            Key::Down => "down",
        }
    }
}

/// One decoded key press, tagged with the auto-repeat flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub key: Key,
    /// Same key seen again inside the hold threshold
    pub held: bool,
}

impl InputEvent {
    pub fn new(key: Key, held: bool) -> Self {
        Self { key, held }
    }

    pub fn pressed(key: Key) -> Self {
        Self { key, held: false }
    }
}
