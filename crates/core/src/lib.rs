//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules and state of both games plus the phase
//! machine they share. It has no dependency on the terminal or the
//! filesystem; high scores go through the [`HighScoreStore`] trait.
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size value grids (10x20 field, 4x4 preview)
//! - [`shape`]: puzzle pieces and their 90 degree rotation
//! - [`scoring`]: line-clear table and level curves
//! - [`phase`]: phase routing shared by both games
//! - [`tetris`]: the falling-block puzzle engine
//! - [`snake`]: the growth game engine
//! - [`engine`]: the [`GameEngine`] contract and the closed [`Engine`] set
//! - [`rng`]: seedable randomness for spawns
//! - [`store`]: high-score persistence seam
//!
//! # Example
//!
//! ```
//! use retro_arcade_core::{Engine, GameEngine, MemoryStore};
//! use retro_arcade_types::{Action, GameKind, Phase};
//!
//! let mut engine = Engine::with_seed(GameKind::Tetris, MemoryStore::shared(), 12345);
//! engine.handle_input(Action::Start, false);
//! assert_eq!(engine.current_phase(), Phase::Game);
//!
//! engine.handle_input(Action::Down, false);
//! assert_eq!(engine.snapshot().score, 0);
//! ```
//!
//! # Timing
//!
//! Engines have no clock. A caller advances them with
//! [`GameEngine::tick`] at whatever rate the current speed asks for.

pub mod engine;
pub mod grid;
pub mod phase;
pub mod rng;
pub mod scoring;
pub mod shape;
pub mod snake;
pub mod snapshot;
pub mod store;
pub mod tetris;

pub use retro_arcade_types as types;

// Re-export commonly used types for convenience
pub use engine::{Engine, GameEngine, SharedEngine};
pub use grid::{Field, Grid, Preview};
pub use phase::{route, PhaseMachine, Transition};
pub use rng::GameRng;
pub use scoring::{line_clear_score, Progress, Scoreboard};
pub use shape::{Shape, ShapeKind, Spin};
pub use snake::{Direction, SnakeEngine};
pub use snapshot::GameSnapshot;
pub use store::{HighScoreStore, MemoryStore, SharedStore};
pub use tetris::TetrisEngine;
