//! Loop/dispatch layer.
//!
//! Owns the active game, paces its ticks along the speed curve, routes key
//! presses through the fixed key table, and tells the attached view to
//! redraw after every change.

pub mod config;
pub mod controller;
pub mod keymap;
pub mod timing;
pub mod view;

pub use retro_arcade_core as core;
pub use retro_arcade_types as types;

pub use config::{ConfigError, ControllerConfig};
pub use controller::LoopController;
pub use keymap::action_for;
pub use timing::tick_delay;
pub use view::{GameMenu, GameSelector, MenuOutcome, Renderer, View};
