//! Terminal front end.
//!
//! A small, game-oriented rendering layer: views paint into a framebuffer
//! (2 terminal columns per field cell) and the screen flushes only what
//! changed since the previous frame.
//!
//! [`TerminalView`] is the controller's `View` on a real terminal.

pub mod fb;
pub mod game_view;
pub mod screen;
pub mod view;

pub use retro_arcade_core as core;
pub use retro_arcade_engine as engine;
pub use retro_arcade_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use screen::{encode_diff_into, encode_full_into, Screen};
pub use view::TerminalView;
