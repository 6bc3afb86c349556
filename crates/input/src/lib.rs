//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto the eight game [`Key`](crate::types::Key)s,
//! flags auto-repeated presses as held, and runs the reader thread that feeds
//! the controller's event channel.

pub mod hold;
pub mod map;
pub mod reader;

pub use retro_arcade_types as types;

pub use hold::HoldDetector;
pub use map::{is_interrupt, map_key_code, map_key_event};
pub use reader::{decode, Decoded, InputReader, ReaderConfig};
