//! Retro arcade (workspace facade crate).
//!
//! Re-exports the member crates under `crates/` as
//! `retro_arcade::{core,engine,input,store,term,types}` so binaries, tests and
//! benches have one import root.

pub use retro_arcade_core as core;
pub use retro_arcade_engine as engine;
pub use retro_arcade_input as input;
pub use retro_arcade_store as store;
pub use retro_arcade_term as term;
pub use retro_arcade_types as types;
