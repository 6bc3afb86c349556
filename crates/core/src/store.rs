//! High-score persistence seam.
//!
//! Engines only ever need two primitives: read the best score for their game
//! when a round starts, and write it back as soon as it is beaten. Storage is
//! best-effort; implementations report nothing back to the engine.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Per-game best score storage
pub trait HighScoreStore: Send + Sync {
    /// Best score for `game_id`, 0 if none is recorded or storage is unreadable
    fn load(&self, game_id: i32) -> u32;

    /// Record `score` as the best for `game_id`
    fn save(&self, game_id: i32, score: u32);
}

/// Shared handle engines hold on to
pub type SharedStore = Arc<dyn HighScoreStore>;

/// In-process store; scores live as long as the value
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: Mutex<HashMap<i32, u32>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> SharedStore {
        Arc::new(Self::new())
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self, game_id: i32) -> u32 {
        let scores = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        scores.get(&game_id).copied().unwrap_or(0)
    }

    fn save(&self, game_id: i32, score: u32) {
        let mut scores = self.scores.lock().unwrap_or_else(PoisonError::into_inner);
        scores.insert(game_id, score);
    }
}
