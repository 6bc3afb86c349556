//! Scoring module - points and level curves for both games
//!
//! Puzzle scoring is a fixed table per lock (no level multiplier, no combos).
//! Levels advance whenever the score reaches `level * step`, repeatedly, so a
//! single large award can cross several thresholds at once.

use crate::types::{LINE_SCORES, MAX_LEVEL, SNAKE_LEVEL_STEP, TETRIS_LEVEL_STEP};

/// Points for clearing `lines` rows with one lock.
///
/// More than four rows can only happen on a hand-built field; those score
/// like four.
pub fn line_clear_score(lines: usize) -> u32 {
    LINE_SCORES[lines.min(LINE_SCORES.len() - 1)]
}

/// Level and speed advance together
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub level: u32,
    pub speed: u32,
}

impl Progress {
    pub const fn start() -> Self {
        Self { level: 1, speed: 1 }
    }

    /// Puzzle curve: uncapped, the caller turns `level > MAX_LEVEL` into a win
    pub fn advance_tetris(&mut self, score: u32) -> u32 {
        let mut steps = 0;
        while score >= self.level * TETRIS_LEVEL_STEP {
            self.level += 1;
            self.speed += 1;
            steps += 1;
        }
        steps
    }

    /// Growth curve: capped at `MAX_LEVEL`
    pub fn advance_snake(&mut self, score: u32) -> u32 {
        let mut steps = 0;
        while self.level < MAX_LEVEL && score >= self.level * SNAKE_LEVEL_STEP {
            self.level += 1;
            self.speed += 1;
            steps += 1;
        }
        steps
    }

    pub fn past_max_level(&self) -> bool {
        self.level > MAX_LEVEL
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::start()
    }
}

/// Counters every round carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
    pub progress: Progress,
    pub paused: bool,
}

impl Scoreboard {
    /// State of an engine that has not started a round yet
    pub const fn idle() -> Self {
        Self {
            score: 0,
            high_score: 0,
            progress: Progress::start(),
            paused: true,
        }
    }

    /// Fresh round against a previously recorded best
    pub fn reset(&mut self, high_score: u32) {
        *self = Self {
            score: 0,
            high_score,
            progress: Progress::start(),
            paused: false,
        };
    }

    /// Raise the high score to the current score if beaten.
    ///
    /// Returns true when the caller should persist the new best.
    pub fn sync_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            return true;
        }
        false
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn speed(&self) -> u32 {
        self.progress.speed
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::idle()
    }
}
