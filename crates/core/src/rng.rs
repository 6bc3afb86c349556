//! RNG module - seedable randomness for spawning
//!
//! Both engines draw shapes, offsets, directions and food cells from a
//! [`GameRng`]. It wraps a PCG32 stream so a game started from a seed is
//! reproducible (tests, benches), while `from_entropy` gives a fresh game
//! every session.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic-when-seeded RNG owned by one engine
#[derive(Debug, Clone)]
pub struct GameRng {
    inner: Pcg32,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: Pcg32::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed from the thread-local OS-backed generator
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform value in `[0, max)`; returns 0 when `max` is 0
    pub fn below(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        self.inner.random_range(0..max)
    }

    /// Uniform value in `[lo, hi]`
    pub fn inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.random_range(lo..=hi)
    }

    /// Uniformly chosen element; None for an empty slice
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.below(items.len())])
    }
}
