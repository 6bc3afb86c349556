//! Held-key detection.
//!
//! Terminals report a held key as a stream of repeated presses. A press is
//! flagged held when the same key was seen less than `threshold` ago. The
//! policy only looks at `(key, timestamp)` pairs, so it can be driven from a
//! recorded stream as easily as from a live terminal.

use std::time::{Duration, Instant};

use crate::types::{InputEvent, Key, HOLD_THRESHOLD_MS};

/// Remembers the last key observed and when
#[derive(Debug, Clone)]
pub struct HoldDetector {
    threshold: Duration,
    last: Option<(Key, Instant)>,
}

impl HoldDetector {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold,
            last: None,
        }
    }

    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    /// Record `key` seen at `now`; returns whether it counts as held.
    pub fn observe(&mut self, key: Key, now: Instant) -> bool {
        let held = match self.last {
            Some((last_key, at)) => {
                last_key == key && now.saturating_duration_since(at) < self.threshold
            }
            None => false,
        };
        self.last = Some((key, now));
        held
    }

    /// `observe` wrapped into an event
    pub fn event(&mut self, key: Key, now: Instant) -> InputEvent {
        let held = self.observe(key, now);
        InputEvent::new(key, held)
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

impl Default for HoldDetector {
    fn default() -> Self {
        Self::new(Duration::from_millis(HOLD_THRESHOLD_MS))
    }
}
