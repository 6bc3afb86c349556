//! Tick delay curve.
//!
//! `delay(speed) = base * 0.1^((speed - 1) / 9)`: every speed step divides
//! the delay by the same factor, going from `base` at speed 1 to `base / 10`
//! at speed 10. Results are truncated to whole milliseconds.

use std::time::Duration;

/// Delay between ticks at `speed` (speeds below 1 count as 1)
pub fn tick_delay(speed: u32, base: Duration) -> Duration {
    let exponent = speed.saturating_sub(1) as f64 / 9.0;
    let ms = base.as_millis() as f64 * 0.1f64.powf(exponent);
    Duration::from_millis(ms as u64)
}
