//! Background raw-key reader.
//!
//! One thread blocks on the terminal with a bounded timeout, turns key
//! presses into [`InputEvent`]s and sends them down a channel. A shared
//! running flag is checked on every pass, so `stop` takes effect within one
//! timeout. The sender is dropped when the thread ends; the receiving side
//! sees a closed channel.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEventKind};

use crate::hold::HoldDetector;
use crate::map::{is_interrupt, map_key_event};
use crate::types::{InputEvent, HOLD_THRESHOLD_MS, INPUT_TIMEOUT_MS};

/// Reader thread settings
#[derive(Debug, Clone, Copy)]
pub struct ReaderConfig {
    pub hold_threshold: Duration,
    /// Upper bound on one blocking read
    pub poll_timeout: Duration,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            hold_threshold: Duration::from_millis(HOLD_THRESHOLD_MS),
            poll_timeout: Duration::from_millis(INPUT_TIMEOUT_MS),
        }
    }
}

/// What one terminal event means to the reader
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoded {
    Key(InputEvent),
    /// Ctrl-C: stop reading
    Interrupt,
    Skip,
}

/// Classify a terminal event, updating hold state for game keys.
pub fn decode(event: &Event, hold: &mut HoldDetector, now: Instant) -> Decoded {
    let Event::Key(key) = event else {
        return Decoded::Skip;
    };
    if key.kind == KeyEventKind::Release {
        return Decoded::Skip;
    }
    if is_interrupt(*key) {
        return Decoded::Interrupt;
    }
    match map_key_event(*key) {
        Some(k) => Decoded::Key(hold.event(k, now)),
        None => Decoded::Skip,
    }
}

/// Handle to the reader thread
pub struct InputReader {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<io::Result<()>>>,
}

impl InputReader {
    /// Start reading the terminal into `tx`
    pub fn spawn(tx: Sender<InputEvent>, config: ReaderConfig) -> io::Result<Self> {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        let handle = thread::Builder::new()
            .name("input-reader".into())
            .spawn(move || {
                let result = read_loop(&tx, &flag, config);
                if let Err(e) = &result {
                    log::warn!("input reader stopped: {}", e);
                }
                flag.store(false, Ordering::Release);
                result
            })?;

        Ok(Self {
            running,
            handle: Some(handle),
        })
    }

    /// Ask the thread to finish after its current read
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Stop and wait for the thread
    pub fn join(mut self) -> io::Result<()> {
        self.stop();
        match self.handle.take() {
            Some(handle) => handle
                .join()
                .map_err(|_| io::Error::other("input reader panicked"))?,
            None => Ok(()),
        }
    }
}

impl Drop for InputReader {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_loop(tx: &Sender<InputEvent>, running: &AtomicBool, config: ReaderConfig) -> io::Result<()> {
    let mut hold = HoldDetector::new(config.hold_threshold);

    while running.load(Ordering::Acquire) {
        if !event::poll(config.poll_timeout)? {
            continue;
        }
        let ev = event::read()?;

        match decode(&ev, &mut hold, Instant::now()) {
            Decoded::Key(input) => {
                log::trace!("key {} held={}", input.key.as_str(), input.held);
                if tx.send(input).is_err() {
                    break;
                }
            }
            Decoded::Interrupt => {
                log::debug!("input reader interrupted");
                break;
            }
            Decoded::Skip => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Key;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers};

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::from(code))
    }

    #[test]
    fn test_decode_press() {
        let mut hold = HoldDetector::default();
        let now = Instant::now();
        assert_eq!(
            decode(&press(KeyCode::Enter), &mut hold, now),
            Decoded::Key(InputEvent::new(Key::Enter, false))
        );
        assert_eq!(
            decode(&press(KeyCode::Enter), &mut hold, now + Duration::from_millis(20)),
            Decoded::Key(InputEvent::new(Key::Enter, true))
        );
    }

    #[test]
    fn test_decode_skips_release_and_unknown() {
        let mut hold = HoldDetector::default();
        let now = Instant::now();
        let release = Event::Key(KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(decode(&release, &mut hold, now), Decoded::Skip);
        assert_eq!(decode(&press(KeyCode::Char('x')), &mut hold, now), Decoded::Skip);
        assert_eq!(decode(&Event::FocusGained, &mut hold, now), Decoded::Skip);
    }

    #[test]
    fn test_decode_interrupt() {
        let mut hold = HoldDetector::default();
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(decode(&ctrl_c, &mut hold, Instant::now()), Decoded::Interrupt);
    }
}
