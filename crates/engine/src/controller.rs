//! The loop that owns the active game.
//!
//! While a view is attached the controller either asks it for a game (no
//! engine active) or drives the active engine: it waits on the input
//! channel until the next tick is due, forwards whatever arrives, and ticks
//! when the wait runs out. Every tick and every forwarded input is followed
//! by a render.
//!
//! Sessions end when the selector returns no game, the input channel
//! closes, or the view fails to draw.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::config::ControllerConfig;
use crate::core::{Engine, GameEngine, SharedEngine, SharedStore};
use crate::keymap::action_for;
use crate::timing::tick_delay;
use crate::types::{Action, GameKind, InputEvent, Phase};
use crate::view::View;

pub struct LoopController<V: View> {
    view: Option<V>,
    events: Receiver<InputEvent>,
    store: SharedStore,
    base_delay: Duration,
    seed: Option<u64>,
    active: Option<SharedEngine>,
    last_tick: Instant,
}

impl<V: View> LoopController<V> {
    pub fn new(
        view: V,
        events: Receiver<InputEvent>,
        store: SharedStore,
        config: &ControllerConfig,
    ) -> Self {
        Self {
            view: Some(view),
            events,
            store,
            base_delay: config.base_delay,
            seed: None,
            active: None,
            last_tick: Instant::now(),
        }
    }

    /// Build every engine from `seed` instead of OS entropy
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn is_attached(&self) -> bool {
        self.view.is_some()
    }

    pub fn active(&self) -> Option<&SharedEngine> {
        self.active.as_ref()
    }

    pub fn view(&self) -> Option<&V> {
        self.view.as_ref()
    }

    /// Run until the view detaches
    pub fn run(&mut self) {
        while self.view.is_some() {
            self.step();
        }
        self.active = None;
    }

    /// One pass of the loop: select a game, or wait for input or the next tick.
    pub fn step(&mut self) {
        match self.active.clone() {
            None => self.select(),
            Some(engine) => self.drive(&engine),
        }
    }

    fn select(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        match view.select_game_kind(&self.events) {
            Ok(Some(kind)) => self.open(kind),
            Ok(None) => {
                log::debug!("no game selected, detaching view");
                self.view = None;
            }
            Err(e) => {
                log::error!("game selection failed: {}", e);
                self.view = None;
            }
        }
    }

    /// Replace any active engine with a fresh one of `kind`
    pub fn open(&mut self, kind: GameKind) {
        let engine = match self.seed {
            Some(seed) => Engine::with_seed(kind, self.store.clone(), seed),
            None => Engine::new(kind, self.store.clone()),
        };
        let engine = SharedEngine::new(engine);
        log::debug!("opened {}", kind.title());

        self.last_tick = Instant::now();
        self.active = Some(engine.clone());
        self.render(&engine);
    }

    /// Drop the active engine; the next step asks for a game again
    pub fn close(&mut self) {
        if let Some(engine) = self.active.take() {
            log::debug!("closed {}", engine.kind().title());
        }
    }

    /// Time left until the active engine is due a tick
    pub fn time_to_tick(&self) -> Option<Duration> {
        let engine = self.active.as_ref()?;
        let delay = tick_delay(engine.speed(), self.base_delay);
        Some(delay.saturating_sub(self.last_tick.elapsed()))
    }

    fn drive(&mut self, engine: &SharedEngine) {
        let wait = self.time_to_tick().unwrap_or(Duration::ZERO);
        if wait.is_zero() {
            self.tick();
            return;
        }

        match self.events.recv_timeout(wait) {
            Ok(event) => self.handle_event(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                log::debug!("input closed, detaching view during {}", engine.kind().title());
                self.active = None;
                self.view = None;
            }
        }
    }

    /// Tick the active engine now and render
    pub fn tick(&mut self) {
        let Some(engine) = self.active.clone() else {
            return;
        };
        engine.tick();
        self.last_tick = Instant::now();
        self.render(&engine);
    }

    /// Route one key press to the active engine.
    ///
    /// A fresh Esc while the engine sits in `Phase::Init` closes it instead;
    /// a held one is dropped.
    pub fn handle_event(&mut self, event: InputEvent) {
        let Some(engine) = self.active.clone() else {
            return;
        };
        let action = action_for(event.key);

        if action == Action::Terminate && engine.current_phase() == Phase::Init {
            if !event.held {
                self.close();
            }
            return;
        }

        if engine.handle_input(action, event.held) {
            self.last_tick = Instant::now();
        }
        self.render(&engine);
    }

    fn render(&mut self, engine: &SharedEngine) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        let (snapshot, phase) = {
            let guard = engine.lock();
            (guard.snapshot(), guard.current_phase())
        };

        if let Err(e) = view.render(&snapshot, phase, engine.kind()) {
            log::error!("render failed, detaching view: {}", e);
            self.active = None;
            self.view = None;
        }
    }
}
