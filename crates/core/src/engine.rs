//! The contract both games satisfy, and the closed set of engines.
//!
//! Callers program against [`GameEngine`]. The controller holds an
//! [`Engine`] (one variant per game) behind a [`SharedEngine`], whose lock
//! is held for the full duration of every input and tick so the input thread
//! and the tick thread never interleave inside one mutation.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::snake::SnakeEngine;
use crate::snapshot::GameSnapshot;
use crate::store::SharedStore;
use crate::tetris::TetrisEngine;
use crate::types::{Action, GameKind, Phase};

/// Common polymorphic surface of a game simulation.
pub trait GameEngine {
    /// Apply one discrete action; `held` marks an auto-repeat of the same key.
    ///
    /// Returns true if the action advanced the simulation by a step.
    fn handle_input(&mut self, action: Action, held: bool) -> bool;

    /// Advance one time step if a round is running and not paused.
    ///
    /// Returns true if a step ran.
    fn tick(&mut self) -> bool;

    /// Value copy of the observable state
    fn snapshot(&self) -> GameSnapshot;

    fn current_phase(&self) -> Phase;
}

/// One engine of either kind
pub enum Engine {
    Tetris(TetrisEngine),
    Snake(SnakeEngine),
}

impl Engine {
    /// Construct the engine for `kind`, in `Phase::Init`
    pub fn new(kind: GameKind, store: SharedStore) -> Self {
        match kind {
            GameKind::Tetris => Engine::Tetris(TetrisEngine::new(store)),
            GameKind::Snake => Engine::Snake(SnakeEngine::new(store)),
        }
    }

    /// Same as `new` with a fixed RNG seed
    pub fn with_seed(kind: GameKind, store: SharedStore, seed: u64) -> Self {
        match kind {
            GameKind::Tetris => Engine::Tetris(TetrisEngine::with_seed(store, seed)),
            GameKind::Snake => Engine::Snake(SnakeEngine::with_seed(store, seed)),
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Engine::Tetris(_) => GameKind::Tetris,
            Engine::Snake(_) => GameKind::Snake,
        }
    }

    /// Current speed step, without building a snapshot
    pub fn speed(&self) -> u32 {
        match self {
            Engine::Tetris(e) => e.speed(),
            Engine::Snake(e) => e.speed(),
        }
    }
}

impl GameEngine for Engine {
    fn handle_input(&mut self, action: Action, held: bool) -> bool {
        match self {
            Engine::Tetris(e) => e.handle_input(action, held),
            Engine::Snake(e) => e.handle_input(action, held),
        }
    }

    fn tick(&mut self) -> bool {
        match self {
            Engine::Tetris(e) => e.tick(),
            Engine::Snake(e) => e.tick(),
        }
    }

    fn snapshot(&self) -> GameSnapshot {
        match self {
            Engine::Tetris(e) => e.snapshot(),
            Engine::Snake(e) => e.snapshot(),
        }
    }

    fn current_phase(&self) -> Phase {
        match self {
            Engine::Tetris(e) => e.current_phase(),
            Engine::Snake(e) => e.current_phase(),
        }
    }
}

/// Lock-owning handle to an engine, cloneable across threads
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
    kind: GameKind,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        let kind = engine.kind();
        Self {
            inner: Arc::new(Mutex::new(engine)),
            kind,
        }
    }

    pub fn kind(&self) -> GameKind {
        self.kind
    }

    /// Exclusive access for a compound operation.
    ///
    /// A panic on another thread while holding the lock does not wedge the
    /// engine; the state it left behind is used as is.
    pub fn lock(&self) -> MutexGuard<'_, Engine> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn handle_input(&self, action: Action, held: bool) -> bool {
        self.lock().handle_input(action, held)
    }

    pub fn tick(&self) -> bool {
        self.lock().tick()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.lock().snapshot()
    }

    pub fn current_phase(&self) -> Phase {
        self.lock().current_phase()
    }

    pub fn speed(&self) -> u32 {
        self.lock().speed()
    }
}
