//! Growth game engine.
//!
//! The whole snake lives in the field as cell values: one head cell whose
//! value encodes its facing, and body cells numbered outward from the head
//! starting at `FIRST_BODY`. Moving walks that chain by looking for the next
//! number among the four neighbors of each segment, so no separate segment
//! list is kept.

use crate::grid::{Field, Preview};
use crate::phase::PhaseMachine;
use crate::rng::GameRng;
use crate::scoring::Scoreboard;
use crate::snapshot::GameSnapshot;
use crate::store::SharedStore;
use crate::types::{Action, Cell, GameKind, Phase, EMPTY, FIELD_HEIGHT, FIELD_WIDTH};
use crate::GameEngine;

pub const FOOD: Cell = 1;
pub const HEAD_LEFT: Cell = 2;
pub const HEAD_RIGHT: Cell = 3;
pub const HEAD_UP: Cell = 4;
pub const HEAD_DOWN: Cell = 5;

/// Value of the segment right behind the head; each further segment is +1
pub const FIRST_BODY: Cell = 7;

/// Head plus body at spawn
pub const START_LENGTH: usize = 4;

const NEIGHBORS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub fn is_head(cell: Cell) -> bool {
    (HEAD_LEFT..=HEAD_DOWN).contains(&cell)
}

pub fn is_body(cell: Cell) -> bool {
    cell > HEAD_DOWN
}

/// Facing of the head
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn head_cell(&self) -> Cell {
        match self {
            Direction::Left => HEAD_LEFT,
            Direction::Right => HEAD_RIGHT,
            Direction::Up => HEAD_UP,
            Direction::Down => HEAD_DOWN,
        }
    }

    pub fn from_cell(cell: Cell) -> Option<Self> {
        match cell {
            HEAD_LEFT => Some(Direction::Left),
            HEAD_RIGHT => Some(Direction::Right),
            HEAD_UP => Some(Direction::Up),
            HEAD_DOWN => Some(Direction::Down),
            _ => None,
        }
    }

    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            _ => None,
        }
    }

    /// (dx, dy) of one step
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Result of one snake step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Ate,
    Crashed,
}

/// Growth game state
pub struct SnakeEngine {
    field: Field,
    board: Scoreboard,
    phase: Phase,
    rng: GameRng,
    store: SharedStore,
}

impl SnakeEngine {
    /// Create an engine in `Phase::Init` with an entropy-seeded RNG
    pub fn new(store: SharedStore) -> Self {
        Self::with_rng(store, GameRng::from_entropy())
    }

    /// Create an engine whose spawns are fixed by `seed`
    pub fn with_seed(store: SharedStore, seed: u64) -> Self {
        Self::with_rng(store, GameRng::new(seed))
    }

    fn with_rng(store: SharedStore, rng: GameRng) -> Self {
        log::debug!("snake: rng seed {}", rng.seed());
        Self {
            field: Field::new(),
            board: Scoreboard::idle(),
            phase: Phase::Init,
            rng,
            store,
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn score(&self) -> u32 {
        self.board.score
    }

    pub fn speed(&self) -> u32 {
        self.board.speed()
    }

    /// Head position and facing, if a snake is on the field
    pub fn head(&self) -> Option<(i32, i32, Direction)> {
        let (x, y) = self.field.find(is_head)?;
        let dir = self.field.get(x, y).and_then(Direction::from_cell)?;
        Some((x, y, dir))
    }

    /// Cells occupied by head and body
    pub fn length(&self) -> usize {
        self.field.count(|c| is_head(c) || is_body(c))
    }

    /// Neighbor of (x, y) holding `value`
    fn neighbor_with(&self, x: i32, y: i32, value: Cell) -> Option<(i32, i32)> {
        NEIGHBORS
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .find(|&(nx, ny)| self.field.get(nx, ny) == Some(value))
    }

    /// Move one cell in the current facing
    fn advance(&mut self) -> Step {
        let Some((x, y, dir)) = self.head() else {
            return Step::Crashed;
        };
        let head = dir.head_cell();
        let (dx, dy) = dir.delta();
        let (nx, ny) = (x + dx, y + dy);

        match self.field.get(nx, ny) {
            None => Step::Crashed,
            Some(cell) if is_body(cell) => Step::Crashed,
            Some(FOOD) => {
                self.eat(x, y, nx, ny, head);
                Step::Ate
            }
            Some(_) => {
                self.field.set(nx, ny, head);
                self.slide(x, y);
                Step::Moved
            }
        }
    }

    /// Shift every segment one place toward the head, starting at the old
    /// head cell (x, y); the tail cell is vacated.
    fn slide(&mut self, x: i32, y: i32) {
        let (mut cx, mut cy) = (x, y);
        let mut expected = FIRST_BODY;

        while let Some((sx, sy)) = self.neighbor_with(cx, cy, expected) {
            self.field.set(cx, cy, expected);
            cx = sx;
            cy = sy;
            expected += 1;
        }
        self.field.set(cx, cy, EMPTY);
    }

    fn eat(&mut self, x: i32, y: i32, nx: i32, ny: i32, head: Cell) {
        self.field.set(nx, ny, head);
        self.field
            .map_in_place(|c| if is_body(c) { c + 1 } else { c });
        self.field.set(x, y, FIRST_BODY);

        self.board.score += 1;
        if self.board.progress.advance_snake(self.board.score) > 0 {
            log::debug!("snake: level {}", self.board.level());
        }
        if self.board.sync_high_score() {
            log::info!("snake: new high score {}", self.board.high_score);
            self.store.save(GameKind::Snake.db_id(), self.board.high_score);
        }

        self.spawn_food();
    }

    /// One step plus its end-of-round checks
    fn step(&mut self) {
        match self.advance() {
            Step::Crashed => {
                log::debug!("snake: crashed with score {}", self.board.score);
                self.phase = Phase::GameOver;
                self.board.paused = true;
            }
            Step::Moved | Step::Ate => {
                if self.field.is_full() {
                    log::info!("snake: won with score {}", self.board.score);
                    self.phase = Phase::Win;
                    self.board.paused = true;
                }
            }
        }
    }

    /// Point the head at `dir`; a reversal is refused
    fn turn(&mut self, dir: Direction) -> bool {
        let Some((x, y, facing)) = self.head() else {
            return false;
        };
        if dir == facing.opposite() {
            return false;
        }
        self.field.set(x, y, dir.head_cell());
        true
    }

    /// Place the snake with its body trailing behind the head and at least
    /// one free cell ahead of it
    fn spawn_snake(&mut self) {
        let dir = self.rng.pick(&Direction::ALL).unwrap_or(Direction::Right);
        let (dx, dy) = dir.delta();
        let tail = START_LENGTH as i32 - 1;

        let span = |delta: i32, size: usize| -> (i32, i32) {
            let size = size as i32;
            match delta {
                -1 => (1, size - 1 - tail),
                1 => (tail, size - 2),
                _ => (0, size - 1),
            }
        };
        let (x_lo, x_hi) = span(dx, FIELD_WIDTH);
        let (y_lo, y_hi) = span(dy, FIELD_HEIGHT);
        let hx = self.rng.inclusive(x_lo, x_hi);
        let hy = self.rng.inclusive(y_lo, y_hi);

        self.field.set(hx, hy, dir.head_cell());
        for k in 1..=tail {
            self.field
                .set(hx - k * dx, hy - k * dy, FIRST_BODY + k - 1);
        }
    }

    /// Drop food on a random empty cell; nothing happens on a full field
    fn spawn_food(&mut self) {
        if self.field.count(|c| c == EMPTY) == 0 {
            return;
        }
        loop {
            let x = self.rng.below(FIELD_WIDTH) as i32;
            let y = self.rng.below(FIELD_HEIGHT) as i32;
            if self.field.is_vacant(x, y) {
                self.field.set(x, y, FOOD);
                return;
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }
}

impl PhaseMachine for SnakeEngine {
    fn phase(&self) -> Phase {
        self.phase
    }

    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    fn set_paused(&mut self, paused: bool) {
        self.board.paused = paused;
    }

    fn start_round(&mut self) {
        self.field.clear();
        let high_score = self.store.load(GameKind::Snake.db_id());
        self.board.reset(high_score);
        self.spawn_snake();
        self.spawn_food();
        log::debug!("snake: new round, high score {}", high_score);
    }

    fn play(&mut self, action: Action) -> bool {
        if self.board.paused {
            return false;
        }
        match Direction::from_action(action) {
            Some(dir) => {
                if !self.turn(dir) {
                    return false;
                }
            }
            None if action == Action::Action => {}
            None => return false,
        }
        self.step();
        true
    }
}

impl GameEngine for SnakeEngine {
    fn handle_input(&mut self, action: Action, held: bool) -> bool {
        self.dispatch(action, held)
    }

    fn tick(&mut self) -> bool {
        if self.phase != Phase::Game || self.board.paused {
            return false;
        }
        self.step();
        true
    }

    fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            field: self.field,
            preview: Preview::new(),
            score: self.board.score,
            high_score: self.board.high_score,
            level: self.board.level(),
            speed: self.board.speed(),
            paused: self.board.paused,
        }
    }

    fn current_phase(&self) -> Phase {
        self.phase
    }
}
