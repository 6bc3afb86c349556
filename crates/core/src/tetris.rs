//! Falling-block puzzle engine.
//!
//! The field holds settled cells only; the falling shape is kept beside it
//! and composed into the snapshot. Settled cells carry the single `FILLED`
//! marker, so a cleared field row never remembers which shape filled it.
//!
//! One downward step:
//! 1. move the shape down one row; done if that fits
//! 2. otherwise lock it; if its top row never got below row 0 the round is lost
//! 3. clear full rows bottom to top and score them (100/300/700/1500)
//! 4. raise the high score, apply leveling, win past level 10
//! 5. promote the next shape and generate a new one

use crate::grid::{Field, Preview};
use crate::phase::PhaseMachine;
use crate::rng::GameRng;
use crate::scoring::{line_clear_score, Scoreboard};
use crate::shape::{Shape, ShapeKind, Spin, FILLED};
use crate::snapshot::GameSnapshot;
use crate::store::SharedStore;
use crate::types::{Action, GameKind, Phase, FIELD_HEIGHT, FIELD_WIDTH};
use crate::GameEngine;

/// Puzzle game state
pub struct TetrisEngine {
    field: Field,
    current: Option<Shape>,
    next: Option<Shape>,
    board: Scoreboard,
    phase: Phase,
    rng: GameRng,
    store: SharedStore,
}

impl TetrisEngine {
    /// Create an engine in `Phase::Init` with an entropy-seeded RNG
    pub fn new(store: SharedStore) -> Self {
        Self::with_rng(store, GameRng::from_entropy())
    }

    /// Create an engine whose shape sequence is fixed by `seed`
    pub fn with_seed(store: SharedStore, seed: u64) -> Self {
        Self::with_rng(store, GameRng::new(seed))
    }

    fn with_rng(store: SharedStore, rng: GameRng) -> Self {
        log::debug!("tetris: rng seed {}", rng.seed());
        Self {
            field: Field::new(),
            current: None,
            next: None,
            board: Scoreboard::idle(),
            phase: Phase::Init,
            rng,
            store,
        }
    }

    /// Settled cells, without the falling shape
    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn current(&self) -> Option<&Shape> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Shape> {
        self.next.as_ref()
    }

    pub fn score(&self) -> u32 {
        self.board.score
    }

    pub fn level(&self) -> u32 {
        self.board.level()
    }

    pub fn speed(&self) -> u32 {
        self.board.speed()
    }

    /// Whether `shape` overlaps a wall, the floor or a settled cell.
    ///
    /// Rows above the field are checked as row 0, so a shape may hang over
    /// the top edge only where row 0 is free.
    fn collides(&self, shape: &Shape) -> bool {
        shape.cells().any(|(x, y)| {
            let y = y.max(0);
            x < 0
                || x >= FIELD_WIDTH as i32
                || y >= FIELD_HEIGHT as i32
                || self.field.is_occupied(x, y)
        })
    }

    /// Try to move the falling shape
    pub(crate) fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        let moved = current.shifted(dx, dy);
        if self.collides(&moved) {
            return false;
        }
        self.current = Some(moved);
        true
    }

    /// Rotate the falling shape clockwise, nudging it off the right wall.
    ///
    /// A rotation that still collides is dropped whole: bitmap and position
    /// stay as they were.
    pub(crate) fn try_rotate(&mut self) -> bool {
        let Some(current) = self.current else {
            return false;
        };

        let mut rotated = current.rotated(Spin::Clockwise);
        let overflow = rotated.x + rotated.width() as i32 - FIELD_WIDTH as i32;
        if overflow > 0 {
            rotated.x -= overflow;
        }

        if self.collides(&rotated) {
            return false;
        }
        self.current = Some(rotated);
        true
    }

    fn random_shape(&mut self) -> Shape {
        let kind = self.rng.pick(&ShapeKind::ALL).unwrap_or(ShapeKind::Stick);
        let mut shape = Shape::new(kind);
        for _ in 0..self.rng.below(4) {
            shape.rotate(Spin::Clockwise);
        }
        shape
    }

    /// Promote the next shape to the top of the field at a random column
    fn spawn(&mut self) {
        let mut shape = match self.next.take() {
            Some(next) => next,
            None => self.random_shape(),
        };
        self.next = Some(self.random_shape());

        let max_x = (FIELD_WIDTH - shape.width()) as i32;
        shape.x = self.rng.inclusive(0, max_x);
        shape.y = 0;
        self.current = Some(shape);
    }

    /// Write the shape's in-field cells into the settled field
    fn settle(&mut self, shape: &Shape) {
        for (x, y) in shape.cells() {
            self.field.set(x, y, FILLED);
        }
    }

    /// One downward step of the falling shape
    fn step(&mut self) {
        if self.try_move(0, 1) {
            return;
        }
        let Some(shape) = self.current.take() else {
            return;
        };

        self.settle(&shape);

        if shape.y < shape.height() as i32 {
            log::debug!("tetris: stack reached the top with score {}", self.board.score);
            self.phase = Phase::GameOver;
            self.board.paused = true;
            return;
        }

        let cleared = self.field.clear_full_rows().len();
        self.board.score += line_clear_score(cleared);

        if self.board.sync_high_score() {
            log::info!("tetris: new high score {}", self.board.high_score);
            self.store.save(GameKind::Tetris.db_id(), self.board.high_score);
        }

        if self.board.progress.advance_tetris(self.board.score) > 0 {
            log::debug!("tetris: level {}", self.board.level());
        }
        if self.board.progress.past_max_level() {
            log::info!("tetris: won with score {}", self.board.score);
            self.phase = Phase::Win;
            self.board.paused = true;
        }

        self.spawn();
    }

    #[cfg(test)]
    pub(crate) fn field_mut(&mut self) -> &mut Field {
        &mut self.field
    }

    #[cfg(test)]
    pub(crate) fn set_current(&mut self, shape: Shape) {
        self.current = Some(shape);
    }
}

impl PhaseMachine for TetrisEngine {
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
        self.current = None;
        let high_score = self.store.load(GameKind::Tetris.db_id());
        self.board.reset(high_score);
        self.spawn();
        log::debug!("tetris: new round, high score {}", high_score);
    }

    fn play(&mut self, action: Action) -> bool {
        if self.board.paused {
            return false;
        }
        match action {
            Action::Left => {
                self.try_move(-1, 0);
                false
            }
            Action::Right => {
                self.try_move(1, 0);
                false
            }
            Action::Up | Action::Action => {
                self.try_rotate();
                false
            }
            Action::Down => self.tick(),
            Action::Start | Action::Pause | Action::Terminate => false,
        }
    }
}

impl GameEngine for TetrisEngine {
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
        let mut field = self.field;
        if let Some(shape) = &self.current {
            for (x, y) in shape.cells() {
                field.set(x, y, FILLED);
            }
        }

        GameSnapshot {
            field,
            preview: self.next.map(|s| *s.bitmap()).unwrap_or_else(Preview::new),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{HighScoreStore, MemoryStore};
    use crate::types::EMPTY;
    use std::sync::Arc;

    fn started(seed: u64) -> TetrisEngine {
        let mut engine = TetrisEngine::with_seed(MemoryStore::shared(), seed);
        engine.handle_input(Action::Start, false);
        engine
    }

    fn fill_row_except(engine: &mut TetrisEngine, y: i32, gap: Option<i32>) {
        for x in 0..FIELD_WIDTH as i32 {
            if Some(x) != gap {
                engine.field_mut().set(x, y, FILLED);
            }
        }
    }

    fn vertical_stick(x: i32, y: i32) -> Shape {
        let mut stick = Shape::new(ShapeKind::Stick);
        stick.x = x;
        stick.y = y;
        stick
    }

    #[test]
    fn test_fresh_engine() {
        let engine = TetrisEngine::with_seed(MemoryStore::shared(), 1);
        let snap = engine.snapshot();
        assert_eq!(engine.current_phase(), Phase::Init);
        assert_eq!((snap.level, snap.speed, snap.score, snap.high_score), (1, 1, 0, 0));
        assert!(snap.paused);
        assert_eq!(snap.preview, Preview::new());
    }

    #[test]
    fn test_start_spawns_in_bounds_with_preview() {
        for seed in 0..50 {
            let engine = started(seed);
            let shape = engine.current().unwrap();
            assert_eq!(shape.y, 0);
            assert!(shape.x >= 0);
            assert!(shape.x as usize + shape.width() <= FIELD_WIDTH);
            assert!(engine.next().is_some());
            assert_eq!(engine.snapshot().preview.count(|c| c != EMPTY), 4);
            assert!(!engine.snapshot().paused);
        }
    }

    #[test]
    fn test_walls_block_horizontal_moves() {
        let mut engine = started(3);
        for _ in 0..FIELD_WIDTH {
            engine.handle_input(Action::Left, false);
        }
        assert_eq!(engine.current().unwrap().x, 0);
        assert!(!engine.try_move(-1, 0));

        for _ in 0..FIELD_WIDTH {
            engine.handle_input(Action::Right, false);
        }
        let shape = engine.current().unwrap();
        assert_eq!(shape.x as usize + shape.width(), FIELD_WIDTH);
    }

    #[test]
    fn test_rotation_shifts_off_right_wall() {
        let mut engine = started(5);
        let mut bar = Shape::new(ShapeKind::Stick);
        bar.x = 9;
        bar.y = 10;
        engine.set_current(bar);

        assert!(engine.try_rotate());
        let rotated = engine.current().unwrap();
        assert_eq!((rotated.width(), rotated.height()), (4, 1));
        assert_eq!(rotated.x, 6);
    }

    #[test]
    fn test_blocked_rotation_is_reverted() {
        let mut engine = started(5);
        let bar = vertical_stick(0, 10);
        engine.set_current(bar);
        // Horizontal bar would need row 10, columns 0..4.
        engine.field_mut().set(2, 10, FILLED);

        assert!(!engine.try_rotate());
        assert_eq!(engine.current(), Some(&bar));
    }

    #[test]
    fn test_down_runs_an_extra_tick() {
        let mut engine = started(8);
        let y = engine.current().unwrap().y;
        assert!(engine.handle_input(Action::Down, false));
        assert_eq!(engine.current().unwrap().y, y + 1);
    }

    #[test]
    fn test_lock_without_clear_scores_nothing_and_respawns() {
        let mut engine = started(11);
        engine.set_current(vertical_stick(0, 19));
        engine.tick();

        assert_eq!(engine.score(), 0);
        for y in 16..20 {
            assert_eq!(engine.field().get(0, y), Some(FILLED));
        }
        assert_eq!(engine.current().unwrap().y, 0);
        assert_eq!(engine.current_phase(), Phase::Game);
    }

    #[test]
    fn test_single_line_clear_end_to_end() {
        let mut engine = started(21);
        fill_row_except(&mut engine, 19, Some(4));
        engine.field_mut().set(0, 18, FILLED);
        engine.set_current(vertical_stick(4, 0));

        let mut ticks = 0;
        while engine.score() == 0 && ticks < 40 {
            engine.tick();
            ticks += 1;
        }

        assert_eq!(engine.score(), 100);
        // Stick filled rows 16..=19 in column 4; row 19 went away.
        assert_eq!(engine.field().row(19).unwrap()[0], FILLED);
        assert_eq!(engine.field().row(19).unwrap()[4], FILLED);
        assert_eq!(engine.field().row(19).unwrap()[1], EMPTY);
        for y in 17..19 {
            assert_eq!(engine.field().get(4, y), Some(FILLED));
        }
        assert_eq!(engine.field().get(4, 16), Some(EMPTY));
        assert_eq!(engine.field().count(|c| c != EMPTY), 4);
    }

    #[test]
    fn test_multi_line_scores() {
        for (lines, expected) in [(1usize, 100u32), (2, 300), (3, 700), (4, 1500)] {
            let mut engine = started(2);
            for y in (20 - lines as i32)..20 {
                fill_row_except(&mut engine, y, Some(9));
            }
            engine.set_current(vertical_stick(9, 19));
            engine.tick();
            assert_eq!(engine.score(), expected, "{} lines", lines);
        }
    }

    #[test]
    fn test_tetris_levels_up_twice_on_a_big_clear() {
        let mut engine = started(2);
        engine.board.score = 500;
        for y in 16..20 {
            fill_row_except(&mut engine, y, Some(9));
        }
        engine.set_current(vertical_stick(9, 19));
        engine.tick();

        // 2000 crosses 600, 1200 and 1800.
        assert_eq!(engine.score(), 2000);
        let snap = engine.snapshot();
        assert_eq!((snap.level, snap.speed), (4, 4));
        assert_eq!(snap.high_score, 2000);
    }

    #[test]
    fn test_win_past_level_ten() {
        let mut engine = started(2);
        engine.board.score = 5900;
        engine.board.progress.level = 10;
        engine.board.progress.speed = 10;
        fill_row_except(&mut engine, 19, Some(9));
        engine.set_current(vertical_stick(9, 19));
        engine.tick();

        assert_eq!(engine.current_phase(), Phase::Win);
        assert!(engine.snapshot().paused);
        assert!(!engine.tick());
    }

    #[test]
    fn test_game_over_when_stack_reaches_top() {
        let mut engine = started(4);
        for _ in 0..2000 {
            if engine.current_phase() == Phase::GameOver {
                break;
            }
            engine.tick();
        }
        assert_eq!(engine.current_phase(), Phase::GameOver);
        assert!(engine.snapshot().paused);

        engine.handle_input(Action::Start, false);
        assert_eq!(engine.current_phase(), Phase::Game);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.field().count(|c| c != EMPTY), 0);
    }

    #[test]
    fn test_high_score_persists_and_reloads() {
        let store = Arc::new(MemoryStore::new());
        let mut engine = TetrisEngine::with_seed(store.clone(), 6);
        engine.handle_input(Action::Start, false);
        for y in 16..20 {
            fill_row_except(&mut engine, y, Some(0));
        }
        engine.set_current(vertical_stick(0, 19));
        engine.tick();
        assert_eq!(store.load(GameKind::Tetris.db_id()), 1500);

        engine.handle_input(Action::Terminate, false);
        engine.handle_input(Action::Start, false);
        let snap = engine.snapshot();
        assert_eq!((snap.score, snap.high_score, snap.level), (0, 1500, 1));
    }

    #[test]
    fn test_snapshot_does_not_alias_state() {
        let mut engine = started(7);
        for _ in 0..4 {
            engine.tick();
        }
        let before = engine.snapshot();
        engine.tick();
        let after = engine.snapshot();
        assert_ne!(before.field, after.field);
        assert_eq!(before.field.count(|c| c != EMPTY), 4);
    }
}
