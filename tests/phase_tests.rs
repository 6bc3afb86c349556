//! Phase machine tests - the shared transition table, run against both games

use retro_arcade::core::{Engine, GameEngine, MemoryStore};
use retro_arcade::types::{Action, GameKind, Phase};

const ACTIONS: [Action; 8] = [
    Action::Start,
    Action::Pause,
    Action::Terminate,
    Action::Left,
    Action::Right,
    Action::Up,
    Action::Down,
    Action::Action,
];

fn engine(kind: GameKind) -> Engine {
    Engine::with_seed(kind, MemoryStore::shared(), 2024)
}

fn in_game(kind: GameKind) -> Engine {
    let mut engine = engine(kind);
    engine.handle_input(Action::Start, false);
    engine
}

/// Tick until the round ends on its own
fn finish(engine: &mut Engine) {
    for _ in 0..5000 {
        if engine.current_phase().is_finished() {
            return;
        }
        engine.tick();
    }
    panic!("round never finished");
}

#[test]
fn test_fresh_engine_state() {
    for kind in GameKind::ALL {
        let engine = engine(kind);
        let snap = engine.snapshot();
        assert_eq!(engine.current_phase(), Phase::Init);
        assert!(snap.paused);
        assert_eq!((snap.score, snap.high_score, snap.level, snap.speed), (0, 0, 1, 1));
    }
}

#[test]
fn test_init_and_instruction() {
    for kind in GameKind::ALL {
        let mut engine = engine(kind);
        engine.handle_input(Action::Up, false);
        assert_eq!(engine.current_phase(), Phase::Instruction);

        engine.handle_input(Action::Terminate, false);
        assert_eq!(engine.current_phase(), Phase::Init);

        engine.handle_input(Action::Up, false);
        engine.handle_input(Action::Start, false);
        assert_eq!(engine.current_phase(), Phase::Game);
        assert!(!engine.snapshot().paused);
    }
}

#[test]
fn test_unlisted_pairs_keep_phase() {
    for kind in GameKind::ALL {
        for action in ACTIONS {
            if matches!(action, Action::Up | Action::Start) {
                continue;
            }
            let mut engine = engine(kind);
            engine.handle_input(action, false);
            assert_eq!(engine.current_phase(), Phase::Init, "{:?} {:?}", kind, action);
        }

        for action in [Action::Left, Action::Right, Action::Up, Action::Down, Action::Pause] {
            let mut engine = engine(kind);
            engine.handle_input(Action::Up, false);
            engine.handle_input(action, false);
            assert_eq!(engine.current_phase(), Phase::Instruction);
        }
    }
}

#[test]
fn test_pause_and_resume() {
    for kind in GameKind::ALL {
        for resume in [Action::Pause, Action::Start, Action::Terminate] {
            let mut engine = in_game(kind);
            engine.handle_input(Action::Pause, false);
            assert_eq!(engine.current_phase(), Phase::Pause);
            assert!(engine.snapshot().paused);

            for action in [Action::Left, Action::Right, Action::Up, Action::Down, Action::Action] {
                engine.handle_input(action, false);
                assert_eq!(engine.current_phase(), Phase::Pause);
            }

            engine.handle_input(resume, false);
            assert_eq!(engine.current_phase(), Phase::Game);
            assert!(!engine.snapshot().paused);
        }
    }
}

#[test]
fn test_paused_engine_does_not_tick() {
    for kind in GameKind::ALL {
        let mut engine = in_game(kind);
        engine.handle_input(Action::Pause, false);
        let before = engine.snapshot();
        assert!(!engine.tick());
        assert_eq!(engine.snapshot(), before);
    }
}

#[test]
fn test_terminate_game_returns_to_init() {
    for kind in GameKind::ALL {
        let mut engine = in_game(kind);
        engine.handle_input(Action::Terminate, false);
        assert_eq!(engine.current_phase(), Phase::Init);
        assert!(engine.snapshot().paused);
        assert!(!engine.tick());
    }
}

#[test]
fn test_held_pause_and_terminate_are_dropped_in_game() {
    for kind in GameKind::ALL {
        let mut engine = in_game(kind);
        engine.handle_input(Action::Pause, true);
        assert_eq!(engine.current_phase(), Phase::Game);
        engine.handle_input(Action::Terminate, true);
        assert_eq!(engine.current_phase(), Phase::Game);
    }
}

#[test]
fn test_held_keys_resume_paused_round() {
    for kind in GameKind::ALL {
        for action in [Action::Pause, Action::Start, Action::Terminate] {
            let mut engine = in_game(kind);
            engine.handle_input(Action::Pause, false);
            engine.handle_input(action, true);
            assert_eq!(engine.current_phase(), Phase::Game, "{:?} {:?}", kind, action);
            assert!(!engine.snapshot().paused);
        }
    }
}

#[test]
fn test_held_terminate_leaves_help_screen() {
    for kind in GameKind::ALL {
        let mut engine = engine(kind);
        engine.handle_input(Action::Up, false);
        engine.handle_input(Action::Terminate, true);
        assert_eq!(engine.current_phase(), Phase::Init);
    }
}

#[test]
fn test_held_terminate_leaves_finished_round() {
    for kind in GameKind::ALL {
        let mut engine = in_game(kind);
        finish(&mut engine);
        engine.handle_input(Action::Terminate, true);
        assert_eq!(engine.current_phase(), Phase::Init);
    }
}

#[test]
fn test_finished_round_restart_and_leave() {
    for kind in GameKind::ALL {
        let mut engine = in_game(kind);
        finish(&mut engine);
        assert!(engine.snapshot().paused);
        let finished = engine.current_phase();

        for action in [Action::Left, Action::Up, Action::Pause, Action::Action] {
            engine.handle_input(action, false);
            assert_eq!(engine.current_phase(), finished);
        }

        engine.handle_input(Action::Start, false);
        assert_eq!(engine.current_phase(), Phase::Game);
        assert_eq!(engine.snapshot().score, 0);

        finish(&mut engine);
        engine.handle_input(Action::Terminate, false);
        assert_eq!(engine.current_phase(), Phase::Init);
    }
}
