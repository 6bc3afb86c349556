//! Phase routing shared by both games.
//!
//! Every game walks the same coarse state machine; only what happens to a
//! movement action inside `Phase::Game` differs. [`route`] decides the
//! transition for an `(phase, action, held)` triple and [`PhaseMachine`]
//! applies it, delegating the in-game body to the engine.
//!
//! | From | Action | To |
//! |---|---|---|
//! | Init | Up | Instruction |
//! | Init | Start | Game (fresh round) |
//! | Instruction | Terminate | Init |
//! | Instruction | Start | Game (fresh round) |
//! | Game | Pause | Pause |
//! | Game | Terminate | Init |
//! | Pause | Pause / Start / Terminate | Game |
//! | GameOver, Win | Start | Game (fresh round) |
//! | GameOver, Win | Terminate | Init |
//!
//! While a round runs, Pause and Terminate are dropped if their key is
//! auto-repeating; the other rows accept held keys. Pairs not in the table
//! leave the phase unchanged.

use crate::types::{Action, Phase};

/// Outcome of routing one action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changes
    Ignore,
    /// Move to another phase without touching the round
    Goto(Phase),
    /// Reset the round and enter `Phase::Game`
    NewRound,
    /// `Game -> Pause`, raising the pause flag
    Suspend,
    /// `Pause -> Game`, clearing the pause flag
    Resume,
    /// `Game -> Init`, raising the pause flag
    Abandon,
    /// Hand the action to the game-specific body
    Play,
}

/// Decide what `action` does in `phase`.
pub fn route(phase: Phase, action: Action, held: bool) -> Transition {
    match (phase, action) {
        (Phase::Init, Action::Up) => Transition::Goto(Phase::Instruction),
        (Phase::Init, Action::Start) => Transition::NewRound,

        (Phase::Instruction, Action::Terminate) => Transition::Goto(Phase::Init),
        (Phase::Instruction, Action::Start) => Transition::NewRound,

        (Phase::Game, action) if held && action.ignored_when_held() => Transition::Ignore,
        (Phase::Game, Action::Pause) => Transition::Suspend,
        (Phase::Game, Action::Terminate) => Transition::Abandon,
        (Phase::Game, _) => Transition::Play,

        (Phase::Pause, Action::Pause | Action::Start | Action::Terminate) => Transition::Resume,

        (Phase::GameOver | Phase::Win, Action::Start) => Transition::NewRound,
        (Phase::GameOver | Phase::Win, Action::Terminate) => Transition::Goto(Phase::Init),

        _ => Transition::Ignore,
    }
}

/// State-machine plumbing an engine provides so `dispatch` can drive it.
pub trait PhaseMachine {
    fn phase(&self) -> Phase;
    fn set_phase(&mut self, phase: Phase);
    fn set_paused(&mut self, paused: bool);

    /// Reset the field and counters for a fresh round
    fn start_round(&mut self);

    /// In-game body for an action; returns true if the simulation stepped
    fn play(&mut self, action: Action) -> bool;

    /// Apply one action; returns true if the simulation stepped.
    fn dispatch(&mut self, action: Action, held: bool) -> bool {
        let from = self.phase();
        let transition = route(from, action, held);

        let stepped = match transition {
            Transition::Ignore => false,
            Transition::Goto(to) => {
                self.set_phase(to);
                false
            }
            Transition::NewRound => {
                self.start_round();
                self.set_phase(Phase::Game);
                false
            }
            Transition::Suspend => {
                self.set_phase(Phase::Pause);
                self.set_paused(true);
                false
            }
            Transition::Resume => {
                self.set_phase(Phase::Game);
                self.set_paused(false);
                false
            }
            Transition::Abandon => {
                self.set_phase(Phase::Init);
                self.set_paused(true);
                false
            }
            Transition::Play => self.play(action),
        };

        let to = self.phase();
        if to != from {
            log::debug!(
                "phase {} -> {} on {}{}",
                from.as_str(),
                to.as_str(),
                action.as_str(),
                if held { " (held)" } else { "" }
            );
        }

        stepped
    }
}
