//! The instruction-execution state machine.
//!
//! ## Turn Rules
//!
//! While `Running`, each turn reads the instruction under the token:
//!
//! - `Halt`: stop. No roll, no event.
//! - `Add`/`Sub`/`Mul`: adjust the score, then roll and move.
//! - `NoOp`: roll and move.
//! - `Jump(t)`: move to `t mod len`. The jump replaces the roll.
//!
//! Landing on a scoring cell scores *and* moves in the same turn; landing on a
//! jump cell never rolls. Positions are always reduced modulo the board
//! length, even for targets the generator would never produce.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use super::dice::Dice;
use super::event::{TurnEvent, TurnObserver};
use super::state::{GameState, Status};
use crate::board::{Board, Instruction};
use crate::core::config::EngineConfig;
use crate::core::error::{Error, Result};

/// Final result of a playthrough that reached a halt cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// Halt cell the token stopped on.
    pub position: usize,
    /// Final score.
    pub score: i64,
    /// Turns executed.
    pub turns: u64,
    /// Dice consumed.
    pub rolls: u64,
    /// Last die value (0 if the die was never rolled).
    pub last_roll: u32,
}

impl Outcome {
    fn from_state(state: &GameState) -> Self {
        Self {
            position: state.position,
            score: state.score,
            turns: state.turn,
            rolls: state.rolls,
            last_roll: state.last_roll,
        }
    }
}

/// Walks one board to completion.
///
/// The engine borrows the board and owns its dice, so each playthrough
/// has its own random stream.
pub struct Engine<'b, D: Dice> {
    board: &'b Board,
    dice: D,
    config: EngineConfig,
    state: GameState,
    status: Status,
}

impl<'b, D: Dice> Engine<'b, D> {
    /// Create an engine at the start square.
    pub fn new(board: &'b Board, dice: D, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            board,
            dice,
            config,
            state: GameState::new(),
            status: Status::Running,
        })
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        self.board
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Instruction under the token.
    #[must_use]
    pub fn current(&self) -> Instruction {
        self.board.at_wrapped(self.state.position)
    }

    /// Give back the dice, e.g. to keep drawing from the same stream.
    pub fn into_dice(self) -> D {
        self.dice
    }

    /// Execute one turn.
    ///
    /// Returns `Ok(Some(event))` after a turn, `Ok(None)` once the token sits
    /// on a halt cell, and `Err(NonTerminating)` if the turn limit is spent.
    pub fn step(&mut self) -> Result<Option<TurnEvent>> {
        if self.status == Status::Halted {
            return Ok(None);
        }

        let len = self.board.len();
        let instruction = self.current();

        if instruction.is_halt() {
            self.status = Status::Halted;
            info!(
                position = self.state.position,
                score = self.state.score,
                turns = self.state.turn,
                "halted"
            );
            return Ok(None);
        }

        if let Some(max) = self.config.max_turns {
            if self.state.turn >= max {
                warn!(turns = self.state.turn, position = self.state.position, "turn limit reached");
                return Err(Error::NonTerminating { turns: self.state.turn });
            }
        }

        self.state.score = instruction.apply_score(self.state.score);

        let rolled = match instruction.jump_target(len) {
            Some(target) => {
                trace!(from = self.state.position, to = target, "jump");
                self.state.jump_to(target);
                false
            }
            None => {
                let roll = self.dice.roll(self.config.dice_sides)?;
                self.state.advance(roll, len);
                true
            }
        };

        self.state.turn += 1;

        let event = TurnEvent {
            turn: self.state.turn,
            position: self.state.position,
            score: self.state.score,
            instruction: self.current(),
            last_roll: self.state.last_roll,
            rolled,
        };
        debug!(
            turn = event.turn,
            position = event.position,
            score = event.score,
            roll = event.last_roll,
            %instruction,
            "turn"
        );

        Ok(Some(event))
    }

    /// Run until halt, reporting every turn to `observer`.
    pub fn run(&mut self, observer: &mut impl TurnObserver) -> Result<Outcome> {
        while let Some(event) = self.step()? {
            observer.on_turn(&event);
        }
        Ok(Outcome::from_state(&self.state))
    }
}

/// Run a board to completion without observing turns.
pub fn run_board<D: Dice>(board: &Board, dice: D, config: EngineConfig) -> Result<Outcome> {
    Engine::new(board, dice, config)?.run(&mut ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;
    use crate::engine::dice::ScriptedDice;

    fn board(cells: &[&str]) -> Board {
        Board::parse(cells).unwrap()
    }

    #[test]
    fn test_noop_rolls_and_moves() {
        let board = board(&["nop", "nop", "nop", "nop", "hlt"]);
        let mut engine = Engine::new(&board, ScriptedDice::new([2]), EngineConfig::default()).unwrap();

        let event = engine.step().unwrap().unwrap();

        assert_eq!(event.position, 2);
        assert_eq!(event.last_roll, 2);
        assert!(event.rolled);
        assert_eq!(event.instruction, Instruction::NoOp);
        assert_eq!(engine.state().rolls, 1);
    }

    #[test]
    fn test_score_cell_scores_and_moves() {
        let board = board(&["nop", "add 5", "nop", "nop", "nop", "hlt"]);
        let mut engine = Engine::new(&board, ScriptedDice::new([1, 3]), EngineConfig::default()).unwrap();

        engine.step().unwrap();
        let event = engine.step().unwrap().unwrap();

        assert_eq!(event.score, 5);
        assert_eq!(event.position, 4);
        assert_eq!(event.last_roll, 3);
    }

    #[test]
    fn test_jump_skips_roll() {
        let board = board(&["nop", "jmp 4", "nop", "nop", "nop", "hlt"]);
        // Only one scripted roll: a jump turn that rolled would exhaust it.
        let mut engine = Engine::new(&board, ScriptedDice::new([1]), EngineConfig::default()).unwrap();

        engine.step().unwrap();
        let event = engine.step().unwrap().unwrap();

        assert_eq!(event.position, 4);
        assert_eq!(event.last_roll, 1);
        assert!(!event.rolled);
        assert_eq!(engine.state().rolls, 1);
    }

    #[test]
    fn test_jump_target_wraps() {
        let board = board(&["jmp 13", "nop", "nop", "hlt", "nop"]);
        let mut engine = Engine::new(&board, ScriptedDice::default(), EngineConfig::default()).unwrap();

        let event = engine.step().unwrap().unwrap();

        assert_eq!(event.position, 3);
        assert_eq!(engine.step().unwrap(), None);
        assert_eq!(engine.status(), Status::Halted);
    }

    #[test]
    fn test_roll_wraps_board() {
        let board = board(&["nop", "nop", "hlt"]);
        let mut engine = Engine::new(&board, ScriptedDice::new([4]), EngineConfig::default()).unwrap();

        let event = engine.step().unwrap().unwrap();

        assert_eq!(event.position, 1);
    }

    #[test]
    fn test_halt_is_sticky() {
        let board = board(&["hlt", "nop"]);
        let mut engine = Engine::new(&board, ScriptedDice::default(), EngineConfig::default()).unwrap();

        assert_eq!(engine.step().unwrap(), None);
        assert_eq!(engine.step().unwrap(), None);
        assert_eq!(engine.state().turn, 0);
    }

    #[test]
    fn test_run_records_events() {
        let board = board(&["nop", "add 10", "mul 3", "sub 4", "hlt"]);
        let dice = ScriptedDice::new([1, 1, 1, 1]);
        let mut engine = Engine::new(&board, dice, EngineConfig::default()).unwrap();
        let mut events: Vec<TurnEvent> = Vec::new();

        let outcome = engine.run(&mut events).unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(outcome.score, 26);
        assert_eq!(outcome.position, 4);
        assert_eq!(outcome.turns, 4);
        assert_eq!(outcome.rolls, 4);
        assert_eq!(events.last().unwrap().instruction, Instruction::Halt);
    }

    #[test]
    fn test_turn_limit() {
        let board = board(&["jmp 1", "jmp 0", "hlt"]);
        let config = EngineConfig::default().with_max_turns(50);
        let mut engine = Engine::new(&board, ScriptedDice::default(), config).unwrap();

        let err = engine.run(&mut ()).unwrap_err();

        assert_eq!(err, Error::NonTerminating { turns: 50 });
    }

    #[test]
    fn test_halt_at_limit_succeeds() {
        let board = board(&["jmp 1", "jmp 2", "hlt"]);
        let config = EngineConfig::default().with_max_turns(2);

        let outcome = run_board(&board, ScriptedDice::default(), config).unwrap();

        assert_eq!(outcome.turns, 2);
        assert_eq!(outcome.position, 2);
    }

    #[test]
    fn test_dice_exhausted_propagates() {
        let board = board(&["nop", "nop", "nop", "hlt"]);
        let err = run_board(&board, ScriptedDice::new([1]), EngineConfig::default()).unwrap_err();
        assert_eq!(err, Error::DiceExhausted { rolls: 1 });
    }

    #[test]
    fn test_rejects_zero_sided_die() {
        let board = board(&["nop", "hlt"]);
        let config = EngineConfig::default().with_dice_sides(0);
        assert!(Engine::new(&board, GameRng::new(1), config).is_err());
    }

    #[test]
    fn test_into_dice_keeps_stream() {
        let board = board(&["nop", "hlt"]);
        let mut engine = Engine::new(&board, GameRng::new(8), EngineConfig::default()).unwrap();
        let outcome = engine.run(&mut ()).unwrap();
        let rng = engine.into_dice();

        let mut expected = GameRng::new(8);
        for _ in 0..outcome.rolls {
            expected.roll_die(6);
        }
        assert!(outcome.rolls >= 1);
        assert_eq!(rng.state(), expected.state());
    }
}
