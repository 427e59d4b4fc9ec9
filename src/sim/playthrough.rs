//! One playthrough: generate a board, then walk it.
//!
//! A single seeded stream drives both phases. Generation draws first, and the
//! dice continue from wherever generation left the stream, so a `(len, seed)`
//! pair fixes the whole game, rolls included.

use serde::{Deserialize, Serialize};

use crate::board::{generate_with, Board};
use crate::core::config::{EngineConfig, GeneratorConfig};
use crate::core::error::Result;
use crate::core::rng::GameRng;
use crate::engine::{Engine, Outcome, ScriptedDice, TurnEvent, TurnObserver};

/// A generated board plus the stream that will roll its dice.
#[derive(Clone, Debug)]
pub struct Playthrough {
    board: Board,
    rng: GameRng,
    engine: EngineConfig,
}

impl Playthrough {
    /// Generate with default settings and no turn limit.
    pub fn new(len: usize, seed: u64) -> Result<Self> {
        PlaythroughBuilder::new().build(len, seed)
    }

    /// Start configuring a playthrough.
    pub fn builder() -> PlaythroughBuilder {
        PlaythroughBuilder::new()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Play to completion, reporting each turn to `observer`.
    pub fn run(mut self, observer: &mut impl TurnObserver) -> Result<Outcome> {
        let mut engine = Engine::new(&self.board, &mut self.rng, self.engine.clone())?;
        engine.run(observer)
    }

    /// Play to completion and keep every turn.
    pub fn record(self) -> Result<Recording> {
        let board = self.board.clone();
        let engine = self.engine.clone();
        let mut events: Vec<TurnEvent> = Vec::new();
        let outcome = self.run(&mut events)?;
        Ok(Recording {
            board,
            engine,
            events,
            outcome,
        })
    }
}

/// Builder for creating a Playthrough.
#[derive(Clone, Debug, Default)]
pub struct PlaythroughBuilder {
    generator: GeneratorConfig,
    engine: EngineConfig,
}

impl PlaythroughBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generator(mut self, config: GeneratorConfig) -> Self {
        self.generator = config;
        self
    }

    pub fn engine(mut self, config: EngineConfig) -> Self {
        self.engine = config;
        self
    }

    pub fn max_turns(mut self, max: Option<u64>) -> Self {
        self.engine.max_turns = max;
        self
    }

    /// Generate the board and hand the stream on to the dice.
    pub fn build(self, len: usize, seed: u64) -> Result<Playthrough> {
        self.engine.validate()?;
        let mut rng = GameRng::new(seed);
        let board = generate_with(len, &self.generator, &mut rng)?;
        Ok(Playthrough {
            board,
            rng,
            engine: self.engine,
        })
    }
}

/// A finished playthrough, turn by turn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    pub board: Board,
    pub engine: EngineConfig,
    pub events: Vec<TurnEvent>,
    pub outcome: Outcome,
}

impl Recording {
    /// Die values in the order they were rolled.
    #[must_use]
    pub fn rolls(&self) -> Vec<u32> {
        self.events
            .iter()
            .filter(|e| e.rolled)
            .map(|e| e.last_roll)
            .collect()
    }

    /// Re-run the board from the recorded rolls alone.
    pub fn replay(&self, observer: &mut impl TurnObserver) -> Result<Outcome> {
        let dice = ScriptedDice::new(self.rolls());
        Engine::new(&self.board, dice, self.engine.clone())?.run(observer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::generate;
    use crate::core::config::KindWeights;
    use crate::core::error::Error;

    fn bounded() -> PlaythroughBuilder {
        Playthrough::builder().max_turns(Some(10_000))
    }

    #[test]
    fn test_board_matches_generate() {
        let play = Playthrough::new(12, 42).unwrap();
        assert_eq!(play.board(), &generate(12, 42).unwrap());
        assert_eq!(play.seed(), 42);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = bounded().build(20, 9).unwrap().record();
        let b = bounded().build(20, 9).unwrap().record();
        assert_eq!(a, b);
    }

    #[test]
    fn test_replay_reproduces() {
        // Without jump cells every board eventually reaches its last cell
        let no_jumps = GeneratorConfig::new()
            .with_weights(KindWeights { jmp: 0, ..KindWeights::default() });
        let recording = bounded()
            .generator(no_jumps)
            .build(30, 1234)
            .unwrap()
            .record()
            .unwrap();
        let mut events: Vec<TurnEvent> = Vec::new();

        let outcome = recording.replay(&mut events).unwrap();

        assert_eq!(outcome, recording.outcome);
        assert_eq!(events, recording.events);
        assert_eq!(recording.rolls().len() as u64, outcome.rolls);
    }

    #[test]
    fn test_invalid_length_before_play() {
        assert_eq!(
            Playthrough::new(1, 5).unwrap_err(),
            Error::InvalidLength { length: 1 }
        );
    }

    #[test]
    fn test_builder_rejects_bad_engine() {
        let err = Playthrough::builder()
            .engine(EngineConfig::default().with_dice_sides(0))
            .build(10, 1)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }
}
