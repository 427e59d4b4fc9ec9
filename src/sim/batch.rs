//! Batch simulation over many seeds.
//!
//! Each game gets its own stream, seeded `seed_offset + index`, so any game
//! in a batch can be re-run alone from its seed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::playthrough::PlaythroughBuilder;
use crate::core::config::{EngineConfig, GeneratorConfig};
use crate::core::error::{Error, Result};
use crate::engine::Outcome;

/// Configuration for a batch run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Cells per board.
    pub board_len: usize,

    /// Number of games to play.
    pub games: u64,

    /// Seed offset (combined with game index for unique seeds).
    pub seed_offset: u64,

    pub generator: GeneratorConfig,

    pub engine: EngineConfig,

    /// Keep a `GameRecord` per game in the summary.
    pub keep_records: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            board_len: 32,
            games: 100,
            seed_offset: 0,
            generator: GeneratorConfig::default(),
            engine: EngineConfig::default().with_max_turns(10_000),
            keep_records: true,
        }
    }
}

impl BatchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_board_len(mut self, len: usize) -> Self {
        self.board_len = len;
        self
    }

    pub fn with_games(mut self, games: u64) -> Self {
        self.games = games;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorConfig) -> Self {
        self.generator = generator;
        self
    }

    pub fn with_records(mut self, keep: bool) -> Self {
        self.keep_records = keep;
        self
    }

    /// Seed for the game at `index`.
    #[must_use]
    pub fn seed_for(&self, index: u64) -> u64 {
        self.seed_offset.wrapping_add(index)
    }
}

/// Result of one game in a batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub seed: u64,
    /// `None` when the turn limit fired first.
    pub outcome: Option<Outcome>,
}

/// Aggregate statistics for a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub games: u64,
    pub halted: u64,
    pub non_terminating: u64,
    pub min_score: Option<i64>,
    pub max_score: Option<i64>,
    pub mean_score: Option<f64>,
    pub mean_turns: Option<f64>,
    pub records: Vec<GameRecord>,
}

/// Running totals, updated once per game.
#[derive(Default)]
struct Tally {
    games: u64,
    halted: u64,
    min_score: Option<i64>,
    max_score: Option<i64>,
    score_sum: i128,
    turn_sum: u128,
}

impl Tally {
    fn add(&mut self, outcome: Option<&Outcome>) {
        self.games += 1;
        let Some(outcome) = outcome else {
            return;
        };
        self.halted += 1;
        self.min_score = Some(self.min_score.map_or(outcome.score, |m| m.min(outcome.score)));
        self.max_score = Some(self.max_score.map_or(outcome.score, |m| m.max(outcome.score)));
        self.score_sum += i128::from(outcome.score);
        self.turn_sum += u128::from(outcome.turns);
    }

    fn finish(self, records: Vec<GameRecord>) -> BatchSummary {
        let mean = |sum: f64| (self.halted > 0).then(|| sum / self.halted as f64);
        BatchSummary {
            games: self.games,
            halted: self.halted,
            non_terminating: self.games - self.halted,
            min_score: self.min_score,
            max_score: self.max_score,
            mean_score: mean(self.score_sum as f64),
            mean_turns: mean(self.turn_sum as f64),
            records,
        }
    }
}

/// Play every game in the batch.
///
/// A game that hits the turn limit is counted, not fatal. Any other error
/// (bad length, bad config) aborts the batch before or during the first game.
/// Statistics are accumulated per game, so memory stays flat unless
/// `keep_records` is set.
pub fn run_batch(config: &BatchConfig) -> Result<BatchSummary> {
    let builder = PlaythroughBuilder::new()
        .generator(config.generator.clone())
        .engine(config.engine.clone());

    let mut tally = Tally::default();
    let mut records = Vec::new();

    for index in 0..config.games {
        let seed = config.seed_for(index);
        let play = builder.clone().build(config.board_len, seed)?;

        let outcome = match play.run(&mut ()) {
            Ok(outcome) => Some(outcome),
            Err(Error::NonTerminating { turns }) => {
                debug!(seed, turns, "game did not halt");
                None
            }
            Err(e) => return Err(e),
        };

        tally.add(outcome.as_ref());
        if config.keep_records {
            records.push(GameRecord { seed, outcome });
        }
    }

    let summary = tally.finish(records);
    info!(
        games = summary.games,
        halted = summary.halted,
        non_terminating = summary.non_terminating,
        "batch complete"
    );
    Ok(summary)
}
