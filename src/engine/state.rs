//! Mutable playthrough state.
//!
//! ## GameState
//!
//! Everything the engine changes while walking a board:
//! - Token position and score
//! - Last die value
//! - Turn and roll counters

use serde::{Deserialize, Serialize};

/// Engine status. A playthrough starts `Running` and ends `Halted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    Running,
    Halted,
}

/// Player token state for one playthrough.
///
/// Created at position 0 with score 0 and discarded at halt; a replay
/// starts from a fresh state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Current cell, always in `0..board.len()`.
    pub position: usize,

    /// Running score. Saturates at the `i64` bounds.
    pub score: i64,

    /// Value of the most recent die roll (0 before the first roll).
    pub last_roll: u32,

    /// Turns executed so far.
    pub turn: u64,

    /// Dice consumed so far. Jump turns do not roll.
    pub rolls: u64,
}

impl GameState {
    /// Fresh state at the start square.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by `roll` cells, wrapping around a board of `len` cells.
    pub fn advance(&mut self, roll: u32, len: usize) {
        self.position = (self.position + roll as usize) % len;
        self.last_roll = roll;
        self.rolls += 1;
    }

    /// Move straight to `position` without rolling.
    pub fn jump_to(&mut self, position: usize) {
        self.position = position;
    }
}
