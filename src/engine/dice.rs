//! Dice sources.
//!
//! The engine rolls through the `Dice` trait so that a playthrough can be
//! driven by its seeded stream or by a recorded roll sequence.

use std::collections::VecDeque;

use crate::core::error::{Error, Result};
use crate::core::rng::GameRng;

/// Something that rolls a die.
pub trait Dice {
    /// Roll a die with `sides` faces. Must return a value in `[1, sides]`.
    fn roll(&mut self, sides: u32) -> Result<u32>;
}

impl Dice for GameRng {
    fn roll(&mut self, sides: u32) -> Result<u32> {
        Ok(self.roll_die(sides))
    }
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn roll(&mut self, sides: u32) -> Result<u32> {
        (**self).roll(sides)
    }
}

/// Replays a fixed roll sequence.
///
/// Used to re-run a recorded playthrough roll for roll, and to pin down
/// engine behavior in tests.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<u32>,
    used: u64,
}

impl ScriptedDice {
    /// Create from a roll sequence, consumed front to back.
    pub fn new(rolls: impl IntoIterator<Item = u32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            used: 0,
        }
    }

    /// Rolls not yet consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl Dice for ScriptedDice {
    fn roll(&mut self, sides: u32) -> Result<u32> {
        let roll = *self
            .rolls
            .front()
            .ok_or(Error::DiceExhausted { rolls: self.used })?;
        // A rejected roll stays queued
        if roll == 0 || roll > sides {
            return Err(Error::InvalidConfig {
                reason: format!("scripted roll {} outside 1..={}", roll, sides),
            });
        }
        self.rolls.pop_front();
        self.used += 1;
        Ok(roll)
    }
}
