//! Configuration types.
//!
//! Callers configure a playthrough by providing:
//! - `GeneratorConfig`: Kind weights and the magnitude range for board cells
//! - `EngineConfig`: Die size and the optional turn limit
//!
//! Both default to the classic game: weights 5/2/2/2/3/1, magnitudes 1-100,
//! a six-sided die, and no turn limit.

use serde::{Deserialize, Serialize};

use super::error::{Error, Result};

/// Relative weights for each instruction kind in interior cells.
///
/// Weights are relative; they are normalized by their sum at draw time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindWeights {
    pub nop: u32,
    pub add: u32,
    pub sub: u32,
    pub mul: u32,
    pub jmp: u32,
    pub hlt: u32,
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            nop: 5,
            add: 2,
            sub: 2,
            mul: 2,
            jmp: 3,
            hlt: 1,
        }
    }
}

impl KindWeights {
    /// Weights in `InstructionKind::ALL` order.
    #[must_use]
    pub const fn as_array(&self) -> [u32; 6] {
        [self.nop, self.add, self.sub, self.mul, self.jmp, self.hlt]
    }

    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.as_array().iter().map(|&w| u64::from(w)).sum()
    }
}

/// Board generator configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Kind weights for interior cells.
    pub weights: KindWeights,

    /// Smallest magnitude drawn for add/sub/mul cells.
    pub min_amount: u32,

    /// Largest magnitude drawn for add/sub/mul cells (inclusive).
    pub max_amount: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            weights: KindWeights::default(),
            min_amount: 1,
            max_amount: 100,
        }
    }
}

impl GeneratorConfig {
    /// Create the default generator config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the kind weights.
    #[must_use]
    pub fn with_weights(mut self, weights: KindWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Set the inclusive magnitude range.
    #[must_use]
    pub fn with_amounts(mut self, min: u32, max: u32) -> Self {
        self.min_amount = min;
        self.max_amount = max;
        self
    }

    /// Check that the config can drive a generator.
    pub fn validate(&self) -> Result<()> {
        if self.weights.total() == 0 {
            return Err(Error::InvalidConfig {
                reason: "all instruction weights are zero".to_string(),
            });
        }
        if self.min_amount > self.max_amount {
            return Err(Error::InvalidConfig {
                reason: format!(
                    "amount range {}..={} is empty",
                    self.min_amount, self.max_amount
                ),
            });
        }
        Ok(())
    }
}

/// Execution engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Faces on the die rolled after non-jump cells.
    pub dice_sides: u32,

    /// Maximum turns before reporting `NonTerminating` (`None` = unlimited).
    /// A board whose jumps form a cycle away from every halt never finishes
    /// without this.
    pub max_turns: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dice_sides: 6,
            max_turns: None,
        }
    }
}

impl EngineConfig {
    /// Create the default engine config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of turns.
    #[must_use]
    pub fn with_max_turns(mut self, max: u64) -> Self {
        self.max_turns = Some(max);
        self
    }

    /// Remove any turn cap.
    #[must_use]
    pub fn unbounded(mut self) -> Self {
        self.max_turns = None;
        self
    }

    /// Set the number of die faces.
    #[must_use]
    pub fn with_dice_sides(mut self, sides: u32) -> Self {
        self.dice_sides = sides;
        self
    }

    /// Check that the config can drive an engine.
    pub fn validate(&self) -> Result<()> {
        if self.dice_sides == 0 {
            return Err(Error::InvalidConfig {
                reason: "a die needs at least one side".to_string(),
            });
        }
        Ok(())
    }
}
