//! Procedural board generation.
//!
//! ## Draw Order
//!
//! Every interior cell consumes exactly three draws from the stream, in this
//! order, whatever kind is finally chosen:
//!
//! 1. magnitude in `[min_amount, max_amount]` (default `[1, 100]`)
//! 2. jump target in `[0, len - 1]`
//! 3. kind, by weighted choice over `InstructionKind::ALL`
//!
//! The board is then `[NoOp] + interior + [Halt]`. Keeping this order fixed is
//! what makes a `(len, seed)` pair reproduce the same board.

use tracing::debug;

use super::instruction::{Instruction, InstructionKind};
use super::layout::{Board, MIN_BOARD_LEN};
use crate::core::config::GeneratorConfig;
use crate::core::error::{Error, Result};
use crate::core::rng::GameRng;

/// Generate a board with the default configuration from a fresh stream.
///
/// ```
/// use jumpboard::generate;
///
/// let a = generate(5, 42).unwrap();
/// let b = generate(5, 42).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 5);
/// ```
pub fn generate(len: usize, seed: u64) -> Result<Board> {
    let mut rng = GameRng::new(seed);
    generate_with(len, &GeneratorConfig::default(), &mut rng)
}

/// Generate a board by drawing from a caller-owned stream.
///
/// The stream is left positioned after the last interior draw, so the same
/// stream can go on to drive the dice.
pub fn generate_with(len: usize, config: &GeneratorConfig, rng: &mut GameRng) -> Result<Board> {
    if len < MIN_BOARD_LEN {
        return Err(Error::InvalidLength { length: len });
    }
    config.validate()?;

    let weights = config.weights.as_array();
    let mut cells = Vec::with_capacity(len);
    cells.push(Instruction::NoOp);

    for _ in 0..len - 2 {
        let amount = rng.gen_range_inclusive(config.min_amount, config.max_amount);
        let target = rng.gen_index_inclusive(len - 1);
        let kind = rng
            .choose_weighted(&weights)
            .map(|i| InstructionKind::ALL[i])
            .ok_or_else(|| Error::InvalidConfig {
                reason: "all instruction weights are zero".to_string(),
            })?;

        cells.push(make_instruction(kind, amount, target));
    }

    cells.push(Instruction::Halt);

    debug!(len, seed = rng.seed(), "board generated");
    Board::from_cells(cells)
}

fn make_instruction(kind: InstructionKind, amount: u32, target: usize) -> Instruction {
    match kind {
        InstructionKind::NoOp => Instruction::NoOp,
        InstructionKind::Add => Instruction::Add(amount),
        InstructionKind::Sub => Instruction::Sub(amount),
        InstructionKind::Mul => Instruction::Mul(amount),
        // target < len, and len fits in memory, so it fits in i64
        InstructionKind::Jump => Instruction::Jump(target as i64),
        InstructionKind::Halt => Instruction::Halt,
    }
}
