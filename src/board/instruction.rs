//! Cell instructions.
//!
//! Each board cell holds exactly one instruction. The text forms
//! (`nop`, `add 7`, `sub 7`, `mul 7`, `jmp 3`, `hlt`) are parsed once at the
//! boundary; the engine only ever sees the tagged variant.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::Error;

/// A single cell instruction.
///
/// ## Score Instructions
///
/// - `Add`, `Sub`, `Mul`: adjust the score, then the player still rolls
///
/// ## Movement Instructions
///
/// - `Jump`: move to `target mod len`, replacing the roll for this turn
/// - `Halt`: end the playthrough
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Instruction {
    NoOp,
    Add(u32),
    Sub(u32),
    Mul(u32),
    Jump(i64),
    Halt,
}

impl Instruction {
    /// The payload-free kind of this instruction.
    #[must_use]
    pub const fn kind(self) -> InstructionKind {
        match self {
            Instruction::NoOp => InstructionKind::NoOp,
            Instruction::Add(_) => InstructionKind::Add,
            Instruction::Sub(_) => InstructionKind::Sub,
            Instruction::Mul(_) => InstructionKind::Mul,
            Instruction::Jump(_) => InstructionKind::Jump,
            Instruction::Halt => InstructionKind::Halt,
        }
    }

    /// Apply this instruction's score effect.
    ///
    /// Non-scoring instructions return `score` unchanged. Arithmetic saturates
    /// at the `i64` bounds.
    #[must_use]
    pub fn apply_score(self, score: i64) -> i64 {
        match self {
            Instruction::Add(n) => score.saturating_add(i64::from(n)),
            Instruction::Sub(n) => score.saturating_sub(i64::from(n)),
            Instruction::Mul(n) => score.saturating_mul(i64::from(n)),
            Instruction::NoOp | Instruction::Jump(_) | Instruction::Halt => score,
        }
    }

    /// Resolve a jump target against a board of `len` cells.
    ///
    /// Returns `None` for non-jump instructions or an empty board.
    #[must_use]
    pub fn jump_target(self, len: usize) -> Option<usize> {
        match self {
            Instruction::Jump(target) if len > 0 => {
                // len fits in i64 for any board that fits in memory
                Some(target.rem_euclid(len as i64) as usize)
            }
            _ => None,
        }
    }

    /// Does landing here roll the die afterwards?
    #[must_use]
    pub const fn rolls_after(self) -> bool {
        !matches!(self, Instruction::Jump(_) | Instruction::Halt)
    }

    #[must_use]
    pub const fn is_halt(self) -> bool {
        matches!(self, Instruction::Halt)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.kind().mnemonic();
        match self {
            Instruction::NoOp | Instruction::Halt => f.write_str(mnemonic),
            Instruction::Add(n) | Instruction::Sub(n) | Instruction::Mul(n) => {
                write!(f, "{} {}", mnemonic, n)
            }
            Instruction::Jump(t) => write!(f, "{} {}", mnemonic, t),
        }
    }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let mnemonic = parts
            .next()
            .ok_or_else(|| Error::malformed(s, "empty instruction"))?;
        let kind = InstructionKind::from_mnemonic(mnemonic)
            .ok_or_else(|| Error::malformed(s, format!("unknown mnemonic {:?}", mnemonic)))?;

        let operand = parts.next();
        if parts.next().is_some() {
            return Err(Error::malformed(s, "too many operands"));
        }

        let amount = |op: Option<&str>| -> Result<u32, Error> {
            let op = op.ok_or_else(|| Error::malformed(s, "missing operand"))?;
            op.parse::<u32>()
                .map_err(|e| Error::malformed(s, format!("bad amount {:?}: {}", op, e)))
        };

        match kind {
            InstructionKind::NoOp | InstructionKind::Halt => {
                if operand.is_some() {
                    return Err(Error::malformed(s, "unexpected operand"));
                }
                Ok(if kind == InstructionKind::NoOp {
                    Instruction::NoOp
                } else {
                    Instruction::Halt
                })
            }
            InstructionKind::Add => Ok(Instruction::Add(amount(operand)?)),
            InstructionKind::Sub => Ok(Instruction::Sub(amount(operand)?)),
            InstructionKind::Mul => Ok(Instruction::Mul(amount(operand)?)),
            InstructionKind::Jump => {
                let op = operand.ok_or_else(|| Error::malformed(s, "missing operand"))?;
                let target = op
                    .parse::<i64>()
                    .map_err(|e| Error::malformed(s, format!("bad target {:?}: {}", op, e)))?;
                Ok(Instruction::Jump(target))
            }
        }
    }
}

impl TryFrom<String> for Instruction {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Instruction> for String {
    fn from(value: Instruction) -> Self {
        value.to_string()
    }
}

/// Instruction kind without its operand.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InstructionKind {
    NoOp,
    Add,
    Sub,
    Mul,
    Jump,
    Halt,
}

impl InstructionKind {
    /// All kinds, in weight-table order.
    pub const ALL: [InstructionKind; 6] = [
        InstructionKind::NoOp,
        InstructionKind::Add,
        InstructionKind::Sub,
        InstructionKind::Mul,
        InstructionKind::Jump,
        InstructionKind::Halt,
    ];

    /// Three-letter text mnemonic.
    #[must_use]
    pub const fn mnemonic(self) -> &'static str {
        match self {
            InstructionKind::NoOp => "nop",
            InstructionKind::Add => "add",
            InstructionKind::Sub => "sub",
            InstructionKind::Mul => "mul",
            InstructionKind::Jump => "jmp",
            InstructionKind::Halt => "hlt",
        }
    }

    /// Look up a kind by mnemonic.
    #[must_use]
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.mnemonic() == s)
    }

    /// Position in `ALL`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}
