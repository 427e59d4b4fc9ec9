//! Error types for board generation and execution.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the generator, the parser, and the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A board needs room for the leading no-op and the trailing halt.
    #[error("invalid board length {length}: a board needs at least 2 cells")]
    InvalidLength { length: usize },

    /// Seed text at the input boundary could not be converted.
    #[error("invalid seed {input:?}: expected an integer")]
    InvalidSeed { input: String },

    /// An instruction's text form could not be parsed.
    #[error("malformed instruction {input:?}: {reason}")]
    MalformedInstruction { input: String, reason: String },

    /// The turn limit was reached before a halt cell.
    #[error("board did not halt within {turns} turns")]
    NonTerminating { turns: u64 },

    /// Generator or engine configuration cannot be used.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// A scripted dice source ran out of rolls.
    #[error("scripted dice exhausted after {rolls} rolls")]
    DiceExhausted { rolls: u64 },
}

impl Error {
    pub(crate) fn malformed(input: &str, reason: impl Into<String>) -> Self {
        Error::MalformedInstruction {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
