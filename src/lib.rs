//! # jumpboard
//!
//! A single-player board-walk game on procedurally generated boards.
//!
//! ## Rules
//!
//! A board is a line of cells, each holding one instruction: `nop`,
//! `add n`, `sub n`, `mul n`, `jmp t`, or `hlt`. The token starts on cell 0
//! with score 0. Each turn it executes the cell it stands on:
//!
//! - scoring cells change the score, then the player rolls a die and moves
//! - `nop` cells just roll and move
//! - `jmp t` moves straight to `t mod len`, with no roll
//! - `hlt` ends the game
//!
//! Moves wrap around the end of the board.
//!
//! ## Determinism
//!
//! Every game is a pure function of `(length, seed)`. One owned ChaCha8
//! stream generates the board and then rolls the dice. Nothing reads a
//! global RNG, so games can run side by side without disturbing each other.
//!
//! ```
//! use jumpboard::{Playthrough, EngineConfig};
//!
//! let outcome = Playthrough::builder()
//!     .engine(EngineConfig::default().with_max_turns(10_000))
//!     .build(16, 42)?
//!     .run(&mut ());
//! # let _ = outcome;
//! # Ok::<(), jumpboard::Error>(())
//! ```
//!
//! ## Modules
//!
//! - `core`: Errors, RNG, configuration
//! - `board`: Instructions, boards, the generator
//! - `engine`: The turn state machine, dice, events
//! - `sim`: Single playthroughs, recordings, batches
//! - `render`: ASCII grid and turn lines

pub mod core;
pub mod board;
pub mod engine;
pub mod sim;
pub mod render;

// Re-export commonly used types
pub use crate::core::{
    Error, Result,
    GameRng, GameRngState, parse_seed,
    EngineConfig, GeneratorConfig, KindWeights,
};

pub use crate::board::{generate, generate_with, Board, Instruction, InstructionKind};

pub use crate::engine::{
    run_board, Dice, Engine, GameState, Outcome, ScriptedDice, Status, TurnEvent, TurnObserver,
};

pub use crate::sim::{run_batch, BatchConfig, BatchSummary, Playthrough, PlaythroughBuilder, Recording};

pub use crate::render::{render_board, Grid};
