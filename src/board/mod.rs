//! Boards, their instructions, and the procedural generator.
//!
//! A board is built once, from a length and a seed, and never changes
//! afterwards. The engine reads it; the renderer draws it.

pub mod instruction;
pub mod layout;
pub mod generator;

pub use instruction::{Instruction, InstructionKind};
pub use layout::{Board, MIN_BOARD_LEN};
pub use generator::{generate, generate_with};
