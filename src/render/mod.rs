//! Text rendering for boards and turns.
//!
//! Rendering is a pure observer: it reads boards and turn events and never
//! touches engine state.

pub mod grid;

pub use grid::{render_board, Grid, CELL_HEIGHT, CELL_WIDTH};

use crate::engine::Outcome;

/// Closing line printed after a playthrough halts.
#[must_use]
pub fn final_line(outcome: &Outcome) -> String {
    format!(
        "Final Pos: {} Final Score: {}, Instruction hlt",
        outcome.position, outcome.score
    )
}
