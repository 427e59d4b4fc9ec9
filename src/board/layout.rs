//! The board: an immutable, fixed-length run of instructions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;

use super::instruction::{Instruction, InstructionKind};
use crate::core::error::{Error, Result};

/// Smallest legal board: one start cell and one halt cell.
pub const MIN_BOARD_LEN: usize = 2;

/// An ordered, fixed-length sequence of instructions indexed `0..len`.
///
/// Generated boards always start with `NoOp` and end with `Halt`.
/// Hand-built boards only need two or more cells; see
/// [`Board::has_standard_layout`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Instruction>", into = "Vec<Instruction>")]
pub struct Board {
    cells: Vec<Instruction>,
}

impl Board {
    /// Build a board from instructions.
    pub fn from_cells(cells: Vec<Instruction>) -> Result<Self> {
        if cells.len() < MIN_BOARD_LEN {
            return Err(Error::InvalidLength { length: cells.len() });
        }
        Ok(Self { cells })
    }

    /// Parse a board from text cells such as `["nop", "add 3", "hlt"]`.
    ///
    /// ```
    /// use jumpboard::{Board, Instruction};
    ///
    /// let board = Board::parse(["nop", "jmp 0", "hlt"]).unwrap();
    /// assert_eq!(board.len(), 3);
    /// assert_eq!(board[1], Instruction::Jump(0));
    /// ```
    pub fn parse<I, S>(cells: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cells = cells
            .into_iter()
            .map(|c| c.as_ref().parse())
            .collect::<Result<Vec<Instruction>>>()?;
        Self::from_cells(cells)
    }

    /// Number of cells. Always at least [`MIN_BOARD_LEN`].
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Boards are never empty; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Instruction at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Instruction> {
        self.cells.get(index).copied()
    }

    /// Instruction at `index mod len`. Never panics.
    #[must_use]
    pub fn at_wrapped(&self, index: usize) -> Instruction {
        self.cells[index % self.cells.len()]
    }

    /// All cells in order.
    #[must_use]
    pub fn cells(&self) -> &[Instruction] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &Instruction> {
        self.cells.iter()
    }

    /// Does the board start with `NoOp` and end with `Halt`?
    #[must_use]
    pub fn has_standard_layout(&self) -> bool {
        self.cells.first() == Some(&Instruction::NoOp)
            && self.cells.last() == Some(&Instruction::Halt)
    }

    /// Count cells per kind, indexed by `InstructionKind::index`.
    #[must_use]
    pub fn kind_counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for cell in &self.cells {
            counts[cell.kind().index()] += 1;
        }
        counts
    }

    /// Number of cells of one kind.
    #[must_use]
    pub fn count(&self, kind: InstructionKind) -> usize {
        self.kind_counts()[kind.index()]
    }

    /// Text form of every cell.
    #[must_use]
    pub fn to_text(&self) -> Vec<String> {
        self.cells.iter().map(ToString::to_string).collect()
    }
}

impl Index<usize> for Board {
    type Output = Instruction;

    fn index(&self, index: usize) -> &Self::Output {
        &self.cells[index]
    }
}

impl<'a> IntoIterator for &'a Board {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

impl TryFrom<Vec<Instruction>> for Board {
    type Error = Error;

    fn try_from(value: Vec<Instruction>) -> Result<Self> {
        Self::from_cells(value)
    }
}

impl From<Board> for Vec<Instruction> {
    fn from(value: Board) -> Self {
        value.cells
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", cell)?;
        }
        f.write_str("]")
    }
}
