//! ASCII board grid.
//!
//! Cells are laid out in a near-square serpentine: even rows run left to
//! right, odd rows right to left, so consecutive cells always touch.
//!
//! ```text
//! *************************
//! *0      *1      *2      *
//! *nop    *add 7  *jmp 1  *
//! *************************
//! *       *4      *3      *
//! *       *hlt    *sub 2  *
//! *************************
//! ```

use std::fmt;

use crate::board::Board;

/// Character columns per cell, including the left border.
pub const CELL_WIDTH: usize = 8;

/// Character rows per cell, including the top border.
pub const CELL_HEIGHT: usize = 3;

const BORDER: char = '*';

/// A character grid sized for a board of `len` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    len: usize,
    side: usize,
    rows: Vec<Vec<char>>,
}

impl Grid {
    /// Blank grid with borders for `len` cells.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let side = ceil_sqrt(len);
        let mut height = side;
        if side * side.saturating_sub(1) >= len {
            height = height.saturating_sub(1);
        }

        let width = CELL_WIDTH * side + 1;
        let rows = (0..height * CELL_HEIGHT + 1)
            .map(|i| {
                (0..width)
                    .map(|j| {
                        if i % CELL_HEIGHT == 0 || j % CELL_WIDTH == 0 {
                            BORDER
                        } else {
                            ' '
                        }
                    })
                    .collect()
            })
            .collect();

        Self { len, side, rows }
    }

    /// Grid for `board` with each cell showing its index and instruction.
    #[must_use]
    pub fn for_board(board: &Board) -> Self {
        let mut grid = Self::new(board.len());
        for (i, cell) in board.iter().enumerate() {
            grid.fill(i, &format!("{}\n{}", i, cell));
        }
        grid
    }

    /// Cells per grid row.
    #[must_use]
    pub fn side(&self) -> usize {
        self.side
    }

    /// Top-left character (row, column) inside the borders of cell `index`,
    /// or `None` past the board length.
    #[must_use]
    pub fn cell_origin(&self, index: usize) -> Option<(usize, usize)> {
        if index >= self.len {
            return None;
        }
        let row = index / self.side;
        let col = index % self.side;
        let col = if row % 2 == 0 { col } else { self.side - col - 1 };
        Some((CELL_HEIGHT * row + 1, CELL_WIDTH * col + 1))
    }

    /// Write `message` into cell `index`, one line per text row.
    ///
    /// Text that does not fit inside the cell is clipped. Indices past the
    /// board length are ignored.
    pub fn fill(&mut self, index: usize, message: &str) {
        let Some((top, left)) = self.cell_origin(index) else {
            return;
        };
        for (r, line) in message.lines().take(CELL_HEIGHT - 1).enumerate() {
            for (k, c) in line.chars().take(CELL_WIDTH - 1).enumerate() {
                self.rows[top + r][left + k] = c;
            }
        }
    }

    /// Grid rows as strings.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.iter().collect()).collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            let line: String = row.iter().collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Render a board as an ASCII grid.
#[must_use]
pub fn render_board(board: &Board) -> String {
    Grid::for_board(board).to_string()
}

fn ceil_sqrt(n: usize) -> usize {
    let mut side = 0;
    while side * side < n {
        side += 1;
    }
    side
}
