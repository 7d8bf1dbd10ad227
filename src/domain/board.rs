//! The 3×3 board and win detection.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::value_object::CellPosition;

/// A player's mark on the board.
///
/// `X` always belongs to the room's host (slot 0), `O` to the guest (slot 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A single board cell: empty or holding a mark.
pub type Cell = Option<Mark>;

/// The eight winning lines: three rows, three columns, both diagonals.
const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// A fixed 3×3 grid of cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; 3]; 3],
}

impl Board {
    /// Create an all-empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the cell at the given position.
    pub fn cell(&self, pos: CellPosition) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Write a mark into the given cell, overwriting whatever was there.
    /// Occupancy checks belong to the caller.
    pub fn place(&mut self, pos: CellPosition, mark: Mark) {
        self.cells[pos.row][pos.col] = Some(mark);
    }

    /// Count the non-empty cells.
    pub fn count_marks(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count()
    }

    /// Borrow the raw cell grid, row-major.
    pub fn rows(&self) -> &[[Cell; 3]; 3] {
        &self.cells
    }

    /// Evaluate the board for a completed line.
    ///
    /// Returns the mark occupying any line of three equal non-empty cells, or
    /// `None` when no line is complete. Checks all eight lines; the caller
    /// invokes this once per move, so at most one line can newly complete and
    /// evaluation order does not matter. Draws are not detected here; the
    /// session infers a draw from the move count.
    pub fn winner(&self) -> Option<Mark> {
        for [p0, p1, p2] in LINES {
            let (a, b, c) = (
                self.cells[p0.0][p0.1],
                self.cells[p1.0][p1.1],
                self.cells[p2.0][p2.1],
            );
            if a.is_some() && a == b && b == c {
                return a;
            }
        }
        None
    }
}
