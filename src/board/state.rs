//! Board representation.
//!
//! The canonical layout is a flat, row-major array of nine cells. The 3x3
//! grid view is a conversion at the boundary; both describe the same board.

use serde::{Deserialize, Serialize};

use super::mark::Mark;

/// Number of cells on the board.
pub const CELL_COUNT: usize = 9;

/// Number of rows (and columns).
pub const SIDE: usize = 3;

/// The 3x3 grid view of a board, indexed `[row][col]`.
pub type Grid = [[Mark; SIDE]; SIDE];

/// Converts a `(row, col)` pair into a flat cell index.
/// Returns `None` if either coordinate is off the board.
pub const fn index_of(row: usize, col: usize) -> Option<usize> {
    if row < SIDE && col < SIDE {
        Some(row * SIDE + col)
    } else {
        None
    }
}

/// Converts a flat cell index into `(row, col)`.
pub const fn coords_of(cell: usize) -> Option<(usize, usize)> {
    if cell < CELL_COUNT {
        Some((cell / SIDE, cell % SIDE))
    } else {
        None
    }
}

/// A snapshot of all nine cells.
///
/// `Board` is `Copy`, so handing one to the search never lets the search
/// touch the caller's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Mark; CELL_COUNT],
}

impl Board {
    /// Creates a board with every cell empty.
    pub const fn empty() -> Self {
        Board {
            cells: [Mark::Empty; CELL_COUNT],
        }
    }

    /// Creates a board from its 3x3 grid view.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Board::empty();
        for (row, marks) in grid.iter().enumerate() {
            for (col, &mark) in marks.iter().enumerate() {
                board.cells[row * SIDE + col] = mark;
            }
        }
        board
    }

    /// Returns the 3x3 grid view of this board.
    pub fn to_grid(&self) -> Grid {
        let mut grid = [[Mark::Empty; SIDE]; SIDE];
        for (i, &mark) in self.cells.iter().enumerate() {
            grid[i / SIDE][i % SIDE] = mark;
        }
        grid
    }

    /// Returns the mark at a flat index. Panics if `cell >= 9`.
    #[inline]
    pub fn get(&self, cell: usize) -> Mark {
        self.cells[cell]
    }

    /// Returns the mark at `(row, col)`, or `None` if off the board.
    pub fn get_rc(&self, row: usize, col: usize) -> Option<Mark> {
        index_of(row, col).map(|i| self.cells[i])
    }

    /// Writes a mark into a cell without any legality check.
    #[inline]
    pub fn set(&mut self, cell: usize, mark: Mark) {
        self.cells[cell] = mark;
    }

    /// Clears a cell back to empty.
    #[inline]
    pub fn clear(&mut self, cell: usize) {
        self.cells[cell] = Mark::Empty;
    }

    /// Returns true if the cell exists and holds no mark.
    pub fn is_empty_cell(&self, cell: usize) -> bool {
        cell < CELL_COUNT && self.cells[cell].is_empty()
    }

    /// Iterates over empty cell indices in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_empty())
            .map(|(i, _)| i)
    }

    /// Counts cells holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&m| m == mark).count()
    }

    /// Returns the side to move under alternating play with X first.
    ///
    /// This is a convention for collaborators; the search itself never
    /// infers the side from the counts.
    pub fn side_to_move(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }
}
