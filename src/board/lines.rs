//! The fixed winning-line table.

/// Three cell indices that win when they all hold the same mark.
pub type Line = [usize; 3];

/// Number of winning lines on a 3x3 board.
pub const LINE_COUNT: usize = 8;

/// Every winning line, in scan order: rows, then columns, then diagonals.
pub const LINES: [Line; LINE_COUNT] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];
