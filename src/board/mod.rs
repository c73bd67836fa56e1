//! Board representation and game-state types.
//!
//! Contains the cell marks, the flat board with its grid conversions, and
//! the constant table of winning lines.

pub mod lines;
pub mod mark;
pub mod state;

pub use lines::{Line, LINES, LINE_COUNT};
pub use mark::{Mark, PLAYERS};
pub use state::{coords_of, index_of, Board, Grid, CELL_COUNT, SIDE};
