//! Winner, fullness, and terminal scoring.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Line, Mark, LINES};

/// Game-theoretic value from the maximizing side's point of view.
pub type Score = i8;

pub const WIN: Score = 1;
pub const DRAW: Score = 0;
pub const LOSS: Score = -1;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(mark) => write!(f, "{} wins", mark.name()),
            Outcome::Draw => write!(f, "draw"),
        }
    }
}

/// Returns the first completed line in table order, if any.
pub fn winning_line(board: &Board) -> Option<Line> {
    LINES.iter().copied().find(|&[a, b, c]| {
        let m = board.get(a);
        !m.is_empty() && m == board.get(b) && m == board.get(c)
    })
}

/// Returns the mark owning the first completed line, if any.
pub fn winner(board: &Board) -> Option<Mark> {
    winning_line(board).map(|[a, _, _]| board.get(a))
}

/// Returns true iff no cell is empty.
pub fn is_full(board: &Board) -> bool {
    board.cells.iter().all(|m| !m.is_empty())
}

/// Returns true if the board has a completed line or no empty cells.
pub fn is_terminal(board: &Board) -> bool {
    winner(board).is_some() || is_full(board)
}

/// Returns the outcome of a finished board, or `None` while play continues.
pub fn outcome(board: &Board) -> Option<Outcome> {
    match winner(board) {
        Some(mark) => Some(Outcome::Win(mark)),
        None if is_full(board) => Some(Outcome::Draw),
        None => None,
    }
}

/// Scores a terminal board for `maximizing_mark`.
///
/// The winner check runs before the fullness check, so a full board with a
/// completed line scores as a win or loss, never a draw.
pub fn terminal_score(board: &Board, maximizing_mark: Mark) -> Option<Score> {
    match winner(board) {
        Some(mark) if mark == maximizing_mark => Some(WIN),
        Some(_) => Some(LOSS),
        None if is_full(board) => Some(DRAW),
        None => None,
    }
}
