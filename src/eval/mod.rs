//! Terminal-state evaluation.
//!
//! Detects completed lines and full boards, and scores finished positions
//! from a given side's perspective. There is no heuristic evaluation of
//! unfinished positions: the search always reaches a terminal state.

pub(crate) mod terminal;

pub use terminal::{
    is_full, is_terminal, outcome, terminal_score, winner, winning_line, Outcome, Score, DRAW,
    LOSS, WIN,
};
