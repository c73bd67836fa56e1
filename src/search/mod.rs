//! Search and planning.
//!
//! Exhaustive minimax over the full game tree with alpha-beta pruning.
//! The 3x3 state space is small enough that every line of play is searched
//! to a terminal position.

pub mod alphabeta;

pub use alphabeta::{
    best_move, search, search_with_info, SearchInfo, SearchOptions, SearchResult,
};
