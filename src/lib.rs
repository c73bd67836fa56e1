//! oxo engine library.
//!
//! Exposes the board representation, terminal evaluation, exhaustive
//! alpha-beta search, game bookkeeping, and protocol modules for use by
//! integration tests and the binary entry points.

pub mod board;
pub mod engine;
pub mod eval;
pub mod game;
pub mod protocol;
pub mod search;
pub mod selfplay;

pub use board::{Board, Mark};
pub use eval::{is_full, winner};
pub use search::{best_move, SearchResult};
