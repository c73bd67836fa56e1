//! Engine text protocol.
//!
//! This module implements parsing and serialization for the line-oriented
//! engine protocol: the board and move notation, and the command parser
//! for the main loop.

pub mod notation;
pub mod parser;

pub use notation::{encode_board, format_move, parse_board, parse_move, NotationError};
pub use parser::{parse_command, Command};
