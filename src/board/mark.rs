//! Cell marks and the two sides of the game.

use serde::{Deserialize, Serialize};

/// The symbol occupying a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Mark {
    #[default]
    Empty,
    X,
    O,
}

/// The two playable marks, in the order they move.
pub const PLAYERS: [Mark; 2] = [Mark::X, Mark::O];

impl Mark {
    /// Returns the other side, or `None` for `Empty`.
    pub const fn opponent(self) -> Option<Mark> {
        match self {
            Mark::X => Some(Mark::O),
            Mark::O => Some(Mark::X),
            Mark::Empty => None,
        }
    }

    /// Like `opponent`, but maps `Empty` to itself so it can be used
    /// unconditionally inside the search.
    pub(crate) const fn flip(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
            Mark::Empty => Mark::Empty,
        }
    }

    pub const fn is_empty(self) -> bool {
        matches!(self, Mark::Empty)
    }

    /// Returns the lowercase notation character.
    pub const fn notation_char(self) -> char {
        match self {
            Mark::Empty => '.',
            Mark::X => 'x',
            Mark::O => 'o',
        }
    }

    /// Parses a notation character (case-insensitive).
    pub fn from_notation_char(c: char) -> Option<Mark> {
        match c {
            '.' => Some(Mark::Empty),
            'x' | 'X' => Some(Mark::X),
            'o' | 'O' => Some(Mark::O),
            _ => None,
        }
    }

    /// Returns the display name used in status messages ("X", "O").
    pub const fn name(self) -> &'static str {
        match self {
            Mark::Empty => "-",
            Mark::X => "X",
            Mark::O => "O",
        }
    }

    /// Parses a player mark by name. `Empty` is not a valid player.
    pub fn from_name(s: &str) -> Option<Mark> {
        match s {
            "x" | "X" => Some(Mark::X),
            "o" | "O" => Some(Mark::O),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opponent_swaps_players() {
        assert_eq!(Mark::X.opponent(), Some(Mark::O));
        assert_eq!(Mark::O.opponent(), Some(Mark::X));
        assert_eq!(Mark::Empty.opponent(), None);
    }

    #[test]
    fn notation_chars_are_case_insensitive() {
        assert_eq!(Mark::from_notation_char('X'), Some(Mark::X));
        assert_eq!(Mark::from_notation_char('o'), Some(Mark::O));
        assert_eq!(Mark::from_notation_char('.'), Some(Mark::Empty));
        assert_eq!(Mark::from_notation_char('-'), None);
    }

    #[test]
    fn from_name_rejects_empty() {
        assert_eq!(Mark::from_name("o"), Some(Mark::O));
        assert_eq!(Mark::from_name("-"), None);
        assert_eq!(Mark::from_name(""), None);
    }
}
