//! Board and move notation.
//!
//! A board is written as three rows separated by '/', one character per
//! cell: `x`, `o`, or `.` for empty. For example `x.o/.x./..o`. Input is
//! case-insensitive and may also be a bare nine-character string.
//!
//! A move is either a cell index `0`-`8` or a `row,col` pair.

use crate::board::{index_of, Board, Mark, CELL_COUNT, SIDE};

/// Errors that can occur while parsing notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("expected 3 rows separated by '/', got {0}")]
    WrongRowCount(usize),

    #[error("row {row} has {len} cells, expected 3")]
    WrongRowLength { row: usize, len: usize },

    #[error("expected 9 cells, got {0}")]
    WrongLength(usize),

    #[error("invalid mark character: '{0}'")]
    InvalidMark(char),

    #[error("invalid move: '{0}'")]
    InvalidMove(String),

    #[error("move out of range: '{0}'")]
    MoveOutOfRange(String),
}

/// Parses a board from notation.
pub fn parse_board(s: &str) -> Result<Board, NotationError> {
    let s = s.trim();
    let mut board = Board::empty();

    if s.contains('/') {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != SIDE {
            return Err(NotationError::WrongRowCount(rows.len()));
        }
        for (row, text) in rows.iter().enumerate() {
            let len = text.chars().count();
            if len != SIDE {
                return Err(NotationError::WrongRowLength { row, len });
            }
            for (col, c) in text.chars().enumerate() {
                let mark = Mark::from_notation_char(c).ok_or(NotationError::InvalidMark(c))?;
                board.set(row * SIDE + col, mark);
            }
        }
    } else {
        let len = s.chars().count();
        if len != CELL_COUNT {
            return Err(NotationError::WrongLength(len));
        }
        for (i, c) in s.chars().enumerate() {
            let mark = Mark::from_notation_char(c).ok_or(NotationError::InvalidMark(c))?;
            board.set(i, mark);
        }
    }

    Ok(board)
}

/// Encodes a board as `xxx/xxx/xxx` with lowercase marks.
pub fn encode_board(board: &Board) -> String {
    let mut out = String::with_capacity(CELL_COUNT + SIDE - 1);
    for (i, mark) in board.cells.iter().enumerate() {
        if i > 0 && i % SIDE == 0 {
            out.push('/');
        }
        out.push(mark.notation_char());
    }
    out
}

/// Parses a move token: `4` or `1,1`.
///
/// Only checks that the cell exists; whether it is empty is the game's
/// concern.
pub fn parse_move(s: &str) -> Result<usize, NotationError> {
    let s = s.trim();
    let invalid = || NotationError::InvalidMove(s.to_string());

    match s.split_once(',') {
        Some((row, col)) => {
            let row: usize = row.trim().parse().map_err(|_| invalid())?;
            let col: usize = col.trim().parse().map_err(|_| invalid())?;
            index_of(row, col).ok_or_else(|| NotationError::MoveOutOfRange(s.to_string()))
        }
        None => {
            let cell: usize = s.parse().map_err(|_| invalid())?;
            if cell < CELL_COUNT {
                Ok(cell)
            } else {
                Err(NotationError::MoveOutOfRange(s.to_string()))
            }
        }
    }
}

/// Formats an optional move, using `none` for a missing one.
pub fn format_move(cell: Option<usize>) -> String {
    match cell {
        Some(c) => c.to_string(),
        None => "none".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rows_form() {
        let b = parse_board("x.o/.X./..o").unwrap();
        assert_eq!(b.get(0), Mark::X);
        assert_eq!(b.get(2), Mark::O);
        assert_eq!(b.get(4), Mark::X);
        assert_eq!(b.get(8), Mark::O);
        assert_eq!(b.count(Mark::Empty), 5);
    }

    #[test]
    fn parse_flat_form_matches_rows_form() {
        assert_eq!(parse_board("x.o.x...o"), parse_board("x.o/.x./..o"));
    }

    #[test]
    fn encode_is_canonical() {
        let b = parse_board("X.O.X...O").unwrap();
        assert_eq!(encode_board(&b), "x.o/.x./..o");
        assert_eq!(encode_board(&Board::empty()), ".../.../...");
        assert_eq!(parse_board(&encode_board(&b)).unwrap(), b);
    }

    #[test]
    fn rejects_bad_boards() {
        assert_eq!(parse_board("x.o/.x."), Err(NotationError::WrongRowCount(2)));
        assert_eq!(
            parse_board("x.o/.x/..o"),
            Err(NotationError::WrongRowLength { row: 1, len: 2 })
        );
        assert_eq!(parse_board("x.o"), Err(NotationError::WrongLength(3)));
        assert_eq!(parse_board("x.o.z...o"), Err(NotationError::InvalidMark('z')));
    }

    #[test]
    fn parse_moves() {
        assert_eq!(parse_move("0"), Ok(0));
        assert_eq!(parse_move("8"), Ok(8));
        assert_eq!(parse_move("1,2"), Ok(5));
        assert_eq!(parse_move(" 2, 0 "), Ok(6));
    }

    #[test]
    fn rejects_bad_moves() {
        assert_eq!(parse_move("9"), Err(NotationError::MoveOutOfRange("9".to_string())));
        assert_eq!(parse_move("3,0"), Err(NotationError::MoveOutOfRange("3,0".to_string())));
        assert_eq!(parse_move("a"), Err(NotationError::InvalidMove("a".to_string())));
        assert_eq!(parse_move("1,"), Err(NotationError::InvalidMove("1,".to_string())));
    }

    #[test]
    fn format_missing_move() {
        assert_eq!(format_move(Some(4)), "4");
        assert_eq!(format_move(None), "none");
    }
}
