//! Game bookkeeping around the search.
//!
//! Owns the authoritative board, the history of positions, and whose turn
//! it is. Moves can be taken back by jumping to an earlier history entry;
//! playing from there discards the later entries.

use std::fmt;

use crate::board::{Board, Mark, CELL_COUNT};
use crate::eval::{outcome, Outcome};

/// Errors from applying a move or navigating history.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cell {0} is off the board")]
    OutOfRange(usize),

    #[error("cell {0} is already occupied")]
    Occupied(usize),

    #[error("game is over: {0}")]
    GameOver(Outcome),

    #[error("no history entry {index} (last is {last})")]
    NoSuchEntry { index: usize, last: usize },
}

/// What the status line should say.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Finished(Outcome),
    ToMove(Mark),
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Finished(Outcome::Win(mark)) => write!(f, "Winner: {}", mark.name()),
            GameStatus::Finished(Outcome::Draw) => write!(f, "Draw"),
            GameStatus::ToMove(mark) => write!(f, "Next player: {}", mark.name()),
        }
    }
}

/// A game in progress with full move history.
#[derive(Debug, Clone)]
pub struct Game {
    history: Vec<Board>,
    current: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Starts a game on the empty board.
    pub fn new() -> Self {
        Self::from_board(Board::empty())
    }

    /// Starts a game from an arbitrary position.
    pub fn from_board(board: Board) -> Self {
        Game {
            history: vec![board],
            current: 0,
        }
    }

    /// The board at the current history entry.
    pub fn board(&self) -> &Board {
        &self.history[self.current]
    }

    /// All recorded positions, including any ahead of the current entry.
    pub fn history(&self) -> &[Board] {
        &self.history
    }

    /// Index of the current history entry (0 is the starting position).
    pub fn current_move(&self) -> usize {
        self.current
    }

    /// The mark that plays next, assuming X moves first.
    pub fn next_mark(&self) -> Mark {
        self.board().side_to_move()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        outcome(self.board())
    }

    pub fn is_over(&self) -> bool {
        self.outcome().is_some()
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome() {
            Some(o) => GameStatus::Finished(o),
            None => GameStatus::ToMove(self.next_mark()),
        }
    }

    /// Plays `cell` for the side to move and returns the mark placed.
    ///
    /// Entries after the current one are discarded first.
    pub fn play(&mut self, cell: usize) -> Result<Mark, MoveError> {
        if cell >= CELL_COUNT {
            return Err(MoveError::OutOfRange(cell));
        }
        if let Some(o) = self.outcome() {
            return Err(MoveError::GameOver(o));
        }
        if !self.board().is_empty_cell(cell) {
            return Err(MoveError::Occupied(cell));
        }

        let mark = self.next_mark();
        let mut next = *self.board();
        next.set(cell, mark);

        self.history.truncate(self.current + 1);
        self.history.push(next);
        self.current = self.history.len() - 1;
        Ok(mark)
    }

    /// Moves to history entry `index` without discarding anything.
    pub fn jump_to(&mut self, index: usize) -> Result<(), MoveError> {
        if index >= self.history.len() {
            return Err(MoveError::NoSuchEntry {
                index,
                last: self.history.len() - 1,
            });
        }
        self.current = index;
        Ok(())
    }

    /// Cells played from the start up to the current entry, in order.
    pub fn moves(&self) -> Vec<usize> {
        self.history[..=self.current]
            .windows(2)
            .filter_map(|pair| (0..CELL_COUNT).find(|&i| pair[0].get(i) != pair[1].get(i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_game_starts_with_x() {
        let game = Game::new();
        assert_eq!(game.current_move(), 0);
        assert_eq!(game.next_mark(), Mark::X);
        assert_eq!(game.status().to_string(), "Next player: X");
    }

    #[test]
    fn play_alternates_marks() {
        let mut game = Game::new();
        assert_eq!(game.play(4), Ok(Mark::X));
        assert_eq!(game.play(0), Ok(Mark::O));
        assert_eq!(game.board().get(4), Mark::X);
        assert_eq!(game.board().get(0), Mark::O);
        assert_eq!(game.current_move(), 2);
        assert_eq!(game.moves(), vec![4, 0]);
    }

    #[test]
    fn play_rejects_bad_cells() {
        let mut game = Game::new();
        game.play(4).unwrap();
        assert_eq!(game.play(4), Err(MoveError::Occupied(4)));
        assert_eq!(game.play(9), Err(MoveError::OutOfRange(9)));
        assert_eq!(game.current_move(), 1);
    }

    #[test]
    fn play_after_game_over_fails() {
        let mut game = Game::new();
        for cell in [0, 3, 1, 4, 2] {
            game.play(cell).unwrap();
        }
        assert_eq!(game.outcome(), Some(Outcome::Win(Mark::X)));
        assert_eq!(game.status().to_string(), "Winner: X");
        assert_eq!(game.play(8), Err(MoveError::GameOver(Outcome::Win(Mark::X))));
    }

    #[test]
    fn draw_status() {
        let mut game = Game::new();
        for cell in [0, 1, 2, 4, 3, 5, 7, 6, 8] {
            game.play(cell).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Finished(Outcome::Draw));
        assert_eq!(game.status().to_string(), "Draw");
    }

    #[test]
    fn jump_back_then_play_truncates() {
        let mut game = Game::new();
        game.play(0).unwrap();
        game.play(1).unwrap();
        game.play(2).unwrap();

        game.jump_to(1).unwrap();
        assert_eq!(game.history().len(), 4);
        assert_eq!(game.next_mark(), Mark::O);

        game.play(4).unwrap();
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.moves(), vec![0, 4]);
    }

    #[test]
    fn jump_forward_within_history() {
        let mut game = Game::new();
        game.play(0).unwrap();
        game.play(1).unwrap();
        game.jump_to(0).unwrap();
        assert_eq!(game.board(), &Board::empty());
        game.jump_to(2).unwrap();
        assert_eq!(game.moves(), vec![0, 1]);
        assert_eq!(
            game.jump_to(3),
            Err(MoveError::NoSuchEntry { index: 3, last: 2 })
        );
    }

    #[test]
    fn from_board_uses_counts_for_turn() {
        let mut board = Board::empty();
        board.set(4, Mark::X);
        let game = Game::from_board(board);
        assert_eq!(game.next_mark(), Mark::O);
        assert!(game.moves().is_empty());
    }
}
