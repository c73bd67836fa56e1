//! Full-depth minimax with alpha-beta pruning.
//!
//! Candidates are tried in ascending cell order and the running best is
//! replaced only on strict improvement, so among equally good moves the
//! lowest index is returned. Each trial places a mark on a private working
//! board, recurses, and removes the mark before the next candidate, so the
//! working board is back to its starting contents on every return path.

use std::io::Write;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, CELL_COUNT};
use crate::eval::{terminal_score, Score};

/// Stand-ins for -inf/+inf. Every real score is strictly inside them.
const NEG_INF: Score = Score::MIN;
const POS_INF: Score = Score::MAX;

/// Search tuning. There is no depth or difficulty knob: the search is
/// always exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop scanning a level once `beta <= alpha`. Disabling this gives
    /// plain minimax with the same scores.
    pub pruning: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { pruning: true }
    }
}

/// The value of a position and the move that achieves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// -1, 0 or +1 from the maximizing side's point of view.
    pub score: Score,
    /// Chosen cell, or `None` when the input board is already terminal.
    pub best_move: Option<usize>,
}

/// Search statistics emitted via `info` lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchInfo {
    /// Positions visited, including the root.
    pub nodes: u64,
    /// Levels abandoned early by a `beta <= alpha` cutoff.
    pub cutoffs: u64,
    pub elapsed_us: u64,
}

struct Searcher {
    maximizing_mark: Mark,
    pruning: bool,
    nodes: u64,
    cutoffs: u64,
}

impl Searcher {
    fn minimax(
        &mut self,
        board: &mut Board,
        maximizing: bool,
        mut alpha: Score,
        mut beta: Score,
    ) -> SearchResult {
        self.nodes += 1;

        if let Some(score) = terminal_score(board, self.maximizing_mark) {
            return SearchResult {
                score,
                best_move: None,
            };
        }

        let mark = if maximizing {
            self.maximizing_mark
        } else {
            self.maximizing_mark.flip()
        };

        let mut best_score = if maximizing { NEG_INF } else { POS_INF };
        let mut best_move = None;

        for cell in 0..CELL_COUNT {
            if !board.get(cell).is_empty() {
                continue;
            }

            board.set(cell, mark);
            let score = self.minimax(board, !maximizing, alpha, beta).score;
            board.clear(cell);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(cell);
                }
                alpha = alpha.max(score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(cell);
                }
                beta = beta.min(score);
            }

            if self.pruning && beta <= alpha {
                self.cutoffs += 1;
                break;
            }
        }

        SearchResult {
            score: best_score,
            best_move,
        }
    }
}

/// Returns the optimal move for `maximizing_mark`, who is to move.
///
/// A terminal board yields its fixed score and no move. The caller's board
/// is never modified.
pub fn best_move(board: &Board, maximizing_mark: Mark) -> SearchResult {
    search(board, maximizing_mark, &SearchOptions::default()).0
}

/// Runs the search with explicit options and returns statistics alongside
/// the result.
///
/// `Mark::Empty` is not a side; if passed, the side to move under
/// alternating play (X first) is used instead.
pub fn search(
    board: &Board,
    maximizing_mark: Mark,
    options: &SearchOptions,
) -> (SearchResult, SearchInfo) {
    let start = Instant::now();
    let maximizing_mark = if maximizing_mark.is_empty() {
        board.side_to_move()
    } else {
        maximizing_mark
    };

    let mut work = *board;
    let mut searcher = Searcher {
        maximizing_mark,
        pruning: options.pruning,
        nodes: 0,
        cutoffs: 0,
    };
    let result = searcher.minimax(&mut work, true, NEG_INF, POS_INF);
    debug_assert_eq!(&work, board, "working board not restored");

    let info = SearchInfo {
        nodes: searcher.nodes,
        cutoffs: searcher.cutoffs,
        elapsed_us: start.elapsed().as_micros() as u64,
    };
    (result, info)
}

/// Like `search`, but also writes an `info` line to `out`.
pub fn search_with_info<W: Write>(
    board: &Board,
    maximizing_mark: Mark,
    options: &SearchOptions,
    out: &mut W,
) -> std::io::Result<(SearchResult, SearchInfo)> {
    let (result, info) = search(board, maximizing_mark, options);
    writeln!(
        out,
        "info nodes {} cutoffs {} score {} time {}",
        info.nodes, info.cutoffs, result.score, info.elapsed_us
    )?;
    Ok((result, info))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{DRAW, LOSS, WIN};

    fn board(s: &str) -> Board {
        let mut b = Board::empty();
        for (i, c) in s.chars().enumerate() {
            b.set(i, Mark::from_notation_char(c).unwrap());
        }
        b
    }

    const UNPRUNED: SearchOptions = SearchOptions { pruning: false };

    fn expected(score: Score, best_move: Option<usize>) -> SearchResult {
        SearchResult { score, best_move }
    }

    #[test]
    fn empty_board_is_a_draw_at_cell_zero() {
        let result = best_move(&Board::empty(), Mark::O);
        assert_eq!(result.score, DRAW);
        assert_eq!(result.best_move, Some(0));

        let result = best_move(&Board::empty(), Mark::X);
        assert_eq!(result.score, DRAW);
        assert_eq!(result.best_move, Some(0));
    }

    #[test]
    fn takes_immediate_win() {
        let result = best_move(&board("oo.xx...."), Mark::O);
        assert_eq!(result, expected(WIN, Some(2)));

        let result = best_move(&board("xx.oo...."), Mark::X);
        assert_eq!(result, expected(WIN, Some(2)));
    }

    #[test]
    fn blocks_opponent_threat() {
        let result = best_move(&board("xx..o...."), Mark::O);
        assert_eq!(result, expected(DRAW, Some(2)));
    }

    #[test]
    fn answers_corner_opening_in_center() {
        let result = best_move(&board("x........"), Mark::O);
        assert_eq!(result, expected(DRAW, Some(4)));
    }

    #[test]
    fn lost_position_scores_loss() {
        // X threatens both column 1 and the row through the center.
        let result = best_move(&board(".x..x...."), Mark::O);
        assert_eq!(result.score, LOSS);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn terminal_boards_return_no_move() {
        let x_won = board("xxxoo....");
        assert_eq!(best_move(&x_won, Mark::O), expected(LOSS, None));
        assert_eq!(best_move(&x_won, Mark::X), expected(WIN, None));

        let draw = board("xoxxoooxx");
        assert_eq!(best_move(&draw, Mark::O), expected(DRAW, None));

        let (_, info) = search(&draw, Mark::O, &SearchOptions::default());
        assert_eq!(info.nodes, 1);
        assert_eq!(info.cutoffs, 0);
    }

    #[test]
    fn caller_board_is_untouched() {
        let b = board("x...o...x");
        let before = b;
        let _ = best_move(&b, Mark::O);
        let _ = search(&b, Mark::O, &UNPRUNED);
        assert_eq!(b, before);
    }

    #[test]
    fn unpruned_search_visits_whole_tree() {
        let (result, info) = search(&Board::empty(), Mark::O, &UNPRUNED);
        assert_eq!(result.score, DRAW);
        assert_eq!(info.nodes, 549_946);
        assert_eq!(info.cutoffs, 0);
    }

    #[test]
    fn pruning_visits_fewer_nodes_with_same_score() {
        let (pruned, pruned_info) = search(&Board::empty(), Mark::O, &SearchOptions::default());
        let (full, full_info) = search(&Board::empty(), Mark::O, &UNPRUNED);
        assert_eq!(pruned.score, full.score);
        assert!(pruned_info.nodes < full_info.nodes);
        assert!(pruned_info.cutoffs > 0);
    }

    #[test]
    fn empty_mark_falls_back_to_side_to_move() {
        let b = board("xx..o.o..");
        assert_eq!(best_move(&b, Mark::Empty), best_move(&b, Mark::X));
    }

    #[test]
    fn info_line_is_written() {
        let mut out = Vec::new();
        let (result, info) =
            search_with_info(&board("oo.xx...."), Mark::O, &SearchOptions::default(), &mut out)
                .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(&format!("info nodes {} cutoffs ", info.nodes)));
        assert!(text.contains(&format!("score {}", result.score)));
    }
}
