//! Alpha-beta search with iterative deepening and per-call memoization
//!
//! The searcher explores the game tree by mutating a shared board with
//! mark/unmark rather than copying it, and memoizes the score of every
//! position it finishes. A deadline is polled at every loop iteration and
//! every recursive descent; exhaustion unwinds the whole search as a
//! [`SearchTimeout`], with each frame undoing its own move on the way out.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use connectk::board::{Board, Disc};
//! use connectk::eval::{LOSS, WIN};
//! use connectk::search::{Deadline, Searcher, DEFAULT_CACHE_BYTES};
//!
//! // The engine (First) just dropped into column 3; score that position
//! let mut board = Board::new(6, 7, 4);
//! board.mark(3);
//!
//! let deadline = Deadline::start(Duration::from_secs(5));
//! let mut searcher = Searcher::new(Disc::First, 4, DEFAULT_CACHE_BYTES, deadline);
//! let score = searcher.deepen(&mut board, 2, LOSS, WIN).unwrap();
//! assert!(score > LOSS && score < WIN);
//! ```

use log::trace;

use crate::board::{Board, Disc, GameState};
use crate::eval::{evaluate, terminal_score, Score, DRAW, LOSS, WIN};

use super::cache::TranspositionCache;
use super::deadline::{Deadline, SearchTimeout};

/// Recursive game-tree searcher for one move selection.
///
/// Owns the memoization table consulted across the deepening passes of a
/// single [`deepen`](Searcher::deepen) call; a fresh searcher is built
/// per candidate move, so no score survives into another search.
pub struct Searcher {
    /// Side the engine plays; scores are from this side's perspective
    side: Disc,
    /// Exclusive bound for the deepening loop
    depth_ceiling: u32,
    deadline: Deadline,
    cache: TranspositionCache,
    nodes: u64,
}

impl Searcher {
    #[must_use]
    pub fn new(side: Disc, depth_ceiling: u32, cache_bytes: usize, deadline: Deadline) -> Self {
        Self {
            side,
            depth_ceiling,
            deadline,
            cache: TranspositionCache::new(cache_bytes),
            nodes: 0,
        }
    }

    /// Nodes expanded so far
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Iterative-deepening driver.
    ///
    /// Scores the position left on the board by the engine's candidate
    /// move, so the opponent is the side to move. Runs full-width passes
    /// of increasing depth from `start_depth` up to the ceiling,
    /// returning the last fully computed score. Stops early on a proven
    /// win, loss or draw (deeper passes cannot improve on those), when
    /// the running best reaches the caller's `beta` bound, or with
    /// [`SearchTimeout`] once the budget runs out.
    pub fn deepen(
        &mut self,
        board: &mut Board,
        start_depth: u32,
        alpha: Score,
        beta: Score,
    ) -> Result<Score, SearchTimeout> {
        let mut best = LOSS;
        let mut depth = start_depth;

        while depth < self.depth_ceiling {
            self.deadline.check()?;

            if let Some(score) = terminal_score(board.game_state(), self.side) {
                return Ok(score);
            }

            let key = board.fingerprint();
            let score = match self.cache.get(&key) {
                Some(hit) => hit,
                None => {
                    let found = self.alpha_beta(board, depth, alpha, beta, false)?;
                    self.cache.insert(key, found);
                    found
                }
            };
            trace!("depth {depth}: score {score} ({} positions cached)", self.cache.len());

            // Scores are depth-sensitive; nothing from this pass may be
            // read by the next, deeper one.
            self.cache.clear();

            if score == WIN || score == LOSS || score == DRAW {
                // Proven result; deeper passes cannot improve on it
                return Ok(score);
            }

            best = score;
            depth += 1;

            if best >= beta {
                break;
            }
        }

        Ok(best)
    }

    /// Minimax with alpha-beta pruning over the mutable board.
    ///
    /// `maximizing` is true when the engine's own side is to move.
    /// Column order is the tie-break order: the first maximal (or
    /// minimal) child wins. Memoization keys are the positions actually
    /// created by each move, so a transposition reached later on another
    /// line is not re-expanded.
    fn alpha_beta(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> Result<Score, SearchTimeout> {
        self.deadline.check()?;
        self.nodes += 1;

        if depth == 0 || board.game_state() != GameState::Open {
            return Ok(evaluate(board, self.side));
        }

        let columns = board.available_columns();
        if maximizing {
            let mut max = LOSS;
            for col in columns {
                self.deadline.check()?;
                board.mark(col);
                let outcome = self.child_score(board, depth, alpha, beta, false);
                board.unmark();
                let score = outcome?;

                max = max.max(score);
                alpha = alpha.max(max);
                if alpha >= beta {
                    break;
                }
            }
            Ok(max)
        } else {
            let mut min = WIN;
            for col in columns {
                self.deadline.check()?;
                board.mark(col);
                let outcome = self.child_score(board, depth, alpha, beta, true);
                board.unmark();
                let score = outcome?;

                min = min.min(score);
                beta = beta.min(min);
                if alpha >= beta {
                    break;
                }
            }
            Ok(min)
        }
    }

    /// Memoized recursion into the position just created on the board.
    ///
    /// The board is left marked; the caller undoes on every path,
    /// including timeout propagation.
    fn child_score(
        &mut self,
        board: &mut Board,
        depth: u32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> Result<Score, SearchTimeout> {
        let key = board.fingerprint();
        if let Some(hit) = self.cache.get(&key) {
            return Ok(hit);
        }
        let score = self.alpha_beta(board, depth - 1, alpha, beta, maximizing)?;
        self.cache.insert(key, score);
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::search::DEFAULT_CACHE_BYTES;

    fn searcher(side: Disc, depth_ceiling: u32, budget: Duration) -> Searcher {
        Searcher::new(side, depth_ceiling, DEFAULT_CACHE_BYTES, Deadline::start(budget))
    }

    #[test]
    fn test_double_threat_win_is_proven() {
        let mut board = Board::new(6, 7, 4);
        // First holds an open-ended three on columns 1-3 with Second to
        // move: one end gets blocked, the other completes the run
        for col in [1, 6, 2, 6, 3, 5, 6] {
            board.mark(col);
        }
        assert_eq!(board.to_move(), Disc::Second);

        let mut s = searcher(Disc::First, 4, Duration::from_secs(10));
        let score = s.deepen(&mut board, 3, LOSS, WIN).unwrap();
        assert_eq!(score, WIN);
    }

    #[test]
    fn test_hanging_loss_is_proven() {
        let mut board = Board::new(6, 7, 4);
        // Second holds an open-ended three on columns 1-3 and is to move;
        // the position the engine (First) left behind is already lost
        for col in [5, 1, 5, 2, 6, 3, 6] {
            board.mark(col);
        }
        assert_eq!(board.to_move(), Disc::Second);

        let mut s = searcher(Disc::First, 3, Duration::from_secs(10));
        let score = s.deepen(&mut board, 2, LOSS, WIN).unwrap();
        assert_eq!(score, LOSS);
    }

    #[test]
    fn test_draw_sentinel_at_base_case() {
        // Full 2x2 board with win length 3: no run is possible
        let mut board = Board::new(2, 2, 3);
        for col in [0, 1, 0, 1] {
            board.mark(col);
        }

        let mut s = searcher(Disc::First, 4, Duration::from_secs(10));
        assert_eq!(s.alpha_beta(&mut board, 3, LOSS, WIN, false).unwrap(), DRAW);
        assert_eq!(s.deepen(&mut board, 1, LOSS, WIN).unwrap(), DRAW);
    }

    #[test]
    fn test_terminal_board_short_circuits() {
        let mut board = Board::new(6, 7, 4);
        for col in [0, 0, 1, 0, 2, 1, 3] {
            board.mark(col);
        }
        assert_eq!(board.game_state(), GameState::Won(Disc::First));

        let mut s = searcher(Disc::Second, 6, Duration::from_secs(10));
        assert_eq!(s.deepen(&mut board, 5, LOSS, WIN).unwrap(), LOSS);
        assert_eq!(s.nodes(), 0);
    }

    #[test]
    fn test_timeout_propagates() {
        let mut board = Board::new(6, 7, 4);
        board.mark(3);

        let mut s = searcher(Disc::Second, 6, Duration::ZERO);
        assert_eq!(s.deepen(&mut board, 5, LOSS, WIN), Err(SearchTimeout));
    }

    #[test]
    fn test_board_restored_after_search() {
        let mut board = Board::new(6, 7, 4);
        for col in [3, 3, 2, 4] {
            board.mark(col);
        }
        let before = board.fingerprint();

        let mut s = searcher(Disc::First, 5, Duration::from_secs(10));
        s.deepen(&mut board, 4, LOSS, WIN).unwrap();

        assert_eq!(board.fingerprint(), before);
        assert_eq!(board.marked_cells(), 4);
    }

    #[test]
    fn test_board_restored_after_mid_search_timeout() {
        let mut board = Board::new(6, 7, 4);
        for col in [3, 3, 2, 4] {
            board.mark(col);
        }
        let before = board.fingerprint();

        // Tight enough to abort somewhere inside the recursion
        let mut s = searcher(Disc::First, 8, Duration::from_micros(300));
        let _ = s.deepen(&mut board, 6, LOSS, WIN);

        assert_eq!(board.fingerprint(), before);
    }

    #[test]
    fn test_deterministic_scores() {
        let mut board = Board::new(6, 7, 4);
        for col in [3, 2, 4] {
            board.mark(col);
        }

        let mut a = searcher(Disc::Second, 4, Duration::from_secs(10));
        let mut b = searcher(Disc::Second, 4, Duration::from_secs(10));

        let first = a.deepen(&mut board, 3, LOSS, WIN).unwrap();
        let second = b.deepen(&mut board, 3, LOSS, WIN).unwrap();
        assert_eq!(first, second);
    }
}
