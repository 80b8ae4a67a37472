//! Engine front-end: per-turn move selection
//!
//! The engine enumerates the playable columns, scores the position after
//! each with a time-bounded iterative-deepening search, and returns the
//! highest-scoring column. A uniformly random playable column is drawn
//! up front so that even an immediate timeout yields a legal move.
//!
//! # Example
//!
//! ```
//! use connectk::{Board, Engine, EngineConfig};
//!
//! let mut board = Board::new(6, 7, 4);
//! let mut engine = Engine::new(EngineConfig::new(6, 7, 4, true, 5));
//!
//! if let Some(col) = engine.select_move(&mut board) {
//!     board.mark(col);
//! }
//! ```

use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Disc};
use crate::eval::{terminal_score, Score, LOSS, WIN};
use crate::search::{Deadline, Searcher, SearchTimeout, DEFAULT_CACHE_BYTES};

// Depth knobs; win lengths above 5 get wider ones
const BASE_START_DEPTH: u32 = 5;
const BASE_DEPTH_CEILING: u32 = 6;
const WIDE_START_DEPTH: u32 = 6;
const WIDE_DEPTH_CEILING: u32 = 10;
const WIDE_WIN_LEN: usize = 5;

/// Fixed search parameters for one match.
///
/// Built once before the first move request and shared by every search
/// in the match.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub rows: usize,
    pub cols: usize,
    pub win_len: usize,
    /// Side the engine plays
    pub side: Disc,
    /// Depth of the first deepening pass
    pub start_depth: u32,
    /// Exclusive bound for the deepening loop
    pub depth_ceiling: u32,
    /// Per-turn wall-clock budget
    pub budget: Duration,
    /// Approximate byte ceiling for the per-search memoization table
    pub cache_bytes: usize,
}

impl EngineConfig {
    /// One-time setup for a match of the given shape.
    ///
    /// `moves_first` is true when the engine plays the first drop of the
    /// match; `budget_secs` is the per-turn wall-clock budget.
    #[must_use]
    pub fn new(
        rows: usize,
        cols: usize,
        win_len: usize,
        moves_first: bool,
        budget_secs: u64,
    ) -> Self {
        let (start_depth, depth_ceiling) = if win_len > WIDE_WIN_LEN {
            (WIDE_START_DEPTH, WIDE_DEPTH_CEILING)
        } else {
            (BASE_START_DEPTH, BASE_DEPTH_CEILING)
        };
        Self {
            rows,
            cols,
            win_len,
            side: if moves_first { Disc::First } else { Disc::Second },
            start_depth,
            depth_ceiling,
            budget: Duration::from_secs(budget_secs),
            cache_bytes: DEFAULT_CACHE_BYTES,
        }
    }
}

/// Outcome of one move selection, with search statistics.
#[derive(Debug, Clone)]
pub struct MoveReport {
    /// Chosen column, playable on the board as given
    pub column: usize,
    /// Score of the chosen column; [`LOSS`] when nothing evaluated
    pub score: Score,
    /// Nodes expanded across all candidate searches
    pub nodes: u64,
    /// Wall-clock time spent, in milliseconds
    pub time_ms: u64,
    /// Whether the budget ran out before all candidates were scored
    pub timed_out: bool,
}

/// Decision engine for one side of a match.
///
/// # Example
///
/// ```
/// use connectk::{Board, Engine, EngineConfig};
///
/// // Deterministic fallback via a fixed seed
/// let mut engine = Engine::with_seed(EngineConfig::new(6, 7, 4, true, 5), 7);
/// let mut board = Board::new(6, 7, 4);
///
/// // Empty board: the centered column, no search
/// assert_eq!(engine.select_move(&mut board), Some(3));
/// ```
pub struct Engine {
    config: EngineConfig,
    rng: StdRng,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Engine with a fixed RNG seed. The seed only affects the fallback
    /// drawn when no candidate evaluates before timeout.
    #[must_use]
    pub fn with_seed(config: EngineConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Constant identity string for the host harness
    #[must_use]
    pub fn player_name(&self) -> &'static str {
        "ConnectK"
    }

    /// Pick a playable column for the current position.
    ///
    /// Returns `None` only when no column is playable, which a correct
    /// host never asks about. The board is restored to its input state
    /// before every return path.
    pub fn select_move(&mut self, board: &mut Board) -> Option<usize> {
        self.select_move_with_report(board).map(|r| r.column)
    }

    /// Pick a playable column and report search statistics alongside it.
    pub fn select_move_with_report(&mut self, board: &mut Board) -> Option<MoveReport> {
        let deadline = Deadline::start(self.config.budget);
        let columns = board.available_columns();
        if columns.is_empty() {
            return None;
        }

        // Pre-seeded fallback: a uniformly random playable column stands
        // until some candidate actually evaluates
        let mut best_col = columns[self.rng.random_range(0..columns.len())];
        let mut best_score = LOSS;
        let mut nodes = 0u64;
        let mut timed_out = false;

        // Strong opening: the centered column, no search needed
        if board.marked_cells() == 0 && self.config.win_len != self.config.rows {
            let column = columns[columns.len() / 2];
            debug!("empty board: opening on centered column {column}");
            return Some(MoveReport {
                column,
                score: 0,
                nodes: 0,
                time_ms: deadline.elapsed().as_millis() as u64,
                timed_out: false,
            });
        }

        for &col in &columns {
            if deadline.check().is_err() {
                timed_out = true;
                break;
            }

            board.mark(col);
            let outcome = match terminal_score(board.game_state(), self.config.side) {
                Some(score) => Ok(score),
                None => {
                    let mut searcher = Searcher::new(
                        self.config.side,
                        self.config.depth_ceiling,
                        self.config.cache_bytes,
                        deadline,
                    );
                    let result = searcher.deepen(board, self.config.start_depth, LOSS, WIN);
                    nodes += searcher.nodes();
                    result
                }
            };
            board.unmark();

            match outcome {
                Ok(score) => {
                    debug!("column {col} scored {score}");
                    if score > best_score {
                        best_score = score;
                        best_col = col;
                    }
                }
                Err(SearchTimeout) => {
                    timed_out = true;
                    break;
                }
            }
        }

        debug!(
            "selected column {best_col} (score {best_score}, nodes {nodes}, timed_out {timed_out})"
        );
        Some(MoveReport {
            column: best_col,
            score: best_score,
            nodes,
            time_ms: deadline.elapsed().as_millis() as u64,
            timed_out,
        })
    }
}
