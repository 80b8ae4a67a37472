//! Wall-clock budget monitor for cooperative search abort

use std::time::{Duration, Instant};

use thiserror::Error;

/// Raised when the per-turn budget is exhausted.
///
/// Propagated through every recursive search frame via `?` and handled
/// only at the move-selection boundary, where it degrades to the best
/// answer found so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("search time budget exhausted")]
pub struct SearchTimeout;

/// Fraction of the budget usable by search. The remainder is left for
/// stack unwind and host overhead.
const BUDGET_MARGIN: f64 = 0.99;

/// Deadline captured once at the top of a move selection.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    start: Instant,
    cutoff: Duration,
}

impl Deadline {
    /// Capture the current instant against the given per-turn budget
    #[must_use]
    pub fn start(budget: Duration) -> Self {
        Self {
            start: Instant::now(),
            cutoff: budget.mul_f64(BUDGET_MARGIN),
        }
    }

    /// Cooperative abort check, called at the top of every loop iteration
    /// and every recursive descent
    #[inline]
    pub fn check(&self) -> Result<(), SearchTimeout> {
        if self.start.elapsed() >= self.cutoff {
            Err(SearchTimeout)
        } else {
            Ok(())
        }
    }

    /// Elapsed wall-clock time since capture
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
