//! Score type and terminal sentinels

use crate::board::{Disc, GameState};

/// Signed evaluation score.
///
/// Heuristic values are only meaningful relative to sibling moves within
/// one search; the sentinels below carry absolute meaning. The heuristic
/// range is kept strictly inside the sentinel magnitudes (see
/// [`crate::eval::evaluate`]).
pub type Score = i64;

/// Proven win for the evaluated side
pub const WIN: Score = Score::MAX;
/// Proven loss for the evaluated side
pub const LOSS: Score = Score::MIN;
/// Proven draw
pub const DRAW: Score = 0;

/// Map a terminal state to its sentinel from `side`'s perspective.
///
/// Returns `None` while the game is open.
#[inline]
#[must_use]
pub fn terminal_score(state: GameState, side: Disc) -> Option<Score> {
    match state {
        GameState::Open => None,
        GameState::Draw => Some(DRAW),
        GameState::Won(winner) if winner == side => Some(WIN),
        GameState::Won(_) => Some(LOSS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_has_no_sentinel() {
        assert_eq!(terminal_score(GameState::Open, Disc::First), None);
    }

    #[test]
    fn test_win_loss_are_side_relative() {
        let state = GameState::Won(Disc::Second);
        assert_eq!(terminal_score(state, Disc::Second), Some(WIN));
        assert_eq!(terminal_score(state, Disc::First), Some(LOSS));
    }

    #[test]
    fn test_draw_is_zero_for_both_sides() {
        assert_eq!(terminal_score(GameState::Draw, Disc::First), Some(DRAW));
        assert_eq!(terminal_score(GameState::Draw, Disc::Second), Some(DRAW));
    }
}
