//! Evaluation module
//!
//! Contains:
//! - Score type with win/loss/draw sentinels
//! - Window-scanning positional heuristic

pub mod heuristic;
pub mod score;

pub use heuristic::evaluate;
pub use score::{terminal_score, Score, DRAW, LOSS, WIN};
