//! Search module
//!
//! Contains:
//! - Wall-clock deadline monitor with cooperative abort
//! - Bounded insertion-ordered memoization table
//! - Alpha-beta search with iterative deepening

pub mod alphabeta;
pub mod cache;
pub mod deadline;

pub use alphabeta::Searcher;
pub use cache::{TranspositionCache, BYTES_PER_ENTRY, DEFAULT_CACHE_BYTES};
pub use deadline::{Deadline, SearchTimeout};
