//! Position evaluation
//!
//! - Line pattern detection and scoring
//! - Composite heuristic with defence weighting
//! - Phase-aware adaptive variant

pub mod adaptive;
pub mod heuristic;
pub mod patterns;

pub use adaptive::evaluate_adaptive;
pub use heuristic::{
    completes_five, evaluate, evaluate_with, has_critical_threat, has_four_threat, has_open_four,
    has_open_three, is_endgame, is_opening, position_value, winning_cells, EvalMode,
};
pub use patterns::{PatternCounts, PatternKind, PatternScore};
