//! Error types for text input parsing
//!
//! Board operations themselves never fail with an error: illegal placements
//! are reported as `false`. These errors only arise when turning user text
//! (board files, CLI flags) into engine values.

use thiserror::Error;

/// Failure to parse a board from its text rendering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("expected 15 board rows, found {found}")]
    RowCount { found: usize },
    #[error("row {row} has {found} cells, expected 15")]
    RowLength { row: usize, found: usize },
    #[error("invalid cell symbol {symbol:?} at ({row}, {col})")]
    InvalidSymbol { row: usize, col: usize, symbol: char },
}

/// Unknown difficulty preset name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown difficulty `{0}` (expected easy, medium, hard or master)")]
pub struct DifficultyError(pub String);

/// Unknown stone color name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown color `{0}` (expected black or white)")]
pub struct ColorError(pub String);
