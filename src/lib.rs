//! Renju AI engine for the 15x15 board
//!
//! Five in a row wins. Black may not play overlines, double-fours or
//! double-threes; White has no restrictions and wins with any line of five
//! or more.
//!
//! # Architecture
//!
//! The engine is organized into several modules:
//! - [`board`]: Board representation with bitboards and Zobrist hashing
//! - [`rules`]: Win detection and forbidden moves
//! - [`eval`]: Pattern scanning and position evaluation
//! - [`search`]: Move ordering, transposition table, VCF and alpha-beta
//! - [`engine`]: Facade integrating all components
//!
//! # Quick Start
//!
//! ```
//! use renju::{AIEngine, Difficulty, Stone};
//!
//! let mut engine = AIEngine::new(Difficulty::Easy);
//! engine.apply_move(7, 7, Stone::Black);
//!
//! // AI responds as White
//! let result = engine.best_move(Stone::White);
//! if let Some(pos) = result.pos {
//!     engine.apply_move(pos.row as i32, pos.col as i32, Stone::White);
//!     println!("AI plays at {pos}: {}", result.rationale);
//! }
//! ```
//!
//! # Search Priority
//!
//! 1. Immediate win, forced block or answer to an open three
//! 2. VCF - Victory by Continuous Fours
//! 3. Alpha-Beta search with transposition table
//! 4. Fallback to the free cell nearest the center

pub mod board;
pub mod engine;
pub mod error;
pub mod eval;
pub mod rules;
pub mod search;

// Re-export commonly used types for convenience
pub use board::{Board, Grid, Pos, Stone, BOARD_SIZE, CENTER};
pub use engine::{AIEngine, BestMove, Difficulty, SearchKind};
pub use error::{ColorError, DifficultyError, GridError};
pub use eval::EvalMode;
pub use rules::ForbiddenKind;
pub use search::SearchConfig;
