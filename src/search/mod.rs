//! Search module
//!
//! Contains:
//! - Candidate generation and move ordering
//! - Transposition table for caching search results
//! - Urgent replies checked before any tree search
//! - VCF threat search for forced wins
//! - Alpha-beta search with iterative deepening

pub mod alphabeta;
pub mod emergency;
pub mod movegen;
pub mod threat;
pub mod tt;

pub use alphabeta::{
    is_tactical, is_win_score, SearchConfig, SearchResult, SearchStats, Searcher, INF, WIN_SCORE,
};
pub use emergency::{find_emergency, Emergency};
pub use movegen::{
    beam_width, candidate_cells, fallback_move, generate_moves, move_limit, ordered_moves,
    ScoredMove,
};
pub use threat::{four_moves, ThreatResult, ThreatSearcher};
pub use tt::{EntryType, TTEntry, TTStats, TranspositionTable, DEFAULT_TT_ENTRIES};
