//! Engine facade integrating all search components
//!
//! The engine owns the game board and a searcher whose transposition table
//! lives across moves until the next reset. A move request goes through a fixed priority order:
//!
//! 1. **Emergency**: an immediate win, a block of the opponent's five, or an
//!    answer to an opponent open three
//! 2. **VCF (Victory by Continuous Fours)**: a forced win made only of fours
//! 3. **Alpha-Beta**: iterative deepening with the transposition table
//! 4. **Fallback**: center, then outward, when the search returns nothing
//!
//! # Example
//!
//! ```
//! use renju::{AIEngine, Difficulty, Stone};
//!
//! let mut engine = AIEngine::new(Difficulty::Easy);
//! assert!(engine.apply_move(7, 7, Stone::Black));
//!
//! let result = engine.best_move(Stone::White);
//! println!("Best move: {:?}", result.pos);
//! println!("Search type: {:?}", result.kind);
//! println!("Why: {}", result.rationale);
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Grid, Pos, Stone};
use crate::error::DifficultyError;
use crate::eval::{evaluate_with, EvalMode, PatternScore};
use crate::rules::{check_winner, forbidden_kind, ForbiddenKind};
use crate::search::{
    fallback_move, find_emergency, Emergency, SearchConfig, SearchStats, Searcher, TTStats,
    ThreatSearcher, DEFAULT_TT_ENTRIES, WIN_SCORE,
};

/// Depth and time presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    #[default]
    Hard,
    Master,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Master,
    ];

    pub fn max_depth(self) -> i8 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 6,
            Difficulty::Master => 8,
        }
    }

    pub fn time_limit(self) -> Duration {
        let ms = match self {
            Difficulty::Easy => 1000,
            Difficulty::Medium => 2000,
            Difficulty::Hard => 3000,
            Difficulty::Master => 5000,
        };
        Duration::from_millis(ms)
    }

    /// Search configuration for this preset with every feature enabled.
    pub fn config(self) -> SearchConfig {
        SearchConfig::new(self.max_depth(), self.time_limit())
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Master => "master",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = DifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Difficulty::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DifficultyError(s.to_string()))
    }
}

/// Which stage of the engine produced the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchKind {
    /// Immediate win, forced block or open-three answer
    Emergency,
    /// Forced win via continuous fours
    ForcedWin,
    AlphaBeta,
    /// Search produced nothing usable
    Fallback,
    /// The board is full
    GameOver,
}

/// Recommended move with diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestMove {
    /// `None` only when the board is full
    pub pos: Option<Pos>,
    /// Score for the side to move
    pub score: i32,
    pub depth: i8,
    pub nodes: u64,
    /// Lifetime transposition table hit rate, `0.0..=1.0`
    pub cache_hit_rate: f64,
    pub rationale: String,
    pub kind: SearchKind,
    pub time_ms: u64,
}

impl BestMove {
    #[inline]
    fn game_over(time_ms: u64) -> Self {
        Self {
            pos: None,
            score: 0,
            depth: 0,
            nodes: 0,
            cache_hit_rate: 0.0,
            rationale: "board is full".to_string(),
            kind: SearchKind::GameOver,
            time_ms,
        }
    }

    #[inline]
    fn emergency(emergency: Emergency, score: i32, time_ms: u64) -> Self {
        Self {
            pos: Some(emergency.pos()),
            score,
            depth: 0,
            nodes: 1,
            cache_hit_rate: 0.0,
            rationale: emergency.to_string(),
            kind: SearchKind::Emergency,
            time_ms,
        }
    }

    #[inline]
    fn forced_win(pos: Pos, fours: usize, nodes: u64, time_ms: u64) -> Self {
        Self {
            pos: Some(pos),
            score: WIN_SCORE - fours as i32,
            depth: 0,
            nodes,
            cache_hit_rate: 0.0,
            rationale: format!("forced win in {fours} fours"),
            kind: SearchKind::ForcedWin,
            time_ms,
        }
    }
}

/// Score tier of a search result.
pub fn rationale_tier(score: i32) -> &'static str {
    if score > PatternScore::FIVE / 2 {
        "forced win"
    } else if score > PatternScore::OPEN_FOUR / 2 {
        "strong attack"
    } else if score > PatternScore::OPEN_THREE / 2 {
        "building chances"
    } else if score > 0 {
        "slight edge"
    } else if score < -PatternScore::FIVE / 2 {
        "defending"
    } else {
        "balanced"
    }
}

fn search_rationale(score: i32, depth: i8, stats: &SearchStats, hit_rate: f64) -> String {
    format!(
        "{}: depth {}, {} nodes, {} cutoffs, {} null-move cutoffs, {} threat extensions, cache hit rate {:.1}%",
        rationale_tier(score),
        depth,
        stats.nodes,
        stats.cutoffs,
        stats.null_cutoffs,
        stats.extensions,
        hit_rate * 100.0,
    )
}

/// Game engine: board state, search configuration and a persistent
/// transposition table.
pub struct AIEngine {
    board: Board,
    searcher: Searcher,
    config: SearchConfig,
    difficulty: Difficulty,
}

impl AIEngine {
    /// Create an engine on an empty board with the given preset.
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            board: Board::new(),
            searcher: Searcher::new(DEFAULT_TT_ENTRIES),
            config: difficulty.config(),
            difficulty,
        }
    }

    /// Create an engine with an explicit configuration and table size.
    ///
    /// The reported difficulty stays at the default preset.
    pub fn with_config(config: SearchConfig, tt_entries: usize) -> Self {
        Self {
            board: Board::new(),
            searcher: Searcher::new(tt_entries),
            config,
            difficulty: Difficulty::default(),
        }
    }

    /// Let another thread stop a running search early.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.searcher = self.searcher.with_cancel_flag(flag);
        self
    }

    /// Clear the board and the transposition table for a new game.
    pub fn reset(&mut self) {
        self.board.clear();
        self.searcher.clear_tt();
    }

    /// Replace the board with `grid`.
    pub fn sync_from_grid(&mut self, grid: &Grid) {
        self.board = Board::from_grid(grid);
    }

    /// Place a stone at row `x`, column `y`.
    ///
    /// Returns `false` without touching the board when the cell is off the
    /// board or occupied, or when `color` is `Empty`. Forbidden points are
    /// not rejected here; ask [`AIEngine::forbidden_kind`] first.
    pub fn apply_move(&mut self, x: i32, y: i32, color: Stone) -> bool {
        match Pos::try_new(x, y) {
            Some(pos) => self.board.place(pos, color),
            None => false,
        }
    }

    /// Find the best move for `color` on the current board.
    pub fn best_move(&mut self, color: Stone) -> BestMove {
        let start = Instant::now();
        if self.board.is_full() {
            info!("board is full, no move for {color:?}");
            return BestMove::game_over(elapsed_ms(start));
        }

        let result = self.choose(color, start);
        if let Some(pos) = result.pos {
            info!(
                "{:?} plays {} ({:?}, score {}, depth {}, {} nodes, {}ms)",
                color, pos, result.kind, result.score, result.depth, result.nodes, result.time_ms
            );
        }
        result
    }

    fn choose(&mut self, color: Stone, start: Instant) -> BestMove {
        let mut work = self.board.clone();

        if let Some(emergency) = find_emergency(&mut work, color) {
            let score = match emergency {
                Emergency::Win(_) => WIN_SCORE,
                _ => work
                    .scoped_place(emergency.pos(), color)
                    .map_or(0, |placed| evaluate_with(&placed, color, self.config.evaluation)),
            };
            return BestMove::emergency(emergency, score, elapsed_ms(start));
        }

        if self.config.forced_win_plies > 0 {
            let mut threats = ThreatSearcher::new(self.config.forced_win_plies);
            let vcf = threats.search_vcf(&mut work, color);
            if let Some(pos) = vcf.first_move() {
                return BestMove::forced_win(
                    pos,
                    vcf.winning_sequence.len(),
                    threats.nodes(),
                    elapsed_ms(start),
                );
            }
        }

        let result = self.searcher.search(&self.board, color, &self.config);
        let hit_rate = self.searcher.hit_rate();
        if let Some(pos) = result.best_move {
            return BestMove {
                pos: Some(pos),
                score: result.score,
                depth: result.depth,
                nodes: result.nodes,
                cache_hit_rate: hit_rate,
                rationale: search_rationale(result.score, result.depth, &result.stats, hit_rate),
                kind: SearchKind::AlphaBeta,
                time_ms: elapsed_ms(start),
            };
        }

        let pos = fallback_move(&self.board, color);
        warn!("search produced no move for {color:?}, falling back to {pos:?}");
        BestMove {
            pos,
            score: 0,
            depth: result.depth,
            nodes: result.nodes,
            cache_hit_rate: hit_rate,
            rationale: "no searched move, nearest free cell to the center".to_string(),
            kind: SearchKind::Fallback,
            time_ms: elapsed_ms(start),
        }
    }

    /// Switch preset. Evaluation mode and cached results are kept.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.config.max_depth = difficulty.max_depth();
        self.config.time_limit = difficulty.time_limit();
    }

    pub fn set_eval_mode(&mut self, mode: EvalMode) {
        self.config.evaluation = mode;
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Copy of the current grid.
    pub fn board_snapshot(&self) -> Grid {
        self.board.snapshot()
    }

    /// Text rendering of the board, one row per line.
    pub fn render(&self) -> String {
        self.board.to_string()
    }

    /// Color holding five in a row, if any.
    pub fn winner(&self) -> Option<Stone> {
        check_winner(&self.board)
    }

    pub fn is_game_over(&self) -> bool {
        self.winner().is_some() || self.board.is_full()
    }

    /// Why `color` may not play at row `x`, column `y`, if it is forbidden.
    pub fn forbidden_kind(&self, x: i32, y: i32, color: Stone) -> Option<ForbiddenKind> {
        let pos = Pos::try_new(x, y)?;
        forbidden_kind(&self.board, pos, color)
    }

    pub fn tt_stats(&self) -> TTStats {
        self.searcher.tt_stats()
    }
}

impl Default for AIEngine {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BOARD_SIZE;

    fn setup_engine(setup: &[(u8, u8, Stone)]) -> AIEngine {
        let mut engine = AIEngine::new(Difficulty::Easy);
        for &(row, col, stone) in setup {
            assert!(engine.apply_move(row as i32, col as i32, stone));
        }
        engine
    }

    /// Pairs of equal stones along rows, alternating every row: no line
    /// ever holds more than two in a row.
    fn drawn_grid() -> Grid {
        let mut grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
        for (r, row) in grid.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = if (c / 2 + r) % 2 == 0 {
                    Stone::Black
                } else {
                    Stone::White
                };
            }
        }
        grid
    }

    #[test]
    fn test_empty_board_plays_center() {
        let mut engine = AIEngine::new(Difficulty::Easy);
        let result = engine.best_move(Stone::Black);
        assert_eq!(result.pos, Some(Pos::new(7, 7)));
        assert_eq!(result.kind, SearchKind::AlphaBeta);
    }

    #[test]
    fn test_immediate_win_is_emergency() {
        let mut engine = setup_engine(&[
            (4, 4, Stone::White),
            (5, 5, Stone::White),
            (6, 6, Stone::White),
            (7, 7, Stone::White),
            (3, 3, Stone::Black),
            (0, 14, Stone::Black),
        ]);
        let result = engine.best_move(Stone::White);
        assert_eq!(result.pos, Some(Pos::new(8, 8)));
        assert_eq!(result.kind, SearchKind::Emergency);
        assert_eq!(result.score, WIN_SCORE);
        assert_eq!(result.rationale, "immediate win");
    }

    #[test]
    fn test_open_four_block_lowest_cell() {
        let mut engine = setup_engine(&[
            (7, 5, Stone::White),
            (7, 6, Stone::White),
            (7, 7, Stone::White),
            (7, 8, Stone::White),
            (3, 3, Stone::Black),
            (12, 12, Stone::Black),
        ]);
        let result = engine.best_move(Stone::Black);
        assert_eq!(result.pos, Some(Pos::new(7, 4)));
        assert_eq!(result.rationale, "blocks an immediate loss");
    }

    #[test]
    fn test_forced_win_before_search() {
        let mut engine = setup_engine(&[
            (7, 5, Stone::White),
            (7, 6, Stone::White),
            (7, 7, Stone::White),
            (5, 8, Stone::White),
            (6, 8, Stone::White),
            (7, 4, Stone::Black),
            (2, 2, Stone::Black),
        ]);
        let result = engine.best_move(Stone::White);
        assert_eq!(result.kind, SearchKind::ForcedWin);
        assert_eq!(result.pos, Some(Pos::new(7, 8)));
        assert!(result.rationale.starts_with("forced win"));
    }

    #[test]
    fn test_full_board_returns_no_move() {
        let mut engine = AIEngine::new(Difficulty::Easy);
        engine.sync_from_grid(&drawn_grid());
        assert!(engine.board().is_full());
        assert_eq!(engine.winner(), None);
        assert!(engine.is_game_over());

        let result = engine.best_move(Stone::Black);
        assert_eq!(result.pos, None);
        assert_eq!(result.kind, SearchKind::GameOver);
    }

    #[test]
    fn test_apply_move_rejects_illegal() {
        let mut engine = AIEngine::new(Difficulty::Easy);
        assert!(!engine.apply_move(-1, 3, Stone::Black));
        assert!(!engine.apply_move(3, 15, Stone::Black));
        assert!(!engine.apply_move(3, 3, Stone::Empty));
        assert!(engine.apply_move(3, 3, Stone::Black));
        assert!(!engine.apply_move(3, 3, Stone::White));
        assert_eq!(engine.board_snapshot()[3][3], Stone::Black);
        assert_eq!(engine.board().move_count(), 1);
    }

    #[test]
    fn test_reset_clears_cache() {
        let mut engine = setup_engine(&[(7, 7, Stone::Black), (8, 8, Stone::White)]);
        let _ = engine.best_move(Stone::Black);
        assert!(engine.tt_stats().used > 0);

        engine.reset();
        assert_eq!(engine.tt_stats().used, 0);
        assert_eq!(engine.tt_stats().hits, 0);
        assert!(engine.board().is_board_empty());
    }

    #[test]
    fn test_winner_and_reset() {
        let mut engine = setup_engine(&[
            (7, 3, Stone::White),
            (7, 4, Stone::White),
            (7, 5, Stone::White),
            (7, 6, Stone::White),
            (7, 7, Stone::White),
        ]);
        assert_eq!(engine.winner(), Some(Stone::White));
        assert!(engine.is_game_over());

        engine.reset();
        assert_eq!(engine.winner(), None);
        assert!(engine.board().is_board_empty());
        assert_eq!(engine.tt_stats().used, 0);
    }

    #[test]
    fn test_forbidden_kind_through_facade() {
        let engine = setup_engine(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (5, 7, Stone::Black),
            (6, 7, Stone::Black),
        ]);
        assert_eq!(
            engine.forbidden_kind(7, 7, Stone::Black),
            Some(ForbiddenKind::DoubleThree)
        );
        assert_eq!(engine.forbidden_kind(7, 7, Stone::White), None);
        assert_eq!(engine.forbidden_kind(20, 7, Stone::Black), None);
    }

    #[test]
    fn test_difficulty_parse_and_presets() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" MASTER ".parse::<Difficulty>(), Ok(Difficulty::Master));
        assert_eq!(
            "brutal".parse::<Difficulty>(),
            Err(DifficultyError("brutal".to_string()))
        );
        assert_eq!(Difficulty::default(), Difficulty::Hard);
        assert_eq!(Difficulty::Hard.max_depth(), 6);
        assert_eq!(Difficulty::Master.time_limit(), Duration::from_millis(5000));
        assert_eq!(Difficulty::Medium.to_string(), "medium");
    }

    #[test]
    fn test_set_difficulty_keeps_cache() {
        let mut engine = setup_engine(&[(7, 7, Stone::Black), (8, 8, Stone::White)]);
        engine.set_eval_mode(EvalMode::Adaptive);
        let _ = engine.best_move(Stone::Black);
        let used = engine.tt_stats().used;
        assert!(used > 0);

        engine.set_difficulty(Difficulty::Master);
        assert_eq!(engine.tt_stats().used, used);
        assert_eq!(engine.config().max_depth, 8);
        assert_eq!(engine.config().evaluation, EvalMode::Adaptive);
        assert_eq!(engine.difficulty(), Difficulty::Master);
    }

    #[test]
    fn test_rationale_tiers() {
        assert_eq!(rationale_tier(WIN_SCORE), "forced win");
        assert_eq!(rationale_tier(PatternScore::OPEN_FOUR), "strong attack");
        assert_eq!(rationale_tier(PatternScore::OPEN_THREE), "building chances");
        assert_eq!(rationale_tier(1), "slight edge");
        assert_eq!(rationale_tier(0), "balanced");
        assert_eq!(rationale_tier(-WIN_SCORE), "defending");
    }

    #[test]
    fn test_search_rationale_lists_stats() {
        let mut engine = setup_engine(&[(7, 7, Stone::Black), (8, 8, Stone::White)]);
        let result = engine.best_move(Stone::Black);
        assert_eq!(result.kind, SearchKind::AlphaBeta);
        assert!(result.rationale.contains("nodes"));
        assert!(result.rationale.contains("cache hit rate"));
        assert!(result.depth >= 1);
    }

    #[test]
    fn test_best_move_serializes() {
        let mut engine = setup_engine(&[
            (4, 4, Stone::White),
            (5, 5, Stone::White),
            (6, 6, Stone::White),
            (7, 7, Stone::White),
        ]);
        let result = engine.best_move(Stone::White);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"kind\":\"emergency\""));
        assert!(json.contains("\"pos\""));
    }
}
