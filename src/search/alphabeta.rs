//! Alpha-beta search with iterative deepening and transposition table
//!
//! Negamax with principal-variation windows, null-move pruning at quiet
//! nodes and a threat extension that keeps searching past the nominal depth
//! while either side holds an open three or a four.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use renju::board::{Board, Pos, Stone};
//! use renju::search::{SearchConfig, Searcher};
//!
//! let mut board = Board::new();
//! board.place(Pos::new(7, 7), Stone::Black);
//!
//! let mut searcher = Searcher::new(1 << 12);
//! let config = SearchConfig::new(2, Duration::from_millis(2000));
//! let result = searcher.search(&board, Stone::White, &config);
//! assert!(result.best_move.is_some());
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::board::{Board, Pos, Stone, ZOBRIST};
use crate::eval::{evaluate_with, has_critical_threat, EvalMode, PatternCounts};
use crate::rules::has_five_at_pos;

use super::movegen::{beam_width, ordered_moves};
use super::threat::DEFAULT_VCF_PLIES;
use super::tt::{EntryType, TTStats, TranspositionTable};

/// Score of a completed five, less the ply it happens at.
pub const WIN_SCORE: i32 = 100_000_000;
/// Bound for alpha-beta windows
pub const INF: i32 = 1_000_000_000;
/// Anything at least this large is a forced win or loss.
const WIN_THRESHOLD: i32 = WIN_SCORE - 1_000;

/// Plies a threat extension may run past the nominal depth
const EXTENSION_PLIES: u8 = 4;
/// Remaining depth granted by a threat extension
const EXTENSION_DEPTH: i8 = 2;
const NULL_MOVE_REDUCTION: i8 = 3;
const POST_EXTENSION_PLIES: i8 = 4;
const POST_EXTENSION_MAX_DEPTH: i8 = 12;

/// Everything that shapes one search. Passed by reference to every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    pub max_depth: i8,
    pub time_limit: Duration,
    pub null_move: bool,
    /// Threat extension at the leaves and the post-loop re-search
    pub threat_extension: bool,
    pub transposition: bool,
    /// Attacker moves for the forced-win check, 0 disables it
    pub forced_win_plies: u8,
    pub evaluation: EvalMode,
}

impl SearchConfig {
    pub fn new(max_depth: i8, time_limit: Duration) -> Self {
        Self {
            max_depth,
            time_limit,
            ..Self::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: 6,
            time_limit: Duration::from_millis(3000),
            null_move: true,
            threat_extension: true,
            transposition: true,
            forced_win_plies: DEFAULT_VCF_PLIES,
            evaluation: EvalMode::Standard,
        }
    }
}

/// Search statistics for diagnostics and tuning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    /// Beta cutoffs (fail-high)
    pub cutoffs: u64,
    pub null_cutoffs: u64,
    /// Leaves that were searched deeper because of a threat
    pub extensions: u64,
    /// Post-loop re-searches of the chosen move
    pub post_searches: u64,
    pub tt_probes: u64,
    /// Probes that returned a usable score
    pub tt_hits: u64,
}

impl SearchStats {
    pub fn tt_hit_rate(&self) -> f64 {
        if self.tt_probes == 0 {
            0.0
        } else {
            self.tt_hits as f64 / self.tt_probes as f64
        }
    }
}

/// Search result containing the best move found and associated statistics.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Pos>,
    /// Score of the best move for the side that searched
    pub score: i32,
    /// Deepest completed iteration
    pub depth: i8,
    pub nodes: u64,
    pub stats: SearchStats,
    /// The post-loop extension produced the score
    pub extended: bool,
    pub timed_out: bool,
}

impl SearchResult {
    fn empty() -> Self {
        Self {
            best_move: None,
            score: 0,
            depth: 0,
            nodes: 0,
            stats: SearchStats::default(),
            extended: false,
            timed_out: false,
        }
    }
}

/// Forced win or loss rather than a heuristic score.
#[inline]
pub fn is_win_score(score: i32) -> bool {
    score.abs() >= WIN_THRESHOLD
}

/// Either side holds an open three or a four.
pub fn is_tactical(board: &Board) -> bool {
    PatternCounts::scan(board, Stone::Black).is_threatening()
        || PatternCounts::scan(board, Stone::White).is_threatening()
}

/// Best move of one root iteration
struct RootResult {
    best_move: Option<Pos>,
    score: i32,
}

/// Alpha-beta searcher owning the transposition table.
pub struct Searcher {
    tt: TranspositionTable,
    stats: SearchStats,
    start: Instant,
    cancel: Option<Arc<AtomicBool>>,
    stopped: bool,
    /// Threat extensions stop at this ply
    ply_limit: u8,
}

impl Searcher {
    /// Create a searcher with a table of at least `tt_entries` slots.
    #[must_use]
    pub fn new(tt_entries: usize) -> Self {
        Self {
            tt: TranspositionTable::new(tt_entries),
            stats: SearchStats::default(),
            start: Instant::now(),
            cancel: None,
            stopped: false,
            ply_limit: 0,
        }
    }

    /// Stop early once `flag` is set. Checked at the same points as the clock.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Iterative deepening from depth 1 up to `config.max_depth`.
    ///
    /// Stops on a forced-win score, on timeout, or once a third of the time
    /// budget is spent. A timed-out iteration is discarded unless it is the
    /// first one.
    pub fn search(&mut self, board: &Board, color: Stone, config: &SearchConfig) -> SearchResult {
        self.stats = SearchStats::default();
        self.start = Instant::now();
        self.stopped = false;

        let mut work = board.clone();
        let mut result = SearchResult::empty();

        for depth in 1..=config.max_depth.max(1) {
            let root = self.search_root(&mut work, color, depth, config);
            if root.best_move.is_none() && !self.stopped {
                // Nothing legal to play
                break;
            }

            if self.stopped {
                if result.best_move.is_none() {
                    result.best_move = root.best_move.or_else(|| {
                        ordered_moves(&mut work, color, 0).first().copied()
                    });
                    if root.best_move.is_some() {
                        result.score = root.score;
                    }
                }
                warn!(
                    "search stopped during depth {depth} after {}ms",
                    self.start.elapsed().as_millis()
                );
                break;
            }

            result.best_move = root.best_move;
            result.score = root.score;
            result.depth = depth;
            debug!(
                "depth {depth}: best {:?} score {} nodes {} ({}ms)",
                root.best_move,
                root.score,
                self.stats.nodes,
                self.start.elapsed().as_millis()
            );

            if is_win_score(root.score) || self.start.elapsed() > config.time_limit / 3 {
                break;
            }
        }

        if config.threat_extension
            && !self.stopped
            && !is_win_score(result.score)
            && self.start.elapsed() < config.time_limit
            && (is_tactical(&work) || has_critical_threat(&work, color))
        {
            if let Some(best) = result.best_move {
                let depth = (result.depth + POST_EXTENSION_PLIES).min(POST_EXTENSION_MAX_DEPTH);
                if depth > result.depth {
                    self.stats.post_searches += 1;
                    if let Some(score) = self.extend_move(&mut work, color, best, depth, config) {
                        debug!("post-loop extension to depth {depth}: score {score}");
                        if score > result.score {
                            result.score = score;
                            result.depth = depth;
                            result.extended = true;
                        }
                    }
                }
            }
        }

        result.timed_out = self.stopped;
        result.nodes = self.stats.nodes;
        result.stats = self.stats;
        result
    }

    /// Re-search a single root move at `depth`. `None` when interrupted.
    fn extend_move(
        &mut self,
        board: &mut Board,
        color: Stone,
        pos: Pos,
        depth: i8,
        config: &SearchConfig,
    ) -> Option<i32> {
        self.ply_limit = (depth as u8).saturating_add(EXTENSION_PLIES);
        let mut child = board.scoped_place(pos, color)?;
        let score = -self.negamax(
            &mut child,
            color.opponent(),
            depth - 1,
            -INF,
            INF,
            true,
            1,
            Some(pos),
            config,
        );
        (!self.stopped).then_some(score)
    }

    /// Root-level search with a full window.
    fn search_root(&mut self, board: &mut Board, color: Stone, depth: i8, config: &SearchConfig) -> RootResult {
        self.ply_limit = (depth.max(0) as u8).saturating_add(EXTENSION_PLIES);
        let key = board.fingerprint() ^ ZOBRIST.side_key(color);

        let mut moves = ordered_moves(board, color, 0);
        moves.truncate(beam_width(0, is_tactical(board)));
        if config.transposition {
            self.tt_move_first(key, &mut moves);
        }

        let mut alpha = -INF;
        let mut best_move = None;
        let mut best_score = -INF;

        for (i, &pos) in moves.iter().enumerate() {
            let score = match board.scoped_place(pos, color) {
                Some(mut child) => self.search_child(
                    &mut child,
                    color.opponent(),
                    depth - 1,
                    alpha,
                    INF,
                    i == 0,
                    1,
                    pos,
                    config,
                ),
                None => continue,
            };
            if self.stopped {
                break;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            alpha = alpha.max(score);
        }

        if config.transposition && !self.stopped && best_move.is_some() {
            self.tt.store(key, depth, best_score, EntryType::Exact, best_move);
        }

        RootResult {
            best_move,
            score: best_score,
        }
    }

    /// Search one child: full window for the first move, a null window
    /// with a re-search on fail-high for the rest.
    #[allow(clippy::too_many_arguments)]
    fn search_child(
        &mut self,
        child: &mut Board,
        to_move: Stone,
        depth: i8,
        alpha: i32,
        beta: i32,
        first: bool,
        ply: u8,
        mov: Pos,
        config: &SearchConfig,
    ) -> i32 {
        if first {
            return -self.negamax(child, to_move, depth, -beta, -alpha, true, ply, Some(mov), config);
        }
        let score =
            -self.negamax(child, to_move, depth, -alpha - 1, -alpha, true, ply, Some(mov), config);
        if score > alpha && score < beta && !self.stopped {
            -self.negamax(child, to_move, depth, -beta, -alpha, true, ply, Some(mov), config)
        } else {
            score
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn negamax(
        &mut self,
        board: &mut Board,
        color: Stone,
        depth: i8,
        mut alpha: i32,
        beta: i32,
        allow_null: bool,
        ply: u8,
        last_move: Option<Pos>,
        config: &SearchConfig,
    ) -> i32 {
        self.stats.nodes += 1;
        if self.poll_stop(config) {
            return 0;
        }

        if let Some(last) = last_move {
            if has_five_at_pos(board, last, color.opponent()) {
                return -(WIN_SCORE - i32::from(ply));
            }
        }
        if board.is_full() {
            return evaluate_with(board, color, config.evaluation);
        }

        let key = board.fingerprint() ^ ZOBRIST.side_key(color);
        if config.transposition {
            self.stats.tt_probes += 1;
            if let Some(score) = self
                .tt
                .lookup(key)
                .and_then(|entry| entry.usable_score(depth, alpha, beta))
            {
                self.stats.tt_hits += 1;
                return score;
            }
        }

        let (depth, tactical) = if depth <= 0 {
            if config.threat_extension && ply < self.ply_limit && is_tactical(board) {
                self.stats.extensions += 1;
                (EXTENSION_DEPTH, true)
            } else {
                return evaluate_with(board, color, config.evaluation);
            }
        } else {
            (depth, is_tactical(board))
        };

        if config.null_move && allow_null && depth >= 3 && !tactical && beta - alpha == 1 {
            let score = -self.negamax(
                board,
                color.opponent(),
                depth - NULL_MOVE_REDUCTION,
                -beta,
                -beta + 1,
                false,
                ply + 1,
                None,
                config,
            );
            if self.stopped {
                return 0;
            }
            if score >= beta {
                self.stats.null_cutoffs += 1;
                return beta;
            }
        }

        let mut moves = ordered_moves(board, color, ply);
        moves.truncate(beam_width(ply, tactical));
        if moves.is_empty() {
            return evaluate_with(board, color, config.evaluation);
        }
        if config.transposition {
            self.tt_move_first(key, &mut moves);
        }

        let alpha_orig = alpha;
        let mut best_score = -INF;
        let mut best_move = None;

        for (i, &pos) in moves.iter().enumerate() {
            let score = match board.scoped_place(pos, color) {
                Some(mut child) => self.search_child(
                    &mut child,
                    color.opponent(),
                    depth - 1,
                    alpha,
                    beta,
                    i == 0,
                    ply + 1,
                    pos,
                    config,
                ),
                None => continue,
            };
            if self.stopped {
                return 0;
            }

            if score > best_score {
                best_score = score;
                best_move = Some(pos);
            }
            alpha = alpha.max(score);
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        if config.transposition {
            let entry_type = if best_score <= alpha_orig {
                EntryType::UpperBound
            } else if best_score >= beta {
                EntryType::LowerBound
            } else {
                EntryType::Exact
            };
            self.tt.store(key, depth, best_score, entry_type, best_move);
        }

        best_score
    }

    /// Move a stored best move to the front if it is among `moves`.
    fn tt_move_first(&self, key: u64, moves: &mut [Pos]) {
        if let Some(tt_move) = self.tt.get_best_move(key) {
            if let Some(i) = moves.iter().position(|&m| m == tt_move) {
                moves[..=i].rotate_right(1);
            }
        }
    }

    /// Clock and cancel flag. Once set, the stop sticks for the rest of the
    /// search.
    #[inline]
    fn poll_stop(&mut self, config: &SearchConfig) -> bool {
        if !self.stopped {
            let cancelled = self
                .cancel
                .as_ref()
                .is_some_and(|flag| flag.load(Ordering::Relaxed));
            if cancelled || self.start.elapsed() >= config.time_limit {
                self.stopped = true;
            }
        }
        self.stopped
    }

    /// Fraction of table lookups that found an entry.
    pub fn hit_rate(&self) -> f64 {
        self.tt.hit_rate()
    }

    #[must_use]
    pub fn tt_stats(&self) -> TTStats {
        self.tt.stats()
    }

    pub fn clear_tt(&mut self) {
        self.tt.clear();
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(super::tt::DEFAULT_TT_ENTRIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::evaluate;

    fn setup_board(setup: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(row, col, stone) in setup {
            board.place(Pos::new(row, col), stone);
        }
        board
    }

    fn plain_config(depth: i8) -> SearchConfig {
        SearchConfig {
            max_depth: depth,
            time_limit: Duration::from_secs(120),
            null_move: false,
            threat_extension: false,
            transposition: false,
            forced_win_plies: 0,
            evaluation: EvalMode::Standard,
        }
    }

    /// Full-width negamax over the same candidates and leaf rules.
    fn brute_force(board: &mut Board, color: Stone, depth: i8, ply: u8, last: Option<Pos>) -> i32 {
        if let Some(last) = last {
            if has_five_at_pos(board, last, color.opponent()) {
                return -(WIN_SCORE - i32::from(ply));
            }
        }
        if depth <= 0 || board.is_full() {
            return evaluate(board, color);
        }
        let tactical = is_tactical(board);
        let mut moves = ordered_moves(board, color, ply);
        moves.truncate(beam_width(ply, tactical));
        if moves.is_empty() {
            return evaluate(board, color);
        }
        moves
            .into_iter()
            .map(|pos| {
                let mut child = board.scoped_place(pos, color).unwrap();
                -brute_force(&mut child, color.opponent(), depth - 1, ply + 1, Some(pos))
            })
            .max()
            .unwrap()
    }

    #[test]
    fn test_matches_brute_force_negamax() {
        let board = setup_board(&[
            (7, 7, Stone::Black),
            (8, 8, Stone::White),
            (7, 8, Stone::Black),
        ]);
        let mut searcher = Searcher::new(1 << 10);
        let result = searcher.search(&board, Stone::White, &plain_config(2));
        let expected = brute_force(&mut board.clone(), Stone::White, 2, 0, None);

        assert_eq!(result.depth, 2);
        assert_eq!(result.score, expected);
        assert!(!result.timed_out);
    }

    #[test]
    fn test_search_finds_winning_move() {
        let board = setup_board(&[
            (3, 0, Stone::Black),
            (3, 1, Stone::Black),
            (3, 2, Stone::Black),
            (3, 3, Stone::Black),
            (8, 8, Stone::White),
            (8, 9, Stone::White),
            (9, 8, Stone::White),
        ]);
        let mut searcher = Searcher::new(1 << 12);
        let config = SearchConfig::new(2, Duration::from_secs(60));
        let result = searcher.search(&board, Stone::Black, &config);
        assert_eq!(result.best_move, Some(Pos::new(3, 4)));
        assert!(is_win_score(result.score));
        // A win ends the deepening loop right away
        assert_eq!(result.depth, 1);
    }

    #[test]
    fn test_search_blocks_opponent_win() {
        let board = setup_board(&[
            (9, 0, Stone::White),
            (9, 1, Stone::White),
            (9, 2, Stone::White),
            (9, 3, Stone::White),
            (10, 0, Stone::Black),
            (6, 6, Stone::Black),
        ]);
        let mut searcher = Searcher::new(1 << 12);
        let result = searcher.search(&board, Stone::Black, &plain_config(2));
        assert_eq!(result.best_move, Some(Pos::new(9, 4)));
        assert!(!is_win_score(result.score));
    }

    #[test]
    fn test_transposition_table_used() {
        let board = setup_board(&[(7, 7, Stone::Black), (7, 8, Stone::White)]);
        let mut searcher = Searcher::new(1 << 12);
        let config = SearchConfig {
            null_move: false,
            threat_extension: false,
            ..SearchConfig::new(3, Duration::from_secs(60))
        };
        let result = searcher.search(&board, Stone::Black, &config);
        assert!(result.stats.tt_probes > 0);
        assert!(searcher.tt_stats().used > 0);
        assert!(result.nodes > 0);

        searcher.clear_tt();
        assert_eq!(searcher.tt_stats().used, 0);
    }

    #[test]
    fn test_threat_extension_counts() {
        // White has an open three, so depth-0 leaves extend
        let board = setup_board(&[
            (7, 6, Stone::White),
            (7, 7, Stone::White),
            (7, 8, Stone::White),
            (6, 7, Stone::Black),
            (8, 7, Stone::Black),
        ]);
        let mut searcher = Searcher::new(1 << 12);
        let config = SearchConfig {
            threat_extension: true,
            time_limit: Duration::from_secs(5),
            ..plain_config(1)
        };
        let result = searcher.search(&board, Stone::Black, &config);
        assert!(result.stats.extensions > 0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_zero_time_still_returns_a_move() {
        let board = setup_board(&[(7, 7, Stone::Black)]);
        let mut searcher = Searcher::new(1 << 10);
        let config = SearchConfig::new(4, Duration::ZERO);
        let result = searcher.search(&board, Stone::White, &config);
        assert!(result.timed_out);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_cancel_flag_stops_search() {
        let flag = Arc::new(AtomicBool::new(true));
        let mut searcher = Searcher::new(1 << 10).with_cancel_flag(Arc::clone(&flag));
        let board = setup_board(&[(7, 7, Stone::Black)]);
        let result = searcher.search(&board, Stone::White, &SearchConfig::default());
        assert!(result.timed_out);
        assert!(result.best_move.is_some());
        assert_eq!(result.depth, 0);
    }

    /// Put the searcher in the state `search` sets up before a root call.
    fn prepare(searcher: &mut Searcher) {
        searcher.stats = SearchStats::default();
        searcher.start = Instant::now();
        searcher.stopped = false;
    }

    #[test]
    fn test_root_search_restores_board() {
        let mut board = setup_board(&[
            (7, 7, Stone::Black),
            (6, 8, Stone::White),
            (7, 8, Stone::Black),
        ]);
        let hash = board.fingerprint();
        let mut searcher = Searcher::new(1 << 12);
        let config = SearchConfig::new(3, Duration::from_secs(60));

        prepare(&mut searcher);
        let root = searcher.search_root(&mut board, Stone::White, 3, &config);
        assert!(root.best_move.is_some());
        assert!(!searcher.stopped);
        assert_eq!(board.fingerprint(), hash);
        assert_eq!(board.move_count(), 3);

        prepare(&mut searcher);
        searcher.ply_limit = 3 + EXTENSION_PLIES;
        let _ = searcher.negamax(&mut board, Stone::White, 3, -INF, INF, true, 0, None, &config);
        assert_eq!(board.fingerprint(), hash);
    }

    #[test]
    fn test_interrupted_search_restores_board() {
        let mut board = setup_board(&[
            (7, 7, Stone::Black),
            (8, 8, Stone::White),
            (8, 7, Stone::Black),
            (6, 6, Stone::White),
        ]);
        let hash = board.fingerprint();
        let mut searcher = Searcher::new(1 << 12);
        let config = SearchConfig::new(8, Duration::from_millis(5));

        prepare(&mut searcher);
        let _ = searcher.search_root(&mut board, Stone::Black, 8, &config);
        assert!(searcher.stopped);
        assert_eq!(board.fingerprint(), hash);
        assert_eq!(board.move_count(), 4);
    }

    #[test]
    fn test_null_move_prunes_quiet_positions() {
        let board = setup_board(&[
            (7, 7, Stone::Black),
            (8, 8, Stone::White),
            (8, 7, Stone::Black),
            (6, 6, Stone::White),
        ]);
        assert!(!is_tactical(&board));
        let config = SearchConfig {
            threat_extension: false,
            forced_win_plies: 0,
            ..SearchConfig::new(6, Duration::from_secs(600))
        };

        let with_null = Searcher::new(1 << 16).search(&board, Stone::Black, &config);
        assert_eq!(with_null.depth, 6);
        assert!(with_null.stats.null_cutoffs > 0);

        let without = SearchConfig {
            null_move: false,
            ..config
        };
        let plain = Searcher::new(1 << 16).search(&board, Stone::Black, &without);
        assert_eq!(plain.stats.null_cutoffs, 0);
        assert_ne!(plain.stats.nodes, with_null.stats.nodes);
    }

    #[test]
    fn test_null_move_skipped_below_depth_three() {
        let board = setup_board(&[(7, 7, Stone::Black), (8, 8, Stone::White)]);
        let config = SearchConfig {
            threat_extension: false,
            ..SearchConfig::new(2, Duration::from_secs(60))
        };
        let result = Searcher::new(1 << 12).search(&board, Stone::Black, &config);
        assert_eq!(result.stats.null_cutoffs, 0);
    }

    #[test]
    fn test_post_loop_extension_on_tactical_position() {
        // Black threatens five at (7, 9)
        let board = setup_board(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (7, 7, Stone::Black),
            (7, 8, Stone::Black),
            (7, 4, Stone::White),
            (8, 8, Stone::White),
        ]);
        assert!(has_critical_threat(&board, Stone::White));
        let config = SearchConfig {
            threat_extension: true,
            time_limit: Duration::from_secs(20),
            ..plain_config(1)
        };
        let result = Searcher::new(1 << 16).search(&board, Stone::White, &config);
        assert_eq!(result.best_move, Some(Pos::new(7, 9)));
        assert!(!is_win_score(result.score));
        assert_eq!(result.stats.post_searches, 1);
        if result.extended {
            assert_eq!(result.depth, 1 + POST_EXTENSION_PLIES);
        } else {
            assert_eq!(result.depth, 1);
        }
    }

    #[test]
    fn test_post_loop_extension_needs_a_threat() {
        let board = setup_board(&[(7, 7, Stone::Black), (8, 8, Stone::White)]);
        let config = SearchConfig {
            threat_extension: true,
            ..plain_config(1)
        };
        let result = Searcher::new(1 << 12).search(&board, Stone::Black, &config);
        assert_eq!(result.stats.post_searches, 0);
        assert!(!result.extended);

        let tactical = setup_board(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (7, 7, Stone::Black),
            (7, 8, Stone::Black),
            (7, 4, Stone::White),
            (8, 8, Stone::White),
        ]);
        let off = Searcher::new(1 << 12).search(&tactical, Stone::White, &plain_config(1));
        assert_eq!(off.stats.post_searches, 0);
    }

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.time_limit, Duration::from_millis(3000));
        assert!(config.null_move && config.threat_extension && config.transposition);
        assert_eq!(config.forced_win_plies, 6);
        assert_eq!(SearchStats::default().tt_hit_rate(), 0.0);
    }
}
