//! Candidate generation and move ordering
//!
//! Candidates are the empty cells within two cells of any stone. Each one is
//! ranked on a strict ladder (win, block, open four, four, open three) and
//! ties inside a tier are broken by a bounded positional remainder. The tier
//! gaps are wider than the remainder bound, so no move can climb a tier on
//! its remainder alone.

use crate::board::{Bitboard, Board, Pos, Stone, CENTER};
use crate::eval::heuristic::combine;
use crate::eval::{completes_five, position_value, PatternCounts, PatternKind, PatternScore};
use crate::rules::{forbidden_kind, is_forbidden, ForbiddenKind};

/// Mover completes five
pub const WIN_PRIORITY: i32 = 1_000_000_000;
/// Stops an opponent five
pub const BLOCK_PRIORITY: i32 = 500_000_000;
const OPEN_FOUR_PRIORITY: i32 = 40_000_000;
const FOUR_PRIORITY: i32 = 20_000_000;
const OPEN_THREE_PRIORITY: i32 = 10_000_000;
/// Largest magnitude of the within-tier remainder
const REMAINDER_BOUND: i32 = 4_999_999;

/// Candidates are collected within this Chebyshev distance of a stone.
const RADIUS: i32 = 2;

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A candidate with its ordering score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredMove {
    pub pos: Pos,
    pub score: i32,
}

/// Most moves kept after ordering at `ply`.
#[inline]
pub fn move_limit(ply: u8) -> usize {
    30usize.saturating_sub(2 * ply as usize).max(10)
}

/// How many ordered moves the search expands at `ply`.
#[inline]
pub fn beam_width(ply: u8, tactical: bool) -> usize {
    if tactical {
        30usize.saturating_sub(2 * ply as usize).max(8)
    } else {
        20usize.saturating_sub(3 * ply as usize).max(6)
    }
}

/// Empty cells near existing stones, row-major, without duplicates.
pub fn candidate_cells(board: &Board) -> Vec<Pos> {
    let occupied = board.occupied();
    let mut near = Bitboard::new();
    for stone in occupied.iter_ones() {
        for dr in -RADIUS..=RADIUS {
            for dc in -RADIUS..=RADIUS {
                if let Some(pos) = Pos::try_new(i32::from(stone.row) + dr, i32::from(stone.col) + dc) {
                    if !occupied.get(pos) {
                        near.set(pos);
                    }
                }
            }
        }
    }
    near.iter_ones().collect()
}

/// Ordered, truncated moves for `color` at `ply`. The board is restored
/// before returning.
pub fn generate_moves(board: &mut Board, color: Stone, ply: u8) -> Vec<ScoredMove> {
    if board.is_board_empty() {
        return vec![ScoredMove { pos: CENTER, score: 0 }];
    }

    let opponent = color.opponent();
    let own_before = PatternCounts::scan(board, color);
    let opp_before = PatternCounts::scan(board, opponent);
    let eval_before = combine(&own_before, &opp_before);
    let context = OrderingContext {
        color,
        ply,
        own_before,
        opp_before,
        eval_before,
    };

    let legal: Vec<Pos> = candidate_cells(board)
        .into_iter()
        .filter(|&pos| !is_forbidden(board, pos, color))
        .collect();
    let mut moves: Vec<ScoredMove> = legal
        .into_iter()
        .map(|pos| ScoredMove {
            pos,
            score: context.score(board, pos),
        })
        .collect();

    // sort_by is stable: equal scores stay in row-major order
    moves.sort_by(|a, b| b.score.cmp(&a.score));
    moves.truncate(move_limit(ply));
    moves
}

/// Positions only, in search order.
pub fn ordered_moves(board: &mut Board, color: Stone, ply: u8) -> Vec<Pos> {
    generate_moves(board, color, ply)
        .into_iter()
        .map(|m| m.pos)
        .collect()
}

/// Last resort when the search has nothing to offer: the center, then
/// ring by ring outwards (row-major within a ring), preferring cells
/// `color` may legally play.
pub fn fallback_move(board: &Board, color: Stone) -> Option<Pos> {
    let mut empty: Vec<Pos> = Pos::all().filter(|&pos| board.is_empty(pos)).collect();
    // Stable: row-major order survives inside each ring
    empty.sort_by_key(|pos| pos.chebyshev(CENTER));
    empty
        .iter()
        .copied()
        .find(|&pos| !is_forbidden(board, pos, color))
        .or_else(|| empty.first().copied())
}

/// Pattern state before any candidate is tried.
struct OrderingContext {
    color: Stone,
    ply: u8,
    own_before: PatternCounts,
    opp_before: PatternCounts,
    eval_before: i32,
}

impl OrderingContext {
    fn score(&self, board: &mut Board, pos: Pos) -> i32 {
        let color = self.color;
        let opponent = color.opponent();
        let ply = i32::from(self.ply);

        if completes_five(board, pos, color) {
            return WIN_PRIORITY - ply;
        }
        if completes_five(board, pos, opponent) && !is_forbidden(board, pos, opponent) {
            return BLOCK_PRIORITY - ply * 100;
        }

        let own_lines = PatternCounts::scan_through(board, pos, color);
        let opp_lines = PatternCounts::scan_through(board, pos, opponent);
        let Some(placed) = board.scoped_place(pos, color) else {
            return i32::MIN;
        };
        let own_after = self.own_before.replaced(
            &own_lines,
            &PatternCounts::scan_through(&placed, pos, color),
        );
        let opp_after = self.opp_before.replaced(
            &opp_lines,
            &PatternCounts::scan_through(&placed, pos, opponent),
        );
        let trap = if opponent == Stone::Black {
            forbidden_trap_bonus(&placed, pos)
        } else {
            0
        };
        drop(placed);

        let gained = |kind: PatternKind| own_after.get(kind) > self.own_before.get(kind);
        let tier = if gained(PatternKind::OpenFour) {
            OPEN_FOUR_PRIORITY
        } else if gained(PatternKind::SimpleFour) {
            FOUR_PRIORITY
        } else if gained(PatternKind::OpenThree) {
            OPEN_THREE_PRIORITY
        } else {
            0
        };

        let mut rest = (combine(&own_after, &opp_after) - self.eval_before) / 2;
        if own_after.threat_types() >= 2 {
            rest += PatternScore::OPEN_FOUR / 2 * own_after.threat_types() as i32;
        }
        let opp_threats = |c: &PatternCounts| c.get(PatternKind::OpenThree) + c.fours();
        if opp_threats(&opp_after) < opp_threats(&self.opp_before) {
            rest += PatternScore::OPEN_THREE / 3;
        }
        if trap > 0 {
            rest += if own_after.is_threatening() {
                trap * 3 / 2
            } else {
                trap
            };
        }
        rest += position_value(pos) * (10 - ply.min(8)) / 10;
        rest -= ply * 10;

        tier + rest.clamp(-REMAINDER_BOUND, REMAINDER_BOUND)
    }
}

/// Neighbours of `pos` that the stone just placed there turns forbidden
/// for Black.
fn forbidden_trap_bonus(board: &Board, pos: Pos) -> i32 {
    NEIGHBORS
        .iter()
        .filter_map(|&(dr, dc)| Pos::try_new(i32::from(pos.row) + dr, i32::from(pos.col) + dc))
        .filter_map(|n| forbidden_kind(board, n, Stone::Black))
        .map(|kind| match kind {
            ForbiddenKind::Overline => PatternScore::OPEN_FOUR / 10,
            ForbiddenKind::DoubleFour => PatternScore::SIMPLE_FOUR / 8,
            ForbiddenKind::DoubleThree => PatternScore::OPEN_THREE / 5,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_board(setup: &[(u8, u8, Stone)]) -> Board {
        let mut board = Board::new();
        for &(row, col, stone) in setup {
            board.place(Pos::new(row, col), stone);
        }
        board
    }

    #[test]
    fn test_empty_board_returns_center() {
        let mut board = Board::new();
        let moves = ordered_moves(&mut board, Stone::Black, 0);
        assert_eq!(moves, vec![CENTER]);
    }

    #[test]
    fn test_candidates_within_radius() {
        let board = setup_board(&[(7, 7, Stone::Black)]);
        let cells = candidate_cells(&board);
        assert_eq!(cells.len(), 24);
        assert!(cells.iter().all(|p| p.chebyshev(CENTER) <= 2));
        assert!(cells.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_candidates_clipped_at_edge() {
        let board = setup_board(&[(0, 0, Stone::White)]);
        // 3x3 corner block minus the stone
        assert_eq!(candidate_cells(&board).len(), 8);
    }

    #[test]
    fn test_candidates_merge_overlapping_neighbourhoods() {
        let board = setup_board(&[(7, 7, Stone::Black), (7, 8, Stone::White)]);
        let cells = candidate_cells(&board);
        // 5x6 block minus the two stones
        assert_eq!(cells.len(), 28);
        assert!(!cells.contains(&Pos::new(7, 7)));
        assert!(!cells.contains(&Pos::new(7, 8)));
        assert!(cells.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_black_moves_scored_after_forbidden_filter() {
        // (7, 7) is a double-three for Black only
        let mut board = setup_board(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (5, 7, Stone::Black),
            (6, 7, Stone::Black),
            (9, 9, Stone::White),
        ]);
        let hash = board.fingerprint();
        let black = generate_moves(&mut board, Stone::Black, 0);
        assert!(!black.is_empty());
        assert!(black.iter().all(|m| m.pos != Pos::new(7, 7)));
        assert!(black.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(board.fingerprint(), hash);
    }

    #[test]
    fn test_limits() {
        assert_eq!(move_limit(0), 30);
        assert_eq!(move_limit(10), 10);
        assert_eq!(move_limit(200), 10);
        assert_eq!(beam_width(0, true), 30);
        assert_eq!(beam_width(0, false), 20);
        assert_eq!(beam_width(5, true), 20);
        assert_eq!(beam_width(5, false), 6);
        assert_eq!(beam_width(20, true), 8);
    }

    #[test]
    fn test_winning_move_first() {
        let mut board = setup_board(&[
            (7, 3, Stone::Black),
            (7, 4, Stone::Black),
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (7, 7, Stone::White),
            (8, 8, Stone::White),
            (9, 9, Stone::White),
        ]);
        let moves = generate_moves(&mut board, Stone::Black, 0);
        assert_eq!(moves[0].pos, Pos::new(7, 2));
        assert_eq!(moves[0].score, WIN_PRIORITY);
    }

    #[test]
    fn test_block_ranks_above_own_threat() {
        // White threatens five at (3, 7); Black could make an open three instead
        let mut board = setup_board(&[
            (3, 3, Stone::White),
            (3, 4, Stone::White),
            (3, 5, Stone::White),
            (3, 6, Stone::White),
            (3, 2, Stone::Black),
            (9, 6, Stone::Black),
            (9, 7, Stone::Black),
        ]);
        let moves = generate_moves(&mut board, Stone::Black, 0);
        assert_eq!(moves[0].pos, Pos::new(3, 7));
        assert_eq!(moves[0].score, BLOCK_PRIORITY);
        assert!(moves[1].score >= OPEN_THREE_PRIORITY);
        assert!(moves[1].score < FOUR_PRIORITY);
    }

    #[test]
    fn test_forbidden_cells_dropped_for_black() {
        let mut board = setup_board(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (5, 7, Stone::Black),
            (6, 7, Stone::Black),
            (2, 2, Stone::White),
        ]);
        let black = ordered_moves(&mut board, Stone::Black, 0);
        assert!(!black.contains(&Pos::new(7, 7)));
        let white = generate_moves(&mut board, Stone::White, 0);
        assert!(white.iter().any(|m| m.pos == Pos::new(7, 7)));
    }

    #[test]
    fn test_sorted_truncated_and_board_restored() {
        let mut board = setup_board(&[
            (7, 7, Stone::Black),
            (7, 8, Stone::White),
            (8, 7, Stone::Black),
            (3, 3, Stone::White),
        ]);
        let hash = board.fingerprint();
        let count = board.move_count();
        let moves = generate_moves(&mut board, Stone::Black, 4);
        assert_eq!(moves.len(), move_limit(4));
        assert!(moves.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(board.fingerprint(), hash);
        assert_eq!(board.move_count(), count);
    }

    #[test]
    fn test_remainder_stays_below_tier_gap() {
        let mut board = setup_board(&[(7, 7, Stone::Black), (7, 8, Stone::White)]);
        for m in generate_moves(&mut board, Stone::White, 0) {
            assert!(m.score.abs() <= REMAINDER_BOUND, "{m:?}");
        }
    }

    #[test]
    fn test_fallback_spirals_from_center() {
        let board = Board::new();
        assert_eq!(fallback_move(&board, Stone::Black), Some(CENTER));

        let board = setup_board(&[(7, 7, Stone::White)]);
        assert_eq!(fallback_move(&board, Stone::Black), Some(Pos::new(6, 6)));

        // (7, 7) is an overline for Black and the first ring is full
        let mut setup: Vec<(u8, u8, Stone)> = [4, 5, 6, 8, 9]
            .iter()
            .map(|&col| (7, col, Stone::Black))
            .collect();
        for pos in Pos::all().filter(|p| p.chebyshev(CENTER) == 1 && p.row != 7) {
            setup.push((pos.row, pos.col, Stone::White));
        }
        let board = setup_board(&setup);
        assert_eq!(fallback_move(&board, Stone::White), Some(CENTER));
        assert_eq!(fallback_move(&board, Stone::Black), Some(Pos::new(5, 5)));
    }

    #[test]
    fn test_trap_bonus_counts_new_forbidden_neighbours() {
        let board = setup_board(&[
            (7, 5, Stone::Black),
            (7, 6, Stone::Black),
            (5, 7, Stone::Black),
            (6, 7, Stone::Black),
        ]);
        // (7, 7) is already a double-three cell and neighbours (6, 6)
        assert_eq!(forbidden_trap_bonus(&board, Pos::new(6, 6)), PatternScore::OPEN_THREE / 5);
    }
}
