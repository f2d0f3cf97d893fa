//! Static evaluation of board positions
//!
//! The score for a side is its own pattern total minus one and a half times
//! the opponent's, so the engine leans towards defence. The evaluation is
//! deliberately not antisymmetric: `evaluate(b, X) != -evaluate(b, O)`.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Pos, Stone, BOARD_SIZE, CENTER, TOTAL_CELLS};
use crate::rules::{has_five_at_pos, is_forbidden};

use super::adaptive::evaluate_adaptive;
use super::patterns::{PatternCounts, PatternScore};

/// Opponent patterns are weighted by `DEFENSE_NUM / DEFENSE_DEN`.
const DEFENSE_NUM: i32 = 3;
const DEFENSE_DEN: i32 = 2;

/// Which scoring strategy the search uses at its leaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalMode {
    #[default]
    Standard,
    /// Phase-aware weights with nonlinear threat bonuses
    Adaptive,
}

/// Evaluate the board from the perspective of `color`.
#[must_use]
pub fn evaluate(board: &Board, color: Stone) -> i32 {
    let own = PatternCounts::scan(board, color);
    let opp = PatternCounts::scan(board, color.opponent());
    combine(&own, &opp)
}

/// Evaluate with the chosen strategy.
#[must_use]
pub fn evaluate_with(board: &Board, color: Stone, mode: EvalMode) -> i32 {
    match mode {
        EvalMode::Standard => evaluate(board, color),
        EvalMode::Adaptive => evaluate_adaptive(board, color),
    }
}

/// Composite score from already scanned pattern counts.
pub fn combine(own: &PatternCounts, opp: &PatternCounts) -> i32 {
    own.total() - opp.total() * DEFENSE_NUM / DEFENSE_DEN - critical_threat_penalty(opp)
}

/// Extra weight on opponent threats that demand an answer now.
pub fn critical_threat_penalty(opp: &PatternCounts) -> i32 {
    let mut penalty = 0;
    if opp.has_open_three() {
        penalty += PatternScore::OPEN_THREE * 3;
    }
    if opp.has_four_threat() {
        penalty += PatternScore::SIMPLE_FOUR * 2;
    }
    penalty
}

pub fn has_open_three(board: &Board, color: Stone) -> bool {
    PatternCounts::scan(board, color).has_open_three()
}

/// Simple or open four.
pub fn has_four_threat(board: &Board, color: Stone) -> bool {
    PatternCounts::scan(board, color).has_four_threat()
}

pub fn has_open_four(board: &Board, color: Stone) -> bool {
    PatternCounts::scan(board, color).has_open_four()
}

/// Placing `color` on the empty cell `pos` makes five. Read-only: the
/// candidate cell is treated as holding `color`.
#[inline]
pub fn completes_five(board: &Board, pos: Pos, color: Stone) -> bool {
    pos.on_board() && board.is_empty(pos) && has_five_at_pos(board, pos, color)
}

/// Cells where `color` wins on the spot, row-major. Forbidden cells are
/// skipped because Black may not play them.
pub fn winning_cells(board: &Board, color: Stone) -> Vec<Pos> {
    Pos::all()
        .filter(|&pos| completes_five(board, pos, color) && !is_forbidden(board, pos, color))
        .collect()
}

/// The opponent of `color` can win with its next stone.
pub fn has_critical_threat(board: &Board, color: Stone) -> bool {
    !winning_cells(board, color.opponent()).is_empty()
}

/// Fewer than six stones on the board.
pub fn is_opening(board: &Board) -> bool {
    board.move_count() < 6
}

/// More than 70% of the board is filled.
pub fn is_endgame(board: &Board) -> bool {
    board.move_count() * 10 > TOTAL_CELLS * 7
}

/// Center preference minus an edge penalty, before any depth scaling.
pub fn position_value(pos: Pos) -> i32 {
    let dist = i32::from(pos.manhattan(CENTER));
    let mut value = (20 - dist * 2).max(0);
    let last = BOARD_SIZE as u8 - 1;
    if pos.row < 2 || pos.col < 2 || pos.row > last - 2 || pos.col > last - 2 {
        value -= 15;
    }
    value
}
