//! Renju forbidden moves for Black
//!
//! Black, the first player, may not play a move that creates:
//! - an overline: six or more stones in a row,
//! - a double-four: fours on two or more axes at once,
//! - a double-three: genuine open threes on two or more axes at once.
//!
//! A move that makes exactly five is never forbidden. White is never
//! restricted.
//!
//! Each axis through the candidate cell is copied into a fixed window with
//! the candidate stone already in the middle, so the checks never touch the
//! board itself.

use std::fmt;

use serde::Serialize;

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Cells read on each side of the candidate.
const REACH: i32 = 6;
const LINE_LEN: usize = 2 * REACH as usize + 1;
/// Index of the candidate cell inside a line window
const MID: usize = REACH as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Own,
    Empty,
    /// Opponent stone or off the board
    Blocked,
}

type Line = [Cell; LINE_LEN];

/// Which forbidden-move rule a placement breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ForbiddenKind {
    Overline,
    DoubleFour,
    DoubleThree,
}

impl fmt::Display for ForbiddenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ForbiddenKind::Overline => "overline",
            ForbiddenKind::DoubleFour => "double-four",
            ForbiddenKind::DoubleThree => "double-three",
        })
    }
}

/// Copy the axis through `pos` with `color` placed at the middle.
fn read_line(board: &Board, pos: Pos, dir: (i32, i32), color: Stone) -> Line {
    let mut line: Line = std::array::from_fn(|i| match pos.offset(dir, i as i32 - REACH) {
        None => Cell::Blocked,
        Some(p) => match board.get(p) {
            Stone::Empty => Cell::Empty,
            s if s == color => Cell::Own,
            _ => Cell::Blocked,
        },
    });
    line[MID] = Cell::Own;
    line
}

/// Bounds (inclusive) of the run of own stones containing `at`.
fn run_bounds(line: &Line, at: usize) -> (usize, usize) {
    let mut lo = at;
    while lo > 0 && line[lo - 1] == Cell::Own {
        lo -= 1;
    }
    let mut hi = at;
    while hi + 1 < LINE_LEN && line[hi + 1] == Cell::Own {
        hi += 1;
    }
    (lo, hi)
}

fn run_len(line: &Line, at: usize) -> usize {
    let (lo, hi) = run_bounds(line, at);
    hi - lo + 1
}

/// Filling the empty cell `at` gives exactly five through the middle.
fn fills_to_five(line: &Line, at: usize) -> bool {
    if line[at] != Cell::Empty {
        return false;
    }
    let mut filled = *line;
    filled[at] = Cell::Own;
    let (lo, hi) = run_bounds(&filled, at);
    hi - lo + 1 == 5 && (lo..=hi).contains(&MID)
}

/// The axis holds a four through the middle stone: one more stone makes five.
fn has_four(line: &Line) -> bool {
    (MID - 4..=MID + 4).any(|at| fills_to_five(line, at))
}

/// The run through the middle is a straight four `_XXXX_` whose two ends
/// both complete exactly five.
fn is_straight_four(line: &Line) -> bool {
    let (lo, hi) = run_bounds(line, MID);
    if hi - lo + 1 != 4 || lo == 0 || hi + 1 >= LINE_LEN {
        return false;
    }
    fills_to_five(line, lo - 1) && fills_to_five(line, hi + 1)
}

/// The axis holds an open three through the middle stone that one more
/// stone turns into a straight four.
fn has_genuine_three(line: &Line) -> bool {
    if has_four(line) {
        return false;
    }
    (MID - 3..=MID + 3)
        .filter(|&at| line[at] == Cell::Empty)
        .any(|at| {
            let mut filled = *line;
            filled[at] = Cell::Own;
            let (lo, hi) = run_bounds(&filled, MID);
            (lo..=hi).contains(&at) && is_straight_four(&filled)
        })
}

/// Which rule, if any, placing `color` at `pos` would break.
///
/// Always `None` for White, and for cells that are occupied or off the
/// board (those are illegal, not forbidden).
pub fn forbidden_kind(board: &Board, pos: Pos, color: Stone) -> Option<ForbiddenKind> {
    if color != Stone::Black || !pos.on_board() || !board.is_empty(pos) {
        return None;
    }

    let lines = DIRECTIONS.map(|dir| read_line(board, pos, dir, color));

    if lines.iter().any(|line| run_len(line, MID) >= 6) {
        return Some(ForbiddenKind::Overline);
    }
    if lines.iter().any(|line| run_len(line, MID) == 5) {
        return None;
    }
    if lines.iter().filter(|line| has_four(line)).count() >= 2 {
        return Some(ForbiddenKind::DoubleFour);
    }
    if lines.iter().filter(|line| has_genuine_three(line)).count() >= 2 {
        return Some(ForbiddenKind::DoubleThree);
    }
    None
}

#[inline]
pub fn is_forbidden(board: &Board, pos: Pos, color: Stone) -> bool {
    forbidden_kind(board, pos, color).is_some()
}

/// Empty, on the board, and not forbidden for `color`.
#[inline]
pub fn is_valid_move(board: &Board, pos: Pos, color: Stone) -> bool {
    pos.on_board() && board.is_empty(pos) && !is_forbidden(board, pos, color)
}

/// Every forbidden cell for `color`, row-major, with the rule it breaks.
pub fn forbidden_points(board: &Board, color: Stone) -> Vec<(Pos, ForbiddenKind)> {
    if color != Stone::Black {
        return Vec::new();
    }
    Pos::all()
        .filter_map(|pos| forbidden_kind(board, pos, color).map(|kind| (pos, kind)))
        .collect()
}
