//! Win condition checking
//!
//! A line of five or more same-colored stones wins. Overlines count here;
//! for Black they are excluded earlier by the forbidden-move rules.

use crate::board::{Board, Pos, Stone, DIRECTIONS};

/// Check if there's 5+ in a row for the given color
pub fn has_five_in_row(board: &Board, stone: Stone) -> bool {
    find_five_positions(board, stone).is_some()
}

/// Five-in-a-row check through a specific position, 4 directions only.
#[inline]
pub fn has_five_at_pos(board: &Board, pos: Pos, color: Stone) -> bool {
    DIRECTIONS
        .iter()
        .any(|&dir| board.contiguous_run(pos, dir, color) >= 5)
}

/// Is the stone already sitting on `pos` part of a winning line?
pub fn is_winning_move(board: &Board, pos: Pos) -> bool {
    match board.get(pos) {
        Stone::Empty => false,
        color => has_five_at_pos(board, pos, color),
    }
}

/// Would placing `color` at the empty cell `pos` complete five?
///
/// The stone is placed and removed again before returning.
pub fn is_winning_placement(board: &mut Board, pos: Pos, color: Stone) -> bool {
    match board.scoped_place(pos, color) {
        Some(placed) => has_five_at_pos(&placed, pos, color),
        None => false,
    }
}

/// Find the positions of a 5-in-a-row if one exists
pub fn find_five_positions(board: &Board, stone: Stone) -> Option<Vec<Pos>> {
    let stones = board.stones(stone)?;

    for pos in stones.iter_ones() {
        for &dir in &DIRECTIONS {
            // Only start from the first stone of a run
            if matches!(pos.offset(dir, -1), Some(prev) if board.get(prev) == stone) {
                continue;
            }
            let line: Vec<Pos> = (0..)
                .map_while(|step| pos.offset(dir, step))
                .take_while(|&p| board.get(p) == stone)
                .collect();
            if line.len() >= 5 {
                return Some(line);
            }
        }
    }
    None
}

/// Return the color holding a five, if any.
pub fn check_winner(board: &Board) -> Option<Stone> {
    [Stone::Black, Stone::White]
        .into_iter()
        .find(|&color| has_five_in_row(board, color))
}
