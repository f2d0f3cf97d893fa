//! Urgent replies found before any tree search
//!
//! Cells are scanned row-major, so ties go to the lowest row and then the
//! lowest column.

use std::fmt;

use crate::board::{Board, Pos, Stone};
use crate::eval::{has_open_three, winning_cells};
use crate::rules::is_valid_move;

/// What made the move urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emergency {
    /// The mover completes five
    Win(Pos),
    /// The opponent would complete five here next turn
    Block(Pos),
    /// Answer to an opponent open three
    StopThree(Pos),
}

impl Emergency {
    pub fn pos(self) -> Pos {
        match self {
            Emergency::Win(pos) | Emergency::Block(pos) | Emergency::StopThree(pos) => pos,
        }
    }
}

impl fmt::Display for Emergency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Emergency::Win(_) => f.write_str("immediate win"),
            Emergency::Block(_) => f.write_str("blocks an immediate loss"),
            Emergency::StopThree(_) => f.write_str("stops an open three"),
        }
    }
}

/// The first urgent move for `color`, if any. The board is restored before
/// returning.
pub fn find_emergency(board: &mut Board, color: Stone) -> Option<Emergency> {
    if let Some(&pos) = winning_cells(board, color).first() {
        return Some(Emergency::Win(pos));
    }

    let opponent = color.opponent();
    if let Some(pos) = winning_cells(board, opponent)
        .into_iter()
        .find(|&pos| is_valid_move(board, pos, color))
    {
        return Some(Emergency::Block(pos));
    }

    if has_open_three(board, opponent) {
        let stop = Pos::all().find(|&pos| {
            is_valid_move(board, pos, color)
                && board
                    .scoped_place(pos, color)
                    .is_some_and(|placed| !has_open_three(&placed, opponent))
        });
        return stop.map(Emergency::StopThree);
    }

    None
}
