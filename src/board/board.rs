//! Board structure with incremental fingerprint

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::str::FromStr;

use super::bitboard::Bitboard;
use super::zobrist::ZOBRIST;
use super::{Pos, Stone, BOARD_SIZE, TOTAL_CELLS};
use crate::error::GridError;

/// Full color matrix exchanged with callers, indexed `[row][col]`.
pub type Grid = [[Stone; BOARD_SIZE]; BOARD_SIZE];

/// Game board: two color bitboards, a move counter and the position fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
    move_count: usize,
    hash: u64,
}

impl Board {
    pub fn new() -> Self {
        Self {
            black: Bitboard::new(),
            white: Bitboard::new(),
            move_count: 0,
            hash: 0,
        }
    }

    /// Rebuild a board (counter and fingerprint included) from a color matrix.
    pub fn from_grid(grid: &Grid) -> Self {
        let mut board = Board::new();
        for (row, cells) in grid.iter().enumerate() {
            for (col, &stone) in cells.iter().enumerate() {
                if stone != Stone::Empty {
                    board.place(Pos::new(row as u8, col as u8), stone);
                }
            }
        }
        board
    }

    pub fn clear(&mut self) {
        *self = Board::new();
    }

    #[inline]
    pub fn size(&self) -> usize {
        BOARD_SIZE
    }

    /// Get stone at an on-board position
    #[inline]
    pub fn get(&self, pos: Pos) -> Stone {
        if self.black.get(pos) {
            Stone::Black
        } else if self.white.get(pos) {
            Stone::White
        } else {
            Stone::Empty
        }
    }

    /// Stone at signed coordinates; `None` is the off-board sentinel.
    #[inline]
    pub fn stone_at(&self, row: i32, col: i32) -> Option<Stone> {
        Pos::try_new(row, col).map(|pos| self.get(pos))
    }

    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        !self.black.get(pos) && !self.white.get(pos)
    }

    /// On the board and unoccupied.
    #[inline]
    pub fn is_legal_empty(&self, row: i32, col: i32) -> bool {
        matches!(self.stone_at(row, col), Some(Stone::Empty))
    }

    /// Place a stone. Returns `false` without touching the board when the
    /// cell is off-board or occupied, or when `stone` is `Empty`.
    pub fn place(&mut self, pos: Pos, stone: Stone) -> bool {
        if !pos.on_board() || !self.is_empty(pos) {
            return false;
        }
        let bits = match stone {
            Stone::Black => &mut self.black,
            Stone::White => &mut self.white,
            Stone::Empty => return false,
        };
        bits.set(pos);
        self.move_count += 1;
        self.hash ^= ZOBRIST.stone_key(pos, stone);
        true
    }

    /// Remove the stone at `pos`; no-op on an empty or off-board cell.
    pub fn undo(&mut self, pos: Pos) {
        if !pos.on_board() {
            return;
        }
        let stone = self.get(pos);
        if stone == Stone::Empty {
            return;
        }
        self.black.clear(pos);
        self.white.clear(pos);
        self.move_count -= 1;
        self.hash ^= ZOBRIST.stone_key(pos, stone);
    }

    /// Place a stone that is removed again when the guard drops.
    pub fn scoped_place(&mut self, pos: Pos, stone: Stone) -> Option<ScopedStone<'_>> {
        if self.place(pos, stone) {
            Some(ScopedStone { board: self, pos })
        } else {
            None
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.move_count >= TOTAL_CELLS
    }

    #[inline]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    #[inline]
    pub fn fingerprint(&self) -> u64 {
        self.hash
    }

    #[inline]
    pub fn opponent_of(color: Stone) -> Stone {
        color.opponent()
    }

    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.move_count == 0
    }

    /// Get bitboard for a color (returns None for Empty)
    #[inline]
    pub fn stones(&self, stone: Stone) -> Option<&Bitboard> {
        match stone {
            Stone::Black => Some(&self.black),
            Stone::White => Some(&self.white),
            Stone::Empty => None,
        }
    }

    /// Cells holding a stone of either color.
    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black.union(&self.white)
    }

    /// Number of consecutive `color` stones through `pos` along `dir`,
    /// counting `pos` itself whatever it holds.
    pub fn contiguous_run(&self, pos: Pos, dir: (i32, i32), color: Stone) -> usize {
        let mut count = 1;
        for sign in [1, -1] {
            let mut step = 1;
            while let Some(next) = pos.offset((dir.0 * sign, dir.1 * sign), step) {
                if self.get(next) != color {
                    break;
                }
                count += 1;
                step += 1;
            }
        }
        count
    }

    /// Copy out the color matrix.
    pub fn snapshot(&self) -> Grid {
        let mut grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
        for pos in self.black.iter_ones() {
            grid[pos.row as usize][pos.col as usize] = Stone::Black;
        }
        for pos in self.white.iter_ones() {
            grid[pos.row as usize][pos.col as usize] = Stone::White;
        }
        grid
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// A stone placed for the lifetime of the guard. Dereferences to the
/// board so nested searches can keep mutating it.
pub struct ScopedStone<'a> {
    board: &'a mut Board,
    pos: Pos,
}

impl ScopedStone<'_> {
    pub fn pos(&self) -> Pos {
        self.pos
    }
}

impl Deref for ScopedStone<'_> {
    type Target = Board;

    fn deref(&self) -> &Board {
        &*self.board
    }
}

impl DerefMut for ScopedStone<'_> {
    fn deref_mut(&mut self) -> &mut Board {
        &mut *self.board
    }
}

impl Drop for ScopedStone<'_> {
    fn drop(&mut self) {
        self.board.undo(self.pos);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for col in 0..BOARD_SIZE {
            write!(f, "{col:>3}")?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{row:>3}")?;
            for col in 0..BOARD_SIZE {
                write!(f, "{:>3}", self.get(Pos::new(row as u8, col as u8)).symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = GridError;

    /// Parse the `Display` format. Blank and header lines (only digits) are
    /// skipped, a leading row number on each row is optional.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut grid = [[Stone::Empty; BOARD_SIZE]; BOARD_SIZE];
        let mut rows = 0;

        for line in s.lines() {
            let trimmed = line.trim();
            if trimmed.chars().all(|c| c.is_ascii_digit() || c.is_whitespace()) {
                continue;
            }
            let cells: String = trimmed
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            if rows == BOARD_SIZE {
                return Err(GridError::RowCount { found: rows + 1 });
            }
            let found = cells.chars().count();
            if found != BOARD_SIZE {
                return Err(GridError::RowLength { row: rows, found });
            }
            for (col, symbol) in cells.chars().enumerate() {
                grid[rows][col] = Stone::from_symbol(symbol).ok_or(GridError::InvalidSymbol {
                    row: rows,
                    col,
                    symbol,
                })?;
            }
            rows += 1;
        }

        if rows != BOARD_SIZE {
            return Err(GridError::RowCount { found: rows });
        }
        Ok(Board::from_grid(&grid))
    }
}
