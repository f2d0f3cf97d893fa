//! Line patterns and their scores
//!
//! Every axis line of the board (rows, columns, both diagonals) is read into
//! a strip of cells framed by a blocked sentinel at each end, so the board
//! edge behaves like an opponent stone. At every start offset the templates
//! below are tried in score order and the first match is counted.
//!
//! Template slots:
//! - `X` own stone
//! - `_` empty cell
//! - `#` blocked (opponent stone or edge)
//! - `!` anything but an own stone
//! - `?` don't care

use lazy_static::lazy_static;

use crate::board::{Board, Pos, Stone, BOARD_SIZE, DIRECTIONS, TOTAL_CELLS};

/// Pattern scores for evaluation
pub struct PatternScore;

impl PatternScore {
    /// Five in a row - immediate win
    pub const FIVE: i32 = 1_000_000;
    /// Open four: _XXXX_ (two ways to make five)
    pub const OPEN_FOUR: i32 = 100_000;
    /// Simple four: one way to make five, including jump shapes
    pub const SIMPLE_FOUR: i32 = 50_000;
    /// Dead four: #XXXX# (can never become five)
    pub const DEAD_FOUR: i32 = 12_000;
    /// Open three: becomes an open four if not answered
    pub const OPEN_THREE: i32 = 10_000;
    /// Closed three: becomes a simple four at best
    pub const CLOSED_THREE: i32 = 2_000;
    pub const DEAD_THREE: i32 = 1_200;
    pub const OPEN_TWO: i32 = 1_000;
    pub const CLOSED_TWO: i32 = 100;
    pub const DEAD_TWO: i32 = 60;
    pub const OPEN_ONE: i32 = 50;
    pub const CLOSED_ONE: i32 = 5;

    // Combinations that win by force regardless of the raw sum
    pub const DOUBLE_THREE_WIN: i32 = 80_000;
    pub const FOUR_THREE_WIN: i32 = 90_000;
    pub const DOUBLE_FOUR_WIN: i32 = 95_000;
}

/// Pattern categories, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    Five,
    OpenFour,
    SimpleFour,
    DeadFour,
    OpenThree,
    ClosedThree,
    DeadThree,
    OpenTwo,
    ClosedTwo,
    DeadTwo,
    OpenOne,
    ClosedOne,
}

const KIND_COUNT: usize = 12;

impl PatternKind {
    pub const ALL: [PatternKind; KIND_COUNT] = [
        PatternKind::Five,
        PatternKind::OpenFour,
        PatternKind::SimpleFour,
        PatternKind::DeadFour,
        PatternKind::OpenThree,
        PatternKind::ClosedThree,
        PatternKind::DeadThree,
        PatternKind::OpenTwo,
        PatternKind::ClosedTwo,
        PatternKind::DeadTwo,
        PatternKind::OpenOne,
        PatternKind::ClosedOne,
    ];

    pub const fn score(self) -> i32 {
        match self {
            PatternKind::Five => PatternScore::FIVE,
            PatternKind::OpenFour => PatternScore::OPEN_FOUR,
            PatternKind::SimpleFour => PatternScore::SIMPLE_FOUR,
            PatternKind::DeadFour => PatternScore::DEAD_FOUR,
            PatternKind::OpenThree => PatternScore::OPEN_THREE,
            PatternKind::ClosedThree => PatternScore::CLOSED_THREE,
            PatternKind::DeadThree => PatternScore::DEAD_THREE,
            PatternKind::OpenTwo => PatternScore::OPEN_TWO,
            PatternKind::ClosedTwo => PatternScore::CLOSED_TWO,
            PatternKind::DeadTwo => PatternScore::DEAD_TWO,
            PatternKind::OpenOne => PatternScore::OPEN_ONE,
            PatternKind::ClosedOne => PatternScore::CLOSED_ONE,
        }
    }
}

/// Templates in match order. Only the first hit per start offset counts.
const TEMPLATES: &[(PatternKind, &str)] = &[
    (PatternKind::Five, "XXXXX"),
    (PatternKind::OpenFour, "_XXXX_"),
    (PatternKind::SimpleFour, "#XXXX_"),
    (PatternKind::SimpleFour, "_XXXX#"),
    (PatternKind::SimpleFour, "XXX_X"),
    (PatternKind::SimpleFour, "X_XXX"),
    (PatternKind::SimpleFour, "XX_XX"),
    (PatternKind::DeadFour, "#XXXX#"),
    (PatternKind::OpenThree, "!_XXX_!"),
    (PatternKind::OpenThree, "!_XX_X_!"),
    (PatternKind::OpenThree, "!_X_XX_!"),
    (PatternKind::ClosedThree, "#XXX__"),
    (PatternKind::ClosedThree, "__XXX#"),
    (PatternKind::ClosedThree, "#XX_X_"),
    (PatternKind::ClosedThree, "_X_XX#"),
    (PatternKind::ClosedThree, "#X_XX_"),
    (PatternKind::ClosedThree, "_XX_X#"),
    (PatternKind::ClosedThree, "X__XX"),
    (PatternKind::ClosedThree, "XX__X"),
    (PatternKind::ClosedThree, "X_X_X"),
    (PatternKind::DeadThree, "#XXX#"),
    (PatternKind::DeadThree, "#XX_X#"),
    (PatternKind::DeadThree, "#X_XX#"),
    (PatternKind::OpenTwo, "_XX_"),
    (PatternKind::OpenTwo, "_X_X_"),
    (PatternKind::OpenTwo, "_X__X_"),
    (PatternKind::ClosedTwo, "#XX_"),
    (PatternKind::ClosedTwo, "_XX#"),
    (PatternKind::ClosedTwo, "#X_X_"),
    (PatternKind::ClosedTwo, "_X_X#"),
    (PatternKind::DeadTwo, "#XX#"),
    (PatternKind::OpenOne, "_X_"),
    (PatternKind::ClosedOne, "#X_"),
    (PatternKind::ClosedOne, "_X#"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cell {
    Own,
    Empty,
    Blocked,
}

/// Longest axis line plus the two sentinels.
const STRIP_LEN: usize = BOARD_SIZE + 2;

lazy_static! {
    /// Every axis line on the board as an ordered list of cells.
    static ref LINES: Vec<Vec<Pos>> = build_lines();
    /// For each cell, the indices into `LINES` of its four axis lines.
    static ref LINES_THROUGH: Vec<[usize; 4]> = build_lines_through(&LINES);
}

fn build_lines() -> Vec<Vec<Pos>> {
    let mut lines = Vec::new();
    for &dir in &DIRECTIONS {
        for start in Pos::all() {
            // A line starts where stepping backwards leaves the board
            if start.offset(dir, -1).is_some() {
                continue;
            }
            let line: Vec<Pos> = (0..).map_while(|step| start.offset(dir, step)).collect();
            lines.push(line);
        }
    }
    lines
}

fn build_lines_through(lines: &[Vec<Pos>]) -> Vec<[usize; 4]> {
    let mut through = vec![[0usize; 4]; TOTAL_CELLS];
    let mut filled = vec![0usize; TOTAL_CELLS];
    for (idx, line) in lines.iter().enumerate() {
        for pos in line {
            let cell = pos.to_index();
            through[cell][filled[cell]] = idx;
            filled[cell] += 1;
        }
    }
    through
}

#[inline]
fn slot_matches(slot: u8, cell: Cell) -> bool {
    match slot {
        b'X' => cell == Cell::Own,
        b'_' => cell == Cell::Empty,
        b'#' => cell == Cell::Blocked,
        b'!' => cell != Cell::Own,
        _ => true,
    }
}

#[inline]
fn template_matches(strip: &[Cell], start: usize, template: &str) -> bool {
    let slots = template.as_bytes();
    start + slots.len() <= strip.len()
        && slots
            .iter()
            .zip(&strip[start..])
            .all(|(&slot, &cell)| slot_matches(slot, cell))
}

/// How many times each pattern kind occurs for one color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternCounts {
    counts: [u16; KIND_COUNT],
}

impl PatternCounts {
    /// Scan the whole board for `color`'s patterns.
    pub fn scan(board: &Board, color: Stone) -> Self {
        let mut counts = PatternCounts::default();
        for line in LINES.iter() {
            counts.scan_line(board, line, color);
        }
        counts
    }

    /// Patterns on the four axis lines through `pos` only.
    ///
    /// A placement at `pos` changes nothing else, so the whole-board counts
    /// after it are `before - through(before) + through(after)`.
    pub fn scan_through(board: &Board, pos: Pos, color: Stone) -> Self {
        let mut counts = PatternCounts::default();
        for &idx in &LINES_THROUGH[pos.to_index()] {
            counts.scan_line(board, &LINES[idx], color);
        }
        counts
    }

    /// Swap the contribution of some lines: remove `old`, add `new`.
    #[must_use]
    pub fn replaced(&self, old: &PatternCounts, new: &PatternCounts) -> Self {
        let mut counts = *self;
        for i in 0..KIND_COUNT {
            counts.counts[i] = counts.counts[i].saturating_sub(old.counts[i]) + new.counts[i];
        }
        counts
    }

    fn scan_line(&mut self, board: &Board, line: &[Pos], color: Stone) {
        let mut strip = [Cell::Blocked; STRIP_LEN];
        let mut has_own = false;
        for (i, &pos) in line.iter().enumerate() {
            strip[i + 1] = match board.get(pos) {
                Stone::Empty => Cell::Empty,
                s if s == color => {
                    has_own = true;
                    Cell::Own
                }
                _ => Cell::Blocked,
            };
        }
        if !has_own {
            return;
        }
        let strip = &strip[..line.len() + 2];

        for start in 0..strip.len() {
            if let Some(&(kind, _)) = TEMPLATES
                .iter()
                .find(|(_, template)| template_matches(strip, start, template))
            {
                self.counts[kind as usize] += 1;
            }
        }
    }

    #[inline]
    pub fn get(&self, kind: PatternKind) -> u16 {
        self.counts[kind as usize]
    }

    /// Weighted sum of all matched patterns.
    pub fn pattern_score(&self) -> i32 {
        PatternKind::ALL
            .iter()
            .map(|&kind| i32::from(self.get(kind)) * kind.score())
            .sum()
    }

    /// Bonus for combinations that force a win.
    pub fn combination_bonus(&self) -> i32 {
        let open_threes = self.get(PatternKind::OpenThree);
        let simple_fours = self.get(PatternKind::SimpleFour);
        let mut bonus = 0;
        if open_threes >= 2 {
            bonus += PatternScore::DOUBLE_THREE_WIN;
        }
        if self.fours() >= 1 && open_threes >= 1 {
            bonus += PatternScore::FOUR_THREE_WIN;
        }
        if simple_fours >= 2 {
            bonus += PatternScore::DOUBLE_FOUR_WIN;
        }
        bonus
    }

    /// Pattern sum plus combination bonuses.
    #[inline]
    pub fn total(&self) -> i32 {
        self.pattern_score() + self.combination_bonus()
    }

    /// Open and simple fours together.
    #[inline]
    pub fn fours(&self) -> u16 {
        self.get(PatternKind::OpenFour) + self.get(PatternKind::SimpleFour)
    }

    #[inline]
    pub fn has_five(&self) -> bool {
        self.get(PatternKind::Five) > 0
    }

    #[inline]
    pub fn has_open_four(&self) -> bool {
        self.get(PatternKind::OpenFour) > 0
    }

    #[inline]
    pub fn has_four_threat(&self) -> bool {
        self.fours() > 0
    }

    #[inline]
    pub fn has_open_three(&self) -> bool {
        self.get(PatternKind::OpenThree) > 0
    }

    /// Either an open three or a four is on the board.
    #[inline]
    pub fn is_threatening(&self) -> bool {
        self.has_open_three() || self.has_four_threat()
    }

    /// Number of distinct threat types held: open four, simple four, open three.
    pub fn threat_types(&self) -> u32 {
        [
            self.has_open_four(),
            self.get(PatternKind::SimpleFour) > 0,
            self.has_open_three(),
        ]
        .iter()
        .filter(|&&held| held)
        .count() as u32
    }
}
