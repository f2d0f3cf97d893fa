//! Phase-aware alternative to the standard evaluation
//!
//! Starts from the standard composite score, then scales it by game phase,
//! adds nonlinear bonuses for stacked threats and bends the result towards
//! attack or defence depending on who holds the stronger threats.

use crate::board::{Board, Stone, CENTER};

use super::heuristic::combine;
use super::patterns::{PatternCounts, PatternKind, PatternScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Opening,
    Middle,
    Endgame,
}

impl Phase {
    fn of(board: &Board) -> Self {
        match board.move_count() {
            0..=7 => Phase::Opening,
            8..=29 => Phase::Middle,
            _ => Phase::Endgame,
        }
    }

    /// Score multiplier as a (numerator, denominator) pair.
    fn weight(self) -> (i64, i64) {
        match self {
            Phase::Opening => (3, 2),
            Phase::Middle => (2, 1),
            Phase::Endgame => (3, 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Posture {
    StrongAttack,
    LeaningAttack,
    Balanced,
    LeaningDefense,
    StrongDefense,
    Emergency,
}

/// Threat tallies for one side.
#[derive(Debug, Clone, Copy)]
struct Threats {
    open_threes: i32,
    simple_fours: i32,
    open_fours: i32,
}

impl Threats {
    fn from_counts(counts: &PatternCounts) -> Self {
        Self {
            open_threes: i32::from(counts.get(PatternKind::OpenThree)),
            simple_fours: i32::from(counts.get(PatternKind::SimpleFour)),
            open_fours: i32::from(counts.get(PatternKind::OpenFour)),
        }
    }

    fn weight(&self) -> i32 {
        self.open_threes * 3 + self.simple_fours * 10 + self.open_fours * 50
    }
}

fn posture(own: &Threats, opp: &Threats) -> Posture {
    if opp.open_fours > 0 || opp.simple_fours >= 2 {
        Posture::Emergency
    } else if opp.simple_fours > 0 || opp.open_threes >= 2 {
        Posture::StrongDefense
    } else if own.open_fours > 0 || (own.simple_fours >= 1 && own.open_threes >= 1) {
        Posture::StrongAttack
    } else if own.weight() > opp.weight() + 10 {
        Posture::LeaningAttack
    } else if opp.weight() > own.weight() + 10 {
        Posture::LeaningDefense
    } else {
        Posture::Balanced
    }
}

/// Center control for the opening: stones within two cells of the center.
fn opening_bonus(board: &Board, color: Stone) -> i32 {
    board
        .stones(color)
        .map(|stones| {
            stones
                .iter_ones()
                .filter(|&pos| pos.chebyshev(CENTER) <= 2)
                .map(|pos| (50 - i32::from(pos.manhattan(CENTER)) * 10).max(0))
                .sum::<i32>()
        })
        .unwrap_or(0)
}

fn middle_bonus(own: &Threats) -> i32 {
    let mut bonus = 0;
    if own.open_threes >= 1 && own.simple_fours >= 1 {
        bonus += PatternScore::OPEN_FOUR;
    }
    if own.open_threes >= 2 {
        bonus += PatternScore::OPEN_THREE;
    }
    bonus
}

fn endgame_bonus(opp: &Threats) -> i32 {
    if opp.open_fours > 0 {
        -PatternScore::FIVE / 4
    } else {
        0
    }
}

/// Stacked threats grow faster than linearly.
fn nonlinear_bonus(own: &Threats, opp: &Threats) -> i32 {
    let mut bonus = 0.0f64;
    if own.open_threes >= 2 {
        bonus += f64::from(PatternScore::OPEN_THREE) * f64::from(own.open_threes).powf(1.5);
    }
    if own.simple_fours >= 1 && own.open_threes >= 1 {
        bonus += f64::from(PatternScore::SIMPLE_FOUR * 2);
    }
    if own.open_fours >= 1 {
        bonus += f64::from(PatternScore::OPEN_FOUR * 3);
    }
    if opp.open_threes >= 2 {
        bonus -= f64::from(PatternScore::OPEN_THREE) * f64::from(opp.open_threes).powf(1.8);
    }
    if opp.simple_fours >= 1 {
        bonus -= f64::from(PatternScore::SIMPLE_FOUR * 2);
    }
    if opp.open_fours >= 1 {
        bonus -= f64::from(PatternScore::OPEN_FOUR * 5);
    }
    bonus as i32
}

fn scale(score: i64, num: i64, den: i64) -> i64 {
    score * num / den
}

/// Adaptive evaluation from the perspective of `color`.
#[must_use]
pub fn evaluate_adaptive(board: &Board, color: Stone) -> i32 {
    let own_counts = PatternCounts::scan(board, color);
    let opp_counts = PatternCounts::scan(board, color.opponent());
    let own = Threats::from_counts(&own_counts);
    let opp = Threats::from_counts(&opp_counts);

    let phase = Phase::of(board);
    let mut score = i64::from(combine(&own_counts, &opp_counts));
    score += i64::from(match phase {
        Phase::Opening => opening_bonus(board, color),
        Phase::Middle => middle_bonus(&own),
        Phase::Endgame => endgame_bonus(&opp),
    });
    score += i64::from(nonlinear_bonus(&own, &opp));

    let (num, den) = phase.weight();
    score = scale(score, num, den);

    score = match posture(&own, &opp) {
        Posture::StrongAttack => scale(score, 13, 10),
        Posture::LeaningAttack => scale(score, 11, 10),
        Posture::Balanced => score,
        Posture::LeaningDefense => scale(score, 9, 10),
        Posture::StrongDefense => scale(score, 7, 10),
        // The opponent wins next move unless answered: report a near loss
        Posture::Emergency => score.min(-i64::from(PatternScore::FIVE / 2)),
    };

    score.clamp(-i64::from(PatternScore::FIVE) * 8, i64::from(PatternScore::FIVE) * 8) as i32
}
