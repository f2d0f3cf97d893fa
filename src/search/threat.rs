//! VCF (Victory by Continuous Fours) forced-win search
//!
//! The attacker only plays moves that make a four, so every reply of the
//! defender is forced. A line wins when the attacker completes five, when a
//! single move leaves two winning cells, or when the one cell the defender
//! must take is forbidden for a Black defender. A line fails as soon as the
//! defender can complete five first.

use crate::board::{Board, Pos, Stone};
use crate::eval::winning_cells;
use crate::rules::{is_forbidden, is_valid_move};

use super::movegen::candidate_cells;

/// Default attacker moves searched
pub const DEFAULT_VCF_PLIES: u8 = 6;

/// Result of a VCF search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreatResult {
    /// Attacker moves of the winning line, in order
    pub winning_sequence: Vec<Pos>,
    pub found: bool,
}

impl ThreatResult {
    #[inline]
    fn not_found() -> Self {
        Self {
            winning_sequence: Vec::new(),
            found: false,
        }
    }

    #[inline]
    fn found(sequence: Vec<Pos>) -> Self {
        Self {
            winning_sequence: sequence,
            found: true,
        }
    }

    /// First attacker move of the winning line.
    pub fn first_move(&self) -> Option<Pos> {
        self.winning_sequence.first().copied()
    }
}

/// Forced-win searcher bounded by a number of attacker moves.
pub struct ThreatSearcher {
    max_plies: u8,
    nodes: u64,
}

impl ThreatSearcher {
    pub fn new(max_plies: u8) -> Self {
        Self {
            max_plies,
            nodes: 0,
        }
    }

    /// Search for a continuous-four win for `attacker`. The board is
    /// restored before returning.
    pub fn search_vcf(&mut self, board: &mut Board, attacker: Stone) -> ThreatResult {
        self.nodes = 0;
        let mut sequence = Vec::new();
        if self.vcf(board, attacker, self.max_plies, &mut sequence) {
            ThreatResult::found(sequence)
        } else {
            ThreatResult::not_found()
        }
    }

    fn vcf(&mut self, board: &mut Board, attacker: Stone, plies_left: u8, sequence: &mut Vec<Pos>) -> bool {
        self.nodes += 1;
        if plies_left == 0 {
            return false;
        }

        if let Some(&five) = winning_cells(board, attacker).first() {
            sequence.push(five);
            return true;
        }

        let defender = attacker.opponent();
        for pos in four_moves(board, attacker) {
            let Some(mut placed) = board.scoped_place(pos, attacker) else {
                continue;
            };
            sequence.push(pos);

            if winning_cells(&placed, defender).is_empty() {
                let threats = winning_cells(&placed, attacker);
                let won = match threats.as_slice() {
                    [] => false,
                    [block] => {
                        let block = *block;
                        if defender == Stone::Black && is_forbidden(&placed, block, defender) {
                            true
                        } else {
                            match placed.scoped_place(block, defender) {
                                Some(mut blocked) => {
                                    self.vcf(&mut blocked, attacker, plies_left - 1, sequence)
                                }
                                None => false,
                            }
                        }
                    }
                    _ => true,
                };
                if won {
                    return true;
                }
            }
            sequence.pop();
        }
        false
    }

    pub fn nodes(&self) -> u64 {
        self.nodes
    }
}

impl Default for ThreatSearcher {
    fn default() -> Self {
        Self::new(DEFAULT_VCF_PLIES)
    }
}

/// Legal cells where `color` makes a four: afterwards at least one cell
/// completes five.
pub fn four_moves(board: &mut Board, color: Stone) -> Vec<Pos> {
    candidate_cells(board)
        .into_iter()
        .filter(|&pos| {
            is_valid_move(board, pos, color)
                && board
                    .scoped_place(pos, color)
                    .is_some_and(|placed| !winning_cells(&placed, color).is_empty())
        })
        .collect()
}
