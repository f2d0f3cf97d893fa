//! Game rules for 15x15 renju
//!
//! - Win conditions (5-in-a-row)
//! - Forbidden moves for Black (overline, double-four, double-three)

pub mod forbidden;
pub mod win;

// Re-exports for convenient access
pub use forbidden::{forbidden_kind, forbidden_points, is_forbidden, is_valid_move, ForbiddenKind};
pub use win::{
    check_winner, find_five_positions, has_five_at_pos, has_five_in_row, is_winning_move,
    is_winning_placement,
};
