//! Bishop movement on the 3×3 board.
//!
//! A diagonal can only leave through the opponent edge by crossing the middle
//! column of that edge row; corner exits land beside the board and do not count.

use crate::game_state::chess_types::*;
use crate::moves::rays::{slide, trace_ray};

pub const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[inline]
pub fn bishop_attacks(square: Square, occupancy: SquareMask) -> SquareMask {
    slide(square, &BISHOP_DIRECTIONS, occupancy)
}

pub fn bishop_can_exit(square: Square, color: Color, occupancy: SquareMask) -> bool {
    if square / 3 == color.opponent_edge_row() {
        return true;
    }

    BISHOP_DIRECTIONS.iter().any(|&(row_step, col_step)| {
        trace_ray(square, row_step, col_step, occupancy).exits_through_opponent_edge(color)
    })
}

#[cfg(test)]
mod tests {
    use super::{bishop_attacks, bishop_can_exit};
    use crate::game_state::chess_types::Color;

    #[test]
    fn bishop_from_center_reaches_corners() {
        assert_eq!(bishop_attacks(4, 0), 1 | (1 << 2) | (1 << 6) | (1 << 8));
    }

    #[test]
    fn bishop_exits_through_middle_column() {
        // [1,0] -> [0,1] -> off.
        assert!(bishop_can_exit(3, Color::Light, 0));
        assert!(!bishop_can_exit(3, Color::Light, 1 << 1));
        // [1,2] for dark: [2,1] -> off.
        assert!(bishop_can_exit(5, Color::Dark, 0));
    }

    #[test]
    fn bishop_cannot_exit_through_corner() {
        assert!(!bishop_can_exit(4, Color::Light, 0));
        assert!(!bishop_can_exit(6, Color::Light, 0));
        assert!(!bishop_can_exit(7, Color::Light, 0));
    }

    #[test]
    fn bishop_on_opponent_row_always_exits() {
        assert!(bishop_can_exit(0, Color::Light, 0b1_1111_1111));
        assert!(bishop_can_exit(8, Color::Dark, 0b1_1111_1111));
    }
}
