//! Knight movement tables.
//!
//! Knights jump, so both the on-board targets and the squares from which a
//! knight can leave through the opponent edge are fixed tables.

use crate::game_state::chess_rules::SQUARE_COUNT;
use crate::game_state::chess_types::*;
use crate::moves::rays::{crosses_opponent_edge, on_board, square_bit};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

pub const KNIGHT_ATTACKS: [SquareMask; SQUARE_COUNT] = generate_knight_attacks();

/// Squares from which a knight of each color can jump off the board.
pub const KNIGHT_EXITS: [SquareMask; 2] = [
    generate_knight_exits(Color::Light),
    generate_knight_exits(Color::Dark),
];

#[inline]
pub const fn knight_attacks(square: Square) -> SquareMask {
    KNIGHT_ATTACKS[square as usize]
}

#[inline]
pub const fn knight_can_exit(square: Square, color: Color) -> bool {
    (KNIGHT_EXITS[color.index()] & (1 << square)) != 0
}

const fn generate_knight_attacks() -> [SquareMask; SQUARE_COUNT] {
    let mut table = [0; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let row = (sq / 3) as i8;
        let col = (sq % 3) as i8;
        let mut attacks = 0;
        let mut i = 0;

        while i < KNIGHT_OFFSETS.len() {
            let (r, c) = (row + KNIGHT_OFFSETS[i].0, col + KNIGHT_OFFSETS[i].1);
            if on_board(r, c) {
                attacks |= square_bit(r, c);
            }
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn generate_knight_exits(color: Color) -> SquareMask {
    let mut exits = 0;
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let row = (sq / 3) as i8;
        let col = (sq % 3) as i8;
        let mut i = 0;

        while i < KNIGHT_OFFSETS.len() {
            let (r, c) = (row + KNIGHT_OFFSETS[i].0, col + KNIGHT_OFFSETS[i].1);
            if crosses_opponent_edge(color, r, c) {
                exits |= 1 << sq;
            }
            i += 1;
        }

        sq += 1;
    }

    exits
}

#[cfg(test)]
mod tests {
    use super::{knight_attacks, knight_can_exit, KNIGHT_ATTACKS, KNIGHT_EXITS};
    use crate::game_state::chess_types::Color;

    #[test]
    fn knight_in_center_is_stuck() {
        assert_eq!(KNIGHT_ATTACKS[4], 0);
    }

    #[test]
    fn knight_from_corner_has_two_targets() {
        // [0,0] -> [1,2], [2,1]
        assert_eq!(knight_attacks(0), (1 << 5) | (1 << 7));
    }

    #[test]
    fn light_knight_exits_from_the_two_forward_rows() {
        assert_eq!(KNIGHT_EXITS[Color::Light.index()], 0b000_111_111);
        assert!(knight_can_exit(3, Color::Light));
        assert!(!knight_can_exit(7, Color::Light));
    }

    #[test]
    fn dark_knight_exit_table_mirrors_light() {
        assert_eq!(KNIGHT_EXITS[Color::Dark.index()], 0b111_111_000);
        assert!(knight_can_exit(4, Color::Dark));
        assert!(!knight_can_exit(1, Color::Dark));
    }
}
