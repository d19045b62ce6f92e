use crate::game_state::chess_rules::SQUARE_COUNT;
use crate::game_state::chess_types::*;
use crate::moves::rays::{on_board, square_bit};

/// Single forward step, indexed by `[color][square]`.
pub const PAWN_PUSHES: [[SquareMask; SQUARE_COUNT]; 2] =
    [generate_pawn_pushes(Color::Light), generate_pawn_pushes(Color::Dark)];

/// Forward diagonals, indexed by `[color][square]`.
pub const PAWN_ATTACKS: [[SquareMask; SQUARE_COUNT]; 2] =
    [generate_pawn_attacks(Color::Light), generate_pawn_attacks(Color::Dark)];

#[inline]
pub const fn pawn_pushes(color: Color, square: Square) -> SquareMask {
    PAWN_PUSHES[color.index()][square as usize]
}

#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> SquareMask {
    PAWN_ATTACKS[color.index()][square as usize]
}

/// Landing on the opponent edge row turns a pawn move into a promotion.
#[inline]
pub const fn is_promotion_square(color: Color, square: Square) -> bool {
    square / 3 == color.opponent_edge_row()
}

/// Moves for a pawn: pushes onto empty squares, diagonals onto enemies.
#[inline]
pub fn pawn_moves(
    color: Color,
    square: Square,
    occupancy_all: SquareMask,
    enemy_occupancy: SquareMask,
) -> SquareMask {
    (pawn_pushes(color, square) & !occupancy_all) | (pawn_attacks(color, square) & enemy_occupancy)
}

const fn generate_pawn_pushes(color: Color) -> [SquareMask; SQUARE_COUNT] {
    let mut table = [0; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let row = (sq / 3) as i8 + color.forward();
        let col = (sq % 3) as i8;
        if on_board(row, col) {
            table[sq] = square_bit(row, col);
        }
        sq += 1;
    }

    table
}

const fn generate_pawn_attacks(color: Color) -> [SquareMask; SQUARE_COUNT] {
    let mut table = [0; SQUARE_COUNT];
    let mut sq = 0usize;

    while sq < SQUARE_COUNT {
        let row = (sq / 3) as i8 + color.forward();
        let col = (sq % 3) as i8;
        let mut attacks = 0;

        if on_board(row, col - 1) {
            attacks |= square_bit(row, col - 1);
        }
        if on_board(row, col + 1) {
            attacks |= square_bit(row, col + 1);
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{is_promotion_square, pawn_attacks, pawn_moves, pawn_pushes};
    use crate::game_state::chess_types::Color;

    #[test]
    fn light_pawn_pushes_toward_row_zero() {
        // [2,1] -> [1,1]
        assert_eq!(pawn_pushes(Color::Light, 7), 1 << 4);
        assert_eq!(pawn_pushes(Color::Light, 1), 0);
    }

    #[test]
    fn dark_pawn_attacks_from_center() {
        // [1,1] -> [2,0], [2,2]
        assert_eq!(pawn_attacks(Color::Dark, 4), (1 << 6) | (1 << 8));
    }

    #[test]
    fn pawn_push_is_blocked_and_diagonal_needs_enemy() {
        let blocked = pawn_moves(Color::Light, 7, 1 << 4, 0);
        assert_eq!(blocked, 0);

        let capture = pawn_moves(Color::Light, 7, (1 << 4) | (1 << 3), 1 << 3);
        assert_eq!(capture, 1 << 3);
    }

    #[test]
    fn promotion_rows() {
        assert!(is_promotion_square(Color::Light, 2));
        assert!(!is_promotion_square(Color::Light, 8));
        assert!(is_promotion_square(Color::Dark, 7));
    }
}
