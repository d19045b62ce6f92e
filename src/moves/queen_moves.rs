use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::{bishop_attacks, bishop_can_exit};
use crate::moves::rook_moves::{rook_attacks, rook_can_exit};

#[inline]
pub fn queen_attacks(square: Square, occupancy: SquareMask) -> SquareMask {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[inline]
pub fn queen_can_exit(square: Square, color: Color, occupancy: SquareMask) -> bool {
    rook_can_exit(square, color, occupancy) || bishop_can_exit(square, color, occupancy)
}
