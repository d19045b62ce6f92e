use crate::game_state::chess_types::*;
use crate::moves::rays::{slide, trace_ray};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

#[inline]
pub fn rook_attacks(square: Square, occupancy: SquareMask) -> SquareMask {
    slide(square, &ROOK_DIRECTIONS, occupancy)
}

/// A rook scores when its column is clear all the way to the opponent edge.
#[inline]
pub fn rook_can_exit(square: Square, color: Color, occupancy: SquareMask) -> bool {
    trace_ray(square, color.forward(), 0, occupancy).exits_through_opponent_edge(color)
}
