//! Ray walking on the 3×3 grid.
//!
//! Sliding pieces share one walker: it collects every square reached along a
//! direction (including a blocking square) and, when nothing blocks, reports
//! the first off-board landing so callers can tell an exit through the
//! opponent edge from one through a side.

use crate::game_state::chess_rules::BOARD_SIZE;
use crate::game_state::chess_types::*;

const SIZE: i8 = BOARD_SIZE as i8;

/// Squares reached along one direction, plus the off-board landing if unblocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayTrace {
    pub reach: SquareMask,
    pub exit: Option<(i8, i8)>,
}

impl RayTrace {
    /// Whether the ray leaves the board through `color`'s opponent edge.
    #[inline]
    pub fn exits_through_opponent_edge(&self, color: Color) -> bool {
        matches!(self.exit, Some((row, col)) if crosses_opponent_edge(color, row, col))
    }
}

/// True when `(row, col)` lies past `color`'s opponent edge and within the
/// board's columns.
#[inline]
pub const fn crosses_opponent_edge(color: Color, row: i8, col: i8) -> bool {
    let beyond = match color {
        Color::Light => row < 0,
        Color::Dark => row >= SIZE,
    };
    beyond && col >= 0 && col < SIZE
}

#[inline]
pub const fn on_board(row: i8, col: i8) -> bool {
    row >= 0 && row < SIZE && col >= 0 && col < SIZE
}

#[inline]
pub const fn square_bit(row: i8, col: i8) -> SquareMask {
    1 << (row * SIZE + col) as u32
}

pub fn trace_ray(square: Square, row_step: i8, col_step: i8, occupancy: SquareMask) -> RayTrace {
    let mut row = (square / 3) as i8 + row_step;
    let mut col = (square % 3) as i8 + col_step;
    let mut reach: SquareMask = 0;

    while on_board(row, col) {
        let bit = square_bit(row, col);
        reach |= bit;

        if (occupancy & bit) != 0 {
            return RayTrace { reach, exit: None };
        }

        row += row_step;
        col += col_step;
    }

    RayTrace {
        reach,
        exit: Some((row, col)),
    }
}

/// Union of `trace_ray` reach over several directions.
#[inline]
pub fn slide(square: Square, directions: &[(i8, i8)], occupancy: SquareMask) -> SquareMask {
    directions.iter().fold(0, |acc, &(row_step, col_step)| {
        acc | trace_ray(square, row_step, col_step, occupancy).reach
    })
}

#[cfg(test)]
mod tests {
    use super::{crosses_opponent_edge, trace_ray};
    use crate::game_state::chess_types::Color;

    #[test]
    fn open_ray_reports_exit() {
        // From square 7 ([2,1]) straight up an empty column.
        let trace = trace_ray(7, -1, 0, 0);
        assert_eq!(trace.reach, (1 << 4) | (1 << 1));
        assert_eq!(trace.exit, Some((-1, 1)));
        assert!(trace.exits_through_opponent_edge(Color::Light));
        assert!(!trace.exits_through_opponent_edge(Color::Dark));
    }

    #[test]
    fn blocker_is_reached_and_stops_ray() {
        let trace = trace_ray(7, -1, 0, 1 << 4);
        assert_eq!(trace.reach, 1 << 4);
        assert_eq!(trace.exit, None);
    }

    #[test]
    fn corner_exit_is_not_through_the_edge() {
        assert!(crosses_opponent_edge(Color::Light, -1, 2));
        assert!(!crosses_opponent_edge(Color::Light, -1, 3));
        assert!(!crosses_opponent_edge(Color::Light, 0, -1));
        assert!(crosses_opponent_edge(Color::Dark, 3, 0));
    }
}
