use crate::game_state::chess_types::*;

#[inline]
pub fn piece_on_square(board: &Board, square: Square) -> Option<&Piece> {
    Position::from_square(square)
        .and_then(|position| board[position.row() as usize][position.col() as usize].as_ref())
}

#[inline]
pub fn occupancy_for_color(board: &Board, color: Color) -> SquareMask {
    board
        .iter()
        .flatten()
        .flatten()
        .filter(|piece| piece.owner == color)
        .filter_map(|piece| piece.position)
        .fold(0, |acc, position| acc | position.mask())
}

#[inline]
pub fn occupancy_all(board: &Board) -> SquareMask {
    occupancy_for_color(board, Color::Light) | occupancy_for_color(board, Color::Dark)
}

/// Expand a square mask into positions, in square order.
pub fn mask_to_positions(mut mask: SquareMask) -> Vec<Position> {
    let mut out = Vec::with_capacity(mask.count_ones() as usize);
    while mask != 0 {
        let square = mask.trailing_zeros() as Square;
        if let Some(position) = Position::from_square(square) {
            out.push(position);
        }
        mask &= mask - 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{mask_to_positions, occupancy_all, occupancy_for_color, piece_on_square};
    use crate::game_state::chess_types::*;

    #[test]
    fn start_position_occupancy() {
        let game = GameState::new_game(Player::new("a", "A"), Player::new("b", "B"));
        assert_eq!(occupancy_for_color(&game.board, Color::Light), 0b111_000_000);
        assert_eq!(occupancy_for_color(&game.board, Color::Dark), 0b000_000_111);
        assert_eq!(occupancy_all(&game.board), 0b111_000_111);
        assert_eq!(
            piece_on_square(&game.board, 7).map(|piece| piece.kind),
            Some(PieceKind::Knight)
        );
        assert!(piece_on_square(&game.board, 4).is_none());
        assert!(piece_on_square(&game.board, 9).is_none());
    }

    #[test]
    fn mask_expands_in_square_order() {
        let positions = mask_to_positions((1 << 8) | (1 << 3));
        assert_eq!(
            positions,
            vec![
                Position::new(1, 0).expect("on board"),
                Position::new(2, 2).expect("on board")
            ]
        );
    }
}
