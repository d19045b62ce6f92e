//! Per-piece movement rules over a board snapshot.
//!
//! `get_valid_moves` and `can_move_off_board` are the stateless queries the
//! engine validates against. `LegalMoveGenerator` enumerates every legal move
//! of the side to move together with the resulting state, which the victory
//! check and the perft walker build on.

use crate::errors::MoveError;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::{apply_move, apply_promotion, MoveOutcome};
use crate::move_generation::legal_move_shared::{
    mask_to_positions, occupancy_all, occupancy_for_color,
};
use crate::moves::bishop_moves::{bishop_attacks, bishop_can_exit};
use crate::moves::knight_moves::{knight_attacks, knight_can_exit};
use crate::moves::pawn_moves::{is_promotion_square, pawn_moves};
use crate::moves::queen_moves::{queen_attacks, queen_can_exit};
use crate::moves::rook_moves::{rook_attacks, rook_can_exit};

pub type MoveGenResult<T> = Result<T, MoveError>;

/// On-board destinations for the piece at `position`, as a square mask.
pub fn valid_move_mask(position: Position, board: &Board) -> SquareMask {
    let Some(piece) = board[position.row() as usize][position.col() as usize].as_ref() else {
        return 0;
    };

    let square = position.square();
    let own_occ = occupancy_for_color(board, piece.owner);
    let enemy_occ = occupancy_for_color(board, piece.owner.opposite());
    let all_occ = own_occ | enemy_occ;

    let targets = match piece.kind {
        PieceKind::Rook => rook_attacks(square, all_occ),
        PieceKind::Knight => knight_attacks(square),
        PieceKind::Bishop => bishop_attacks(square, all_occ),
        PieceKind::Queen => queen_attacks(square, all_occ),
        PieceKind::Pawn => pawn_moves(piece.owner, square, all_occ, enemy_occ),
    };

    targets & !own_occ
}

/// On-board destinations for the piece at `position`; empty when the square is empty.
pub fn get_valid_moves(position: Position, board: &Board) -> Vec<Position> {
    mask_to_positions(valid_move_mask(position, board))
}

/// Whether `piece`, standing on `position`, can leave through its opponent edge.
pub fn can_move_off_board(position: Position, piece: &Piece, board: &Board) -> bool {
    let square = position.square();
    let occupancy = occupancy_all(board) & !position.mask();

    match piece.kind {
        PieceKind::Rook => rook_can_exit(square, piece.owner, occupancy),
        PieceKind::Knight => knight_can_exit(square, piece.owner),
        PieceKind::Bishop => bishop_can_exit(square, piece.owner, occupancy),
        PieceKind::Queen => queen_can_exit(square, piece.owner, occupancy),
        PieceKind::Pawn => false,
    }
}

/// Whether `color` has any on-board or off-board move.
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .iter()
        .flatten()
        .flatten()
        .filter(|piece| piece.owner == color)
        .any(|piece| {
            piece.position.is_some_and(|position| {
                valid_move_mask(position, board) != 0 || can_move_off_board(position, piece, board)
            })
        })
}

/// Every legal move of the side to move. Pawn moves onto the promotion row
/// are listed once per promotion kind. Empty once the game is over.
pub fn legal_move_requests(game_state: &GameState) -> Vec<MoveRequest> {
    let mut out = Vec::new();
    if game_state.is_terminal() {
        return out;
    }

    let side = game_state.current_player;
    for piece in game_state.pieces_on_board().filter(|piece| piece.owner == side) {
        let Some(from) = piece.position else {
            continue;
        };

        for to in get_valid_moves(from, &game_state.board) {
            if piece.kind == PieceKind::Pawn && is_promotion_square(side, to.square()) {
                for kind in PROMOTION_KINDS {
                    out.push(MoveRequest::promoting(from, to, kind));
                }
            } else {
                out.push(MoveRequest::new(from, to));
            }
        }

        if can_move_off_board(from, piece, &game_state.board) {
            out.push(MoveRequest::new(from, Destination::OffBoard));
        }
    }

    out
}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub request: MoveRequest,
    pub game_after_move: GameState,
}

pub trait MoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        legal_move_requests(game_state)
            .into_iter()
            .map(|request| {
                let game_after_move = match (request.promotion, request.to) {
                    (Some(kind), Destination::Square(to)) => {
                        apply_promotion(game_state, request.from, to, kind)?
                    }
                    _ => match apply_move(game_state, request.from, request.to)? {
                        MoveOutcome::Applied(next) => next,
                        MoveOutcome::PromotionRequired { from, to } => {
                            return Err(MoveError::NotAPromotion {
                                from,
                                to: to.into(),
                            })
                        }
                    },
                };
                Ok(GeneratedMove {
                    request,
                    game_after_move,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::game_state::PieceSetup;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test position on board")
    }

    fn setup(kind: PieceKind, owner: Color, row: u8, col: u8) -> PieceSetup {
        PieceSetup {
            kind,
            owner,
            position: at(row, col),
        }
    }

    fn game(placement: &[PieceSetup]) -> GameState {
        GameState::from_placement(Player::new("a", "A"), Player::new("b", "B"), placement)
            .expect("valid placement")
    }

    #[test]
    fn center_rook_on_empty_row_moves_sideways_and_exits() {
        let state = game(&[
            setup(PieceKind::Rook, Color::Light, 1, 1),
            setup(PieceKind::Rook, Color::Dark, 0, 0),
        ]);
        let moves = get_valid_moves(at(1, 1), &state.board);
        assert!(moves.contains(&at(1, 0)));
        assert!(moves.contains(&at(1, 2)));
        assert!(moves.contains(&at(0, 1)));
        assert!(moves.contains(&at(2, 1)));

        let rook = state.piece_at(at(1, 1)).expect("rook");
        assert!(can_move_off_board(at(1, 1), rook, &state.board));
    }

    #[test]
    fn dark_center_rook_exits_toward_row_two() {
        let state = game(&[
            setup(PieceKind::Rook, Color::Dark, 1, 1),
            setup(PieceKind::Rook, Color::Light, 2, 0),
        ]);
        let rook = state.piece_at(at(1, 1)).expect("rook");
        assert!(can_move_off_board(at(1, 1), rook, &state.board));

        let blocked = game(&[
            setup(PieceKind::Rook, Color::Dark, 1, 1),
            setup(PieceKind::Rook, Color::Light, 2, 1),
        ]);
        let rook = blocked.piece_at(at(1, 1)).expect("rook");
        assert!(!can_move_off_board(at(1, 1), rook, &blocked.board));
    }

    #[test]
    fn own_pieces_block_and_enemies_are_capturable() {
        let state = GameState::new_game(Player::new("a", "A"), Player::new("b", "B"));
        // Light rook on [2,0]: column up to the dark rook at [0,0].
        assert_eq!(get_valid_moves(at(2, 0), &state.board), vec![at(0, 0), at(1, 0)]);
        // Light knight on [2,1]: [0,0] and [0,2] both hold dark pieces.
        assert_eq!(get_valid_moves(at(2, 1), &state.board), vec![at(0, 0), at(0, 2)]);
        assert!(get_valid_moves(at(1, 1), &state.board).is_empty());
    }

    #[test]
    fn pawns_never_exit() {
        let state = game(&[
            setup(PieceKind::Pawn, Color::Light, 1, 1),
            setup(PieceKind::Rook, Color::Dark, 2, 2),
        ]);
        let pawn = state.piece_at(at(1, 1)).expect("pawn");
        assert!(!can_move_off_board(at(1, 1), pawn, &state.board));
        assert_eq!(get_valid_moves(at(1, 1), &state.board), vec![at(0, 1)]);
    }

    #[test]
    fn promotion_moves_are_listed_per_kind() {
        let state = game(&[
            setup(PieceKind::Pawn, Color::Light, 1, 1),
            setup(PieceKind::Rook, Color::Dark, 2, 2),
        ]);
        let requests = legal_move_requests(&state);
        assert_eq!(requests.len(), 4);
        assert!(requests.iter().all(|request| request.promotion.is_some()));
    }

    #[test]
    fn generator_applies_every_listed_move() {
        let state = GameState::new_game(Player::new("a", "A"), Player::new("b", "B"));
        let generated = LegalMoveGenerator
            .generate_legal_moves(&state)
            .expect("generation should succeed");
        assert_eq!(generated.len(), legal_move_requests(&state).len());
        assert!(generated
            .iter()
            .all(|mv| mv.game_after_move.current_turn == 1));
    }

    #[test]
    fn side_with_only_boxed_in_pawn_has_no_moves() {
        let state = game(&[
            setup(PieceKind::Pawn, Color::Light, 1, 1),
            setup(PieceKind::Knight, Color::Dark, 0, 1),
        ]);
        assert!(!has_any_legal_move(&state.board, Color::Light));
        assert!(has_any_legal_move(&state.board, Color::Dark));
    }
}
