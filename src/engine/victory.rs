//! Terminal-state classification.
//!
//! A game ends when the side to move has no legal move at all, which includes
//! having no pieces left on the board. The side with more pieces in its court
//! wins; equal courts are a draw. Captured pieces never count.

use std::cmp::Ordering;

use tracing::info;

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::has_any_legal_move;

/// The terminal status `game_state` should take, or `None` while play goes on.
pub fn evaluate_victory(game_state: &GameState) -> Option<GameStatus> {
    if game_state.is_terminal() {
        return None;
    }
    if has_any_legal_move(&game_state.board, game_state.current_player) {
        return None;
    }

    Some(score_status(game_state))
}

/// Status implied by the court counts alone.
pub fn score_status(game_state: &GameState) -> GameStatus {
    match game_state.light_court.len().cmp(&game_state.dark_court.len()) {
        Ordering::Greater => GameStatus::LightWins,
        Ordering::Less => GameStatus::DarkWins,
        Ordering::Equal => GameStatus::Draw,
    }
}

/// Move `game_state` into its terminal status when the game just ended.
/// Returns the status that was set.
pub fn apply_victory(game_state: &mut GameState) -> Option<GameStatus> {
    let status = evaluate_victory(game_state)?;
    game_state.status = status;
    game_state.winner = status.winner();

    info!(
        game_id = %game_state.game_id,
        turn = game_state.current_turn,
        light_scored = game_state.light_court.len(),
        dark_scored = game_state.dark_court.len(),
        ?status,
        "game over"
    );
    Some(status)
}

#[cfg(test)]
mod tests {
    use super::{apply_victory, evaluate_victory};
    use crate::game_state::chess_types::*;
    use crate::game_state::game_state::PieceSetup;

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test position on board")
    }

    fn game(placement: &[PieceSetup]) -> GameState {
        GameState::from_placement(Player::new("a", "A"), Player::new("b", "B"), placement)
            .expect("valid placement")
    }

    fn lone_rooks() -> GameState {
        game(&[
            PieceSetup { kind: PieceKind::Rook, owner: Color::Light, position: at(2, 0) },
            PieceSetup { kind: PieceKind::Rook, owner: Color::Dark, position: at(0, 2) },
        ])
    }

    fn score(state: &mut GameState, color: Color, position: Position) {
        let mut piece = state.take_piece(position).expect("piece present");
        piece.position = None;
        state.court_mut(color).push(piece);
    }

    #[test]
    fn game_continues_while_side_to_move_has_moves() {
        let state = lone_rooks();
        assert_eq!(evaluate_victory(&state), None);
    }

    #[test]
    fn more_scored_pieces_wins() {
        let mut state = lone_rooks();
        score(&mut state, Color::Light, at(2, 0));
        assert_eq!(evaluate_victory(&state), Some(GameStatus::LightWins));

        assert_eq!(apply_victory(&mut state), Some(GameStatus::LightWins));
        assert_eq!(state.winner, Some(Winner::Light));
    }

    #[test]
    fn equal_courts_with_nothing_in_play_is_a_draw() {
        let mut state = lone_rooks();
        score(&mut state, Color::Light, at(2, 0));
        score(&mut state, Color::Dark, at(0, 2));
        assert_eq!(evaluate_victory(&state), Some(GameStatus::Draw));
    }

    #[test]
    fn captured_pieces_do_not_score() {
        let mut state = lone_rooks();
        score(&mut state, Color::Dark, at(0, 2));
        let mut light_rook = state.take_piece(at(2, 0)).expect("rook");
        light_rook.position = None;
        state.captured_light.push(light_rook);
        assert_eq!(evaluate_victory(&state), Some(GameStatus::DarkWins));
    }

    #[test]
    fn terminal_status_is_set_once() {
        let mut state = lone_rooks();
        score(&mut state, Color::Light, at(2, 0));
        assert!(apply_victory(&mut state).is_some());
        assert_eq!(apply_victory(&mut state), None);
        assert_eq!(state.status, GameStatus::LightWins);
    }
}
