//! Convenience wrapper around the pure move pipeline.
//!
//! `GameEngine` owns the latest `GameState` and nothing else; every call
//! re-derives what it needs from that snapshot, so an engine can be rebuilt
//! at any time with `from_state` (for example after a full-state sync).

use tracing::debug;

use crate::engine::victory::apply_victory;
use crate::errors::{MoveError, SetupError};
use crate::game_state::checksum::refresh_checksum;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::PieceSetup;
use crate::move_generation::legal_move_apply::{apply_move, apply_promotion, MoveOutcome};
use crate::move_generation::move_generator::{
    can_move_off_board, get_valid_moves, legal_move_requests,
};

#[derive(Debug, Clone)]
pub struct GameEngine {
    state: GameState,
}

impl GameEngine {
    /// New game with the default back rows.
    pub fn new(light_player: Player, dark_player: Player) -> Self {
        Self::from_state(GameState::new_game(light_player, dark_player))
    }

    /// New game from a placement. A placement that leaves light without a
    /// move starts already finished.
    pub fn with_placement(
        light_player: Player,
        dark_player: Player,
        placement: &[PieceSetup],
    ) -> Result<Self, SetupError> {
        let mut state = GameState::from_placement(light_player, dark_player, placement)?;
        if apply_victory(&mut state).is_some() {
            refresh_checksum(&mut state);
        }
        Ok(Self::from_state(state))
    }

    /// Resume from an existing snapshot.
    pub fn from_state(state: GameState) -> Self {
        Self { state }
    }

    /// Apply a move for the side to move. On `Applied` the engine advances to
    /// the returned snapshot; on errors and `PromotionRequired` it is unchanged.
    pub fn make_move(
        &mut self,
        from: Position,
        to: impl Into<Destination>,
    ) -> Result<MoveOutcome, MoveError> {
        let to = to.into();
        let outcome = apply_move(&self.state, from, to)?;
        if let MoveOutcome::Applied(next) = &outcome {
            debug!(turn = self.state.current_turn, %from, %to, "move applied");
            self.state = next.clone();
        }
        Ok(outcome)
    }

    /// Finish a promotion previously reported as `PromotionRequired`.
    pub fn promote_pawn(
        &mut self,
        from: Position,
        to: Position,
        kind: PieceKind,
    ) -> Result<GameState, MoveError> {
        let next = apply_promotion(&self.state, from, to, kind)?;
        debug!(turn = self.state.current_turn, %from, %to, %kind, "promotion applied");
        self.state = next.clone();
        Ok(next)
    }

    /// Apply a request as relayed by a peer: promotions carry their kind.
    pub fn apply_request(&mut self, request: MoveRequest) -> Result<MoveOutcome, MoveError> {
        match (request.promotion, request.to) {
            (Some(kind), Destination::Square(to)) => self
                .promote_pawn(request.from, to, kind)
                .map(MoveOutcome::Applied),
            (Some(_), Destination::OffBoard) => Err(MoveError::NotAPromotion {
                from: request.from,
                to: request.to,
            }),
            (None, to) => self.make_move(request.from, to),
        }
    }

    pub fn get_valid_moves(&self, position: Position) -> Vec<Position> {
        get_valid_moves(position, &self.state.board)
    }

    pub fn can_move_off_board(&self, position: Position) -> bool {
        self.state
            .piece_at(position)
            .is_some_and(|piece| can_move_off_board(position, piece, &self.state.board))
    }

    /// Every legal request for the side to move.
    pub fn legal_moves(&self) -> Vec<MoveRequest> {
        legal_move_requests(&self.state)
    }

    #[inline]
    pub fn game_state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn checksum(&self) -> &str {
        &self.state.checksum
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}
