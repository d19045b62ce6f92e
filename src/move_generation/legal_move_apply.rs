//! Validating move application.
//!
//! `apply_move` and `apply_promotion` are pure: they read a snapshot, validate
//! the request against the movement rules, and return a fresh `GameState`.
//! Nothing is mutated on any error path.

use crate::engine::victory::apply_victory;
use crate::errors::MoveError;
use crate::game_state::checksum::refresh_checksum;
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{can_move_off_board, valid_move_mask};
use crate::moves::pawn_moves::is_promotion_square;

/// Result of a validated move request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was applied; this is the new snapshot.
    Applied(GameState),
    /// A pawn reached its promotion row. Nothing changed; finish the move
    /// with `apply_promotion`.
    PromotionRequired { from: Position, to: Position },
}

pub fn apply_move(
    game_state: &GameState,
    from: Position,
    to: Destination,
) -> Result<MoveOutcome, MoveError> {
    let piece = validate_source(game_state, from)?;

    match to {
        Destination::OffBoard => {
            if !can_move_off_board(from, piece, &game_state.board) {
                return Err(MoveError::CannotExitBoard(from));
            }
        }
        Destination::Square(target) => {
            ensure_reachable(game_state, from, target)?;
            if piece.kind == PieceKind::Pawn && is_promotion_square(piece.owner, target.square()) {
                return Ok(MoveOutcome::PromotionRequired { from, to: target });
            }
        }
    }

    commit_move(game_state, from, to, None).map(MoveOutcome::Applied)
}

/// Complete a pawn move onto its promotion row as `kind`.
pub fn apply_promotion(
    game_state: &GameState,
    from: Position,
    to: Position,
    kind: PieceKind,
) -> Result<GameState, MoveError> {
    let piece = validate_source(game_state, from)?;
    if !kind.is_promotion_target() {
        return Err(MoveError::InvalidPromotionPiece(kind));
    }
    ensure_reachable(game_state, from, to)?;
    if piece.kind != PieceKind::Pawn || !is_promotion_square(piece.owner, to.square()) {
        return Err(MoveError::NotAPromotion {
            from,
            to: to.into(),
        });
    }

    commit_move(game_state, from, Destination::Square(to), Some(kind))
}

fn validate_source(game_state: &GameState, from: Position) -> Result<&Piece, MoveError> {
    if game_state.is_terminal() {
        return Err(MoveError::GameOver);
    }

    let piece = game_state
        .piece_at(from)
        .ok_or(MoveError::NoPieceAtSource(from))?;

    if piece.owner != game_state.current_player {
        return Err(MoveError::NotYourPiece {
            position: from,
            owner: piece.owner,
            to_move: game_state.current_player,
        });
    }

    Ok(piece)
}

fn ensure_reachable(game_state: &GameState, from: Position, to: Position) -> Result<(), MoveError> {
    if (valid_move_mask(from, &game_state.board) & to.mask()) == 0 {
        return Err(MoveError::IllegalDestination {
            from,
            to: to.into(),
        });
    }
    Ok(())
}

fn commit_move(
    game_state: &GameState,
    from: Position,
    to: Destination,
    promotion: Option<PieceKind>,
) -> Result<GameState, MoveError> {
    let mut next = game_state.clone();

    let mut mover = next
        .take_piece(from)
        .ok_or(MoveError::NoPieceAtSource(from))?;
    let before = mover.clone();
    mover.move_count += 1;

    let mut captured = None;
    match to {
        Destination::OffBoard => {
            // Scored pieces are filed under their own color.
            mover.position = None;
            next.court_mut(mover.owner).push(mover);
        }
        Destination::Square(target) => {
            if let Some(mut victim) = next.take_piece(target) {
                captured = Some(victim.clone());
                victim.position = None;
                next.captured_mut(victim.owner).push(victim);
            }
            if let Some(kind) = promotion {
                mover.kind = kind;
            }
            next.put_piece(target, mover);
        }
    }

    next.move_history.push(MoveRecord {
        from,
        to,
        piece: before,
        captured,
        promoted_to: promotion,
    });
    next.current_player = next.current_player.opposite();
    next.current_turn += 1;

    apply_victory(&mut next);
    refresh_checksum(&mut next);

    Ok(next)
}
