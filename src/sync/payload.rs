//! Messages carried in the shared URL fragment.
//!
//! Payloads are internally tagged on `"type"`. Field names are camelCase so a
//! fragment produced by one peer reads the same on any other.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::victory::evaluate_victory;
use crate::game_state::checksum::verify_checksum;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SyncPayload {
    /// The whole game; replaces the receiver's copy unconditionally.
    FullState {
        game_state: Box<GameState>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_name: Option<String>,
    },
    /// One move. `turn` and `checksum` describe the sender's state before the
    /// move, so the receiver can confirm it holds the same state.
    Delta {
        #[serde(rename = "move")]
        mv: MoveRequest,
        turn: u32,
        checksum: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player_name: Option<String>,
    },
    /// Ask the peer to answer with its full state.
    ResyncRequest {},
}

impl SyncPayload {
    pub fn full_state(game_state: GameState, player_name: Option<String>) -> Self {
        SyncPayload::FullState {
            game_state: Box::new(game_state),
            player_name,
        }
    }

    pub const fn kind(&self) -> &'static str {
        match self {
            SyncPayload::FullState { .. } => "full_state",
            SyncPayload::Delta { .. } => "delta",
            SyncPayload::ResyncRequest {} => "resync_request",
        }
    }

    /// Structural checks beyond what deserialization enforces.
    pub fn validate(&self) -> Result<(), String> {
        match self {
            SyncPayload::FullState { game_state, .. } => validate_game_state(game_state),
            SyncPayload::Delta { checksum, mv, .. } => {
                if checksum.is_empty() {
                    return Err("delta carries an empty checksum".to_owned());
                }
                if mv.promotion.is_some_and(|kind| !kind.is_promotion_target()) {
                    return Err("delta promotes to a pawn".to_owned());
                }
                Ok(())
            }
            SyncPayload::ResyncRequest {} => Ok(()),
        }
    }
}

/// Check that a received state could have been produced by the engine.
pub fn validate_game_state(state: &GameState) -> Result<(), String> {
    for position in Position::all() {
        if let Some(piece) = state.piece_at(position) {
            if piece.position != Some(position) {
                return Err(format!("piece {} does not match its cell {position}", piece.id));
            }
        }
    }

    for (color, court, captured) in [
        (Color::Light, &state.light_court, &state.captured_light),
        (Color::Dark, &state.dark_court, &state.captured_dark),
    ] {
        for piece in court.iter().chain(captured.iter()) {
            if piece.owner != color {
                return Err(format!("piece {} is filed under {color}", piece.id));
            }
            if piece.position.is_some() {
                return Err(format!("off-board piece {} has a position", piece.id));
            }
        }
    }

    let mut seen = HashSet::new();
    for piece in state.all_pieces() {
        if !seen.insert(piece.id.as_str()) {
            return Err(format!("duplicate piece id {}", piece.id));
        }
    }

    if state.move_history.len() != state.current_turn as usize {
        return Err(format!(
            "history holds {} moves at turn {}",
            state.move_history.len(),
            state.current_turn
        ));
    }
    let expected_player = if state.current_turn % 2 == 0 { Color::Light } else { Color::Dark };
    if state.current_player != expected_player {
        return Err(format!(
            "{} to move at turn {}",
            state.current_player, state.current_turn
        ));
    }
    if state.winner != state.status.winner() {
        return Err("winner does not agree with status".to_owned());
    }
    if evaluate_victory(state).is_some() {
        return Err(format!("{} has no legal move but the game is still playing", state.current_player));
    }
    if !verify_checksum(state) {
        return Err("checksum does not match contents".to_owned());
    }
    Ok(())
}
