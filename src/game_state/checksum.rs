//! Deterministic state checksum.
//!
//! The checksum is a SHA-256 digest of a canonical JSON view of the game:
//! struct fields serialize in declaration order, so equal states always yield
//! equal bytes. The checksum field, game id, version and player descriptors
//! are not part of the view.

use std::fmt::Write;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::game_state::chess_types::*;

/// Number of digest bytes kept in the hex checksum.
const CHECKSUM_BYTES: usize = 8;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChecksumView<'a> {
    board: &'a Board,
    light_court: &'a [Piece],
    dark_court: &'a [Piece],
    captured_light: &'a [Piece],
    captured_dark: &'a [Piece],
    current_player: Color,
    current_turn: u32,
    move_history: &'a [MoveRecord],
    status: GameStatus,
    winner: Option<Winner>,
}

impl<'a> From<&'a GameState> for ChecksumView<'a> {
    fn from(state: &'a GameState) -> Self {
        Self {
            board: &state.board,
            light_court: &state.light_court,
            dark_court: &state.dark_court,
            captured_light: &state.captured_light,
            captured_dark: &state.captured_dark,
            current_player: state.current_player,
            current_turn: state.current_turn,
            move_history: &state.move_history,
            status: state.status,
            winner: state.winner,
        }
    }
}

/// Compute the checksum of `state`, ignoring its stored `checksum` field.
pub fn compute_checksum(state: &GameState) -> String {
    let canonical = serde_json::to_vec(&ChecksumView::from(state))
        .expect("checksum view holds only plain data and always serializes");
    let digest = Sha256::digest(&canonical);

    let mut out = String::with_capacity(CHECKSUM_BYTES * 2);
    for byte in &digest[..CHECKSUM_BYTES] {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Recompute and store the checksum on the provided state.
#[inline]
pub fn refresh_checksum(state: &mut GameState) {
    state.checksum = compute_checksum(state);
}

/// Whether the stored checksum matches the state's contents.
#[inline]
pub fn verify_checksum(state: &GameState) -> bool {
    state.checksum == compute_checksum(state)
}
