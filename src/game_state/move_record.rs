use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

/// Single history record appended for every accepted move.
///
/// `piece` is the mover as it stood before the move; `captured` is the
/// opponent piece taken on the destination square, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub from: Position,
    pub to: Destination,
    pub piece: Piece,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured: Option<Piece>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promoted_to: Option<PieceKind>,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_off_board(&self) -> bool {
        self.to == Destination::OffBoard
    }
}

/// A move as a player (or the peer) asks for it. `promotion` names the piece a
/// pawn becomes when the move lands on its promotion row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Position,
    pub to: Destination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: Position, to: impl Into<Destination>) -> Self {
        Self {
            from,
            to: to.into(),
            promotion: None,
        }
    }

    pub fn promoting(from: Position, to: Position, kind: PieceKind) -> Self {
        Self {
            from,
            to: Destination::Square(to),
            promotion: Some(kind),
        }
    }
}

impl std::fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, " ({kind})")?;
        }
        Ok(())
    }
}
