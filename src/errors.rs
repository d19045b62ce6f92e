//! Errors used throughout the engine and sync layers.
//!
//! Every expected failure (illegal input, corrupt links, diverged peers) is a
//! value of one of these enums. Callers match on them to re-prompt the player,
//! show a "link is corrupted" message, or ask the peer for a resync.
//!
//! A pawn reaching its promotion row is not an error; it is reported as
//! `MoveOutcome::PromotionRequired` by the move pipeline.

use thiserror::Error;

use crate::game_state::chess_types::{Color, Destination, PieceKind, Position};

/// Rejected move. State is never touched when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    /// The game already reached a terminal status.
    #[error("game is over")]
    GameOver,

    #[error("no piece at {0}")]
    NoPieceAtSource(Position),

    /// The piece at the source square belongs to the side not on move.
    #[error("piece at {position} belongs to {owner}, but it is {to_move}'s turn")]
    NotYourPiece {
        position: Position,
        owner: Color,
        to_move: Color,
    },

    #[error("{from} cannot move to {to}")]
    IllegalDestination { from: Position, to: Destination },

    #[error("piece at {0} has no path off the board")]
    CannotExitBoard(Position),

    /// `promote_pawn` was asked for a piece kind a pawn cannot become.
    #[error("cannot promote to {0}")]
    InvalidPromotionPiece(PieceKind),

    /// `promote_pawn` was called for a move that does not promote.
    #[error("move {from} -> {to} is not a promotion")]
    NotAPromotion { from: Position, to: Destination },
}

/// Invalid initial placement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
    #[error("two pieces placed on {0}")]
    SquareTaken(Position),

    #[error("pawn placed on its promotion row at {0}")]
    PawnOnPromotionRow(Position),

    #[error("{0} has no pieces")]
    MissingSide(Color),
}

/// Failure while receiving a payload from the peer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// The fragment could not be decoded into a valid payload.
    #[error("link is corrupted")]
    CorruptLink,

    /// A delta arrived but there is no local game to apply it to.
    #[error("no local game to apply the move to")]
    NoLocalGame,

    /// Local checksum differs from the sender's pre-move checksum.
    #[error("game state diverged (peer {expected}, local {actual}); resync required")]
    Divergence { expected: String, actual: String },

    #[error("delta is for turn {expected}, local game is at turn {actual}; resync required")]
    TurnMismatch { expected: u32, actual: u32 },

    /// The relayed move is illegal in the local state.
    #[error(transparent)]
    Move(#[from] MoveError),

    /// A delta reached the promotion row but named no promotion piece.
    #[error("peer move {from} -> {to} needs a promotion piece")]
    PromotionInDelta { from: Position, to: Position },
}

/// Failure inside the state codec. The public codec surface reports these as `None`.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("compression: {0}")]
    Compression(#[from] std::io::Error),

    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("unsupported codec version tag")]
    UnknownVersion,

    #[error("payload fails validation: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid log filter {filter:?}: {reason}")]
    LogFilter { filter: String, reason: String },

    #[error("could not install log subscriber: {0}")]
    Subscriber(String),
}
