//! Canonical rule constants.
//!
//! Board dimensions, the state format version carried on the wire, and the
//! default back-row selection used when no placement is supplied.

use crate::game_state::chess_types::PieceKind;

pub const BOARD_SIZE: usize = 3;
pub const SQUARE_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Version stamped into every `GameState`.
pub const STATE_VERSION: u32 = 1;

/// Back row for each side, by column, when no placement is given.
pub const DEFAULT_BACK_ROW: [PieceKind; BOARD_SIZE] =
    [PieceKind::Rook, PieceKind::Knight, PieceKind::Bishop];

/// Length of randomly generated game ids.
pub const GAME_ID_LEN: usize = 8;
