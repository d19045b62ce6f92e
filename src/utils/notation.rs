//! Text forms of squares, destinations and promotion pieces.
//!
//! Squares are written `row,col` (for example `2,0`), matching the `[row, col]`
//! wire form. The off-board destination is `off`.

use crate::game_state::chess_types::*;

/// Parse `row,col` into a board position.
pub fn parse_position(text: &str) -> Result<Position, String> {
    let (row, col) = text
        .trim()
        .split_once(',')
        .ok_or_else(|| format!("Invalid square {text:?}, expected row,col"))?;

    let row: u8 = row
        .trim()
        .parse()
        .map_err(|_| format!("Invalid row in {text:?}"))?;
    let col: u8 = col
        .trim()
        .parse()
        .map_err(|_| format!("Invalid column in {text:?}"))?;

    Position::new(row, col).ok_or_else(|| format!("Square {text:?} is outside the board"))
}

/// Parse a move destination: a square or `off`/`off_board`.
pub fn parse_destination(text: &str) -> Result<Destination, String> {
    match text.trim() {
        "off" | "off_board" => Ok(Destination::OffBoard),
        other => parse_position(other).map(Destination::Square),
    }
}

/// Parse a promotion piece letter or name.
pub fn parse_promotion_kind(text: &str) -> Result<PieceKind, String> {
    match text.trim().to_ascii_lowercase().as_str() {
        "q" | "queen" => Ok(PieceKind::Queen),
        "r" | "rook" => Ok(PieceKind::Rook),
        "b" | "bishop" => Ok(PieceKind::Bishop),
        "n" | "knight" => Ok(PieceKind::Knight),
        _ => Err(format!("Invalid promotion piece {text:?}, expected q, r, b or n")),
    }
}

#[inline]
pub fn position_to_text(position: Position) -> String {
    format!("{},{}", position.row(), position.col())
}
