//! Primitive types shared by the board model, move generation and sync layers.
//!
//! The 3×3 board is addressed either by `Position` (row/column pair, the wire
//! form) or by `Square` (`row * 3 + col`), with sets of squares packed into a
//! 9-bit `SquareMask` for the movement tables.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_rules::{BOARD_SIZE, SQUARE_COUNT};

pub use crate::game_state::game_state::{Board, GameState};
pub use crate::game_state::move_record::{MoveRecord, MoveRequest};

/// Board square index (`0..9`).
pub type Square = u8;

/// One bit per square, bit `i` set for square `i`.
pub type SquareMask = u16;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row step taken when this color advances.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn home_row(self) -> u8 {
        match self {
            Color::Light => 2,
            Color::Dark => 0,
        }
    }

    /// The row this color advances toward; pieces score by leaving the board past it.
    #[inline]
    pub const fn opponent_edge_row(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 2,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Light => "light",
            Color::Dark => "dark",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Piece kinds available in the selection pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Rook,
    Knight,
    Bishop,
    Queen,
    Pawn,
}

/// Kinds a pawn may become when it reaches the opponent edge row.
pub const PROMOTION_KINDS: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Rook => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Queen => 3,
            PieceKind::Pawn => 4,
        }
    }

    #[inline]
    pub const fn is_promotion_target(self) -> bool {
        !matches!(self, PieceKind::Pawn)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PieceKind::Rook => "rook",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Queen => "queen",
            PieceKind::Pawn => "pawn",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A square on the board. Serialized as `[row, col]`; out-of-range pairs are
/// rejected on deserialization so every `Position` value is on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "[u8; 2]", into = "[u8; 2]")]
pub struct Position {
    row: u8,
    col: u8,
}

impl Position {
    #[inline]
    pub fn new(row: u8, col: u8) -> Option<Self> {
        (usize::from(row) < BOARD_SIZE && usize::from(col) < BOARD_SIZE)
            .then_some(Self { row, col })
    }

    /// Caller guarantees `row` and `col` are below `BOARD_SIZE`.
    #[inline]
    pub(crate) const fn new_unchecked(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn from_square(square: Square) -> Option<Self> {
        (usize::from(square) < SQUARE_COUNT).then(|| Self::new_unchecked(square / 3, square % 3))
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    #[inline]
    pub const fn square(self) -> Square {
        self.row * 3 + self.col
    }

    #[inline]
    pub const fn mask(self) -> SquareMask {
        1 << self.square()
    }

    /// All nine board positions in square order.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..SQUARE_COUNT as u8).map(|sq| Position::new_unchecked(sq / 3, sq % 3))
    }
}

impl TryFrom<[u8; 2]> for Position {
    type Error = String;

    fn try_from(value: [u8; 2]) -> Result<Self, Self::Error> {
        Position::new(value[0], value[1])
            .ok_or_else(|| format!("position [{}, {}] is outside the board", value[0], value[1]))
    }
}

impl From<Position> for [u8; 2] {
    fn from(value: Position) -> Self {
        [value.row, value.col]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.row, self.col)
    }
}

/// Where a move ends: a board square, or off the board through the opponent edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DestinationRepr", into = "DestinationRepr")]
pub enum Destination {
    Square(Position),
    OffBoard,
}

const OFF_BOARD_TAG: &str = "off_board";

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum DestinationRepr {
    Square(Position),
    Tag(String),
}

impl TryFrom<DestinationRepr> for Destination {
    type Error = String;

    fn try_from(value: DestinationRepr) -> Result<Self, Self::Error> {
        match value {
            DestinationRepr::Square(position) => Ok(Destination::Square(position)),
            DestinationRepr::Tag(tag) if tag == OFF_BOARD_TAG => Ok(Destination::OffBoard),
            DestinationRepr::Tag(tag) => Err(format!("unknown destination tag {tag:?}")),
        }
    }
}

impl From<Destination> for DestinationRepr {
    fn from(value: Destination) -> Self {
        match value {
            Destination::Square(position) => DestinationRepr::Square(position),
            Destination::OffBoard => DestinationRepr::Tag(OFF_BOARD_TAG.to_owned()),
        }
    }
}

impl From<Position> for Destination {
    fn from(value: Position) -> Self {
        Destination::Square(value)
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Square(position) => position.fmt(f),
            Destination::OffBoard => f.write_str(OFF_BOARD_TAG),
        }
    }
}

/// A piece for its whole lifetime. `position` is `None` exactly when the piece
/// sits in a court or a captured array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PieceKind,
    pub owner: Color,
    pub position: Option<Position>,
    pub move_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Playing,
    LightWins,
    DarkWins,
    Draw,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Light,
    Dark,
    Draw,
}

impl GameStatus {
    /// The `winner` value that agrees with this status.
    pub const fn winner(self) -> Option<Winner> {
        match self {
            GameStatus::Playing => None,
            GameStatus::LightWins => Some(Winner::Light),
            GameStatus::DarkWins => Some(Winner::Dark),
            GameStatus::Draw => Some(Winner::Draw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Destination, Position};

    #[test]
    fn position_rejects_out_of_range() {
        assert!(Position::new(2, 2).is_some());
        assert!(Position::new(3, 0).is_none());
        assert!(Position::new(0, 3).is_none());
        assert!(Position::from_square(9).is_none());
    }

    #[test]
    fn square_index_is_row_major() {
        let p = Position::new(1, 2).expect("on board");
        assert_eq!(p.square(), 5);
        assert_eq!(Position::from_square(5), Some(p));
        assert_eq!(Position::all().count(), 9);
    }

    #[test]
    fn destination_wire_form() {
        let on_board = Destination::Square(Position::new(1, 0).expect("on board"));
        assert_eq!(serde_json::to_string(&on_board).expect("serializes"), "[1,0]");
        assert_eq!(
            serde_json::to_string(&Destination::OffBoard).expect("serializes"),
            "\"off_board\""
        );

        let parsed: Destination = serde_json::from_str("\"off_board\"").expect("parses");
        assert_eq!(parsed, Destination::OffBoard);
        assert!(serde_json::from_str::<Destination>("\"sideways\"").is_err());
        assert!(serde_json::from_str::<Destination>("[3,1]").is_err());
    }

    #[test]
    fn colors_advance_toward_each_other() {
        assert_eq!(Color::Light.opponent_edge_row(), Color::Dark.home_row());
        assert_eq!(Color::Dark.opponent_edge_row(), Color::Light.home_row());
        assert_eq!(Color::Light.forward(), -Color::Dark.forward());
    }
}
