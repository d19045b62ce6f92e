//! Full game snapshot.
//!
//! `GameState` is the unit that moves produce, the checksum covers and the
//! sync layer ships between peers. Every piece lives in exactly one place: a
//! board cell, a court (scored, indexed by the piece's own color) or a
//! captured array (indexed by the piece's own color).

use rand::distr::{Alphanumeric, SampleString};
use serde::{Deserialize, Serialize};

use crate::errors::SetupError;
use crate::game_state::checksum::refresh_checksum;
use crate::game_state::chess_rules::{BOARD_SIZE, DEFAULT_BACK_ROW, GAME_ID_LEN, STATE_VERSION};
use crate::game_state::chess_types::*;

pub type Board = [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE];

/// One entry of an initial placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSetup {
    pub kind: PieceKind,
    pub owner: Color,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub version: u32,
    pub game_id: String,
    pub board: Board,
    pub current_player: Color,
    pub current_turn: u32,
    pub light_player: Player,
    pub dark_player: Player,
    pub light_court: Vec<Piece>,
    pub dark_court: Vec<Piece>,
    pub captured_light: Vec<Piece>,
    pub captured_dark: Vec<Piece>,
    pub status: GameStatus,
    pub winner: Option<Winner>,
    pub move_history: Vec<MoveRecord>,
    pub checksum: String,
}

impl GameState {
    /// New game with the default back rows.
    pub fn new_game(light_player: Player, dark_player: Player) -> Self {
        Self::build(light_player, dark_player, &default_placement())
    }

    /// New game from an explicit placement chosen before play starts.
    pub fn from_placement(
        light_player: Player,
        dark_player: Player,
        placement: &[PieceSetup],
    ) -> Result<Self, SetupError> {
        validate_placement(placement)?;
        Ok(Self::build(light_player, dark_player, placement))
    }

    fn build(light_player: Player, dark_player: Player, placement: &[PieceSetup]) -> Self {
        let mut board = Board::default();
        let mut serials = [[0u32; 5]; 2];

        for setup in placement {
            let serial = &mut serials[setup.owner.index()][setup.kind.index()];
            *serial += 1;
            let (row, col) = (setup.position.row() as usize, setup.position.col() as usize);
            board[row][col] = Some(Piece {
                id: format!("{}-{}-{}", setup.owner, setup.kind, serial),
                kind: setup.kind,
                owner: setup.owner,
                position: Some(setup.position),
                move_count: 0,
            });
        }

        let mut state = Self {
            version: STATE_VERSION,
            game_id: generate_game_id(),
            board,
            current_player: Color::Light,
            current_turn: 0,
            light_player,
            dark_player,
            light_court: Vec::new(),
            dark_court: Vec::new(),
            captured_light: Vec::new(),
            captured_dark: Vec::new(),
            status: GameStatus::Playing,
            winner: None,
            move_history: Vec::new(),
            checksum: String::new(),
        };
        refresh_checksum(&mut state);
        state
    }

    #[inline]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.board[position.row() as usize][position.col() as usize].as_ref()
    }

    #[inline]
    pub(crate) fn take_piece(&mut self, position: Position) -> Option<Piece> {
        self.board[position.row() as usize][position.col() as usize].take()
    }

    #[inline]
    pub(crate) fn put_piece(&mut self, position: Position, mut piece: Piece) {
        piece.position = Some(position);
        self.board[position.row() as usize][position.col() as usize] = Some(piece);
    }

    /// Pieces of `color` that scored by leaving through the opponent edge.
    #[inline]
    pub fn court(&self, color: Color) -> &[Piece] {
        match color {
            Color::Light => &self.light_court,
            Color::Dark => &self.dark_court,
        }
    }

    #[inline]
    pub(crate) fn court_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::Light => &mut self.light_court,
            Color::Dark => &mut self.dark_court,
        }
    }

    /// Pieces of `color` taken by the opponent.
    #[inline]
    pub fn captured(&self, color: Color) -> &[Piece] {
        match color {
            Color::Light => &self.captured_light,
            Color::Dark => &self.captured_dark,
        }
    }

    #[inline]
    pub(crate) fn captured_mut(&mut self, color: Color) -> &mut Vec<Piece> {
        match color {
            Color::Light => &mut self.captured_light,
            Color::Dark => &mut self.captured_dark,
        }
    }

    #[inline]
    pub fn player(&self, color: Color) -> &Player {
        match color {
            Color::Light => &self.light_player,
            Color::Dark => &self.dark_player,
        }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Playing
    }

    pub fn pieces_on_board(&self) -> impl Iterator<Item = &Piece> {
        self.board.iter().flatten().flatten()
    }

    /// Every piece of the game, wherever it currently is.
    pub fn all_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces_on_board()
            .chain(self.light_court.iter())
            .chain(self.dark_court.iter())
            .chain(self.captured_light.iter())
            .chain(self.captured_dark.iter())
    }

    /// Sorted ids of every piece; constant for the lifetime of a game.
    pub fn piece_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.all_pieces().map(|piece| piece.id.as_str()).collect();
        ids.sort_unstable();
        ids
    }
}

/// Rook, knight, bishop on each side's home row.
pub fn default_placement() -> Vec<PieceSetup> {
    [Color::Light, Color::Dark]
        .into_iter()
        .flat_map(|owner| {
            DEFAULT_BACK_ROW
                .iter()
                .enumerate()
                .map(move |(col, &kind)| PieceSetup {
                    kind,
                    owner,
                    position: Position::new_unchecked(owner.home_row(), col as u8),
                })
        })
        .collect()
}

fn validate_placement(placement: &[PieceSetup]) -> Result<(), SetupError> {
    let mut occupied: SquareMask = 0;
    let mut sides = [false; 2];

    for setup in placement {
        let mask = setup.position.mask();
        if occupied & mask != 0 {
            return Err(SetupError::SquareTaken(setup.position));
        }
        occupied |= mask;

        if setup.kind == PieceKind::Pawn
            && setup.position.row() == setup.owner.opponent_edge_row()
        {
            return Err(SetupError::PawnOnPromotionRow(setup.position));
        }
        sides[setup.owner.index()] = true;
    }

    for color in [Color::Light, Color::Dark] {
        if !sides[color.index()] {
            return Err(SetupError::MissingSide(color));
        }
    }
    Ok(())
}

fn generate_game_id() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), GAME_ID_LEN)
}

#[cfg(test)]
mod tests {
    use super::{default_placement, GameState, PieceSetup};
    use crate::errors::SetupError;
    use crate::game_state::checksum::compute_checksum;
    use crate::game_state::chess_types::*;

    fn players() -> (Player, Player) {
        (Player::new("p1", "Ada"), Player::new("p2", "Bo"))
    }

    fn at(row: u8, col: u8) -> Position {
        Position::new(row, col).expect("test position on board")
    }

    #[test]
    fn new_game_places_default_back_rows() {
        let (light, dark) = players();
        let game = GameState::new_game(light, dark);

        assert_eq!(game.current_turn, 0);
        assert_eq!(game.current_player, Color::Light);
        assert!(game.move_history.is_empty());
        assert_eq!(game.pieces_on_board().count(), 6);

        let rook = game.piece_at(at(2, 0)).expect("light rook present");
        assert_eq!(rook.kind, PieceKind::Rook);
        assert_eq!(rook.owner, Color::Light);
        assert_eq!(rook.id, "light-rook-1");
        assert_eq!(rook.position, Some(at(2, 0)));

        let bishop = game.piece_at(at(0, 2)).expect("dark bishop present");
        assert_eq!(bishop.owner, Color::Dark);
        assert_eq!(game.checksum, compute_checksum(&game));
    }

    #[test]
    fn default_placement_is_mirrored() {
        let placement = default_placement();
        assert_eq!(placement.len(), 6);
        assert!(placement
            .iter()
            .all(|setup| setup.position.row() == setup.owner.home_row()));
    }

    #[test]
    fn placement_ids_count_per_kind() {
        let (light, dark) = players();
        let placement = [
            PieceSetup { kind: PieceKind::Pawn, owner: Color::Light, position: at(2, 0) },
            PieceSetup { kind: PieceKind::Pawn, owner: Color::Light, position: at(2, 1) },
            PieceSetup { kind: PieceKind::Rook, owner: Color::Dark, position: at(0, 1) },
        ];
        let game = GameState::from_placement(light, dark, &placement).expect("valid placement");
        assert_eq!(game.piece_ids(), vec!["dark-rook-1", "light-pawn-1", "light-pawn-2"]);
    }

    #[test]
    fn placement_rejects_shared_square() {
        let (light, dark) = players();
        let placement = [
            PieceSetup { kind: PieceKind::Rook, owner: Color::Light, position: at(1, 1) },
            PieceSetup { kind: PieceKind::Rook, owner: Color::Dark, position: at(1, 1) },
        ];
        let err = GameState::from_placement(light, dark, &placement).unwrap_err();
        assert_eq!(err, SetupError::SquareTaken(at(1, 1)));
    }

    #[test]
    fn placement_rejects_pawn_on_promotion_row() {
        let (light, dark) = players();
        let placement = [
            PieceSetup { kind: PieceKind::Pawn, owner: Color::Dark, position: at(2, 0) },
            PieceSetup { kind: PieceKind::Rook, owner: Color::Light, position: at(2, 2) },
        ];
        let err = GameState::from_placement(light, dark, &placement).unwrap_err();
        assert_eq!(err, SetupError::PawnOnPromotionRow(at(2, 0)));
    }

    #[test]
    fn placement_requires_both_sides() {
        let (light, dark) = players();
        let placement = [PieceSetup { kind: PieceKind::Queen, owner: Color::Light, position: at(2, 1) }];
        let err = GameState::from_placement(light, dark, &placement).unwrap_err();
        assert_eq!(err, SetupError::MissingSide(Color::Dark));
    }

    #[test]
    fn game_ids_are_random() {
        let (light, dark) = players();
        let a = GameState::new_game(light.clone(), dark.clone());
        let b = GameState::new_game(light, dark);
        assert_eq!(a.game_id.len(), 8);
        assert_ne!(a.game_id, b.game_id);
        assert_eq!(a.checksum, b.checksum);
    }
}
