//! Terminal-oriented Unicode board renderer.
//!
//! Row 0 (dark's home row) is printed at the top. Courts and captured pieces
//! follow the board, one line per color.

use crate::game_state::chess_types::*;

pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  0 1 2\n");
    for (row, cells) in game_state.board.iter().enumerate() {
        out.push(char::from(b'0' + row as u8));
        for cell in cells {
            out.push(' ');
            match cell {
                Some(piece) => out.push(piece_to_unicode(piece.owner, piece.kind)),
                None => out.push('·'),
            }
        }
        out.push('\n');
    }

    for color in [Color::Light, Color::Dark] {
        out.push_str(&format!(
            "{color} ({}): court {} captured {}\n",
            game_state.player(color).name,
            render_pieces(game_state.court(color)),
            render_pieces(game_state.captured(color)),
        ));
    }

    match game_state.winner {
        None => out.push_str(&format!(
            "turn {}, {} to move",
            game_state.current_turn, game_state.current_player
        )),
        Some(Winner::Draw) => out.push_str("game over: draw"),
        Some(Winner::Light) => out.push_str("game over: light wins"),
        Some(Winner::Dark) => out.push_str("game over: dark wins"),
    }

    out
}

fn render_pieces(pieces: &[Piece]) -> String {
    if pieces.is_empty() {
        return "-".to_owned();
    }
    pieces
        .iter()
        .map(|piece| piece_to_unicode(piece.owner, piece.kind))
        .collect()
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
    }
}
