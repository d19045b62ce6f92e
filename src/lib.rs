//! Crate root module declarations for the courtchess engine.
//!
//! Exposes the 3x3 rules engine (board model, per-piece movement, move
//! application, victory), the URL-fragment sync protocol, and the command-line
//! front-end so the binary, benches and tests share stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod checksum;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod move_record;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rays;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_shared;
    pub mod move_generator;
    pub mod perft;
}

pub mod engine {
    pub mod game_engine;
    pub mod victory;
}

pub mod sync {
    pub mod codec;
    pub mod debounce;
    pub mod payload;
    pub mod protocol;
    pub mod transport;
}

pub mod cli {
    pub mod command_loop;
}

pub mod utils {
    pub mod notation;
    pub mod render_game_state;
}
