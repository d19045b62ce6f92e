//! Exhaustive walk of the game tree.
//!
//! `perft` counts leaf moves by category to a fixed depth; `visit_reachable`
//! hands every reachable state to a callback, which the invariant tests use.

use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub exits: usize,
    pub promotions: usize,
    pub game_overs: usize,
}

impl PerftCounts {
    fn record(&mut self, mv: &GeneratedMove) {
        self.nodes += 1;

        let Some(last) = mv.game_after_move.move_history.last() else {
            return;
        };
        if last.is_capture() {
            self.captures += 1;
        }
        if last.is_off_board() {
            self.exits += 1;
        }
        if last.promoted_to.is_some() {
            self.promotions += 1;
        }
        if mv.game_after_move.is_terminal() {
            self.game_overs += 1;
        }
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state)? {
        perft_recurse(generator, &mv, depth, 1, &mut total)?;
    }
    Ok(total)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == search_depth {
        counts.record(mv);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&mv.game_after_move)? {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts)?;
    }
    Ok(())
}

/// Call `visit` on `game_state` and on every state reachable within `depth` moves.
pub fn visit_reachable<G, F>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
    visit: &mut F,
) -> MoveGenResult<()>
where
    G: MoveGenerator,
    F: FnMut(&GameState),
{
    visit(game_state);
    if depth == 0 {
        return Ok(());
    }

    for mv in generator.generate_legal_moves(game_state)? {
        visit_reachable(generator, &mv.game_after_move, depth - 1, visit)?;
    }
    Ok(())
}
