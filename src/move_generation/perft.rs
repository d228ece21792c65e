//! Perft node counting over make/undo.

use std::thread;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

/// Counts leaf moves `depth` plies below `game_state`.
pub fn perft(game_state: &mut GameState, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(game_state, depth, &mut counts);
    counts
}

/// Splits the root moves across threads, one cloned position per root move.
pub fn perft_multi_threaded(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth <= 1 {
        return Ok(perft(&mut game_state.clone(), depth));
    }

    let root_moves = generate_legal_moves(&mut game_state.clone());
    let mut handles = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let mut local_state = game_state.clone();
        handles.push(thread::spawn(move || {
            let mut local = PerftCounts::default();
            local_state.make_move(mv);
            perft_recurse(&mut local_state, depth - 1, &mut local);
            local
        }));
    }

    let mut total = PerftCounts::default();
    for handle in handles {
        let local = handle.join().map_err(|_| ChessError::WorkerFailed {
            message: "perft worker thread panicked".to_owned(),
        })?;
        total.merge(local);
    }

    Ok(total)
}

fn perft_recurse(game_state: &mut GameState, depth: u8, counts: &mut PerftCounts) {
    let moves = generate_legal_moves(game_state);

    if depth == 1 {
        for mv in moves {
            count_leaf(game_state, mv, counts);
        }
        return;
    }

    for mv in moves {
        game_state.make_move(mv);
        perft_recurse(game_state, depth - 1, counts);
        game_state.undo_move();
    }
}

fn count_leaf(game_state: &mut GameState, mv: Move, counts: &mut PerftCounts) {
    counts.nodes += 1;
    if mv.is_capture() {
        counts.captures += 1;
    }
    if mv.is_en_passant {
        counts.en_passant += 1;
    }
    if mv.is_castle {
        counts.castles += 1;
    }
    if mv.is_promotion {
        counts.promotions += 1;
    }

    game_state.make_move(mv);
    if is_king_in_check(game_state, game_state.side_to_move) {
        counts.checks += 1;
    }
    game_state.undo_move();
}
