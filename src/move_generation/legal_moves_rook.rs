use crate::game_state::chess_rules::ROOK_DIRECTIONS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::generate_sliding_moves;
use crate::moves::move_descriptions::Move;

pub fn generate_rook_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    generate_sliding_moves(game_state, from, &ROOK_DIRECTIONS, out);
}
