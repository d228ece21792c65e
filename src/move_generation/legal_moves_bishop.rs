use crate::game_state::chess_rules::BISHOP_DIRECTIONS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::generate_sliding_moves;
use crate::moves::move_descriptions::Move;

pub fn generate_bishop_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    generate_sliding_moves(game_state, from, &BISHOP_DIRECTIONS, out);
}
