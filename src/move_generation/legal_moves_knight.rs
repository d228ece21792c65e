use crate::game_state::chess_rules::KNIGHT_OFFSETS;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::generate_step_moves;
use crate::moves::move_descriptions::Move;

pub fn generate_knight_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    generate_step_moves(game_state, from, &KNIGHT_OFFSETS, out);
}

#[cfg(test)]
mod tests {
    use super::generate_knight_moves;
    use crate::game_state::game_state::GameState;
    use crate::utils::algebraic::algebraic_to_square;

    #[test]
    fn corner_knight_has_two_moves_and_skips_friendly_squares() {
        let game = GameState::from_fen("4k3/8/8/8/8/8/2P5/N3K3 w - - 0 1").expect("FEN should parse");
        let mut out = Vec::new();
        generate_knight_moves(&game, algebraic_to_square("a1").expect("square"), &mut out);
        // b3 is open, c2 holds a friendly pawn.
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].to_string(), "a1b3");
    }
}
