use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;

/// Produces the moves search is allowed to play from a position.
///
/// Generation needs `&mut` access: king-move probing relocates the king
/// temporarily and the terminal flags on `GameState` are refreshed.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &mut GameState) -> Vec<Move>;
}
