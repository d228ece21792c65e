use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::move_descriptions::Move;

#[inline]
pub fn is_friendly(game_state: &GameState, square: Square, color: Color) -> bool {
    matches!(game_state.piece_at(square), Some(p) if p.color == color)
}

#[inline]
pub fn is_enemy(game_state: &GameState, square: Square, color: Color) -> bool {
    matches!(game_state.piece_at(square), Some(p) if p.color != color)
}

/// Walks each direction from `from` until the board edge, stopping before a
/// friendly piece and after an enemy one.
pub fn generate_sliding_moves(
    game_state: &GameState,
    from: Square,
    directions: &[Direction],
    out: &mut Vec<Move>,
) {
    let Some(piece) = game_state.piece_at(from) else {
        return;
    };

    for &(d_rank, d_file) in directions {
        let mut current = from;
        while let Some(to) = offset_square(current, d_rank, d_file) {
            match game_state.piece_at(to) {
                None => push_move(game_state, from, to, out),
                Some(occupant) => {
                    if occupant.color != piece.color {
                        push_move(game_state, from, to, out);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

/// Single-step moves to each offset that is on the board and not friendly.
pub fn generate_step_moves(
    game_state: &GameState,
    from: Square,
    offsets: &[Direction],
    out: &mut Vec<Move>,
) {
    let Some(piece) = game_state.piece_at(from) else {
        return;
    };

    for &(d_rank, d_file) in offsets {
        if let Some(to) = offset_square(from, d_rank, d_file) {
            if !is_friendly(game_state, to, piece.color) {
                push_move(game_state, from, to, out);
            }
        }
    }
}

#[inline]
pub fn push_move(game_state: &GameState, from: Square, to: Square, out: &mut Vec<Move>) {
    if let Some(mv) = Move::new(from, to, &game_state.board) {
        out.push(mv);
    }
}
