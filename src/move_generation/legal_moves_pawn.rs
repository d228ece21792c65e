use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{is_enemy, push_move};
use crate::moves::move_descriptions::Move;

/// Pushes, double pushes from the home rank, diagonal captures and
/// en-passant captures. Promotion flags are set by [`Move::new`].
pub fn generate_pawn_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let Some(pawn) = game_state.piece_at(from) else {
        return;
    };
    let side = pawn.color;
    let forward = side.pawn_direction();

    if let Some(one) = offset_square(from, forward, 0) {
        if game_state.piece_at(one).is_none() {
            push_move(game_state, from, one, out);

            if square_rank(from) == side.pawn_home_rank() {
                if let Some(two) = offset_square(from, 2 * forward, 0) {
                    if game_state.piece_at(two).is_none() {
                        push_move(game_state, from, two, out);
                    }
                }
            }
        }
    }

    for d_file in [-1, 1] {
        let Some(to) = offset_square(from, forward, d_file) else {
            continue;
        };

        if is_enemy(game_state, to, side) {
            push_move(game_state, from, to, out);
        } else if game_state.en_passant_square == Some(to)
            && !en_passant_exposes_king(game_state, from, to)
        {
            if let Some(mv) = Move::en_passant(from, to, &game_state.board) {
                out.push(mv);
            }
        }
    }
}

/// An en-passant capture vacates two squares on the capturing pawn's rank at
/// once. Scans that rank outward from the king, looking past both vacated
/// squares for an enemy rook or queen.
pub fn en_passant_exposes_king(game_state: &GameState, from: Square, to: Square) -> bool {
    let Some(pawn) = game_state.piece_at(from) else {
        return false;
    };
    let side = pawn.color;
    let king = game_state.king_square(side);
    let rank = square_rank(from);
    if square_rank(king) != rank {
        return false;
    }

    let captured = square_at(rank, square_file(to));
    let step: i8 = if square_file(king) < square_file(from) { 1 } else { -1 };

    let mut current = king;
    while let Some(square) = offset_square(current, 0, step) {
        current = square;
        if square == from || square == captured {
            continue;
        }
        if let Some(piece) = game_state.piece_at(square) {
            return piece.color != side
                && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen);
        }
    }

    false
}
