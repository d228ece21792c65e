use crate::game_state::chess_rules::{
    KING_DIRECTIONS, KING_HOME_FILE, KINGSIDE_CASTLE_FILE, QUEENSIDE_CASTLE_FILE,
};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::is_friendly;
use crate::moves::move_descriptions::Move;

/// Adjacent king steps that do not land on an attacked square.
///
/// Each destination is probed by temporarily relocating the king there, so
/// sliders that were blocked by the king's own origin square are seen.
pub fn generate_king_moves(game_state: &mut GameState, from: Square, out: &mut Vec<Move>) {
    let Some(king) = game_state.piece_at(from) else {
        return;
    };
    let enemy = king.color.opposite();

    for &(d_rank, d_file) in &KING_DIRECTIONS {
        let Some(to) = offset_square(from, d_rank, d_file) else {
            continue;
        };
        if is_friendly(game_state, to, king.color) {
            continue;
        }

        let Some(mv) = Move::new(from, to, &game_state.board) else {
            continue;
        };

        game_state.board[from as usize] = None;
        game_state.board[to as usize] = Some(king);
        let attacked = is_square_attacked(game_state, to, enemy);
        game_state.board[to as usize] = mv.captured_piece;
        game_state.board[from as usize] = Some(king);

        if !attacked {
            out.push(mv);
        }
    }
}

/// Castling for the side to move. Callers must only ask when not in check.
pub fn generate_castle_moves(game_state: &GameState, from: Square, out: &mut Vec<Move>) {
    let Some(king) = game_state.piece_at(from) else {
        return;
    };
    let side = king.color;
    let rank = side.back_rank();
    if from != square_at(rank, KING_HOME_FILE) {
        return;
    }

    let rights = game_state.castling_rights;
    if rights.kingside(side) {
        try_castle(game_state, from, 7, KINGSIDE_CASTLE_FILE, &[5, 6], out);
    }
    if rights.queenside(side) {
        try_castle(game_state, from, 0, QUEENSIDE_CASTLE_FILE, &[1, 2, 3], out);
    }
}

fn try_castle(
    game_state: &GameState,
    from: Square,
    rook_file: u8,
    king_to_file: u8,
    between_files: &[u8],
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let rank = square_rank(from);

    if game_state.piece_at(square_at(rank, rook_file)) != Some(Piece::new(side, PieceKind::Rook)) {
        return;
    }
    if between_files
        .iter()
        .any(|&file| game_state.piece_at(square_at(rank, file)).is_some())
    {
        return;
    }

    // The king crosses every file from its home up to and including the landing file.
    let (low, high) = if king_to_file > KING_HOME_FILE {
        (KING_HOME_FILE + 1, king_to_file)
    } else {
        (king_to_file, KING_HOME_FILE - 1)
    };
    if (low..=high).any(|file| is_square_attacked(game_state, square_at(rank, file), side.opposite())) {
        return;
    }

    if let Some(mv) = Move::castle(from, square_at(rank, king_to_file), &game_state.board) {
        out.push(mv);
    }
}
