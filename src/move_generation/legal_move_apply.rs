//! In-place make/undo.
//!
//! `make_move` pushes exactly one [`UndoState`] and `undo_move` pops exactly
//! one, so a make followed by an undo restores the previous position
//! bit-for-bit (board, kings, side to move, rights, en-passant target, clocks).

use crate::game_state::chess_rules::{KINGSIDE_CASTLE_FILE, QUEENSIDE_CASTLE_FILE};
use crate::game_state::{chess_types::*, game_state::GameState, undo_state::UndoState};
use crate::moves::move_descriptions::Move;

pub fn make_move(game_state: &mut GameState, mv: Move) {
    let moving_color = mv.moved_piece.color;

    game_state.undo_stack.push(UndoState {
        mv,
        prev_castling_rights: game_state.castling_rights,
        prev_en_passant_square: game_state.en_passant_square,
        prev_halfmove_clock: game_state.halfmove_clock,
    });

    game_state.board[mv.from as usize] = None;
    if mv.is_en_passant {
        let captured = square_at(square_rank(mv.from), square_file(mv.to));
        game_state.board[captured as usize] = None;
    }

    let placed = if mv.is_promotion {
        Piece::new(moving_color, PieceKind::Queen)
    } else {
        mv.moved_piece
    };
    game_state.set_piece(mv.to, Some(placed));

    if mv.is_castle {
        let (rook_from, rook_to) = castle_rook_squares(mv);
        let rook = game_state.board[rook_from as usize].take();
        game_state.board[rook_to as usize] = rook;
    }

    // Castling rights.
    if mv.moved_piece.kind == PieceKind::King {
        game_state.castling_rights.revoke_all(moving_color);
    }
    if mv.moved_piece.kind == PieceKind::Rook {
        game_state.castling_rights.revoke_rook_square(mv.from);
    }
    if matches!(mv.captured_piece, Some(p) if p.kind == PieceKind::Rook) {
        game_state.castling_rights.revoke_rook_square(mv.to);
    }

    // En-passant target lives for exactly one ply.
    game_state.en_passant_square = if mv.moved_piece.kind == PieceKind::Pawn
        && square_rank(mv.from).abs_diff(square_rank(mv.to)) == 2
    {
        Some(square_at(
            (square_rank(mv.from) + square_rank(mv.to)) / 2,
            square_file(mv.from),
        ))
    } else {
        None
    };

    if mv.moved_piece.kind == PieceKind::Pawn || mv.is_capture() {
        game_state.halfmove_clock = 0;
    } else {
        game_state.halfmove_clock = game_state.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_add(1);
    }

    game_state.side_to_move = moving_color.opposite();
}

pub fn undo_move(game_state: &mut GameState) -> Option<Move> {
    let undo = game_state.undo_stack.pop()?;
    let mv = undo.mv;
    let moving_color = mv.moved_piece.color;

    game_state.set_piece(mv.from, Some(mv.moved_piece));
    if mv.is_en_passant {
        game_state.board[mv.to as usize] = None;
        let captured = square_at(square_rank(mv.from), square_file(mv.to));
        game_state.board[captured as usize] = mv.captured_piece;
    } else {
        game_state.board[mv.to as usize] = mv.captured_piece;
    }

    if mv.is_castle {
        let (rook_from, rook_to) = castle_rook_squares(mv);
        let rook = game_state.board[rook_to as usize].take();
        game_state.board[rook_from as usize] = rook;
    }

    game_state.castling_rights = undo.prev_castling_rights;
    game_state.en_passant_square = undo.prev_en_passant_square;
    game_state.halfmove_clock = undo.prev_halfmove_clock;
    if moving_color == Color::Dark {
        game_state.fullmove_number = game_state.fullmove_number.saturating_sub(1);
    }

    game_state.side_to_move = moving_color;
    game_state.in_check = false;
    game_state.checkmate = false;
    game_state.stalemate = false;

    Some(mv)
}

/// Rook origin and destination implied by a castling king move.
fn castle_rook_squares(mv: Move) -> (Square, Square) {
    let rank = square_rank(mv.from);
    if square_file(mv.to) == KINGSIDE_CASTLE_FILE {
        (square_at(rank, 7), square_at(rank, KINGSIDE_CASTLE_FILE - 1))
    } else {
        debug_assert_eq!(square_file(mv.to), QUEENSIDE_CASTLE_FILE);
        (square_at(rank, 0), square_at(rank, QUEENSIDE_CASTLE_FILE + 1))
    }
}
