//! Full legal move generation pipeline.
//!
//! Computes pins and checks once, generates per-piece pseudo-legal moves,
//! then filters them against the check and pin state. Double check short
//! circuits to king moves only; castling is only offered when not in check.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{
    check_resolution_squares, checks_and_pins, is_on_ray, CheckPinState,
};
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::{generate_castle_moves, generate_king_moves};
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &mut GameState) -> Vec<Move> {
        generate_legal_moves(game_state)
    }
}

/// Strictly legal moves for the side to move.
///
/// Refreshes `in_check`, `checkmate` and `stalemate` on the position; those
/// flags are only meaningful until the next `make_move` / `undo_move`.
pub fn generate_legal_moves(game_state: &mut GameState) -> Vec<Move> {
    let state = checks_and_pins(game_state);
    let king = game_state.king_square(game_state.side_to_move);
    let mut moves = Vec::<Move>::with_capacity(64);

    if state.is_double_check() {
        generate_king_moves(game_state, king, &mut moves);
    } else {
        generate_pseudo_legal_moves(game_state, &mut moves);

        if let Some(&check) = state.checks.first() {
            let targets = check_resolution_squares(king, check);
            moves.retain(|mv| {
                mv.moved_piece.kind == PieceKind::King
                    || targets.contains(&mv.to)
                    || (mv.is_en_passant && mv.capture_square() == Some(check.square))
            });
        } else {
            generate_castle_moves(game_state, king, &mut moves);
        }

        moves.retain(|mv| respects_pins(mv, king, &state));
    }

    game_state.in_check = state.in_check;
    game_state.checkmate = moves.is_empty() && state.in_check;
    game_state.stalemate = moves.is_empty() && !state.in_check;

    moves
}

/// Per-piece moves for the side to move, board order `a1..h8`. King steps
/// are already safe; nothing else is filtered.
pub fn generate_pseudo_legal_moves(game_state: &mut GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    for square in 0..64u8 {
        let Some(piece) = game_state.piece_at(square) else {
            continue;
        };
        if piece.color != side {
            continue;
        }
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(game_state, square, out),
            PieceKind::Knight => generate_knight_moves(game_state, square, out),
            PieceKind::Bishop => generate_bishop_moves(game_state, square, out),
            PieceKind::Rook => generate_rook_moves(game_state, square, out),
            PieceKind::Queen => generate_queen_moves(game_state, square, out),
            PieceKind::King => generate_king_moves(game_state, square, out),
        }
    }
}

#[inline]
fn respects_pins(mv: &Move, king: Square, state: &CheckPinState) -> bool {
    match state.pin_direction(mv.from) {
        Some(direction) => is_on_ray(king, direction, mv.to),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_checks::is_king_in_check;

    fn legal(fen: &str) -> (GameState, Vec<Move>) {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let moves = LegalMoveGenerator.generate_legal_moves(&mut game);
        (game, moves)
    }

    fn names(moves: &[Move]) -> Vec<String> {
        moves.iter().map(|mv| mv.to_string()).collect()
    }

    #[test]
    fn start_position_has_twenty_moves() {
        let (game, moves) = legal(crate::game_state::chess_rules::STARTING_POSITION_FEN);
        assert_eq!(moves.len(), 20);
        assert!(!game.in_check && !game.checkmate && !game.stalemate);
    }

    #[test]
    fn pinned_bishop_cannot_leave_the_file() {
        let (_, moves) = legal("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(moves.iter().all(|mv| mv.from != 12));
    }

    #[test]
    fn pinned_rook_may_slide_along_the_pin() {
        let (_, moves) = legal("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1");
        let rook_moves: Vec<String> = moves
            .iter()
            .filter(|mv| mv.moved_piece.kind == PieceKind::Rook)
            .map(|mv| mv.to_string())
            .collect();
        assert_eq!(rook_moves.len(), 6);
        assert!(rook_moves.contains(&"e2e8".to_owned()));
    }

    #[test]
    fn single_check_allows_block_capture_or_king_move() {
        // Rook e8 checks e1; the bishop on b5 can capture on e8 or block on e2.
        let (game, moves) = legal("4r1k1/8/8/1B6/8/8/8/4K3 w - - 0 1");
        assert!(game.in_check);
        let listed = names(&moves);
        assert!(listed.contains(&"b5e8".to_owned()));
        assert!(listed.contains(&"b5e2".to_owned()));
        assert!(!listed.contains(&"b5c6".to_owned()));
        assert!(listed.iter().all(|name| name.starts_with("e1") || name.starts_with("b5")));
    }

    #[test]
    fn double_check_only_allows_king_moves() {
        let (_, moves) = legal("4r1k1/8/8/1B6/8/3n4/8/4K3 w - - 0 1");
        assert!(!moves.is_empty());
        assert!(moves.iter().all(|mv| mv.moved_piece.kind == PieceKind::King));
    }

    #[test]
    fn en_passant_can_capture_a_checking_pawn() {
        // d7-d5 checks the king on e4; taking en passant removes the checker.
        let (game, moves) = legal("4k3/8/8/2Pp4/4K3/8/8/8 w - d6 0 1");
        assert!(game.in_check);
        let ep: Vec<&Move> = moves.iter().filter(|mv| mv.is_en_passant).collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].to_string(), "c5d6");
    }

    #[test]
    fn no_generated_move_leaves_own_king_attacked() {
        let (mut game, moves) =
            legal("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        assert_eq!(moves.len(), 48);
        for mv in moves {
            game.make_move(mv);
            assert!(!is_king_in_check(&game, Color::Light), "{mv} leaves king attacked");
            game.undo_move();
        }
    }

    #[test]
    fn checkmate_and_stalemate_flags() {
        let (mated, moves) = legal("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(moves.is_empty());
        assert!(mated.checkmate && !mated.stalemate);

        let (stale, moves) = legal("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(moves.is_empty());
        assert!(stale.stalemate && !stale.checkmate);
    }
}
