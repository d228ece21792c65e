use crate::game_state::chess_types::*;
use crate::moves::move_descriptions::Move;

/// Single undo record for `make_move` / `undo_move`.
///
/// One record is pushed per applied move, so the move log, the castling-rights
/// snapshots and the en-passant snapshots always have the same length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_square: Option<Square>,
    pub prev_halfmove_clock: u16,
}
