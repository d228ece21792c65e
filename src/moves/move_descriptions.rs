//! The immutable move value produced by the move generator.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::game_state::chess_types::*;
use crate::utils::long_algebraic::move_to_long_algebraic;

/// A move as enumerated for one specific position.
///
/// The moved and captured pieces are snapshots taken at generation time.
/// Equality only looks at the squares and the three flags.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    /// Pawn reaching the far rank. Promotion is always to a queen.
    pub is_promotion: bool,
    /// The captured pawn sits beside `from`, not on `to`.
    pub is_en_passant: bool,
    /// King moves two files; the rook relocation is implied.
    pub is_castle: bool,
}

impl Move {
    /// Ordinary move or capture. The promotion flag is derived from the board.
    pub fn new(from: Square, to: Square, board: &[Option<Piece>; 64]) -> Option<Self> {
        let moved_piece = board[from as usize]?;
        let is_promotion = moved_piece.kind == PieceKind::Pawn
            && square_rank(to) == moved_piece.color.promotion_rank();
        Some(Self {
            from,
            to,
            moved_piece,
            captured_piece: board[to as usize],
            is_promotion,
            is_en_passant: false,
            is_castle: false,
        })
    }

    /// En-passant capture; the captured pawn is inferred from the mover's color.
    pub fn en_passant(from: Square, to: Square, board: &[Option<Piece>; 64]) -> Option<Self> {
        let moved_piece = board[from as usize]?;
        Some(Self {
            from,
            to,
            moved_piece,
            captured_piece: Some(Piece::new(moved_piece.color.opposite(), PieceKind::Pawn)),
            is_promotion: false,
            is_en_passant: true,
            is_castle: false,
        })
    }

    pub fn castle(from: Square, to: Square, board: &[Option<Piece>; 64]) -> Option<Self> {
        let moved_piece = board[from as usize]?;
        Some(Self {
            from,
            to,
            moved_piece,
            captured_piece: None,
            is_promotion: false,
            is_en_passant: false,
            is_castle: true,
        })
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    /// Square of the piece removed by this move, if any.
    #[inline]
    pub fn capture_square(&self) -> Option<Square> {
        if self.is_en_passant {
            Some(square_at(square_rank(self.from), square_file(self.to)))
        } else if self.captured_piece.is_some() {
            Some(self.to)
        } else {
            None
        }
    }

    #[inline]
    pub fn to_long_algebraic(&self) -> String {
        move_to_long_algebraic(self)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.is_promotion == other.is_promotion
            && self.is_en_passant == other.is_en_passant
            && self.is_castle == other.is_castle
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.is_promotion.hash(state);
        self.is_en_passant.hash(state);
        self.is_castle.hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&move_to_long_algebraic(self))
    }
}
