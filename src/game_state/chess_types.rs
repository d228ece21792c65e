/// Core value types shared by the position model, move generator and search.
///
/// Squares are plain indices (`0..=63`, `a1 = 0`, `h8 = 63`); rank and file are
/// recovered with [`square_rank`] / [`square_file`] and ray walking goes through
/// [`offset_square`], which refuses to step off the board.

pub use crate::game_state::game_state::GameState;
pub use crate::game_state::undo_state::UndoState;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank delta of a single pawn push.
    #[inline]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    #[inline]
    pub const fn pawn_home_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }

    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    #[inline]
    pub const fn back_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }

    /// `+1` for light, `-1` for dark. Scores are light-positive.
    #[inline]
    pub const fn sign(self) -> i32 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }
}

/// Piece kind (color is carried separately by [`Piece`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }
}

/// An occupant of a board square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// Board square index (`0..=63`, `a1 = 0`).
pub type Square = u8;

/// A (rank delta, file delta) step.
pub type Direction = (i8, i8);

#[inline]
pub const fn square_at(rank: u8, file: u8) -> Square {
    rank * 8 + file
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square % 8
}

/// Steps `square` by the given deltas, returning `None` off the board.
#[inline]
pub fn offset_square(square: Square, d_rank: i8, d_file: i8) -> Option<Square> {
    let rank = square_rank(square) as i8 + d_rank;
    let file = square_file(square) as i8 + d_file;
    if (0..8).contains(&rank) && (0..8).contains(&file) {
        Some(square_at(rank as u8, file as u8))
    } else {
        None
    }
}

/// Four independent castling permissions.
///
/// A right is only ever cleared during play; restoring one happens solely
/// through the undo stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights {
    pub light_kingside: bool,
    pub light_queenside: bool,
    pub dark_kingside: bool,
    pub dark_queenside: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        light_kingside: true,
        light_queenside: true,
        dark_kingside: true,
        dark_queenside: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        light_kingside: false,
        light_queenside: false,
        dark_kingside: false,
        dark_queenside: false,
    };

    #[inline]
    pub const fn kingside(self, color: Color) -> bool {
        match color {
            Color::Light => self.light_kingside,
            Color::Dark => self.dark_kingside,
        }
    }

    #[inline]
    pub const fn queenside(self, color: Color) -> bool {
        match color {
            Color::Light => self.light_queenside,
            Color::Dark => self.dark_queenside,
        }
    }

    pub fn revoke_all(&mut self, color: Color) {
        match color {
            Color::Light => {
                self.light_kingside = false;
                self.light_queenside = false;
            }
            Color::Dark => {
                self.dark_kingside = false;
                self.dark_queenside = false;
            }
        }
    }

    /// Clears the right tied to a rook home square; other squares are ignored.
    pub fn revoke_rook_square(&mut self, square: Square) {
        match square {
            0 => self.light_queenside = false,
            7 => self.light_kingside = false,
            56 => self.dark_queenside = false,
            63 => self.dark_kingside = false,
            _ => {}
        }
    }

    /// The same rights seen from the other side of the board.
    pub const fn swapped(self) -> Self {
        Self {
            light_kingside: self.dark_kingside,
            light_queenside: self.dark_queenside,
            dark_kingside: self.light_kingside,
            dark_queenside: self.light_queenside,
        }
    }
}
