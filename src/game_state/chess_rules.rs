//! Canonical chess-rule constants.
//!
//! This module stores static rule-related literals: the standard starting
//! position FEN and the step tables used by ray casting and move generation.

use crate::game_state::chess_types::Direction;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Rook directions first, then bishop directions. Pin/check ray casting relies
/// on this split (`index < 4` is orthogonal).
pub const KING_DIRECTIONS: [Direction; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const ROOK_DIRECTIONS: [Direction; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub const BISHOP_DIRECTIONS: [Direction; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KNIGHT_OFFSETS: [Direction; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Marker direction recorded for a knight check (no ray to block).
pub const NO_DIRECTION: Direction = (0, 0);

/// King home file and the files it lands on when castling.
pub const KING_HOME_FILE: u8 = 4;
pub const KINGSIDE_CASTLE_FILE: u8 = 6;
pub const QUEENSIDE_CASTLE_FILE: u8 = 2;
