//! Mutable board position.
//!
//! `GameState` is the central model for the engine: an 8x8 occupant grid,
//! side-to-move and castling/en-passant state, cached king squares, and the
//! undo stack that makes `make_move` / `undo_move` exact inverses. Search
//! mutates one instance in place, so concurrent searches each need their own
//! clone (`Clone` is a full deep copy).

use crate::errors::ChessResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // --- Mailbox representation ---
    pub board: [Option<Piece>; 64],
    pub king_squares: [Square; 2],

    // --- Side and state flags ---
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    // --- Clocks / move counters ---
    pub halfmove_clock: u16,
    pub fullmove_number: u16,

    // --- Make/undo stack ---
    pub undo_stack: Vec<UndoState>,

    // --- Results of the last legality computation ---
    pub in_check: bool,
    pub checkmate: bool,
    pub stalemate: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            board: [None; 64],
            king_squares: [0; 2],

            side_to_move: Color::Light,
            castling_rights: CastlingRights::NONE,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,

            undo_stack: Vec::new(),

            in_check: false,
            checkmate: false,
            stalemate: false,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn new_game() -> Self {
        parse_fen(STARTING_POSITION_FEN).expect("starting FEN should always parse")
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Square {
        self.king_squares[color.index()]
    }

    /// Places (or clears) an occupant, keeping the cached king square current.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        if let Some(p) = piece {
            if p.kind == PieceKind::King {
                self.king_squares[p.color.index()] = square;
            }
        }
        self.board[square as usize] = piece;
    }

    /// Applies a move produced by the move generator for this exact position.
    #[inline]
    pub fn make_move(&mut self, mv: Move) {
        legal_move_apply::make_move(self, mv);
    }

    /// Reverts the most recent move. Returns `None` when nothing has been played.
    #[inline]
    pub fn undo_move(&mut self) -> Option<Move> {
        legal_move_apply::undo_move(self)
    }

    /// Strictly legal moves for the side to move. Refreshes `in_check`,
    /// `checkmate` and `stalemate`.
    #[inline]
    pub fn get_valid_moves(&mut self) -> Vec<Move> {
        generate_legal_moves(self)
    }

    /// Moves applied so far, oldest first.
    pub fn move_log(&self) -> impl Iterator<Item = &Move> + '_ {
        self.undo_stack.iter().map(|undo| &undo.mv)
    }

    #[inline]
    pub fn ply(&self) -> usize {
        self.undo_stack.len()
    }

    /// Board layout, side to move, king squares, castling rights and
    /// en-passant target all match. History and cached flags are ignored.
    pub fn same_position(&self, other: &GameState) -> bool {
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.king_squares == other.king_squares
            && self.castling_rights == other.castling_rights
            && self.en_passant_square == other.en_passant_square
    }

    /// Colors swapped and ranks flipped. History is not carried over.
    pub fn mirrored(&self) -> GameState {
        let mut out = GameState::new_empty();
        for square in 0..64u8 {
            if let Some(piece) = self.piece_at(square) {
                let flipped = square_at(7 - square_rank(square), square_file(square));
                out.set_piece(flipped, Some(Piece::new(piece.color.opposite(), piece.kind)));
            }
        }
        out.side_to_move = self.side_to_move.opposite();
        out.castling_rights = self.castling_rights.swapped();
        out.en_passant_square = self
            .en_passant_square
            .map(|sq| square_at(7 - square_rank(sq), square_file(sq)));
        out.halfmove_clock = self.halfmove_clock;
        out.fullmove_number = self.fullmove_number;
        out
    }
}
