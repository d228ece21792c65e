//! Coordinate move notation (`e2e4`, `e7e8q`).
//!
//! Rendering is a pure function of the move. Parsing resolves the text
//! against a legal-move list, which is how user input gets validated before
//! it reaches `make_move`.

use crate::errors::{ChessError, ChessResult};
use crate::moves::move_descriptions::Move;
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn move_to_long_algebraic(mv: &Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from));
    out.push_str(&square_to_algebraic(mv.to));
    if mv.is_promotion {
        out.push('q');
    }
    out
}

/// Finds the legal move matching `long_algebraic`. A missing promotion
/// suffix is accepted because promotion is always to a queen.
pub fn long_algebraic_to_move(long_algebraic: &str, legal_moves: &[Move]) -> ChessResult<Move> {
    let text = long_algebraic.trim();
    if text.len() != 4 && text.len() != 5 {
        return Err(ChessError::invalid_notation(text, "expected 4 or 5 characters"));
    }
    if !text.is_ascii() {
        return Err(ChessError::invalid_notation(text, "expected ASCII coordinates"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    if let Some(suffix) = text[4..].chars().next() {
        if !suffix.eq_ignore_ascii_case(&'q') {
            return Err(ChessError::invalid_notation(
                text,
                "only queen promotion is supported",
            ));
        }
    }

    let mv = legal_moves
        .iter()
        .copied()
        .find(|mv| mv.from == from && mv.to == to)
        .ok_or_else(|| ChessError::IllegalMove {
            text: text.to_owned(),
        })?;

    if text.len() == 5 && !mv.is_promotion {
        return Err(ChessError::invalid_notation(text, "move is not a promotion"));
    }

    Ok(mv)
}
