//! Square conversions for coordinate notation (`e4` <-> index).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::{square_at, square_file, square_rank, Square};

/// Convert coordinate notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> ChessResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(ChessError::invalid_notation(square, "expected file and rank"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::invalid_notation(square, "file must be a-h"));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::invalid_notation(square, "rank must be 1-8"));
    }

    Ok(square_at(rank - b'1', file - b'a'))
}

/// Convert a square index (`0..=63`) to coordinate notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> String {
    let file_char = char::from(b'a' + square_file(square));
    let rank_char = char::from(b'1' + square_rank(square));
    format!("{file_char}{rank_char}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_round_trip() {
        assert_eq!(algebraic_to_square("a1"), Ok(0));
        assert_eq!(algebraic_to_square("h8"), Ok(63));
        assert_eq!(square_to_algebraic(algebraic_to_square("e4").expect("square")), "e4");
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("a").is_err());
    }
}
