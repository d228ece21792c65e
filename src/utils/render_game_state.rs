//! Terminal-oriented board renderer used by the console driver.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::fen_generator::piece_to_fen_char;

/// Render the board as text, rank 8 at the top, FEN letters for pieces.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match game_state.piece_at(square_at(rank, file)) {
                Some(piece) => out.push(piece_to_fen_char(piece)),
                None => out.push('.'),
            }

            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");

    out
}

#[cfg(test)]
mod tests {
    use super::render_game_state;
    use crate::game_state::game_state::GameState;

    #[test]
    fn renders_start_position() {
        let text = render_game_state(&GameState::new_game());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[1], "8 r n b q k b n r 8");
        assert_eq!(lines[7], "2 P P P P P P P P 2");
    }
}
