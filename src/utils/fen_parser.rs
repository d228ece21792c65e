//! FEN-to-GameState parser.
//!
//! Builds a populated position from a Forsyth-Edwards Notation string:
//! board occupants, king squares, side to move, castling rights, en-passant
//! target and clocks. Both clock fields may be omitted (they default to `0 1`).

use crate::errors::{ChessError, ChessResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::{algebraic_to_square, square_to_algebraic};

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts
        .next()
        .ok_or_else(|| ChessError::invalid_fen("missing board layout"))?;
    let side_part = parts
        .next()
        .ok_or_else(|| ChessError::invalid_fen("missing side to move"))?;
    let castling_part = parts
        .next()
        .ok_or_else(|| ChessError::invalid_fen("missing castling rights"))?;
    let en_passant_part = parts
        .next()
        .ok_or_else(|| ChessError::invalid_fen("missing en-passant square"))?;
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(ChessError::invalid_fen("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    validate_en_passant_square(&game_state)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::invalid_fen(format!("invalid halfmove clock: {halfmove_part}")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| ChessError::invalid_fen(format!("invalid fullmove number: {fullmove_part}")))?;

    Ok(game_state)
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> ChessResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::invalid_fen("board layout must contain 8 ranks"));
    }

    let mut king_counts = [0usize; 2];

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(ChessError::invalid_fen(format!("invalid empty-square count '{ch}'")));
                }
                if usize::from(file) + empty_count as usize > 8 {
                    return Err(ChessError::invalid_fen("board rank has too many files"));
                }
                file += empty_count as u8;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| ChessError::invalid_fen(format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(ChessError::invalid_fen("board rank has too many files"));
            }

            if piece.kind == PieceKind::King {
                king_counts[piece.color.index()] += 1;
            }
            game_state.set_piece(square_at(board_rank, file), Some(piece));
            file += 1;
        }

        if file != 8 {
            return Err(ChessError::invalid_fen("board rank does not sum to 8 files"));
        }
    }

    if king_counts != [1, 1] {
        return Err(ChessError::invalid_fen("each side needs exactly one king"));
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(ChessError::invalid_fen(format!("invalid side to move: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if castling_part == "-" {
        return Ok(rights);
    }

    for ch in castling_part.chars() {
        match ch {
            'K' => rights.light_kingside = true,
            'Q' => rights.light_queenside = true,
            'k' => rights.dark_kingside = true,
            'q' => rights.dark_queenside = true,
            _ => {
                return Err(ChessError::invalid_fen(format!(
                    "invalid castling rights character: {ch}"
                )))
            }
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| ChessError::invalid_fen(format!("invalid en-passant square: {en_passant_part}")))?;
    Ok(Some(square))
}

/// The target must sit behind a pawn of the side that just moved, on the
/// square that pawn skipped, and be empty.
fn validate_en_passant_square(game_state: &GameState) -> ChessResult<()> {
    let Some(target) = game_state.en_passant_square else {
        return Ok(());
    };

    let mover = game_state.side_to_move;
    let pusher = mover.opposite();
    let expected_rank = pusher.pawn_home_rank() as i8 + pusher.pawn_direction();
    if square_rank(target) as i8 != expected_rank {
        return Err(ChessError::invalid_fen(format!(
            "en-passant square {} is not on the skipped rank",
            square_to_algebraic(target)
        )));
    }

    let pushed_pawn = offset_square(target, pusher.pawn_direction(), 0)
        .and_then(|square| game_state.piece_at(square));
    if pushed_pawn != Some(Piece::new(pusher, PieceKind::Pawn)) {
        return Err(ChessError::invalid_fen(format!(
            "no pawn in front of en-passant square {}",
            square_to_algebraic(target)
        )));
    }

    if game_state.piece_at(target).is_some() {
        return Err(ChessError::invalid_fen(format!(
            "en-passant square {} is occupied",
            square_to_algebraic(target)
        )));
    }

    Ok(())
}

pub fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else if ch.is_ascii_lowercase() {
        Color::Dark
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}
