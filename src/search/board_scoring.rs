//! Pluggable board evaluation interfaces and the positional evaluator.
//!
//! Scores are integers in millipawns (a pawn is 1000) and always light-positive:
//! search multiplies by the side-to-move sign itself. Every scorer is
//! stateless, so independent positions may be scored concurrently.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_legal_moves;

pub const PAWN_VALUE: i32 = 1000;
pub const CHECKMATE_SCORE: i32 = 1_000_000;
pub const STALEMATE_SCORE: i32 = 0;

const MOBILITY_PER_MOVE: i32 = 100;
const DOUBLED_PAWN_PENALTY: i32 = 500;
const ISOLATED_PAWN_PENALTY: i32 = 300;
const KING_SHELTER_BONUS: i32 = 200;
const CENTER_OCCUPANCY_BONUS: i32 = 200;
const ENDGAME_PIECE_LIMIT: usize = 12;

/// Light-positive static evaluation.
pub trait BoardScorer: Send + Sync {
    /// May run legal move generation on `game_state`; the board is left as found.
    fn score(&self, game_state: &mut GameState) -> i32;
}

/// Converts a millipawn score to the material scale (pawn = 1.0).
#[inline]
pub fn score_to_pawns(score: i32) -> f64 {
    f64::from(score) / f64::from(PAWN_VALUE)
}

#[inline]
pub const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 1000,
        PieceKind::Knight => 3250,
        PieceKind::Bishop => 3250,
        PieceKind::Rook => 5000,
        PieceKind::Queen => 10000,
        PieceKind::King => 0,
    }
}

/// The evaluator used by search.
pub fn evaluate(game_state: &mut GameState) -> i32 {
    PositionalScorer.score(game_state)
}

/// Mate/stalemate detection on top of plain material.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &mut GameState) -> i32 {
        let moves = generate_legal_moves(game_state);
        if let Some(score) = terminal_score(game_state, moves.is_empty()) {
            return score;
        }

        let mut score = 0;
        for piece in game_state.board.iter().flatten() {
            score += piece.color.sign() * piece_value(piece.kind);
        }
        score
    }
}

/// Material, piece-square bonuses, mobility, pawn structure, king safety and
/// center occupancy, all additive.
///
/// Mobility regenerates the legal moves of the side to move on every call.
/// That is the dominant leaf cost in search and is not cached: any make/undo
/// invalidates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl BoardScorer for PositionalScorer {
    fn score(&self, game_state: &mut GameState) -> i32 {
        let moves = generate_legal_moves(game_state);
        if let Some(score) = terminal_score(game_state, moves.is_empty()) {
            return score;
        }

        let endgame = is_endgame(game_state);

        material_and_placement(game_state, endgame)
            + game_state.side_to_move.sign() * MOBILITY_PER_MOVE * moves.len() as i32
            + pawn_structure(game_state)
            + king_safety(game_state, endgame)
            + center_control(game_state)
    }
}

/// Checkmate favours the side that delivered it; stalemate is level.
fn terminal_score(game_state: &GameState, no_moves: bool) -> Option<i32> {
    if !no_moves {
        return None;
    }
    if game_state.checkmate {
        Some(-game_state.side_to_move.sign() * CHECKMATE_SCORE)
    } else {
        Some(STALEMATE_SCORE)
    }
}

/// At most twelve pieces left, or neither side has a queen.
pub fn is_endgame(game_state: &GameState) -> bool {
    let mut total = 0usize;
    let mut queens = 0usize;
    for piece in game_state.board.iter().flatten() {
        total += 1;
        if piece.kind == PieceKind::Queen {
            queens += 1;
        }
    }
    total <= ENDGAME_PIECE_LIMIT || queens == 0
}

fn material_and_placement(game_state: &GameState, endgame: bool) -> i32 {
    let mut score = 0;
    for square in 0..64u8 {
        let Some(piece) = game_state.piece_at(square) else {
            continue;
        };
        let mut placement = placement_bonus(piece, square);
        if endgame {
            placement = placement * 3 / 2;
        }
        score += piece.color.sign() * (piece_value(piece.kind) + placement);
    }
    score
}

/// Table lookup with rows ordered from rank 8 down for light; dark reads the
/// same tables upside down.
fn placement_bonus(piece: Piece, square: Square) -> i32 {
    let row = match piece.color {
        Color::Light => 7 - square_rank(square),
        Color::Dark => square_rank(square),
    } as usize;
    let col = square_file(square) as usize;

    match piece.kind {
        PieceKind::Knight => KNIGHT_TABLE[row][col],
        PieceKind::Bishop => BISHOP_TABLE[row][col],
        PieceKind::Rook => ROOK_TABLE[row][col],
        PieceKind::Queen => QUEEN_TABLE[row][col],
        PieceKind::Pawn => PAWN_TABLE[row][col],
        PieceKind::King => 0,
    }
}

fn pawn_structure(game_state: &GameState) -> i32 {
    let mut files = [[0i32; 8]; 2];
    for square in 0..64u8 {
        if let Some(piece) = game_state.piece_at(square) {
            if piece.kind == PieceKind::Pawn {
                files[piece.color.index()][square_file(square) as usize] += 1;
            }
        }
    }

    let mut score = 0;
    for color in [Color::Light, Color::Dark] {
        let counts = &files[color.index()];
        let mut penalty = 0;
        for file in 0..8 {
            let count = counts[file];
            if count == 0 {
                continue;
            }
            penalty += DOUBLED_PAWN_PENALTY * (count - 1);

            let left = file > 0 && counts[file - 1] > 0;
            let right = file < 7 && counts[file + 1] > 0;
            if !left && !right {
                penalty += ISOLATED_PAWN_PENALTY * count;
            }
        }
        score -= color.sign() * penalty;
    }
    score
}

fn king_safety(game_state: &GameState, endgame: bool) -> i32 {
    let mut score = 0;
    for color in [Color::Light, Color::Dark] {
        let king = game_state.king_square(color);
        let term = if endgame {
            -ENDGAME_CENTRALIZATION_STEP * doubled_center_distance(king)
        } else {
            KING_SHELTER_BONUS * friendly_neighbours(game_state, king, color)
        };
        score += color.sign() * term;
    }
    score
}

/// Half of 0.05 pawns, applied to twice the Manhattan distance from the
/// board's midpoint so the arithmetic stays integral.
const ENDGAME_CENTRALIZATION_STEP: i32 = 25;

fn doubled_center_distance(square: Square) -> i32 {
    let rank = i32::from(square_rank(square));
    let file = i32::from(square_file(square));
    (2 * rank - 7).abs() + (2 * file - 7).abs()
}

fn friendly_neighbours(game_state: &GameState, king: Square, color: Color) -> i32 {
    let mut count = 0;
    for d_rank in -1..=1 {
        for d_file in -1..=1 {
            if d_rank == 0 && d_file == 0 {
                continue;
            }
            if let Some(square) = offset_square(king, d_rank, d_file) {
                if matches!(game_state.piece_at(square), Some(p) if p.color == color) {
                    count += 1;
                }
            }
        }
    }
    count
}

fn center_control(game_state: &GameState) -> i32 {
    const CENTER: [Square; 4] = [square_at(3, 3), square_at(3, 4), square_at(4, 3), square_at(4, 4)];
    CENTER
        .iter()
        .filter_map(|&square| game_state.piece_at(square))
        .map(|piece| piece.color.sign() * CENTER_OCCUPANCY_BONUS)
        .sum()
}

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [0, 100, 200, 200, 200, 200, 100, 0],
    [100, 300, 500, 500, 500, 500, 300, 100],
    [200, 500, 600, 650, 650, 600, 500, 200],
    [200, 550, 650, 700, 700, 650, 550, 200],
    [200, 500, 650, 700, 700, 650, 500, 200],
    [200, 550, 600, 650, 650, 600, 550, 200],
    [100, 300, 500, 550, 550, 500, 300, 100],
    [0, 100, 200, 200, 200, 200, 100, 0],
];

const BISHOP_TABLE: [[i32; 8]; 8] = [
    [0, 200, 200, 200, 200, 200, 200, 0],
    [200, 400, 400, 400, 400, 400, 400, 200],
    [200, 400, 500, 600, 600, 500, 400, 200],
    [200, 500, 500, 600, 600, 500, 500, 200],
    [200, 400, 600, 600, 600, 600, 400, 200],
    [200, 600, 600, 600, 600, 600, 600, 200],
    [200, 500, 400, 400, 400, 400, 500, 200],
    [0, 200, 200, 200, 200, 200, 200, 0],
];

const ROOK_TABLE: [[i32; 8]; 8] = [
    [250, 250, 250, 250, 250, 250, 250, 250],
    [500, 750, 750, 750, 750, 750, 750, 500],
    [0, 250, 250, 250, 250, 250, 250, 0],
    [0, 250, 250, 250, 250, 250, 250, 0],
    [0, 250, 250, 250, 250, 250, 250, 0],
    [0, 250, 250, 250, 250, 250, 250, 0],
    [0, 250, 250, 250, 250, 250, 250, 0],
    [250, 250, 250, 500, 500, 250, 250, 250],
];

const QUEEN_TABLE: [[i32; 8]; 8] = [
    [0, 200, 200, 300, 300, 200, 200, 0],
    [200, 400, 400, 400, 400, 400, 400, 200],
    [200, 400, 500, 500, 500, 500, 400, 200],
    [300, 400, 500, 500, 500, 500, 400, 300],
    [400, 400, 500, 500, 500, 500, 400, 300],
    [200, 500, 500, 500, 500, 500, 400, 200],
    [200, 400, 500, 400, 400, 400, 400, 200],
    [0, 200, 200, 300, 300, 200, 200, 0],
];

const PAWN_TABLE: [[i32; 8]; 8] = [
    [800, 800, 800, 800, 800, 800, 800, 800],
    [700, 700, 700, 700, 700, 700, 700, 700],
    [300, 300, 400, 500, 500, 400, 300, 300],
    [250, 250, 300, 450, 450, 300, 250, 250],
    [200, 200, 200, 400, 400, 200, 200, 200],
    [250, 150, 100, 200, 200, 100, 150, 250],
    [250, 300, 300, 0, 0, 300, 300, 250],
    [200, 200, 200, 200, 200, 200, 200, 200],
];
