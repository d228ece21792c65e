//! Attack detection and pin/check analysis around the king.

use crate::game_state::chess_rules::{KING_DIRECTIONS, KNIGHT_OFFSETS, NO_DIRECTION};
use crate::game_state::{chess_types::*, game_state::GameState};

/// A square paired with the ray (seen from the king) it was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayMarker {
    pub square: Square,
    pub direction: Direction,
}

/// Pins and checks against the side to move, computed once per generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckPinState {
    pub in_check: bool,
    /// Friendly pieces that may only move along `direction`.
    pub pins: Vec<RayMarker>,
    /// Checking pieces; knight checks carry [`NO_DIRECTION`].
    pub checks: Vec<RayMarker>,
}

impl CheckPinState {
    #[inline]
    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }

    pub fn pin_direction(&self, square: Square) -> Option<Direction> {
        self.pins
            .iter()
            .find(|pin| pin.square == square)
            .map(|pin| pin.direction)
    }
}

/// Casts the eight rays and the knight offsets from the king of the side to move.
pub fn checks_and_pins(game_state: &GameState) -> CheckPinState {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let king = game_state.king_square(side);
    let mut state = CheckPinState::default();

    for (index, &(d_rank, d_file)) in KING_DIRECTIONS.iter().enumerate() {
        let orthogonal = index < 4;
        let mut possible_pin: Option<RayMarker> = None;
        let mut current = king;
        let mut distance = 0;

        while let Some(square) = offset_square(current, d_rank, d_file) {
            current = square;
            distance += 1;

            let Some(piece) = game_state.piece_at(square) else {
                continue;
            };

            if piece.color == side {
                if possible_pin.is_some() {
                    break;
                }
                possible_pin = Some(RayMarker {
                    square,
                    direction: (d_rank, d_file),
                });
                continue;
            }

            let attacks_king = match piece.kind {
                PieceKind::Rook => orthogonal,
                PieceKind::Bishop => !orthogonal,
                PieceKind::Queen => true,
                PieceKind::Pawn => distance == 1 && d_rank == -enemy.pawn_direction() && d_file != 0,
                PieceKind::King => distance == 1,
                PieceKind::Knight => false,
            };

            if attacks_king {
                match possible_pin {
                    Some(pin) => state.pins.push(pin),
                    None => {
                        state.in_check = true;
                        state.checks.push(RayMarker {
                            square,
                            direction: (d_rank, d_file),
                        });
                    }
                }
            }
            break;
        }
    }

    for &(d_rank, d_file) in &KNIGHT_OFFSETS {
        if let Some(square) = offset_square(king, d_rank, d_file) {
            if game_state.piece_at(square) == Some(Piece::new(enemy, PieceKind::Knight)) {
                state.in_check = true;
                state.checks.push(RayMarker {
                    square,
                    direction: NO_DIRECTION,
                });
            }
        }
    }

    state
}

/// Whether any `attacker_color` piece attacks `square` on the current board.
///
/// Scans outward from the target: knight and king offsets, the two pawn
/// capture squares, then the first occupant along each ray.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let is_attacker = |sq: Square, kinds: &[PieceKind]| {
        matches!(game_state.piece_at(sq), Some(p) if p.color == attacker_color && kinds.contains(&p.kind))
    };

    for &(d_rank, d_file) in &KNIGHT_OFFSETS {
        if let Some(from) = offset_square(square, d_rank, d_file) {
            if is_attacker(from, &[PieceKind::Knight]) {
                return true;
            }
        }
    }

    for d_file in [-1, 1] {
        if let Some(from) = offset_square(square, -attacker_color.pawn_direction(), d_file) {
            if is_attacker(from, &[PieceKind::Pawn]) {
                return true;
            }
        }
    }

    for (index, &(d_rank, d_file)) in KING_DIRECTIONS.iter().enumerate() {
        let sliders: &[PieceKind] = if index < 4 {
            &[PieceKind::Rook, PieceKind::Queen]
        } else {
            &[PieceKind::Bishop, PieceKind::Queen]
        };

        let mut current = square;
        let mut distance = 0;
        while let Some(from) = offset_square(current, d_rank, d_file) {
            current = from;
            distance += 1;
            if game_state.piece_at(from).is_none() {
                continue;
            }
            if is_attacker(from, sliders) || (distance == 1 && is_attacker(from, &[PieceKind::King])) {
                return true;
            }
            break;
        }
    }

    false
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    is_square_attacked(game_state, game_state.king_square(color), color.opposite())
}

/// Squares that resolve a single check: the checker itself plus, for a
/// slider, every square between it and the king.
pub fn check_resolution_squares(king: Square, check: RayMarker) -> Vec<Square> {
    if check.direction == NO_DIRECTION {
        return vec![check.square];
    }

    let mut squares = Vec::with_capacity(7);
    let mut current = king;
    while let Some(square) = offset_square(current, check.direction.0, check.direction.1) {
        squares.push(square);
        if square == check.square {
            break;
        }
        current = square;
    }
    squares
}

/// Whether `target` lies on the ray leaving `origin` in `direction`.
pub fn is_on_ray(origin: Square, direction: Direction, target: Square) -> bool {
    if direction == NO_DIRECTION {
        return false;
    }
    let mut current = origin;
    while let Some(square) = offset_square(current, direction.0, direction.1) {
        if square == target {
            return true;
        }
        current = square;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::algebraic::algebraic_to_square;

    fn sq(name: &str) -> Square {
        algebraic_to_square(name).expect("valid square")
    }

    #[test]
    fn detects_pin_along_file() {
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("FEN should parse");
        let state = checks_and_pins(&game);
        assert!(!state.in_check);
        assert_eq!(state.pins.len(), 1);
        assert_eq!(state.pin_direction(sq("e2")), Some((1, 0)));
    }

    #[test]
    fn detects_double_check() {
        // Rook on the e-file and knight on d3 both hit e1.
        let game = GameState::from_fen("4r1k1/8/8/8/8/3n4/8/4K3 w - - 0 1").expect("FEN should parse");
        let state = checks_and_pins(&game);
        assert!(state.in_check);
        assert!(state.is_double_check());
        assert!(state
            .checks
            .iter()
            .any(|check| check.square == sq("d3") && check.direction == NO_DIRECTION));
    }

    #[test]
    fn pawn_checks_only_from_the_attacking_diagonal() {
        let checked = GameState::from_fen("6k1/8/8/8/8/8/3p4/4K3 w - - 0 1").expect("FEN should parse");
        assert!(checks_and_pins(&checked).in_check);

        // A dark pawn behind the light king gives no check.
        let behind = GameState::from_fen("6k1/8/8/8/8/8/8/3pK3 w - - 0 1").expect("FEN should parse");
        assert!(!checks_and_pins(&behind).in_check);
    }

    #[test]
    fn square_attack_scan_matches_piece_rules() {
        let game = GameState::from_fen("4k3/8/8/3b4/8/8/2P5/4K2R w - - 0 1").expect("FEN should parse");
        // Bishop d5 reaches a2 and g2; the pawn on c2 covers b3 and d3.
        assert!(is_square_attacked(&game, sq("a2"), Color::Dark));
        assert!(is_square_attacked(&game, sq("g2"), Color::Dark));
        assert!(is_square_attacked(&game, sq("d3"), Color::Light));
        assert!(!is_square_attacked(&game, sq("c3"), Color::Light));
        assert!(is_square_attacked(&game, sq("h8"), Color::Light));
    }

    #[test]
    fn resolution_squares_cover_the_ray() {
        let check = RayMarker {
            square: sq("e8"),
            direction: (1, 0),
        };
        let squares = check_resolution_squares(sq("e1"), check);
        assert_eq!(squares.len(), 7);
        assert_eq!(squares.last(), Some(&sq("e8")));
    }
}
