//! Fixed-depth negamax with alpha-beta pruning.
//!
//! Moves are searched in the order they are handed in; there is no move
//! ordering, transposition table or quiescence extension. The best move is
//! only tracked at the root ply.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, CHECKMATE_SCORE};
use crate::search::search_statistics::SearchStatistics;
use crate::search::threading::SharedSearchState;

pub struct NegamaxSearcher<'a, S: BoardScorer + ?Sized> {
    scorer: &'a S,
    shared: &'a SharedSearchState,
    root_depth: u8,
    alpha_beta: bool,
    pub best_move: Option<Move>,
    pub stats: SearchStatistics,
}

impl<'a, S: BoardScorer + ?Sized> NegamaxSearcher<'a, S> {
    pub fn new(scorer: &'a S, shared: &'a SharedSearchState, root_depth: u8) -> Self {
        Self {
            scorer,
            shared,
            root_depth,
            alpha_beta: true,
            best_move: None,
            stats: SearchStatistics::default(),
        }
    }

    /// Same searcher with cutoffs disabled; every node is expanded.
    pub fn without_pruning(mut self) -> Self {
        self.alpha_beta = false;
        self
    }

    /// Scores the position from the point of view of `sign` (+1 light, -1
    /// dark). `moves` must be the legal moves of `game_state`.
    ///
    /// Returns `SearchCancelled` as soon as a stop is requested; moves made
    /// on the way down are still undone.
    pub fn negamax(
        &mut self,
        game_state: &mut GameState,
        moves: &[Move],
        depth: u8,
        mut alpha: i32,
        beta: i32,
        sign: i32,
    ) -> ChessResult<i32> {
        if self.shared.should_stop() {
            return Err(ChessError::SearchCancelled);
        }

        let ply = self.root_depth.saturating_sub(depth);
        self.stats.max_depth_reached = self.stats.max_depth_reached.max(ply);

        if depth == 0 || moves.is_empty() {
            self.stats.positions_evaluated += 1;
            return Ok(sign * self.scorer.score(game_state));
        }

        let mut max_score = -CHECKMATE_SCORE;

        for (index, &mv) in moves.iter().enumerate() {
            self.stats.moves_considered += 1;

            game_state.make_move(mv);
            let child_moves = generate_legal_moves(game_state);
            let result = self.negamax(game_state, &child_moves, depth - 1, -beta, -alpha, -sign);
            game_state.undo_move();
            let score = -result?;

            if score > max_score {
                max_score = score;
                if depth == self.root_depth {
                    self.best_move = Some(mv);
                }
            }

            if !self.alpha_beta {
                continue;
            }

            alpha = alpha.max(max_score);
            if alpha >= beta {
                self.stats.alpha_beta_cutoffs += (moves.len() - index - 1) as u64;
                break;
            }
        }

        Ok(max_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::board_scoring::{MaterialScorer, PositionalScorer};

    fn search(fen: &str, depth: u8, pruning: bool) -> (Option<Move>, i32, SearchStatistics) {
        let mut game = GameState::from_fen(fen).expect("FEN should parse");
        let moves = generate_legal_moves(&mut game);
        let shared = SharedSearchState::default();
        let mut searcher = NegamaxSearcher::new(&PositionalScorer, &shared, depth);
        if !pruning {
            searcher = searcher.without_pruning();
        }
        let sign = game.side_to_move.sign();
        let score = searcher
            .negamax(&mut game, &moves, depth, -CHECKMATE_SCORE, CHECKMATE_SCORE, sign)
            .expect("search should finish");
        assert_eq!(game.ply(), 0);
        (searcher.best_move, score, searcher.stats)
    }

    #[test]
    fn depth_zero_is_signed_evaluation() {
        let mut game = GameState::new_game();
        let moves = generate_legal_moves(&mut game);
        let shared = SharedSearchState::default();
        let mut searcher = NegamaxSearcher::new(&MaterialScorer, &shared, 0);
        let score = searcher
            .negamax(&mut game, &moves, 0, -CHECKMATE_SCORE, CHECKMATE_SCORE, -1)
            .expect("search should finish");
        assert_eq!(score, 0);
        assert_eq!(searcher.stats.positions_evaluated, 1);
        assert_eq!(searcher.best_move, None);
    }

    #[test]
    fn finds_mate_in_one() {
        let (best, score, _) = search("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", 1, true);
        assert_eq!(best.map(|mv| mv.to_long_algebraic()), Some("a1a8".to_owned()));
        assert_eq!(score, CHECKMATE_SCORE);
    }

    #[test]
    fn takes_a_hanging_queen() {
        let (best, _, _) = search("4k3/8/8/3q4/8/8/3R4/4K3 w - - 0 1", 2, true);
        assert_eq!(best.map(|mv| mv.to_long_algebraic()), Some("d2d5".to_owned()));
    }

    #[test]
    fn pruning_does_not_change_the_result() {
        let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
        let (pruned_move, pruned_score, pruned_stats) = search(fen, 2, true);
        let (full_move, full_score, full_stats) = search(fen, 2, false);

        assert_eq!(pruned_score, full_score);
        assert_eq!(pruned_move, full_move);
        assert!(pruned_stats.positions_evaluated < full_stats.positions_evaluated);
        assert!(pruned_stats.alpha_beta_cutoffs > 0);
        assert_eq!(full_stats.alpha_beta_cutoffs, 0);
    }

    #[test]
    fn stop_request_cancels_the_search() {
        let mut game = GameState::new_game();
        let moves = generate_legal_moves(&mut game);
        let shared = SharedSearchState::default();
        shared.request_stop();
        let mut searcher = NegamaxSearcher::new(&MaterialScorer, &shared, 3);
        let result = searcher.negamax(&mut game, &moves, 3, -CHECKMATE_SCORE, CHECKMATE_SCORE, 1);
        assert_eq!(result, Err(ChessError::SearchCancelled));
    }
}
