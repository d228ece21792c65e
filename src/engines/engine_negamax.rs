//! Fixed-depth negamax engine.
//!
//! `find_best_move` is the synchronous driver: shuffle the root moves once,
//! then either search them in one negamax call or split them across worker
//! threads. [`NegamaxEngine`] wraps the driver behind the `Engine` trait.

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::engines::engine_random::pick_random_move;
use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{score_to_pawns, BoardScorer, PositionalScorer, CHECKMATE_SCORE};
use crate::search::negamax::NegamaxSearcher;
use crate::search::search_statistics::SearchStatistics;
use crate::search::threading::{root_split_search, SharedSearchState, ThreadingConfig};

pub const DEFAULT_SEARCH_DEPTH: u8 = 4;
pub const DEFAULT_SEQUENTIAL_THRESHOLD: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    pub depth: u8,
    /// Root move counts at or below this are searched without worker threads.
    pub sequential_threshold: usize,
    pub threading: ThreadingConfig,
    /// Seeds the root shuffle and the random fallback. `None` draws from the OS.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_SEARCH_DEPTH,
            sequential_threshold: DEFAULT_SEQUENTIAL_THRESHOLD,
            threading: ThreadingConfig::default(),
            seed: None,
        }
    }
}

impl SearchConfig {
    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SearchOutcome {
    /// `None` when there are no legal moves, or when every root move scored
    /// at the losing sentinel.
    pub best_move: Option<Move>,
    /// Relative to the side to move.
    pub best_score: i32,
    pub stats: SearchStatistics,
}

/// Searches `legal_moves` of `game_state` to `config.depth` plies.
///
/// The position itself is never touched; every search path works on a clone.
pub fn find_best_move<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    legal_moves: &[Move],
    config: &SearchConfig,
    scorer: &S,
    shared: &SharedSearchState,
) -> ChessResult<SearchOutcome> {
    let started = Instant::now();
    let sign = game_state.side_to_move.sign();

    if legal_moves.is_empty() {
        warn!("no legal moves for {:?}, nothing to search", game_state.side_to_move);
        let mut local = game_state.clone();
        return Ok(SearchOutcome {
            best_move: None,
            best_score: sign * scorer.score(&mut local),
            stats: SearchStatistics::default(),
        });
    }

    let mut moves = legal_moves.to_vec();
    moves.shuffle(&mut config.rng());

    let depth = config.depth.max(1);
    let workers = config.threading.normalized_threads();

    let mut outcome = if moves.len() <= config.sequential_threshold || workers == 1 {
        debug!("sequential search: {} moves, depth {depth}", moves.len());
        let mut local = game_state.clone();
        let mut searcher = NegamaxSearcher::new(scorer, shared, depth);
        let best_score = searcher.negamax(&mut local, &moves, depth, -CHECKMATE_SCORE, CHECKMATE_SCORE, sign)?;
        let mut stats = searcher.stats;
        stats.worker_count = 1;
        SearchOutcome {
            best_move: searcher.best_move,
            best_score,
            stats,
        }
    } else {
        debug!("parallel search: {} moves, depth {depth}, {workers} workers", moves.len());
        let result = root_split_search(game_state, &moves, depth, workers, scorer, shared)?;
        SearchOutcome {
            best_move: result.best_move,
            best_score: result.best_score,
            stats: result.stats,
        }
    };

    outcome.stats.elapsed = started.elapsed();
    if outcome.stats.worker_count == 1 {
        outcome.stats.busy = outcome.stats.elapsed;
    }
    report(&outcome);
    Ok(outcome)
}

fn report(outcome: &SearchOutcome) {
    let stats = &outcome.stats;
    info!(
        "best move {} score {:+.3} | positions {} | cutoffs {} ({:.1}% pruned) | depth {} | workers {} | {:.3}s ({:.0} pos/s)",
        outcome
            .best_move
            .map_or_else(|| "none".to_owned(), |mv| mv.to_long_algebraic()),
        score_to_pawns(outcome.best_score),
        stats.positions_evaluated,
        stats.alpha_beta_cutoffs,
        stats.pruning_ratio() * 100.0,
        stats.max_depth_reached,
        stats.worker_count,
        stats.elapsed.as_secs_f64(),
        stats.positions_per_second(),
    );
    if stats.worker_count > 1 {
        info!(
            "parallel speedup {:.2}x over {} workers ({:.0}% efficiency)",
            stats.parallel_speedup(),
            stats.worker_count,
            stats.parallel_efficiency() * 100.0,
        );
    }
}

/// [`find_best_move`] followed by the random fallback when legal moves exist
/// but the search settled on none.
pub fn search_with_fallback<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    legal_moves: &[Move],
    config: &SearchConfig,
    scorer: &S,
    shared: &SharedSearchState,
) -> ChessResult<SearchOutcome> {
    let mut outcome = find_best_move(game_state, legal_moves, config, scorer, shared)?;
    if outcome.best_move.is_none() && !legal_moves.is_empty() {
        warn!("search produced no move, falling back to a random legal move");
        outcome.best_move = pick_random_move(legal_moves, &mut config.rng());
    }
    Ok(outcome)
}

pub struct NegamaxEngine<S: BoardScorer = PositionalScorer> {
    move_generator: LegalMoveGenerator,
    config: SearchConfig,
    scorer: S,
}

impl NegamaxEngine {
    pub fn new(config: SearchConfig) -> Self {
        Self::with_scorer(config, PositionalScorer)
    }
}

impl<S: BoardScorer> NegamaxEngine<S> {
    pub fn with_scorer(config: SearchConfig, scorer: S) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            config,
            scorer,
        }
    }
}

impl<S: BoardScorer> Engine for NegamaxEngine<S> {
    fn name(&self) -> &str {
        "Bramble Negamax"
    }

    fn choose_move(&mut self, game_state: &GameState, shared: &SharedSearchState) -> ChessResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(&mut game_state.clone());
        let outcome = search_with_fallback(game_state, &legal_moves, &self.config, &self.scorer, shared)?;
        Ok(EngineOutput {
            best_move: outcome.best_move,
            best_score: Some(outcome.best_score),
            stats: outcome.stats,
        })
    }
}
