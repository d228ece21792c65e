//! Threading configuration and the parallel root split.
//!
//! Root moves are cut into contiguous chunks, one per worker. Every worker
//! owns a clone of the position, so nothing mutable is shared apart from the
//! stop flag. Results come back over a channel in completion order.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc, Arc,
};
use std::thread;
use std::time::Instant;

use log::debug;

use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::generate_legal_moves;
use crate::moves::move_descriptions::Move;
use crate::search::board_scoring::{BoardScorer, CHECKMATE_SCORE};
use crate::search::negamax::NegamaxSearcher;
use crate::search::search_statistics::SearchStatistics;

/// Search execution model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadingModel {
    /// One negamax call over every root move.
    SingleThreaded,
    /// Root moves partitioned across worker threads.
    RootSplit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThreadingConfig {
    pub model: ThreadingModel,
    pub requested_threads: usize,
}

impl Default for ThreadingConfig {
    fn default() -> Self {
        Self {
            model: ThreadingModel::RootSplit,
            requested_threads: default_worker_count(),
        }
    }
}

impl ThreadingConfig {
    pub fn single_threaded() -> Self {
        Self {
            model: ThreadingModel::SingleThreaded,
            requested_threads: 1,
        }
    }

    #[inline]
    pub fn normalized_threads(self) -> usize {
        match self.model {
            ThreadingModel::SingleThreaded => 1,
            ThreadingModel::RootSplit => self.requested_threads.max(1),
        }
    }
}

/// Available cores minus one, leaving a core for the caller.
pub fn default_worker_count() -> usize {
    thread::available_parallelism()
        .map(|n| n.get().saturating_sub(1))
        .unwrap_or(1)
        .max(1)
}

/// Cancellation flag shared between the driver and every worker.
#[derive(Debug, Default)]
pub struct SharedSearchState {
    stop: AtomicBool,
}

impl SharedSearchState {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    #[inline]
    pub fn request_stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn should_stop(&self) -> bool {
        self.stop.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset(&self) {
        self.stop.store(false, Ordering::Relaxed);
    }
}

/// Best move and score of a group of root moves.
#[derive(Debug, Clone, Copy)]
pub struct RootResult {
    pub best_move: Option<Move>,
    pub best_score: i32,
    pub stats: SearchStatistics,
}

impl Default for RootResult {
    fn default() -> Self {
        Self {
            best_move: None,
            best_score: -CHECKMATE_SCORE,
            stats: SearchStatistics::default(),
        }
    }
}

/// Contiguous chunks of `ceil(len / workers)` moves, so there are never more
/// chunks than workers.
pub fn partition_moves(moves: &[Move], workers: usize) -> Vec<&[Move]> {
    if moves.is_empty() {
        return Vec::new();
    }
    let chunk_size = moves.len().div_ceil(workers.max(1));
    moves.chunks(chunk_size).collect()
}

/// Scores each move with a full-window search one ply shallower and keeps
/// the strictly best one.
pub fn search_root_moves<S: BoardScorer + ?Sized>(
    game_state: &mut GameState,
    moves: &[Move],
    depth: u8,
    scorer: &S,
    shared: &SharedSearchState,
) -> ChessResult<RootResult> {
    let started = Instant::now();
    let sign = game_state.side_to_move.sign();
    let mut searcher = NegamaxSearcher::new(scorer, shared, depth);
    let mut result = RootResult::default();

    for &mv in moves {
        searcher.stats.moves_considered += 1;

        game_state.make_move(mv);
        let child_moves = generate_legal_moves(game_state);
        let child = searcher.negamax(
            game_state,
            &child_moves,
            depth.saturating_sub(1),
            -CHECKMATE_SCORE,
            CHECKMATE_SCORE,
            -sign,
        );
        game_state.undo_move();
        let score = -child?;

        if score > result.best_score {
            result.best_score = score;
            result.best_move = Some(mv);
        }
    }

    result.stats = searcher.stats;
    result.stats.busy = started.elapsed();
    Ok(result)
}

/// Runs [`search_root_moves`] on every chunk in its own scoped thread and
/// merges the results in the order the workers finish.
pub fn root_split_search<S: BoardScorer + ?Sized>(
    game_state: &GameState,
    moves: &[Move],
    depth: u8,
    workers: usize,
    scorer: &S,
    shared: &SharedSearchState,
) -> ChessResult<RootResult> {
    let chunks = partition_moves(moves, workers);
    debug!(
        "root split: {} moves in {} chunks of up to {}",
        moves.len(),
        chunks.len(),
        chunks.first().map_or(0, |chunk| chunk.len())
    );

    let (tx, rx) = mpsc::channel::<(usize, ChessResult<RootResult>)>();

    let (outcomes, panicked) = thread::scope(|scope| {
        let mut handles = Vec::with_capacity(chunks.len());
        for (worker_id, chunk) in chunks.iter().copied().enumerate() {
            let tx = tx.clone();
            let mut local_state = game_state.clone();
            handles.push(scope.spawn(move || {
                let outcome = search_root_moves(&mut local_state, chunk, depth, scorer, shared);
                // The receiver outlives the scope, so a send cannot fail here.
                let _ = tx.send((worker_id, outcome));
            }));
        }
        drop(tx);

        let outcomes: Vec<(usize, ChessResult<RootResult>)> = rx.iter().collect();
        let panicked = handles
            .into_iter()
            .map(|handle| handle.join())
            .filter(Result::is_err)
            .count();
        (outcomes, panicked)
    });

    if panicked > 0 {
        return Err(ChessError::WorkerFailed {
            message: format!("{panicked} search worker(s) panicked"),
        });
    }

    let mut best = RootResult::default();
    best.stats.worker_count = chunks.len();

    for (worker_id, outcome) in outcomes {
        let local = outcome?;
        debug!(
            "worker {worker_id} finished: score {} after {} positions",
            local.best_score, local.stats.positions_evaluated
        );
        best.stats.merge(&local.stats);
        if local.best_score > best.best_score {
            best.best_score = local.best_score;
            best.best_move = local.best_move;
        }
    }

    Ok(best)
}
