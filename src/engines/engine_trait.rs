//! Engine abstraction used by the console driver.
//!
//! Different move-selection strategies sit behind one trait so the driver
//! can pick one at runtime and run it on a background thread.

use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::Move;
use crate::search::search_statistics::SearchStatistics;
use crate::search::threading::SharedSearchState;

#[derive(Debug, Clone, Copy, Default)]
pub struct EngineOutput {
    /// `None` only when the side to move has no legal moves.
    pub best_move: Option<Move>,
    pub best_score: Option<i32>,
    pub stats: SearchStatistics,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    /// Engines that search should poll `shared` and give up with
    /// `SearchCancelled` once a stop is requested.
    fn choose_move(&mut self, game_state: &GameState, shared: &SharedSearchState) -> ChessResult<EngineOutput>;
}
