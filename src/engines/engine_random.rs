//! Uniform random move selection.
//!
//! Serves as the fallback when search yields no move, and as a weak
//! opponent for smoke testing.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::ChessResult;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::LegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;
use crate::moves::move_descriptions::Move;
use crate::search::threading::SharedSearchState;

pub fn pick_random_move<R: Rng + ?Sized>(legal_moves: &[Move], rng: &mut R) -> Option<Move> {
    legal_moves.choose(rng).copied()
}

pub struct RandomEngine {
    move_generator: LegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            move_generator: LegalMoveGenerator,
            rng,
        }
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "Bramble Random"
    }

    fn choose_move(&mut self, game_state: &GameState, _shared: &SharedSearchState) -> ChessResult<EngineOutput> {
        let legal_moves = self.move_generator.generate_legal_moves(&mut game_state.clone());
        Ok(EngineOutput {
            best_move: pick_random_move(&legal_moves, &mut self.rng),
            ..EngineOutput::default()
        })
    }
}
