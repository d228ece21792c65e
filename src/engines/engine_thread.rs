//! Runs an [`Engine`] on a background thread.
//!
//! `start_search` hands back a [`SearchHandle`] that the driver polls between
//! input lines; cancelling raises the shared stop flag and the thread exits
//! without reporting.

use std::sync::{mpsc, Arc};
use std::thread;

use log::debug;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::errors::{ChessError, ChessResult};
use crate::game_state::game_state::GameState;
use crate::search::threading::SharedSearchState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Searching,
    Completed,
    Cancelled,
}

/// A search running on a background thread.
///
/// Dropping the handle without cancelling lets the search finish and its
/// result is thrown away.
pub struct SearchHandle {
    shared: Arc<SharedSearchState>,
    receiver: mpsc::Receiver<ChessResult<EngineOutput>>,
    status: SearchStatus,
}

impl SearchHandle {
    #[inline]
    pub fn status(&self) -> SearchStatus {
        self.status
    }

    /// Non-blocking poll. Yields the result once, then `None`.
    pub fn try_result(&mut self) -> Option<ChessResult<EngineOutput>> {
        if self.status != SearchStatus::Searching {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.status = SearchStatus::Completed;
                Some(result)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.status = SearchStatus::Completed;
                Some(Err(search_thread_lost()))
            }
        }
    }

    /// Blocks until the search finishes.
    ///
    /// Fails with `SearchCancelled` after [`cancel`](Self::cancel) and with
    /// `ResultAlreadyTaken` when [`try_result`](Self::try_result) already
    /// returned the outcome.
    pub fn wait(self) -> ChessResult<EngineOutput> {
        match self.status {
            SearchStatus::Cancelled => Err(ChessError::SearchCancelled),
            SearchStatus::Completed => Err(ChessError::ResultAlreadyTaken),
            SearchStatus::Searching => self.receiver.recv().map_err(|_| search_thread_lost())?,
        }
    }

    /// Stops the engine and discards whatever it would have reported.
    pub fn cancel(&mut self) {
        if self.status == SearchStatus::Searching {
            self.shared.request_stop();
            self.status = SearchStatus::Cancelled;
        }
    }
}

fn search_thread_lost() -> ChessError {
    ChessError::WorkerFailed {
        message: "search thread exited without a result".to_owned(),
    }
}

/// Moves `engine` onto its own thread and asks it for a move in a private
/// copy of `game_state`.
pub fn start_search<E: Engine + 'static>(mut engine: E, game_state: &GameState) -> SearchHandle {
    let shared = SharedSearchState::new();
    let (tx, rx) = mpsc::channel();
    let snapshot = game_state.clone();
    let worker_shared = Arc::clone(&shared);

    thread::spawn(move || {
        debug!("{} searching", engine.name());
        let result = engine.choose_move(&snapshot, &worker_shared);
        if matches!(result, Err(ChessError::SearchCancelled)) {
            debug!("search cancelled before completion");
            return;
        }
        // The handle may already be gone; its result is then unwanted.
        let _ = tx.send(result);
    });

    SearchHandle {
        shared,
        receiver: rx,
        status: SearchStatus::Searching,
    }
}
