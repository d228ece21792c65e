//! Error types for the engine.
//!
//! Checkmate and stalemate are not errors; they surface as flags on
//! `GameState` together with an empty move list. What remains are input
//! parsing failures and search lifecycle failures.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    /// The FEN string could not be parsed.
    #[error("Invalid FEN: {message}")]
    InvalidFen { message: String },

    /// A square or move in coordinate notation could not be parsed.
    #[error("Invalid notation '{text}': {message}")]
    InvalidNotation { text: String, message: String },

    /// A well-formed move that is not legal in the current position.
    #[error("Illegal move: {text}")]
    IllegalMove { text: String },

    /// The search was cancelled before it produced a result.
    #[error("Search was cancelled")]
    SearchCancelled,

    /// A search worker panicked or hung up before reporting.
    #[error("Search worker failed: {message}")]
    WorkerFailed { message: String },

    /// The result of a background search was already handed out.
    #[error("Search result was already collected")]
    ResultAlreadyTaken,
}

impl ChessError {
    pub(crate) fn invalid_fen(message: impl Into<String>) -> Self {
        ChessError::InvalidFen {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_notation(text: &str, message: impl Into<String>) -> Self {
        ChessError::InvalidNotation {
            text: text.to_owned(),
            message: message.into(),
        }
    }
}

/// Result type alias for engine operations.
pub type ChessResult<T> = Result<T, ChessError>;
