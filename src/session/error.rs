use crate::chess::{ApplyError, ChessError};
use crate::engine::EngineError;
use thiserror::Error;

/// Failures that end the current session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Engine failure: {0}")]
    Engine(#[from] EngineError),

    #[error("Engine move '{mv}' could not be applied: {reason}")]
    EngineMoveRejected { mv: String, reason: ApplyError },

    #[error("Rules error: {0}")]
    Rules(#[from] ChessError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
