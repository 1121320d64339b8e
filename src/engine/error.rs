use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Could not start UCI engine from '{}': {source}", .path.display())]
    Launch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Engine I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Engine process exited unexpectedly")]
    ProcessExited,

    #[error("Engine did not answer '{waiting_for}' within {timeout_secs}s")]
    Timeout {
        waiting_for: String,
        timeout_secs: u64,
    },

    #[error("Malformed engine response: {0}")]
    MalformedResponse(String),

    #[error("Engine has already been closed")]
    Closed,
}
