//! Engine collaborator: the automated opponent and the legality oracle.

pub mod error;
pub mod options;
pub mod uci;

pub use error::EngineError;
pub use options::EngineOptions;
pub use uci::{is_coordinate_move, UciEngine};

/// Request/response contract the session core needs from a chess engine.
///
/// Every call is one request with one awaited response; callers never issue
/// a second request before the first resolves.
#[allow(async_fn_in_trait)]
pub trait EngineAdapter {
    /// Make `fen` the engine's current position
    async fn synchronize(&mut self, fen: &str) -> Result<(), EngineError>;

    /// Best move for the side to move in the current position, searched to
    /// `depth` plies. `None` when the side to move has no legal move.
    async fn best_move(&mut self, depth: u8) -> Result<Option<String>, EngineError>;

    /// Whether coordinate move `mv` is legal in the current position
    async fn is_legal(&mut self, mv: &str) -> Result<bool, EngineError>;

    /// Release the engine. Calling it again after a successful close is a no-op.
    async fn close(&mut self) -> Result<(), EngineError>;
}
