pub mod chess;
pub mod cli;
pub mod engine;
pub mod session;

// Re-export key types for easy testing
pub use chess::{Board, Color, Move};
pub use engine::{EngineAdapter, EngineError, EngineOptions, UciEngine};
pub use session::{SessionLoop, SessionSettings, TurnCoordinator};
