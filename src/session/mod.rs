//! The turn-coordination core: session state, per-input decisions and the
//! read-eval-print loop around them.

pub mod commands;
pub mod coordinator;
pub mod error;
pub mod input;
pub mod prompt;
pub mod session_loop;
pub mod state;

pub use commands::SessionCommand;
pub use coordinator::{CommandOutcome, TurnCoordinator, TurnOutcome, ILLEGAL_MOVE_MESSAGE};
pub use error::SessionError;
pub use input::{stdin_lines, ChannelLines, LineSource};
pub use prompt::{compose_prompt, MessageSlots};
pub use session_loop::SessionLoop;
pub use state::{Session, SessionSettings};
