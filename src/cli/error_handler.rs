use crate::chess::ChessError;
use crate::engine::EngineError;
use crate::session::SessionError;
use std::fmt;

/// Unified error type for CLI operations with user-friendly messages
#[derive(Debug)]
pub enum CliError {
    /// The engine could not be launched; no session was started
    EngineLaunch(EngineError),
    /// The session ended on an unrecoverable error
    Session(SessionError),
    /// Configuration error
    Configuration {
        setting: String,
        issue: String,
        suggestion: String,
    },
    /// User-friendly error with custom message
    UserError {
        message: String,
        suggestion: Option<String>,
    },
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::EngineLaunch(e) => write!(f, "{}", format_launch_error(e)),
            CliError::Session(e) => write!(f, "{}", format_session_error(e)),
            CliError::Configuration {
                setting,
                issue,
                suggestion,
            } => {
                write!(
                    f,
                    "⚙️  Configuration Error: {}\n   Issue: {}\n   💡 Suggestion: {}",
                    setting, issue, suggestion
                )
            }
            CliError::UserError {
                message,
                suggestion,
            } => {
                if let Some(suggestion) = suggestion {
                    write!(f, "❌ {}\n   💡 Suggestion: {}", message, suggestion)
                } else {
                    write!(f, "❌ {}", message)
                }
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::EngineLaunch(e) => Some(e),
            CliError::Session(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SessionError> for CliError {
    fn from(err: SessionError) -> Self {
        CliError::Session(err)
    }
}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        let chain: Vec<String> = err.chain().map(|cause| cause.to_string()).collect();
        CliError::UserError {
            message: chain.join(": "),
            suggestion: Some(
                "Check the configuration file syntax, or pass --config to use another file."
                    .to_string(),
            ),
        }
    }
}

fn format_launch_error(error: &EngineError) -> String {
    match error {
        EngineError::Launch { path, .. } => format!(
            "❌ Error: Could not start UCI engine from: {}\n   Reason: {}\n   💡 Suggestion: Install a UCI engine such as stockfish and pass its location with --engine-path.",
            path.display(),
            std::error::Error::source(error)
                .map(|source| source.to_string())
                .unwrap_or_else(|| error.to_string())
        ),
        other => format!(
            "❌ Error: The engine started but did not complete the UCI handshake: {}\n   💡 Suggestion: Make sure --engine-path points at a UCI engine.",
            other
        ),
    }
}

fn format_session_error(error: &SessionError) -> String {
    match error {
        SessionError::Engine(e) => format!(
            "🔌 Lost contact with the engine: {}\n   💡 Suggestion: The game cannot continue safely; restart and begin a new game.",
            e
        ),
        SessionError::EngineMoveRejected { mv, reason } => format!(
            "♟️  The engine played '{}', which the board refused: {}\n   💡 Suggestion: The engine and board disagree about the position; restart the session.",
            mv, reason
        ),
        SessionError::Rules(e) => format_chess_error(e),
        SessionError::Io(e) => format!("❌ Terminal error: {}", e),
    }
}

fn format_chess_error(error: &ChessError) -> String {
    match error {
        ChessError::InvalidFen(msg) => {
            format!(
                "♟️  Invalid board notation: {}\n   💡 Suggestion: The game state may be corrupted; use 'start' for a new game.",
                msg
            )
        }
        other => format!("♟️  Board state error: {}", other),
    }
}
