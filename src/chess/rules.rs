//! The narrow surface the session core uses to talk to the rules engine.

use super::board::parse_active_color;
use super::{Board, ChessError, Color, Move};
use thiserror::Error;

/// Length of the shortest coordinate move (`e2e4`)
pub const MIN_MOVE_LEN: usize = 4;

/// Why a coordinate move could not be applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApplyError {
    /// The text is not a coordinate move at all
    #[error("Unrecognized move '{0}'")]
    UnrecognizedMove(String),

    /// A well-formed move the board refused to play
    #[error("{0}")]
    Rejected(ChessError),
}

/// A fresh position with the standard setup, White to move
pub fn new_position() -> Board {
    Board::new()
}

/// Parse `mv` as a coordinate move and apply it. The board is only mutated
/// when the whole move succeeds.
pub fn apply_coordinate_move(board: &mut Board, mv: &str) -> Result<Move, ApplyError> {
    let parsed = mv
        .parse::<Move>()
        .map_err(|_| ApplyError::UnrecognizedMove(mv.to_string()))?;
    board.apply_move(parsed).map_err(ApplyError::Rejected)?;
    Ok(parsed)
}

pub fn position_to_fen(board: &Board) -> String {
    board.to_fen()
}

/// Side to move as recorded in the second field of a FEN string
pub fn side_to_move(fen: &str) -> Result<Color, ChessError> {
    let field = fen.split_whitespace().nth(1).ok_or_else(|| {
        ChessError::InvalidFen(format!("Missing active color field in '{}'", fen))
    })?;
    parse_active_color(field)
}
