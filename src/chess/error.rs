use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChessError {
    InvalidPieceType(String),
    InvalidSquare(String),
    InvalidMove(String),
    InvalidFen(String),
}

impl fmt::Display for ChessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChessError::InvalidPieceType(msg) => write!(f, "Invalid piece type: {}", msg),
            ChessError::InvalidSquare(msg) => write!(f, "Invalid square: {}", msg),
            ChessError::InvalidMove(msg) => write!(f, "Invalid move: {}", msg),
            ChessError::InvalidFen(msg) => write!(f, "Invalid FEN: {}", msg),
        }
    }
}

impl std::error::Error for ChessError {}
