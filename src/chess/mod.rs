//! Chess rules collaborator: board state, FEN and coordinate moves.
//!
//! The session core never touches [`Board`] internals; it goes through the
//! [`rules`] facade.

pub use self::board::{Board, CastlingRights, STARTING_FEN};
pub use self::error::ChessError;
pub use self::moves::Move;
pub use self::piece::{Color, Piece, PieceType};
pub use self::rules::{ApplyError, MIN_MOVE_LEN};
pub use self::square::Square;

mod board;
mod error;
mod moves;
mod piece;
pub mod rules;
mod square;
