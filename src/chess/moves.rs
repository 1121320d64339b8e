use super::error::ChessError;
use super::piece::PieceType;
use super::square::Square;
use std::fmt;
use std::str::FromStr;

/// A move in coordinate notation: origin square, destination square and an
/// optional promotion piece (`e2e4`, `e7e8q`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Square, to: Square, promotion: Option<PieceType>) -> Result<Self, ChessError> {
        if from == to {
            return Err(ChessError::InvalidMove(
                "Source and destination squares cannot be the same".to_string(),
            ));
        }

        if let Some(piece_type) = promotion {
            if matches!(piece_type, PieceType::King | PieceType::Pawn) {
                return Err(ChessError::InvalidMove(
                    "Cannot promote to King or Pawn".to_string(),
                ));
            }
        }

        Ok(Self {
            from,
            to,
            promotion,
        })
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(ChessError::InvalidMove(format!(
                "Invalid move format '{}'. Expected 'e2e4', or 'e7e8q' for promotion.",
                s
            )));
        }

        let from = s[0..2].parse::<Square>()?;
        let to = s[2..4].parse::<Square>()?;
        let promotion = match s[4..].chars().next() {
            Some(c) => Some(PieceType::from_promotion_char(c)?),
            None => None,
        };

        Self::new(from, to, promotion)
    }
}
