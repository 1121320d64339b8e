use super::error::ChessError;
use std::fmt;
use std::str::FromStr;

/// A board square in 0-based file/rank coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub file: u8, // 0-7 corresponding to a-h
    pub rank: u8, // 0-7 corresponding to 1-8
}

impl Square {
    /// Create a square without validation (bounds must already be guaranteed)
    pub const fn new_unchecked(file: u8, rank: u8) -> Self {
        Self { file, rank }
    }

    /// Create square from file and rank characters, e.g. `('e', '4')`
    pub fn from_chars(file: char, rank: char) -> Result<Self, ChessError> {
        if !('a'..='h').contains(&file) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid file '{}'. Must be a-h.",
                file
            )));
        }
        if !('1'..='8').contains(&rank) {
            return Err(ChessError::InvalidSquare(format!(
                "Invalid rank '{}'. Must be 1-8.",
                rank
            )));
        }

        Ok(Self {
            file: file as u8 - b'a',
            rank: rank as u8 - b'1',
        })
    }

    pub fn file_char(&self) -> char {
        (self.file + b'a') as char
    }

    pub fn rank_char(&self) -> char {
        (self.rank + b'1') as char
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => Err(ChessError::InvalidSquare(format!(
                "Square must be exactly 2 characters (e.g., 'e4'), got '{}'",
                s
            ))),
        }
    }
}
