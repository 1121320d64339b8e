use super::moves::Move;
use super::{ChessError, Color, Piece, PieceType, Square};

/// FEN of the standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Castling rights for both players
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl CastlingRights {
    /// All castling available
    pub fn new() -> Self {
        Self {
            white_kingside: true,
            white_queenside: true,
            black_kingside: true,
            black_queenside: true,
        }
    }

    pub fn none() -> Self {
        Self {
            white_kingside: false,
            white_queenside: false,
            black_kingside: false,
            black_queenside: false,
        }
    }

    /// Parse the FEN castling field (e.g. "KQkq", "Kq", "-")
    pub fn from_fen(fen: &str) -> Result<Self, ChessError> {
        let mut rights = Self::none();
        if fen == "-" {
            return Ok(rights);
        }

        let mut last_index = None;
        for c in fen.chars() {
            let (index, flag) = match c {
                'K' => (0, &mut rights.white_kingside),
                'Q' => (1, &mut rights.white_queenside),
                'k' => (2, &mut rights.black_kingside),
                'q' => (3, &mut rights.black_queenside),
                _ => {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid castling rights character '{c}' (valid: K, Q, k, q, or - for none)"
                    )))
                }
            };
            if last_index.is_some_and(|last| index <= last) {
                return Err(ChessError::InvalidFen(format!(
                    "Castling rights '{fen}' must be unique and in KQkq order"
                )));
            }
            *flag = true;
            last_index = Some(index);
        }

        Ok(rights)
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        if self.white_kingside {
            fen.push('K');
        }
        if self.white_queenside {
            fen.push('Q');
        }
        if self.black_kingside {
            fen.push('k');
        }
        if self.black_queenside {
            fen.push('q');
        }
        if fen.is_empty() {
            fen.push('-');
        }
        fen
    }

    pub fn remove_all_for_color(&mut self, color: Color) {
        match color {
            Color::White => {
                self.white_kingside = false;
                self.white_queenside = false;
            }
            Color::Black => {
                self.black_kingside = false;
                self.black_queenside = false;
            }
        }
    }

    /// Drop the right tied to a rook's home corner, if `square` is one
    pub fn remove_rook_rights(&mut self, square: Square) {
        match (square.file, square.rank) {
            (0, 0) => self.white_queenside = false,
            (7, 0) => self.white_kingside = false,
            (0, 7) => self.black_queenside = false,
            (7, 7) => self.black_kingside = false,
            _ => {}
        }
    }
}

impl Default for CastlingRights {
    fn default() -> Self {
        Self::new()
    }
}

/// A chess position: piece placement plus the FEN game-state fields.
///
/// Move application checks move *shape* (a piece of the side to move on the
/// origin square, no self-capture, promotion rules, castling geometry). Full
/// legality, i.e. checks and pins, is the engine's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// squares[rank][file] where rank 0 = rank 1, file 0 = file a
    squares: [[Option<Piece>; 8]; 8],
    active_color: Color,
    fullmove_number: u16,
    /// Halfmove counter for the 50-move rule
    halfmove_clock: u16,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
}

impl Board {
    /// Create a board with the standard starting position
    pub fn new() -> Self {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        let mut squares = [[None; 8]; 8];
        for (file, &piece_type) in BACK_RANK.iter().enumerate() {
            squares[0][file] = Some(Piece::new(piece_type, Color::White));
            squares[1][file] = Some(Piece::new(PieceType::Pawn, Color::White));
            squares[6][file] = Some(Piece::new(PieceType::Pawn, Color::Black));
            squares[7][file] = Some(Piece::new(piece_type, Color::Black));
        }

        Self {
            squares,
            active_color: Color::White,
            fullmove_number: 1,
            halfmove_clock: 0,
            castling_rights: CastlingRights::new(),
            en_passant_target: None,
        }
    }

    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        if square.file > 7 || square.rank > 7 {
            return None;
        }
        self.squares[square.rank as usize][square.file as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) -> Result<(), ChessError> {
        if square.file > 7 || square.rank > 7 {
            return Err(ChessError::InvalidSquare(format!(
                "Square ({},{}) is out of bounds",
                square.file, square.rank
            )));
        }
        self.squares[square.rank as usize][square.file as usize] = piece;
        Ok(())
    }

    /// Side to move
    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn castling_rights(&self) -> &CastlingRights {
        &self.castling_rights
    }

    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    /// Create a board from a FEN string
    /// Example: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    pub fn from_fen(fen: &str) -> Result<Board, ChessError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        let [placement, active, castling, en_passant, halfmove, fullmove] = parts.as_slice() else {
            return Err(ChessError::InvalidFen(format!(
                "FEN must have exactly 6 fields (piece_placement active_color castling_rights en_passant halfmove fullmove), found {}",
                parts.len()
            )));
        };

        let squares = parse_placement(placement)?;
        let active_color = parse_active_color(active)?;
        let castling_rights = CastlingRights::from_fen(castling)?;

        let en_passant_target = match *en_passant {
            "-" => None,
            target => {
                let square = target.parse::<Square>().map_err(|e| {
                    ChessError::InvalidFen(format!("Invalid en passant target '{target}': {e}"))
                })?;
                if square.rank != 2 && square.rank != 5 {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid en passant target '{target}' (en passant squares must be on rank 3 or 6)"
                    )));
                }
                Some(square)
            }
        };

        let halfmove_clock = halfmove.parse::<u16>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid halfmove clock '{halfmove}' (must be a non-negative integer): {e}"
            ))
        })?;
        let fullmove_number = fullmove.parse::<u16>().map_err(|e| {
            ChessError::InvalidFen(format!(
                "Invalid fullmove number '{fullmove}' (must be a positive integer): {e}"
            ))
        })?;
        if fullmove_number == 0 {
            return Err(ChessError::InvalidFen(
                "Fullmove number must be at least 1".to_string(),
            ));
        }

        Ok(Board {
            squares,
            active_color,
            fullmove_number,
            halfmove_clock,
            castling_rights,
            en_passant_target,
        })
    }

    /// Current position in standard six-field FEN
    pub fn to_fen(&self) -> String {
        let en_passant = match self.en_passant_target {
            Some(square) => square.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            self.piece_placement(),
            self.active_color.fen_char(),
            self.castling_rights.to_fen(),
            en_passant,
            self.halfmove_clock,
            self.fullmove_number
        )
    }

    /// Piece placement field of the FEN, rank 8 first
    fn piece_placement(&self) -> String {
        let mut ranks = Vec::with_capacity(8);

        for rank in self.squares.iter().rev() {
            let mut rank_string = String::new();
            let mut empty_count = 0;

            for square in rank {
                match square {
                    Some(piece) => {
                        if empty_count > 0 {
                            rank_string.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        rank_string.push(piece.to_fen_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                rank_string.push_str(&empty_count.to_string());
            }

            ranks.push(rank_string);
        }

        ranks.join("/")
    }

    /// Apply a move atomically: either every side effect lands or the board
    /// is left exactly as it was.
    pub fn apply_move(&mut self, mv: Move) -> Result<(), ChessError> {
        let mut next = self.clone();
        next.make_move(mv)?;
        *self = next;
        Ok(())
    }

    /// Apply a move in place. On error the board may be partially updated;
    /// callers that need atomicity use [`Board::apply_move`].
    fn make_move(&mut self, mv: Move) -> Result<(), ChessError> {
        let source_piece = self.get_piece(mv.from).ok_or_else(|| {
            ChessError::InvalidMove(format!("No piece at source square {}", mv.from))
        })?;

        if source_piece.color != self.active_color {
            return Err(ChessError::InvalidMove(format!(
                "Cannot move {} piece when it's {}'s turn",
                source_piece.color, self.active_color
            )));
        }

        if let Some(dest_piece) = self.get_piece(mv.to) {
            if dest_piece.color == self.active_color {
                return Err(ChessError::InvalidMove(format!(
                    "Cannot capture own piece at {}",
                    mv.to
                )));
            }
        }

        let is_capture = self.get_piece(mv.to).is_some();
        let is_pawn_move = source_piece.piece_type == PieceType::Pawn;
        let is_castling = self.detect_castling_move(&mv, &source_piece)?;
        let is_en_passant = self.detect_en_passant_move(&mv, &source_piece)?;

        let promotion_rank = match self.active_color {
            Color::White => 7,
            Color::Black => 0,
        };
        match (mv.is_promotion(), is_pawn_move) {
            (true, false) => {
                return Err(ChessError::InvalidMove(
                    "Only pawns can be promoted".to_string(),
                ))
            }
            (true, true) if mv.to.rank != promotion_rank => {
                return Err(ChessError::InvalidMove(format!(
                    "Pawn promotion only allowed when reaching rank {}",
                    promotion_rank + 1
                )))
            }
            (false, true) if mv.to.rank == promotion_rank => {
                return Err(ChessError::InvalidMove(
                    "Pawn promotion required when reaching the last rank".to_string(),
                ))
            }
            _ => {}
        }

        self.update_castling_rights(&mv, &source_piece);
        self.en_passant_target = None;

        if is_castling {
            self.apply_castling_move(&mv, source_piece)?;
        } else if is_en_passant {
            self.apply_en_passant_move(&mv, source_piece)?;
        } else {
            let final_piece = match mv.promotion {
                Some(promotion_type) => Piece::new(promotion_type, source_piece.color),
                None => source_piece,
            };
            self.set_piece(mv.from, None)?;
            self.set_piece(mv.to, Some(final_piece))?;
        }

        if is_pawn_move && mv.from.rank.abs_diff(mv.to.rank) == 2 {
            let jumped_rank = (mv.from.rank + mv.to.rank) / 2;
            self.en_passant_target = Some(Square::new_unchecked(mv.to.file, jumped_rank));
        }

        if is_pawn_move || is_capture || is_en_passant {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if self.active_color == Color::Black {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }

        self.active_color = self.active_color.opposite();

        Ok(())
    }

    /// A king moving two squares along its home rank
    fn detect_castling_move(&self, mv: &Move, piece: &Piece) -> Result<bool, ChessError> {
        if piece.piece_type != PieceType::King
            || mv.from.rank != mv.to.rank
            || mv.from.file.abs_diff(mv.to.file) != 2
        {
            return Ok(false);
        }

        let home_rank = match self.active_color {
            Color::White => 0,
            Color::Black => 7,
        };
        if mv.from.rank != home_rank || mv.from.file != 4 {
            return Err(ChessError::InvalidMove(format!(
                "Castling king must start from e{}",
                home_rank + 1
            )));
        }

        Ok(true)
    }

    /// A pawn moving diagonally onto the empty en passant target square
    fn detect_en_passant_move(&self, mv: &Move, piece: &Piece) -> Result<bool, ChessError> {
        if piece.piece_type != PieceType::Pawn {
            return Ok(false);
        }
        let Some(target) = self.en_passant_target else {
            return Ok(false);
        };

        if mv.to == target
            && mv.from.file != mv.to.file
            && mv.from.rank.abs_diff(mv.to.rank) == 1
            && self.get_piece(mv.to).is_none()
        {
            let expected_direction = match self.active_color {
                Color::White => 1,
                Color::Black => -1,
            };
            if (mv.to.rank as i8) - (mv.from.rank as i8) != expected_direction {
                return Err(ChessError::InvalidMove(
                    "Pawn moving in wrong direction".to_string(),
                ));
            }
            return Ok(true);
        }

        Ok(false)
    }

    fn apply_castling_move(&mut self, mv: &Move, king: Piece) -> Result<(), ChessError> {
        let (rook_from_file, rook_to_file) = match mv.to.file {
            6 => (7, 5),
            2 => (0, 3),
            _ => {
                return Err(ChessError::InvalidMove(
                    "Invalid castling destination".to_string(),
                ))
            }
        };
        let rook_from = Square::new_unchecked(rook_from_file, mv.from.rank);
        let rook_to = Square::new_unchecked(rook_to_file, mv.from.rank);

        let rook = self
            .get_piece(rook_from)
            .filter(|p| p.piece_type == PieceType::Rook && p.color == self.active_color)
            .ok_or_else(|| {
                ChessError::InvalidMove(format!("No rook found at {rook_from} for castling"))
            })?;

        self.set_piece(mv.from, None)?;
        self.set_piece(mv.to, Some(king))?;
        self.set_piece(rook_from, None)?;
        self.set_piece(rook_to, Some(rook))?;

        Ok(())
    }

    fn apply_en_passant_move(&mut self, mv: &Move, pawn: Piece) -> Result<(), ChessError> {
        // The captured pawn sits beside the origin square, on the destination file
        let captured_square = Square::new_unchecked(mv.to.file, mv.from.rank);
        match self.get_piece(captured_square) {
            Some(p) if p.piece_type == PieceType::Pawn && p.color != self.active_color => {}
            _ => {
                return Err(ChessError::InvalidMove(
                    "No pawn to capture for en passant".to_string(),
                ))
            }
        }

        self.set_piece(mv.from, None)?;
        self.set_piece(mv.to, Some(pawn))?;
        self.set_piece(captured_square, None)?;

        Ok(())
    }

    fn update_castling_rights(&mut self, mv: &Move, piece: &Piece) {
        match piece.piece_type {
            PieceType::King => self.castling_rights.remove_all_for_color(piece.color),
            PieceType::Rook => self.castling_rights.remove_rook_rights(mv.from),
            _ => {}
        }

        if let Some(captured) = self.get_piece(mv.to) {
            if captured.piece_type == PieceType::Rook {
                self.castling_rights.remove_rook_rights(mv.to);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the FEN piece placement field into `squares[rank][file]`
fn parse_placement(placement: &str) -> Result<[[Option<Piece>; 8]; 8], ChessError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(ChessError::InvalidFen(format!(
            "Piece placement must have exactly 8 ranks separated by '/', found {}",
            ranks.len()
        )));
    }

    let mut squares = [[None; 8]; 8];
    for (rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - rank_idx;
        let fen_rank_number = 8 - rank_idx;
        let mut file = 0usize;

        for c in rank_str.chars() {
            if let Some(empty) = c.to_digit(10) {
                if !(1..=8).contains(&empty) {
                    return Err(ChessError::InvalidFen(format!(
                        "Invalid empty square count '{c}' in rank {fen_rank_number} (must be 1-8)"
                    )));
                }
                file += empty as usize;
            } else {
                let piece = Piece::from_fen_char(c).map_err(|_| {
                    ChessError::InvalidFen(format!(
                        "Invalid piece character '{c}' in rank {fen_rank_number} (valid pieces: KQRBNPkqrbnp)"
                    ))
                })?;
                if file < 8 {
                    squares[board_rank][file] = Some(piece);
                }
                file += 1;
            }

            if file > 8 {
                return Err(ChessError::InvalidFen(format!(
                    "Rank {fen_rank_number} has more than 8 squares"
                )));
            }
        }

        if file != 8 {
            return Err(ChessError::InvalidFen(format!(
                "Rank {fen_rank_number} must represent exactly 8 squares, found {file}"
            )));
        }
    }

    Ok(squares)
}

pub(crate) fn parse_active_color(field: &str) -> Result<Color, ChessError> {
    match field {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(ChessError::InvalidFen(format!(
            "Invalid active color '{field}' (must be 'w' for White or 'b' for Black)"
        ))),
    }
}
