use crate::chess::{Board, ChessError, Piece, Square};
use crate::session::SessionCommand;
use std::fmt::Write as _;

/// How pieces are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardStyle {
    /// Unicode chess glyphs (♔ ♟ ...)
    #[default]
    Unicode,
    /// FEN letters, for terminals without Unicode support
    Ascii,
}

impl BoardStyle {
    fn symbol(&self, piece: Option<Piece>) -> char {
        match (self, piece) {
            (BoardStyle::Unicode, Some(piece)) => piece.glyph(),
            (BoardStyle::Ascii, Some(piece)) => piece.to_fen_char(),
            (BoardStyle::Unicode, None) => '·',
            (BoardStyle::Ascii, None) => '.',
        }
    }
}

const FILE_HEADER: &str = "    a   b   c   d   e   f   g   h";
const TOP_BORDER: &str = "  ┌───┬───┬───┬───┬───┬───┬───┬───┐";
const RANK_SEPARATOR: &str = "  ├───┼───┼───┼───┼───┼───┼───┼───┤";
const BOTTOM_BORDER: &str = "  └───┴───┴───┴───┴───┴───┴───┴───┘";

/// Render a FEN position as a grid seen from White's side: rank 8 on top,
/// file letters above and below, rank numbers on both sides.
pub fn render_board(fen: &str, style: BoardStyle) -> Result<String, ChessError> {
    let board = Board::from_fen(fen)?;
    let mut out = String::new();

    out.push_str(FILE_HEADER);
    out.push('\n');
    out.push_str(TOP_BORDER);
    out.push('\n');

    for rank in (0..8u8).rev() {
        let rank_number = rank + 1;
        let _ = write!(out, "{} │", rank_number);
        for file in 0..8u8 {
            let piece = board.get_piece(Square::new_unchecked(file, rank));
            let _ = write!(out, " {} │", style.symbol(piece));
        }
        let _ = writeln!(out, " {}", rank_number);

        if rank > 0 {
            out.push_str(RANK_SEPARATOR);
            out.push('\n');
        }
    }

    out.push_str(BOTTOM_BORDER);
    out.push('\n');
    out.push_str(FILE_HEADER);

    Ok(out)
}

pub fn welcome_text() -> String {
    format!(
        "ucimate {} - chess against a UCI engine\nType 'help' for the list of commands.\n",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn help_text() -> String {
    let mut text = String::from("Commands:\n");
    for command in SessionCommand::ALL {
        let _ = writeln!(text, "  {:<9} {}", command.token(), command.description());
    }
    text.push_str("Moves are entered in coordinate notation: e2e4, g1f3, e1g1 (castling), e7e8q (promotion).\n");
    text
}
