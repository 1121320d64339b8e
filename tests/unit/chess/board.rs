use ucimate::chess::{Board, Color, Move, Piece, PieceType, Square};

fn mv(s: &str) -> Move {
    s.parse().expect("valid move")
}

fn sq(s: &str) -> Square {
    s.parse().expect("valid square")
}

#[cfg(test)]
mod board_creation_tests {
    use super::*;

    #[test]
    fn test_board_new_starting_position() {
        let board = Board::new();

        assert_eq!(
            board.get_piece(sq("e1")),
            Some(Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            board.get_piece(sq("d8")),
            Some(Piece::new(PieceType::Queen, Color::Black))
        );
        for file in 0..8 {
            assert_eq!(
                board.get_piece(Square::new_unchecked(file, 1)),
                Some(Piece::new(PieceType::Pawn, Color::White))
            );
            assert_eq!(
                board.get_piece(Square::new_unchecked(file, 6)),
                Some(Piece::new(PieceType::Pawn, Color::Black))
            );
            for rank in 2..6 {
                assert_eq!(board.get_piece(Square::new_unchecked(file, rank)), None);
            }
        }

        assert_eq!(board.active_color(), Color::White);
        assert_eq!(board.fullmove_number(), 1);
        assert_eq!(board.halfmove_clock(), 0);
    }
}

#[cfg(test)]
mod move_application_tests {
    use super::*;

    #[test]
    fn test_pawn_double_step_sets_en_passant_target() {
        let mut board = Board::new();
        board.apply_move(mv("e2e4")).unwrap();

        assert_eq!(board.get_piece(sq("e2")), None);
        assert_eq!(
            board.get_piece(sq("e4")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
        assert_eq!(board.en_passant_target(), Some(sq("e3")));
        assert_eq!(board.active_color(), Color::Black);
        assert_eq!(board.fullmove_number(), 1);
    }

    #[test]
    fn test_fullmove_number_increments_after_black() {
        let mut board = Board::new();
        board.apply_move(mv("g1f3")).unwrap();
        board.apply_move(mv("g8f6")).unwrap();

        assert_eq!(board.fullmove_number(), 2);
        assert_eq!(board.halfmove_clock(), 2);
        assert_eq!(board.active_color(), Color::White);
    }

    #[test]
    fn test_wrong_side_cannot_move() {
        let mut board = Board::new();
        assert!(board.apply_move(mv("e7e5")).is_err());
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_cannot_capture_own_piece() {
        let mut board = Board::new();
        assert!(board.apply_move(mv("d1d2")).is_err());
    }

    #[test]
    fn test_empty_source_square_rejected() {
        let mut board = Board::new();
        assert!(board.apply_move(mv("e3e4")).is_err());
    }

    #[test]
    fn test_kingside_castling_moves_rook() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        board.apply_move(mv("e1g1")).unwrap();

        assert_eq!(
            board.get_piece(sq("g1")),
            Some(Piece::new(PieceType::King, Color::White))
        );
        assert_eq!(
            board.get_piece(sq("f1")),
            Some(Piece::new(PieceType::Rook, Color::White))
        );
        assert_eq!(board.get_piece(sq("h1")), None);
        assert_eq!(board.castling_rights().to_fen(), "-");
    }

    #[test]
    fn test_failed_castling_leaves_board_untouched() {
        // No rook on h1: the king move must not be half-applied
        let before = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mut board = before.clone();

        assert!(board.apply_move(mv("e1g1")).is_err());
        assert_eq!(board, before);
    }

    #[test]
    fn test_en_passant_capture_removes_pawn() {
        let mut board =
            Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        board.apply_move(mv("e5d6")).unwrap();

        assert_eq!(board.get_piece(sq("d5")), None);
        assert_eq!(
            board.get_piece(sq("d6")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
    }

    #[test]
    fn test_promotion_requires_piece() {
        let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();

        assert!(board.apply_move(mv("a7a8")).is_err());
        board.apply_move(mv("a7a8q")).unwrap();
        assert_eq!(
            board.get_piece(sq("a8")),
            Some(Piece::new(PieceType::Queen, Color::White))
        );
    }

    #[test]
    fn test_promotion_suffix_only_for_pawns_reaching_last_rank() {
        let mut board = Board::new();

        let err = board.apply_move(mv("e2e4q")).unwrap_err();
        assert!(err.to_string().contains("only allowed when reaching rank 8"));
        let err = board.apply_move(mv("g1f3q")).unwrap_err();
        assert!(err.to_string().contains("Only pawns can be promoted"));
        assert_eq!(board, Board::new());
    }
}
