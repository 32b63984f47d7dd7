//! 8×8 mailbox board representation.
//!
//! `Board` is plain data: 64 optional pieces indexed by `(row, col)`, row 0 at
//! Black's side. It is `Copy`, so a clone used for move simulation never
//! aliases the real game.

use crate::engine::types::{ChessError, Color, Move, Piece, PieceType, Square};

/// Piece placement of the standard starting position, row 0 first.
pub const STARTING_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

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

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A chess board: an 8×8 grid of optional pieces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Board {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard starting position.
    pub fn starting() -> Self {
        let mut board = Board::empty();
        for col in 0..8 {
            board.cells[0][col] = Some(Piece::new(BACK_RANK[col], Color::Black));
            board.cells[1][col] = Some(Piece::new(PieceType::Pawn, Color::Black));
            board.cells[6][col] = Some(Piece::new(PieceType::Pawn, Color::White));
            board.cells[7][col] = Some(Piece::new(BACK_RANK[col], Color::White));
        }
        board
    }

    // -----------------------------------------------------------------------
    // Piece access
    // -----------------------------------------------------------------------

    /// What piece (if any) is on a given square?
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    /// Place a piece on a square, replacing whatever was there.
    #[inline]
    pub fn put_piece(&mut self, sq: Square, piece: Piece) {
        self.cells[sq.row() as usize][sq.col() as usize] = Some(piece);
    }

    /// Clear a square, returning its previous occupant.
    #[inline]
    pub fn remove_piece(&mut self, sq: Square) -> Option<Piece> {
        self.cells[sq.row() as usize][sq.col() as usize].take()
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// All occupied squares of one colour, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(p) if p.color == color => Some((sq, p)),
            _ => None,
        })
    }

    /// Number of pieces of a given colour and kind.
    pub fn count(&self, color: Color, kind: PieceType) -> usize {
        self.pieces(color).filter(|(_, p)| p.kind == kind).count()
    }

    /// Find the king of `color`. `None` only on hand-built boards without one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, p)| p.kind == PieceType::King)
            .map(|(sq, _)| sq)
    }

    // -----------------------------------------------------------------------
    // Make move
    // -----------------------------------------------------------------------

    /// Move a piece, returning the captured occupant of the destination.
    ///
    /// A pawn landing on its promotion row becomes a queen of the same colour.
    /// Legality is the caller's concern; an empty origin leaves the board as-is.
    pub fn make_move(&mut self, mv: Move) -> Option<Piece> {
        let piece = self.remove_piece(mv.from)?;
        let captured = self.remove_piece(mv.to);

        let landing = if piece.kind == PieceType::Pawn && mv.to.row() == piece.color.promotion_row()
        {
            Piece::new(PieceType::Queen, piece.color)
        } else {
            piece
        };
        self.put_piece(mv.to, landing);

        captured
    }
}

// ---------------------------------------------------------------------------
// Placement text parsing & generation
// ---------------------------------------------------------------------------

impl Board {
    /// Parse a FEN-style piece placement (e.g. `"4k3/8/8/8/8/8/8/4K3"`).
    ///
    /// The first rank listed is row 0. Only the placement field is accepted;
    /// the board carries no side-to-move or other state. Kings are not
    /// validated here so hand-built test boards stay possible.
    pub fn from_placement(placement: &str) -> Result<Self, ChessError> {
        let rows: Vec<&str> = placement.trim().split('/').collect();
        if rows.len() != 8 {
            return Err(ChessError::InvalidPlacement(format!(
                "expected 8 rows, got {}",
                rows.len()
            )));
        }

        let mut board = Board::empty();
        for (row, row_str) in rows.iter().enumerate() {
            let mut col = 0usize;
            for ch in row_str.chars() {
                if col > 7 {
                    return Err(ChessError::InvalidPlacement(format!(
                        "too many squares in row {row}"
                    )));
                }
                if let Some(digit) = ch.to_digit(10) {
                    if !(1..=8).contains(&digit) {
                        return Err(ChessError::InvalidPlacement(format!(
                            "invalid empty count '{ch}' in row {row}"
                        )));
                    }
                    col += digit as usize;
                } else if let Some((color, kind)) = PieceType::from_char(ch) {
                    board.put_piece(Square::new(row, col)?, Piece::new(kind, color));
                    col += 1;
                } else {
                    return Err(ChessError::InvalidPlacement(format!(
                        "invalid character '{ch}'"
                    )));
                }
            }
            if col != 8 {
                return Err(ChessError::InvalidPlacement(format!(
                    "row {row} has {col} squares instead of 8"
                )));
            }
        }

        Ok(board)
    }

    /// Export the piece placement, row 0 first.
    pub fn to_placement(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            let mut empty_count = 0u8;
            for cell in cells {
                match cell {
                    Some(piece) => {
                        if empty_count > 0 {
                            out.push((b'0' + empty_count) as char);
                            empty_count = 0;
                        }
                        out.push(piece.to_char());
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                out.push((b'0' + empty_count) as char);
            }
            if row < 7 {
                out.push('/');
            }
        }
        out
    }

    /// Render the board as text, row 0 at the top.
    pub fn board_string(&self) -> String {
        let mut s = String::with_capacity(200);
        for (row, cells) in self.cells.iter().enumerate() {
            s.push((b'0' + row as u8) as char);
            s.push(' ');
            for (col, cell) in cells.iter().enumerate() {
                s.push(cell.map_or('.', Piece::to_char));
                if col < 7 {
                    s.push(' ');
                }
            }
            s.push('\n');
        }
        s.push_str("  0 1 2 3 4 5 6 7");
        s
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.board_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: usize, col: usize) -> Square {
        Square::new(row, col).unwrap()
    }

    // ===================================================================
    // Starting position
    // ===================================================================

    #[test]
    fn starting_position_placement() {
        assert_eq!(Board::starting().to_placement(), STARTING_PLACEMENT);
    }

    #[test]
    fn starting_matches_parsed_placement() {
        assert_eq!(
            Board::from_placement(STARTING_PLACEMENT).unwrap(),
            Board::starting()
        );
    }

    #[test]
    fn starting_piece_counts() {
        let board = Board::starting();
        for color in [Color::White, Color::Black] {
            assert_eq!(board.pieces(color).count(), 16);
            assert_eq!(board.count(color, PieceType::Pawn), 8);
            assert_eq!(board.count(color, PieceType::Knight), 2);
            assert_eq!(board.count(color, PieceType::Bishop), 2);
            assert_eq!(board.count(color, PieceType::Rook), 2);
            assert_eq!(board.count(color, PieceType::Queen), 1);
            assert_eq!(board.count(color, PieceType::King), 1);
        }
    }

    #[test]
    fn starting_home_ranks() {
        let board = Board::starting();
        assert_eq!(
            board.piece_at(sq(0, 4)),
            Some(Piece::new(PieceType::King, Color::Black))
        );
        assert_eq!(
            board.piece_at(sq(7, 3)),
            Some(Piece::new(PieceType::Queen, Color::White))
        );
        for col in 0..8 {
            assert_eq!(
                board.piece_at(sq(1, col)),
                Some(Piece::new(PieceType::Pawn, Color::Black))
            );
            assert_eq!(
                board.piece_at(sq(6, col)),
                Some(Piece::new(PieceType::Pawn, Color::White))
            );
        }
    }

    #[test]
    fn starting_middle_is_empty() {
        let board = Board::starting();
        for row in 2..6 {
            for col in 0..8 {
                assert!(board.is_empty(sq(row, col)), "expected empty ({row}, {col})");
            }
        }
    }

    #[test]
    fn king_square_starting() {
        let board = Board::starting();
        assert_eq!(board.king_square(Color::White), Some(sq(7, 4)));
        assert_eq!(board.king_square(Color::Black), Some(sq(0, 4)));
        assert_eq!(Board::empty().king_square(Color::White), None);
    }

    // ===================================================================
    // Cloning and mutation
    // ===================================================================

    #[test]
    fn clone_is_independent() {
        let original = Board::starting();
        let mut copy = original;
        copy.remove_piece(sq(6, 4));
        assert!(copy.is_empty(sq(6, 4)));
        assert!(!original.is_empty(sq(6, 4)));
    }

    #[test]
    fn put_and_remove_piece() {
        let mut board = Board::empty();
        let knight = Piece::new(PieceType::Knight, Color::White);
        board.put_piece(sq(4, 4), knight);
        assert_eq!(board.piece_at(sq(4, 4)), Some(knight));
        assert_eq!(board.remove_piece(sq(4, 4)), Some(knight));
        assert_eq!(board.piece_at(sq(4, 4)), None);
        assert_eq!(board.remove_piece(sq(4, 4)), None);
    }

    #[test]
    fn make_move_returns_capture() {
        let mut board = Board::from_placement("4k3/8/3p4/8/4N3/8/8/4K3").unwrap();
        let captured = board.make_move(Move::new(sq(4, 4), sq(2, 3)));
        assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        assert_eq!(
            board.piece_at(sq(2, 3)),
            Some(Piece::new(PieceType::Knight, Color::White))
        );
        assert!(board.is_empty(sq(4, 4)));
    }

    #[test]
    fn make_move_promotes_white_pawn() {
        let mut board = Board::from_placement("7k/4P3/8/8/8/8/8/4K3").unwrap();
        board.make_move(Move::new(sq(1, 4), sq(0, 4)));
        assert_eq!(
            board.piece_at(sq(0, 4)),
            Some(Piece::new(PieceType::Queen, Color::White))
        );
    }

    #[test]
    fn make_move_promotes_black_pawn_on_capture() {
        let mut board = Board::from_placement("4k3/8/8/8/8/8/3p4/2R1K3").unwrap();
        let captured = board.make_move(Move::new(sq(6, 3), sq(7, 2)));
        assert_eq!(captured, Some(Piece::new(PieceType::Rook, Color::White)));
        assert_eq!(
            board.piece_at(sq(7, 2)),
            Some(Piece::new(PieceType::Queen, Color::Black))
        );
    }

    #[test]
    fn make_move_from_empty_square_is_noop() {
        let mut board = Board::starting();
        assert_eq!(board.make_move(Move::new(sq(4, 4), sq(3, 4))), None);
        assert_eq!(board, Board::starting());
    }

    // ===================================================================
    // Placement parsing
    // ===================================================================

    #[test]
    fn placement_round_trip_endgame() {
        let text = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8";
        assert_eq!(Board::from_placement(text).unwrap().to_placement(), text);
    }

    #[test]
    fn placement_errors() {
        assert!(Board::from_placement("8/8/8").is_err());
        assert!(Board::from_placement("rnbqkbnrr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(Board::from_placement("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").is_err());
        assert!(Board::from_placement("7/8/8/8/8/8/8/8").is_err());
        assert!(Board::from_placement("9/8/8/8/8/8/8/8").is_err());
    }

    // ===================================================================
    // Display
    // ===================================================================

    #[test]
    fn board_string_starting() {
        let s = Board::starting().board_string();
        assert!(s.starts_with("0 r n b q k b n r"));
        assert!(s.contains("7 R N B Q K B N R"));
        assert!(s.ends_with("0 1 2 3 4 5 6 7"));
    }
}
