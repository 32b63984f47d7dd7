//! Game state machine wrapping `Board`.
//!
//! `GameState` tracks the side to move, captured pieces and game status. It is
//! the value a presentation layer owns and mutates through `apply_move`; every
//! rejection leaves it untouched.

use tracing::{debug, error, info};

use crate::engine::attacks;
use crate::engine::board::Board;
use crate::engine::movegen;
use crate::engine::types::{ChessError, Color, GameStatus, Move, PieceType, Square};

// =========================================================================
// GameState
// =========================================================================

/// A game in progress (or finished): board, turn, captures and status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    side_to_move: Color,
    game_over: bool,
    status: GameStatus,
    /// Captured piece kinds, indexed by the colour of the piece that was taken.
    captured: [Vec<PieceType>; 2],
}

impl GameState {
    // -----------------------------------------------------------------
    // Constructors
    // -----------------------------------------------------------------

    /// Standard starting position, White to move.
    pub fn new() -> Self {
        Self {
            board: Board::starting(),
            side_to_move: Color::White,
            game_over: false,
            status: GameStatus::InProgress,
            captured: [Vec::new(), Vec::new()],
        }
    }

    /// Start from an arbitrary board. The position is evaluated immediately,
    /// so a board that is already mate or stalemate yields a finished game.
    pub fn from_board(board: Board, side_to_move: Color) -> Self {
        let mut state = Self {
            board,
            side_to_move,
            game_over: false,
            status: GameStatus::InProgress,
            captured: [Vec::new(), Vec::new()],
        };
        state.refresh_status();
        state
    }

    /// Back to the starting position. Captures are cleared.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Status as of the last applied move (or construction).
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Kinds of `color`'s pieces that have been captured, in capture order.
    pub fn captured(&self, color: Color) -> &[PieceType] {
        &self.captured[color.index()]
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        attacks::is_in_check(&self.board, color)
    }

    /// Legal destinations for the piece on `from`.
    ///
    /// Empty when the square is empty, holds a piece of the side not to move,
    /// or the game is over.
    pub fn legal_moves(&self, from: Square) -> Vec<Square> {
        if self.game_over {
            return Vec::new();
        }
        match self.board.piece_at(from) {
            Some(p) if p.color == self.side_to_move => movegen::legal_moves(&self.board, from),
            _ => Vec::new(),
        }
    }

    /// `legal_moves` for raw coordinates coming from a presentation layer.
    pub fn legal_moves_at(&self, row: usize, col: usize) -> Result<Vec<Square>, ChessError> {
        Ok(self.legal_moves(Square::new(row, col)?))
    }

    /// Every legal move for the side to move, in board-scan order.
    pub fn all_legal_moves(&self) -> Vec<Move> {
        if self.game_over {
            return Vec::new();
        }
        movegen::all_legal_moves(&self.board, self.side_to_move)
    }

    // -----------------------------------------------------------------
    // Apply move
    // -----------------------------------------------------------------

    /// Play a move for the side to move and report the resulting status.
    ///
    /// Returns `MoveAfterGameOver` once the game has finished and `IllegalMove`
    /// if `mv.to` is not among the legal destinations of `mv.from`.
    pub fn apply_move(&mut self, mv: Move) -> Result<GameStatus, ChessError> {
        if self.game_over {
            return Err(ChessError::MoveAfterGameOver);
        }
        if !self.legal_moves(mv.from).contains(&mv.to) {
            return Err(ChessError::IllegalMove {
                from: mv.from,
                to: mv.to,
            });
        }

        let mover = self.side_to_move;
        let captured = self.board.make_move(mv);
        self.side_to_move = !mover;
        debug!(side = %mover, %mv, captured = ?captured.map(|p| p.kind), "move applied");

        if let Some(piece) = captured {
            self.captured[piece.color.index()].push(piece.kind);

            // Legality filtering makes this unreachable; reaching it means a
            // king was left en prise by a bug elsewhere.
            if piece.kind == PieceType::King {
                error!(side = %mover, %mv, "king captured, ending game");
                self.game_over = true;
                self.status = GameStatus::Checkmate { winner: mover };
                return Ok(self.status);
            }
        }

        self.evaluate()
    }

    // -----------------------------------------------------------------
    // Status detection
    // -----------------------------------------------------------------

    /// Re-derive check / mate / stalemate for the side to move.
    pub fn evaluate(&mut self) -> Result<GameStatus, ChessError> {
        if self.game_over {
            return Err(ChessError::MoveAfterGameOver);
        }
        Ok(self.refresh_status())
    }

    fn refresh_status(&mut self) -> GameStatus {
        let side = self.side_to_move;
        let in_check = attacks::is_in_check(&self.board, side);
        let has_moves = movegen::has_legal_move(&self.board, side);

        let status = match (has_moves, in_check) {
            (false, true) => GameStatus::Checkmate { winner: !side },
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check { side },
            (true, false) => GameStatus::InProgress,
        };

        if status.is_game_over() {
            self.game_over = true;
            info!(%status, "game over");
        }
        self.status = status;
        status
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

// =========================================================================
// Tests
// =========================================================================
