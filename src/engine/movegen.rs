//! Move generation.
//!
//! Pipeline:
//!   1. Generate pseudo-legal destinations for one piece (movement pattern and
//!      occupancy only).
//!   2. Filter: apply the move on a copy of the board and drop it if the
//!      mover's king is attacked afterwards.
//!
//! The copy is made with the same `Board::make_move` the game uses, so a pawn
//! that promotes is checked as the queen it becomes.

use crate::engine::attacks::{BISHOP_DIRS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRS, is_in_check};
use crate::engine::board::Board;
use crate::engine::types::{Color, Move, Piece, PieceType, Square};

// =========================================================================
// Public API
// =========================================================================

/// Pseudo-legal destinations for the piece on `from`. Empty square → none.
pub fn pseudo_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let us = piece.color;
    let mut moves = Vec::with_capacity(28);
    match piece.kind {
        PieceType::Pawn => generate_pawn_moves(board, from, us, &mut moves),
        PieceType::Knight => generate_step_moves(board, from, us, &KNIGHT_OFFSETS, &mut moves),
        PieceType::Bishop => generate_slider_moves(board, from, us, &BISHOP_DIRS, &mut moves),
        PieceType::Rook => generate_slider_moves(board, from, us, &ROOK_DIRS, &mut moves),
        PieceType::Queen => {
            generate_slider_moves(board, from, us, &ROOK_DIRS, &mut moves);
            generate_slider_moves(board, from, us, &BISHOP_DIRS, &mut moves);
        }
        PieceType::King => generate_step_moves(board, from, us, &KING_OFFSETS, &mut moves),
    }
    moves
}

/// The board after `mv`, leaving `board` untouched.
pub fn simulate_move(board: &Board, mv: Move) -> Board {
    let mut copy = *board;
    copy.make_move(mv);
    copy
}

/// Legal destinations for the piece on `from`.
pub fn legal_moves(board: &Board, from: Square) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    pseudo_moves(board, from)
        .into_iter()
        .filter(|&to| !is_in_check(&simulate_move(board, Move::new(from, to)), piece.color))
        .collect()
}

/// Every legal move of `side`, origins row-major, destinations in generator order.
pub fn all_legal_moves(board: &Board, side: Color) -> Vec<Move> {
    board
        .pieces(side)
        .flat_map(|(from, _)| {
            legal_moves(board, from)
                .into_iter()
                .map(move |to| Move::new(from, to))
        })
        .collect()
}

/// Does `side` have at least one legal move? Stops at the first one found.
pub fn has_legal_move(board: &Board, side: Color) -> bool {
    board
        .pieces(side)
        .any(|(from, _)| !legal_moves(board, from).is_empty())
}

// =========================================================================
// Pawn moves
// =========================================================================

fn generate_pawn_moves(board: &Board, from: Square, us: Color, moves: &mut Vec<Square>) {
    let dir = us.pawn_direction();

    // --- Single push ---
    if let Some(one) = from.offset(dir, 0)
        && board.is_empty(one)
    {
        moves.push(one);

        // --- Double push ---
        if from.row() == us.pawn_start_row()
            && let Some(two) = from.offset(2 * dir, 0)
            && board.is_empty(two)
        {
            moves.push(two);
        }
    }

    // --- Diagonal captures ---
    for dc in [-1, 1] {
        if let Some(to) = from.offset(dir, dc)
            && is_enemy(board.piece_at(to), us)
        {
            moves.push(to);
        }
    }
}

// =========================================================================
// Knight / king moves
// =========================================================================

fn generate_step_moves(
    board: &Board,
    from: Square,
    us: Color,
    offsets: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(dr, dc) in offsets {
        if let Some(to) = from.offset(dr, dc) {
            match board.piece_at(to) {
                Some(p) if p.color == us => {}
                _ => moves.push(to),
            }
        }
    }
}

// =========================================================================
// Slider moves (bishop, rook, queen)
// =========================================================================

fn generate_slider_moves(
    board: &Board,
    from: Square,
    us: Color,
    dirs: &[(i8, i8)],
    moves: &mut Vec<Square>,
) {
    for &(dr, dc) in dirs {
        let mut cur = from.offset(dr, dc);
        while let Some(to) = cur {
            match board.piece_at(to) {
                None => moves.push(to),
                Some(p) => {
                    if p.color != us {
                        moves.push(to);
                    }
                    break;
                }
            }
            cur = to.offset(dr, dc);
        }
    }
}

#[inline]
fn is_enemy(occupant: Option<Piece>, us: Color) -> bool {
    occupant.is_some_and(|p| p.color != us)
}

// =========================================================================
// Tests
// =========================================================================
