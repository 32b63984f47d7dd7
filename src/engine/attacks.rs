//! Movement offsets and square-attack detection.
//!
//! Attack queries are answered directly per piece type instead of generating
//! move lists: leapers via their fixed offsets, sliders by scanning rays from
//! the target square until the first occupant, pawns via their capture
//! diagonals.

use crate::engine::board::Board;
use crate::engine::types::{Color, PieceType, Square};

// =========================================================================
// Offset tables
// =========================================================================

/// Knight jumps as (row delta, col delta).
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Orthogonal ray directions (rook, queen).
pub const ROOK_DIRS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Diagonal ray directions (bishop, queen).
pub const BISHOP_DIRS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// The eight neighbouring squares (king).
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

// =========================================================================
// Public API
// =========================================================================

/// Is `sq` attacked by any piece of colour `by`?
pub fn is_attacked(board: &Board, sq: Square, by: Color) -> bool {
    // Pawns: a pawn of `by` attacks `sq` from one row behind it (from the
    // pawn's point of view) on either adjacent column.
    let back = -by.pawn_direction();
    for dc in [-1, 1] {
        if holds(board, sq.offset(back, dc), by, &[PieceType::Pawn]) {
            return true;
        }
    }

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(board, sq.offset(dr, dc), by, &[PieceType::Knight]))
    {
        return true;
    }

    if slider_attacks(board, sq, by, &ROOK_DIRS, &[PieceType::Rook, PieceType::Queen]) {
        return true;
    }

    if slider_attacks(
        board,
        sq,
        by,
        &BISHOP_DIRS,
        &[PieceType::Bishop, PieceType::Queen],
    ) {
        return true;
    }

    KING_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(board, sq.offset(dr, dc), by, &[PieceType::King]))
}

/// Is the king of `color` attacked? A board without that king is never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    board
        .king_square(color)
        .is_some_and(|king| is_attacked(board, king, !color))
}

// =========================================================================
// Internals
// =========================================================================

/// Does `sq` exist and hold a piece of `color` whose kind is one of `kinds`?
#[inline]
fn holds(board: &Board, sq: Option<Square>, color: Color, kinds: &[PieceType]) -> bool {
    sq.and_then(|s| board.piece_at(s))
        .is_some_and(|p| p.color == color && kinds.contains(&p.kind))
}

/// Scan each ray from `sq`; the first occupant decides that ray.
fn slider_attacks(
    board: &Board,
    sq: Square,
    by: Color,
    dirs: &[(i8, i8)],
    kinds: &[PieceType],
) -> bool {
    for &(dr, dc) in dirs {
        let mut cur = sq.offset(dr, dc);
        while let Some(s) = cur {
            if let Some(piece) = board.piece_at(s) {
                if piece.color == by && kinds.contains(&piece.kind) {
                    return true;
                }
                break;
            }
            cur = s.offset(dr, dc);
        }
    }
    false
}

// =========================================================================
// Tests
// =========================================================================
