//! Move scoring for the hard tier.
//!
//! A move is scored, not a position. Components:
//!   1. Material captured (victim value × `CAPTURE_WEIGHT`)
//!   2. Landing on one of the four central squares
//!   3. Pawn advancement, `7 - to.row`
//!
//! The selector adds uniform noise in `[0, NOISE_RANGE)` on top so equal
//! moves are not always resolved the same way.

use crate::engine::board::Board;
use crate::engine::types::{Move, PieceType};

/// Multiplier applied to the captured piece's value.
pub const CAPTURE_WEIGHT: i32 = 10;

/// Bonus for a destination in rows 3–4, cols 3–4.
pub const CENTER_BONUS: i32 = 5;

/// Upper bound (exclusive) of the random term added per move.
pub const NOISE_RANGE: f64 = 2.0;

// =========================================================================
// Material values
// =========================================================================

const PIECE_VALUE: [i32; 6] = [
    1,   // Pawn
    3,   // Knight
    3,   // Bishop
    5,   // Rook
    9,   // Queen
    100, // King
];

/// Material value of a piece kind.
#[inline]
pub fn piece_value(kind: PieceType) -> i32 {
    PIECE_VALUE[kind.index()]
}

// =========================================================================
// Scoring
// =========================================================================

/// Deterministic part of a move's score on `board`.
pub fn heuristic_score(board: &Board, mv: Move) -> i32 {
    let mut score = 0;

    if let Some(victim) = board.piece_at(mv.to) {
        score += CAPTURE_WEIGHT * piece_value(victim.kind);
    }

    if mv.to.is_center() {
        score += CENTER_BONUS;
    }

    // Counts towards row 0 for either colour.
    if board
        .piece_at(mv.from)
        .is_some_and(|p| p.kind == PieceType::Pawn)
    {
        score += 7 - i32::from(mv.to.row());
    }

    score
}

/// Full score: heuristic plus a caller-supplied noise term.
#[inline]
pub fn score_move(board: &Board, mv: Move, noise: f64) -> f64 {
    f64::from(heuristic_score(board, mv)) + noise
}

// =========================================================================
// Tests
// =========================================================================
