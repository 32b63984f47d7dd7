//! Perft (PERFormance Test): exhaustive move-generation correctness suite.
//!
//! Each test verifies that the number of leaf nodes at a given depth matches
//! known-correct values for standard positions. Depths are kept shallow enough
//! that no castling, en passant or under-promotion can occur, since the engine
//! implements none of them.
//!
//! Reference: <https://www.chessprogramming.org/Perft_Results>

use duel_chess::engine::board::Board;
use duel_chess::engine::movegen::{all_legal_moves, simulate_move};
use duel_chess::engine::types::Color;

/// Recursive perft: count leaf nodes at `depth`.
fn perft(board: &Board, side: Color, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = all_legal_moves(board, side);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        let child = simulate_move(board, mv);
        nodes += perft(&child, !side, depth - 1);
    }
    nodes
}

// =====================================================================
// Position 1: Starting position
// =====================================================================

#[test]
fn perft_start_depth_1() {
    assert_eq!(perft(&Board::starting(), Color::White, 1), 20);
}

#[test]
fn perft_start_depth_2() {
    assert_eq!(perft(&Board::starting(), Color::White, 2), 400);
}

#[test]
fn perft_start_depth_3() {
    assert_eq!(perft(&Board::starting(), Color::White, 3), 8_902);
}

#[test]
fn perft_start_depth_4() {
    assert_eq!(perft(&Board::starting(), Color::White, 4), 197_281);
}

#[test]
fn perft_start_black_mirrors_white() {
    assert_eq!(perft(&Board::starting(), Color::Black, 1), 20);
    assert_eq!(perft(&Board::starting(), Color::Black, 2), 400);
}

// =====================================================================
// Position 3: rook and pawn endgame with pins along the 5th row
// =====================================================================

fn position_3() -> Board {
    Board::from_placement("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8").unwrap()
}

#[test]
fn perft_pos3_depth_1() {
    assert_eq!(perft(&position_3(), Color::White, 1), 14);
}

#[test]
fn perft_pos3_depth_2() {
    assert_eq!(perft(&position_3(), Color::White, 2), 191);
}

// =====================================================================
// Position 4: white in check, only six evasions
// =====================================================================

#[test]
fn perft_pos4_depth_1() {
    let board =
        Board::from_placement("r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1").unwrap();
    assert_eq!(perft(&board, Color::White, 1), 6);
}
