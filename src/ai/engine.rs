//! Computer opponent: the `AiEngine` trait and the tiered move selector.
//!
//! Three tiers, all choosing among `GameState::all_legal_moves`:
//!   - Easy: uniform random move.
//!   - Medium: random capture if any exist, else uniform random.
//!   - Hard: highest `score_move`, first seen wins ties.
//!
//! Randomness comes from an injected `Rng` so games can be replayed from a seed.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::engine::board::Board;
use crate::engine::game::GameState;
use crate::engine::types::{ChessError, Difficulty, Move};

use super::evaluation::{NOISE_RANGE, score_move};

// =========================================================================
// AiEngine trait
// =========================================================================

/// The computer opponent interface.
pub trait AiEngine: Send {
    /// Pick a move for the side to move in `state`.
    fn best_move(&mut self, state: &GameState, difficulty: Difficulty) -> Result<Move, ChessError>;

    /// Human-readable name for this engine.
    fn name(&self) -> &str;
}

// =========================================================================
// TieredAi
// =========================================================================

/// Difficulty-tiered selector owning its random source.
pub struct TieredAi<R = StdRng> {
    rng: R,
}

impl TieredAi<StdRng> {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Reproducible selector.
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// `seeded` when a seed is configured, `new` otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl<R: Rng> TieredAi<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl Default for TieredAi<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng + Send> AiEngine for TieredAi<R> {
    fn best_move(&mut self, state: &GameState, difficulty: Difficulty) -> Result<Move, ChessError> {
        select_move(state, difficulty, &mut self.rng)
    }

    fn name(&self) -> &str {
        "TieredAi"
    }
}

// =========================================================================
// Selection
// =========================================================================

/// Choose a move for the side to move at `difficulty`.
///
/// Errors with `NoLegalMoveForSelector` when there is nothing to choose from;
/// callers only ask while the game is in progress, so that signals a bug.
pub fn select_move<R: Rng + ?Sized>(
    state: &GameState,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Move, ChessError> {
    let moves = state.all_legal_moves();
    let board = state.board();

    let chosen = match difficulty {
        Difficulty::Easy => pick_random(&moves, rng),
        Difficulty::Medium => pick_capture_first(board, &moves, rng),
        Difficulty::Hard => pick_best_scored(board, &moves, rng),
    };

    let mv = chosen.ok_or(ChessError::NoLegalMoveForSelector)?;
    debug!(%difficulty, %mv, candidates = moves.len(), "computer move selected");
    Ok(mv)
}

fn pick_random<R: Rng + ?Sized>(moves: &[Move], rng: &mut R) -> Option<Move> {
    moves.choose(rng).copied()
}

fn pick_capture_first<R: Rng + ?Sized>(board: &Board, moves: &[Move], rng: &mut R) -> Option<Move> {
    let captures: Vec<Move> = moves
        .iter()
        .copied()
        .filter(|m| board.piece_at(m.to).is_some())
        .collect();

    if captures.is_empty() {
        pick_random(moves, rng)
    } else {
        pick_random(&captures, rng)
    }
}

fn pick_best_scored<R: Rng + ?Sized>(board: &Board, moves: &[Move], rng: &mut R) -> Option<Move> {
    let mut best: Option<(Move, f64)> = None;
    for &mv in moves {
        let score = score_move(board, mv, rng.gen_range(0.0..NOISE_RANGE));
        // Strictly greater: the earliest move keeps a tie.
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((mv, score));
        }
    }
    best.map(|(mv, _)| mv)
}

// =========================================================================
// Tests
// =========================================================================
