//! A single game as seen by a presentation layer.
//!
//! `Session` owns the one mutable `GameState`, the game mode and the computer
//! opponent. In human-vs-computer mode a human move schedules the computer's
//! reply as a tokio task that sleeps for the configured delay first. Starting
//! or resetting the game bumps a generation counter and aborts the pending
//! task; a task that wakes up anyway sees the new generation and does nothing.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::ai::{AiEngine, TieredAi};
use crate::config::AppConfig;
use crate::engine::game::GameState;
use crate::engine::types::{ChessError, Color, Difficulty, GameStatus, Move, Square};

/// Who is playing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum GameMode {
    /// Two humans sharing one board.
    TwoPlayer,
    /// A human against the computer, which plays `computer`.
    VsComputer {
        difficulty: Difficulty,
        computer: Color,
    },
}

impl GameMode {
    /// Human vs computer using the configured tier and side.
    pub fn vs_computer(config: &AppConfig) -> Self {
        GameMode::VsComputer {
            difficulty: config.default_difficulty,
            computer: config.computer_side,
        }
    }

    /// The side the computer plays, if any.
    pub fn computer_side(&self) -> Option<Color> {
        match self {
            GameMode::TwoPlayer => None,
            GameMode::VsComputer { computer, .. } => Some(*computer),
        }
    }
}

struct Inner {
    game: GameState,
    mode: GameMode,
    generation: u64,
    started_at: DateTime<Utc>,
    ai: TieredAi,
    pending: Option<JoinHandle<()>>,
    /// A reply task for the current generation exists and has not run yet.
    reply_queued: bool,
}

impl Inner {
    fn computer_to_move(&self) -> bool {
        !self.game.is_game_over() && self.mode.computer_side() == Some(self.game.side_to_move())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.reply_queued = false;
    }

    /// Select and play the computer's move. No-op unless it is the computer's turn.
    fn apply_computer_move(&mut self, session_id: Uuid) {
        let GameMode::VsComputer { difficulty, .. } = self.mode else {
            return;
        };
        if !self.computer_to_move() {
            return;
        }

        let mv = match self.ai.best_move(&self.game, difficulty) {
            Ok(mv) => mv,
            Err(e) => {
                error!(session = %session_id, error = %e, "computer could not select a move");
                debug_assert!(
                    !matches!(e, ChessError::NoLegalMoveForSelector),
                    "selector called without legal moves"
                );
                return;
            }
        };

        match self.game.apply_move(mv) {
            Ok(status) => debug!(session = %session_id, %mv, %status, "computer replied"),
            Err(e) => error!(session = %session_id, %mv, error = %e, "computer move rejected"),
        }
    }
}

/// Shared handle to one game. Clones refer to the same game.
#[derive(Clone)]
pub struct Session {
    id: Uuid,
    reply_delay: Duration,
    inner: Arc<Mutex<Inner>>,
}

impl Session {
    /// Human vs computer with the configured defaults.
    pub fn new(config: &AppConfig) -> Self {
        Self::with_mode(GameMode::vs_computer(config), config)
    }

    /// A fresh game in `mode`.
    ///
    /// Nothing is spawned here, so this works outside a runtime. If the
    /// computer opens, its first move is queued by `start`, or lazily by the
    /// first `play` or `wait_for_reply`.
    pub fn with_mode(mode: GameMode, config: &AppConfig) -> Self {
        let id = Uuid::new_v4();
        info!(session = %id, ?mode, "session created");
        Self {
            id,
            reply_delay: config.reply_delay(),
            inner: Arc::new(Mutex::new(Inner {
                game: GameState::new(),
                mode,
                generation: 0,
                started_at: Utc::now(),
                ai: TieredAi::from_seed(config.seed),
                pending: None,
                reply_queued: false,
            })),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn mode(&self) -> GameMode {
        self.inner.lock().await.mode
    }

    /// When the current game began.
    pub async fn started_at(&self) -> DateTime<Utc> {
        self.inner.lock().await.started_at
    }

    /// Clone of the current game state.
    pub async fn snapshot(&self) -> GameState {
        self.inner.lock().await.game.clone()
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// New game in `mode`. Any pending computer reply is cancelled.
    pub async fn start(&self, mode: GameMode) {
        let mut inner = self.inner.lock().await;
        self.restart(&mut inner, mode);
    }

    /// New game in the current mode.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        let mode = inner.mode;
        self.restart(&mut inner, mode);
    }

    fn restart(&self, inner: &mut Inner, mode: GameMode) {
        inner.cancel_pending();
        inner.generation += 1;
        inner.game.reset();
        inner.mode = mode;
        inner.started_at = Utc::now();
        info!(
            session = %self.id,
            generation = inner.generation,
            ?mode,
            started_at = %inner.started_at,
            "game started"
        );

        if inner.computer_to_move() {
            self.schedule_reply(inner);
        }
    }

    // -----------------------------------------------------------------
    // Play
    // -----------------------------------------------------------------

    /// Legal destinations for highlighting. Empty while the computer is to move.
    pub async fn legal_moves(&self, from: Square) -> Vec<Square> {
        let inner = self.inner.lock().await;
        if inner.computer_to_move() {
            return Vec::new();
        }
        inner.game.legal_moves(from)
    }

    /// Play a human move and, when the computer is next, queue its reply.
    pub async fn play(&self, mv: Move) -> Result<GameStatus, ChessError> {
        let mut inner = self.inner.lock().await;

        if inner.computer_to_move() {
            warn!(session = %self.id, %mv, "move rejected, computer to move");
            self.ensure_reply_queued(&mut inner);
            return Err(ChessError::NotYourTurn);
        }

        let status = inner.game.apply_move(mv).inspect_err(|e| {
            warn!(session = %self.id, %mv, error = %e, "move rejected");
        })?;

        if status.is_game_over() {
            info!(session = %self.id, %status, "game finished");
        } else if inner.computer_to_move() {
            self.schedule_reply(&mut inner);
        }
        Ok(status)
    }

    /// Wait until the queued computer reply (if any) has run or been cancelled.
    pub async fn wait_for_reply(&self) {
        let pending = {
            let mut inner = self.inner.lock().await;
            self.ensure_reply_queued(&mut inner);
            inner.pending.take()
        };
        let Some(handle) = pending else {
            return;
        };
        if let Err(e) = handle.await
            && !e.is_cancelled()
        {
            error!(session = %self.id, error = %e, "computer reply task failed");
        }
    }

    /// Queue the computer's move if it is to move and nothing is queued yet.
    fn ensure_reply_queued(&self, inner: &mut Inner) {
        if inner.computer_to_move() && !inner.reply_queued {
            debug!(session = %self.id, "computer to move with no reply queued");
            self.schedule_reply(inner);
        }
    }

    fn schedule_reply(&self, inner: &mut Inner) {
        inner.cancel_pending();

        let generation = inner.generation;
        let shared = Arc::clone(&self.inner);
        let delay = self.reply_delay;
        let id = self.id;
        debug!(session = %id, generation, ?delay, "computer reply scheduled");

        inner.reply_queued = true;
        inner.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut inner = shared.lock().await;
            if inner.generation != generation {
                debug!(session = %id, generation, "stale computer reply dropped");
                return;
            }
            inner.reply_queued = false;
            inner.apply_computer_move(id);
        }));
    }
}
