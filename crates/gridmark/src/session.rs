//! Async match sessions with the deferred AI move.
//!
//! The AI gets a short "thinking" delay after a human move hands it the
//! turn. The delay is a scheduling affordance, not a rules concern: the
//! session spawns a tokio task that resolves the pending AI turn after
//! the delay, and `reset`/`set_ai_mode` cancel it. A cancelled or stale
//! task never touches a replaced game state - the task is aborted AND
//! re-checks the session epoch under the lock before resolving.

use crate::{Match, MatchError, MatchView};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn};

/// Timing configuration for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Delay before a pending AI turn is resolved, in milliseconds.
    pub ai_delay_ms: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ai_delay_ms: 500 }
    }
}

struct Inner {
    match_state: Match,
    /// Bumped on every reset; outstanding AI tasks check it before acting.
    epoch: u64,
    ai_task: Option<JoinHandle<()>>,
}

/// A live match whose AI turns are resolved on a timer.
///
/// All mutating operations serialize through one mutex, so concurrent
/// callers (and the deferred AI task) never interleave within a move.
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct MatchSession {
    inner: Arc<Mutex<Inner>>,
    config: SessionConfig,
}

impl MatchSession {
    /// Creates a session, optionally versus the AI.
    #[instrument]
    pub fn new(ai_enabled: bool, config: SessionConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                match_state: Match::with_mode(ai_enabled),
                epoch: 0,
                ai_task: None,
            })),
            config,
        }
    }

    /// Applies a human move and schedules the AI reply when one is due.
    #[instrument(skip(self))]
    pub fn play(&self, index: usize) -> Result<MatchView, MatchError> {
        let mut inner = self.inner.lock().unwrap();
        inner.match_state.apply_human_move(index)?;

        if inner.match_state.pending_ai_turn() {
            let epoch = inner.epoch;
            let delay = Duration::from_millis(self.config.ai_delay_ms);
            let handle = tokio::spawn(Self::deferred_ai(self.inner.clone(), epoch, delay));
            inner.ai_task = Some(handle);
        }

        Ok(inner.match_state.snapshot())
    }

    async fn deferred_ai(inner: Arc<Mutex<Inner>>, epoch: u64, delay: Duration) {
        tokio::time::sleep(delay).await;

        let mut inner = inner.lock().unwrap();
        if inner.epoch != epoch {
            debug!("Stale AI task; match was reset");
            return;
        }
        if let Err(error) = inner.match_state.resolve_ai_turn() {
            warn!(%error, "Deferred AI move failed");
        }
    }

    /// Resolves a pending AI turn immediately, skipping the delay.
    ///
    /// For collaborators (and tests) that schedule their own timing.
    #[instrument(skip(self))]
    pub fn resolve_ai_turn(&self) -> Result<MatchView, MatchError> {
        let mut inner = self.inner.lock().unwrap();
        if let Some(task) = inner.ai_task.take() {
            task.abort();
        }
        inner.match_state.resolve_ai_turn()?;
        Ok(inner.match_state.snapshot())
    }

    /// Restores the initial state and cancels any scheduled AI move.
    #[instrument(skip(self))]
    pub fn reset(&self) -> MatchView {
        let mut inner = self.inner.lock().unwrap();
        Self::cancel_pending(&mut inner);
        inner.match_state.reset();
        inner.match_state.snapshot()
    }

    /// Enables or disables the AI opponent. Restarts the board and
    /// cancels any scheduled AI move.
    #[instrument(skip(self))]
    pub fn set_ai_mode(&self, enabled: bool) -> MatchView {
        let mut inner = self.inner.lock().unwrap();
        Self::cancel_pending(&mut inner);
        inner.match_state.set_ai_mode(enabled);
        inner.match_state.snapshot()
    }

    /// Whether an AI move is due and not yet applied.
    pub fn pending_ai_turn(&self) -> bool {
        self.inner.lock().unwrap().match_state.pending_ai_turn()
    }

    /// Read-only snapshot for presentation.
    pub fn snapshot(&self) -> MatchView {
        self.inner.lock().unwrap().match_state.snapshot()
    }

    fn cancel_pending(inner: &mut Inner) {
        inner.epoch += 1;
        if let Some(task) = inner.ai_task.take() {
            task.abort();
        }
    }
}
