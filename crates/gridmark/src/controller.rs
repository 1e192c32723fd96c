//! Match control: human turns, AI turns, and mode switching.

use gridmark_core::{search, Game, GameStatus, Mark, Move, MoveError, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Versus-AI configuration and turn bookkeeping for a match.
///
/// The AI mark is fixed: the automated opponent always plays X, the
/// second mover. There is no AI-vs-AI and no human-as-second-player
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mode {
    ai_enabled: bool,
    ai_mark: Mark,
    ai_pending: bool,
}

impl Mode {
    fn new(ai_enabled: bool) -> Self {
        Self {
            ai_enabled,
            ai_mark: Mark::X,
            ai_pending: false,
        }
    }

    /// Whether the automated opponent is playing.
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    /// The mark the automated opponent plays.
    pub fn ai_mark(&self) -> Mark {
        self.ai_mark
    }

    /// Whether an AI move is due and not yet applied.
    pub fn ai_pending(&self) -> bool {
        self.ai_pending
    }
}

/// Error that can occur when driving a match.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum MatchError {
    /// The engine rejected the move.
    #[display("{}", _0)]
    #[from]
    Move(MoveError),

    /// The index does not name a square on the board.
    #[display("Position {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// An AI move is pending; human input is locked out until it lands.
    #[display("Waiting for the AI to move")]
    AiTurnPending,
}

impl std::error::Error for MatchError {}

/// A single tic-tac-toe match: game state plus versus-AI mode.
///
/// This is the boundary the presentation collaborator drives. It is
/// deterministic given its inputs; the timing of [`Match::resolve_ai_turn`]
/// is the caller's affair (see `MatchSession` for the scheduled variant).
#[derive(Debug, Clone)]
pub struct Match {
    game: Game,
    mode: Mode,
}

impl Match {
    /// Creates a new match with the AI disabled (two human marks).
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    /// Creates a new match, optionally versus the AI.
    #[instrument]
    pub fn with_mode(ai_enabled: bool) -> Self {
        Self {
            game: Game::new(),
            mode: Mode::new(ai_enabled),
        }
    }

    /// Returns the underlying game.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the versus-AI mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        self.game.state().status()
    }

    /// Whether an AI move is due and not yet applied.
    pub fn pending_ai_turn(&self) -> bool {
        self.mode.ai_pending
    }

    /// Applies a human move at square `index` (0-8).
    ///
    /// On success, when the game continues and the turn now belongs to
    /// the AI mark, an AI turn becomes pending; the caller schedules
    /// [`Match::resolve_ai_turn`].
    ///
    /// # Errors
    ///
    /// Rejects (state unchanged) when an AI turn is pending, the index is
    /// out of range, the square is occupied, or the game is over.
    #[instrument(skip(self))]
    pub fn apply_human_move(&mut self, index: usize) -> Result<(), MatchError> {
        if self.mode.ai_pending {
            warn!(index, "Move rejected: AI turn pending");
            return Err(MatchError::AiTurnPending);
        }

        let position = Position::from_index(index).ok_or(MatchError::OutOfBounds(index))?;
        let mark = self.game.state().to_move();
        self.game.make_move(Move::new(mark, position))?;
        self.arm_ai_turn();

        Ok(())
    }

    /// Marks an AI turn pending when the move just applied handed the
    /// turn to the AI mark.
    fn arm_ai_turn(&mut self) {
        if self.mode.ai_enabled
            && self.game.state().status() == &GameStatus::InProgress
            && self.game.state().to_move() == self.mode.ai_mark
        {
            debug!("AI turn pending");
            self.mode.ai_pending = true;
        }
    }

    /// Resolves a pending AI turn with the optimal move.
    ///
    /// Does nothing (logged) when no AI turn is pending - a scheduler
    /// firing after a reset must not disturb the new game. A full board
    /// with a pending turn cannot arise (the draw is recorded first);
    /// if search still reports no move, the flag is cleared and the
    /// board left unchanged.
    #[instrument(skip(self))]
    pub fn resolve_ai_turn(&mut self) -> Result<(), MatchError> {
        if !self.mode.ai_pending {
            debug!("No AI turn pending; nothing to resolve");
            return Ok(());
        }

        self.mode.ai_pending = false;

        let ai = self.mode.ai_mark;
        match search::best_move(self.game.state().board(), ai, ai.opponent()) {
            Some(position) => {
                info!(position = %position, "AI move selected");
                self.game.make_move(Move::new(ai, position))?;
                Ok(())
            }
            None => {
                warn!("AI turn pending on a full board; leaving state unchanged");
                Ok(())
            }
        }
    }

    /// Restores the initial state. AI enablement is retained; a pending
    /// AI turn is discarded.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.game.reset();
        self.mode.ai_pending = false;
        info!(ai_enabled = self.mode.ai_enabled, "Match reset");
    }

    /// Enables or disables the AI opponent.
    ///
    /// Toggling the mode always restarts the board.
    #[instrument(skip(self))]
    pub fn set_ai_mode(&mut self, enabled: bool) {
        self.mode.ai_enabled = enabled;
        self.reset();
    }

    /// Read-only snapshot for presentation.
    pub fn snapshot(&self) -> MatchView {
        let state = self.game.state();
        let mut cells = [None; 9];
        for (cell, square) in cells.iter_mut().zip(state.board().squares()) {
            *cell = match square {
                Square::Empty => None,
                Square::Occupied(mark) => Some(*mark),
            };
        }
        MatchView {
            cells,
            to_move: state.to_move(),
            status: *state.status(),
            ai_pending: self.mode.ai_pending,
            move_count: state.move_count(),
            board_text: state.board().display(),
        }
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::new()
    }
}

/// Snapshot of a match for rendering.
///
/// The collaborator renders this and owns input capture; the view
/// carries everything it needs (which squares are taken, whether input
/// should be locked out for a pending AI move, the final outcome).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchView {
    /// Squares in row-major order; `None` is empty.
    pub cells: [Option<Mark>; 9],
    /// Mark to move next.
    pub to_move: Mark,
    /// Game status.
    pub status: GameStatus,
    /// Whether an AI move is due and not yet applied.
    pub ai_pending: bool,
    /// Number of moves made so far.
    pub move_count: usize,
    /// Pre-rendered board text.
    pub board_text: String,
}
