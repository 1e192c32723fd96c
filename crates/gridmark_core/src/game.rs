//! Turn-by-turn state machine for tic-tac-toe.

use crate::{rules, Board, Mark, Move, MoveError, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

/// Current status of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::Won(mark) => Some(*mark),
            _ => None,
        }
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Won(mark) => write!(f, "{} wins", mark),
            GameStatus::Draw => write!(f, "Draw"),
        }
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// The board.
    board: Board,
    /// Mark to move next.
    to_move: Mark,
    /// Game status.
    status: GameStatus,
    /// Move history (positions played, in order).
    history: Vec<Position>,
}

impl GameState {
    /// Creates the initial state: empty board, first mark to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Mark::first(),
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark to move next.
    ///
    /// Once the game is terminal this is the mark that made the last move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> &GameStatus {
        &self.status
    }

    /// Returns the move history.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Number of moves made so far.
    ///
    /// Invariant: equals the number of occupied squares.
    pub fn move_count(&self) -> usize {
        self.history.len()
    }

    /// Writes a mark and records it (unchecked - use `Game::make_move`).
    fn record(&mut self, mv: Move) {
        self.board.set(mv.position(), Square::Occupied(mv.mark()));
        self.history.push(mv.position());
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

/// Tic-tac-toe game engine.
#[derive(Debug, Clone)]
pub struct Game {
    state: GameState,
}

impl Game {
    /// Creates a new game.
    #[instrument]
    pub fn new() -> Self {
        Self {
            state: GameState::new(),
        }
    }

    /// Returns the current game state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Applies a move, updating status and turn order.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError`] and leaves the state unchanged when the game
    /// is already over, the move's mark is out of turn, or the square is
    /// occupied.
    #[instrument(skip(self), fields(mark = %mv.mark(), position = %mv.position()))]
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        if self.state.status().is_terminal() {
            warn!("Move rejected: game is over");
            return Err(MoveError::GameOver);
        }

        if mv.mark() != self.state.to_move() {
            warn!(to_move = %self.state.to_move(), "Move rejected: out of turn");
            return Err(MoveError::WrongMark(mv.mark()));
        }

        if !rules::is_legal(self.state.board(), mv.position()) {
            warn!("Move rejected: square occupied");
            return Err(MoveError::SquareOccupied(mv.position()));
        }

        self.state.record(mv);

        if let Some(winner) = rules::check_winner(self.state.board()) {
            self.state.status = GameStatus::Won(winner);
        } else if rules::is_full(self.state.board()) {
            self.state.status = GameStatus::Draw;
        } else {
            self.state.to_move = mv.mark().opponent();
        }

        info!(
            move_count = self.state.move_count(),
            status = %self.state.status(),
            "Move applied"
        );

        Ok(())
    }

    /// Restores the initial state, independent of prior history.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::new();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
