//! Exhaustive minimax search for the optimal move.
//!
//! The state space is bounded by 9! positions, so full enumeration with
//! no pruning completes effectively instantly. The search places a mark,
//! recurses, and erases it again on one shared board buffer rather than
//! copying the board per node.

use crate::{rules, Board, Mark, Position, Square};
use tracing::{debug, instrument};

/// Returns the game-theoretically optimal position for `ai` to play.
///
/// Candidate squares are scored in index order and only a strictly
/// greater score replaces the incumbent, so the lowest index wins among
/// equal-best moves. Returns `None` iff the board has no empty square.
#[instrument(skip(board))]
pub fn best_move(board: &Board, ai: Mark, opponent: Mark) -> Option<Position> {
    let mut scratch = board.clone();
    let mut best: Option<(Position, i32)> = None;

    for pos in Position::valid_moves(board) {
        scratch.set(pos, Square::Occupied(ai));
        let score = score(&mut scratch, ai, opponent, 0, false);
        scratch.set(pos, Square::Empty);

        if best.is_none_or(|(_, incumbent)| score > incumbent) {
            best = Some((pos, score));
        }
    }

    if let Some((pos, score)) = best {
        debug!(position = %pos, score, "Selected move");
    }
    best.map(|(pos, _)| pos)
}

/// Scores the board for `ai`, assuming both sides play optimally.
///
/// `depth` counts plies from the position where the search began:
/// wins score `10 - depth` (faster is better), losses `depth - 10`
/// (slower is better), a full board scores 0.
fn score(board: &mut Board, ai: Mark, opponent: Mark, depth: i32, maximizing: bool) -> i32 {
    if let Some(winner) = rules::check_winner(board) {
        return if winner == ai { 10 - depth } else { depth - 10 };
    }

    if rules::is_full(board) {
        return 0;
    }

    let mover = if maximizing { ai } else { opponent };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };

    for pos in Position::ALL {
        if !board.is_empty(pos) {
            continue;
        }
        board.set(pos, Square::Occupied(mover));
        let value = score(board, ai, opponent, depth + 1, !maximizing);
        board.set(pos, Square::Empty);

        best = if maximizing {
            best.max(value)
        } else {
            best.min(value)
        };
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_board_has_no_move() {
        let board: Board = "XOXXOOOXX".parse().unwrap();
        assert_eq!(best_move(&board, Mark::X, Mark::O), None);
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X . / O O . / O . .  - X to move wins at top-right
        let board: Board = "XX.OO.O..".parse().unwrap();
        assert_eq!(best_move(&board, Mark::X, Mark::O), Some(Position::TopRight));
    }

    #[test]
    fn test_blocks_opponent_win() {
        // O O . / . X . / . . .  - X must block top-right
        let board: Board = "OO..X....".parse().unwrap();
        assert_eq!(best_move(&board, Mark::X, Mark::O), Some(Position::TopRight));
    }

    #[test]
    fn test_tie_break_picks_lowest_index() {
        // Every opening scores 0 under optimal play, so the first
        // candidate scanned is kept.
        let board = Board::new();
        assert_eq!(best_move(&board, Mark::X, Mark::O), Some(Position::TopLeft));
    }
}
