//! Tests for the minimax search.

use gridmark_core::{search, Game, GameStatus, Mark, Move, Position};

#[test]
fn test_optimal_reply_to_corner_opening() {
    // O opens in a corner; the only non-losing reply for X is the center.
    let mut game = Game::new();
    game.make_move(Move::new(Mark::O, Position::TopLeft)).unwrap();

    let reply = search::best_move(game.state().board(), Mark::X, Mark::O);

    assert_eq!(reply, Some(Position::Center));
}

#[test]
fn test_optimal_reply_to_every_corner() {
    for corner in [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ] {
        let mut game = Game::new();
        game.make_move(Move::new(Mark::O, corner)).unwrap();

        let reply = search::best_move(game.state().board(), Mark::X, Mark::O);

        assert_eq!(reply, Some(Position::Center), "opening {:?}", corner);
    }
}

/// Plays both sides with `best_move` after a fixed opening and returns
/// the final status.
fn self_play_from(opening: Position) -> GameStatus {
    let mut game = Game::new();
    game.make_move(Move::new(Mark::O, opening)).unwrap();

    while !game.state().status().is_terminal() {
        let mover = game.state().to_move();
        let pos = search::best_move(game.state().board(), mover, mover.opponent())
            .expect("non-terminal board has a move");
        game.make_move(Move::new(mover, pos)).expect("Valid move");
    }

    *game.state().status()
}

#[test]
fn test_self_play_is_always_a_draw() {
    // Optimal play from any opening square forces a draw.
    for opening in Position::ALL {
        assert_eq!(
            self_play_from(opening),
            GameStatus::Draw,
            "opening {:?}",
            opening
        );
    }
}

#[test]
fn test_search_never_loses_as_second_player() {
    // The opponent tries every pair of scripted opening moves while the
    // searcher answers optimally; the searcher must never lose.
    for first in Position::ALL {
        for second in Position::ALL {
            let mut game = Game::new();
            game.make_move(Move::new(Mark::O, first)).unwrap();

            let reply = search::best_move(game.state().board(), Mark::X, Mark::O)
                .expect("board not full");
            game.make_move(Move::new(Mark::X, reply)).unwrap();

            if !game.state().board().is_empty(second) {
                continue;
            }
            game.make_move(Move::new(Mark::O, second)).unwrap();

            // Play out the rest with both sides searching.
            while !game.state().status().is_terminal() {
                let mover = game.state().to_move();
                let pos = search::best_move(game.state().board(), mover, mover.opponent())
                    .expect("non-terminal board has a move");
                game.make_move(Move::new(mover, pos)).unwrap();
            }

            assert_ne!(
                game.state().status(),
                &GameStatus::Won(Mark::O),
                "searcher lost after openings {:?}, {:?}",
                first,
                second
            );
        }
    }
}
