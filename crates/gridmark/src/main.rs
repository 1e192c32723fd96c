//! Gridmark unified CLI.
//!
//! A thin driver for the match session: it renders snapshots and feeds
//! square indices back in, which is all a presentation collaborator is
//! allowed to do.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use gridmark::{MatchSession, SessionConfig};
use gridmark_core::{search, Board, GameStatus, Mark, Position};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            versus_ai,
            ai_delay_ms,
        } => play(versus_ai, ai_delay_ms).await,
        Command::Solve { board } => solve(&board),
    }
}

/// Run an interactive match on stdin/stdout.
async fn play(versus_ai: bool, ai_delay_ms: u64) -> Result<()> {
    info!(versus_ai, ai_delay_ms, "Starting interactive match");

    let session = MatchSession::new(versus_ai, SessionConfig { ai_delay_ms });
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Enter a square (0-8 or a label like \"center\"), r to restart, q to quit.");

    loop {
        // Let a scheduled AI move land before rendering and prompting.
        while session.pending_ai_turn() {
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        let view = session.snapshot();
        println!("\n{}\n", view.board_text);
        if view.status.is_terminal() {
            match view.status {
                GameStatus::Won(mark) => println!("Congratulations, winner is {}", mark),
                GameStatus::Draw => println!("Game was a draw."),
                GameStatus::InProgress => unreachable!(),
            }
            println!("r for a new game, q to quit.");
        } else {
            println!("{} to move:", view.to_move);
        }

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match line.trim() {
            "" => continue,
            "q" => break,
            "r" => {
                session.reset();
            }
            input => match Position::from_label_or_number(input) {
                Some(position) => {
                    if let Err(error) = session.play(position.to_index()) {
                        println!("{}", error);
                    }
                }
                None => println!("Unrecognized square {:?}", input),
            },
        }
    }

    Ok(())
}

/// Print the optimal move for X on a board given as text.
fn solve(board: &str) -> Result<()> {
    let board: Board = board.parse()?;

    match search::best_move(&board, Mark::X, Mark::O) {
        Some(position) => {
            println!("{} (square {})", position.label(), position.to_index());
            Ok(())
        }
        None => {
            println!("Board is full; no move available.");
            Ok(())
        }
    }
}
