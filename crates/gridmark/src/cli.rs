//! Command-line interface for gridmark.

use clap::{Parser, Subcommand};

/// Gridmark - tic-tac-toe with an optimal minimax opponent
#[derive(Parser, Debug)]
#[command(name = "gridmark")]
#[command(about = "Tic-tac-toe engine with an optimal minimax opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play an interactive match in the terminal
    Play {
        /// Play against the AI (you are O, the AI answers as X)
        #[arg(long)]
        versus_ai: bool,

        /// AI thinking delay in milliseconds
        #[arg(long, default_value = "500")]
        ai_delay_ms: u64,
    },

    /// Print the optimal move for X on the given board
    Solve {
        /// Board as 9 characters, row-major: X, O or . (e.g. "O...X....")
        board: String,
    },
}
