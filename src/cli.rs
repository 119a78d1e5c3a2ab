//! Command-line interface for ultimate_tictactoe.

use crate::config::PlayerKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ultimate tic-tac-toe - search players, matches and self-play statistics
#[derive(Parser, Debug)]
#[command(name = "ultimate_tictactoe")]
#[command(about = "Ultimate tic-tac-toe engine and match runner", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game, printing every move and the board
    Play {
        /// Player for X (overrides the config file)
        #[arg(long)]
        x: Option<PlayerKind>,

        /// Player for O (overrides the config file)
        #[arg(long)]
        o: Option<PlayerKind>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,

        /// Print the evaluation bar after every move
        #[arg(long)]
        show_eval: bool,
    },

    /// Play many games and report statistics
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "10")]
        games: usize,

        /// Player for X (overrides the config file)
        #[arg(long)]
        x: Option<PlayerKind>,

        /// Player for O (overrides the config file)
        #[arg(long)]
        o: Option<PlayerKind>,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
