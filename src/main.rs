//! Ultimate tic-tac-toe - unified CLI
//!
//! Plays single games or runs self-play simulations.

#![warn(missing_docs)]

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use std::path::PathBuf;
use std::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;
use ultimate_engine::{Engine, Outcome, to_row_col};
use ultimate_tictactoe::{
    AppConfig, Cli, Command, GRID_PREFIX, GameEvent, Orchestrator, PlayerKind, Simulator,
    build_player,
};

const DEFAULT_FILTER: &str = "info,ultimate_tictactoe=info,ultimate_engine=warn";

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            x,
            o,
            config,
            seed,
            show_eval,
        } => run_play(load_config(config, x, o)?, seed, show_eval),
        Command::Simulate {
            games,
            x,
            o,
            config,
            seed,
            json,
        } => run_simulate(load_config(config, x, o)?, games, seed, json),
    }
}

fn load_config(path: Option<PathBuf>, x: Option<PlayerKind>, o: Option<PlayerKind>) -> Result<AppConfig> {
    let config = AppConfig::load(path.as_deref()).context("Failed to load configuration")?;
    Ok(config.with_kinds(x, o))
}

/// Play one game, printing the board after every move
#[instrument(skip(config))]
fn run_play(config: AppConfig, seed: Option<u64>, show_eval: bool) -> Result<()> {
    let engine = match seed {
        Some(seed) => Engine::with_seed(*config.heuristic(), seed),
        None => Engine::new(*config.heuristic()),
    };
    let player_x = build_player(config.player_x(), seed);
    let player_o = build_player(config.player_o(), seed.map(|s| s.wrapping_add(1)));
    info!(x = player_x.name(), o = player_o.name(), "Starting game");

    let (tx, rx) = mpsc::channel();
    let mut orchestrator = Orchestrator::new(engine, player_x, player_o).with_events(tx);
    if show_eval {
        orchestrator = orchestrator.with_evaluation(config.evaluation_config());
    }
    let handle = std::thread::spawn(move || orchestrator.run());

    for event in rx {
        match event {
            GameEvent::MoveMade {
                sign,
                mv,
                state,
                thinking,
                search,
                evaluation,
            } => {
                let (row, col) = to_row_col(mv);
                println!(
                    "{sign} plays {mv} at {}{row} {col} ({:.1} ms)",
                    GRID_PREFIX,
                    thinking.as_secs_f64() * 1000.0
                );
                if let Some(stats) = search {
                    let cut = if stats.timed_out { ", out of time" } else { "" };
                    println!(
                        "Searched {} nodes to depth {}{cut}",
                        stats.nodes, stats.target_depth
                    );
                }
                if let Some(value) = evaluation {
                    println!("Game evaluation: {value:.2}");
                }
                println!("{state}");
                println!();
            }
            GameEvent::BoardCompleted { board, outcome } => {
                println!("Board {board}: {outcome}");
                println!();
            }
            GameEvent::GameOver { outcome } => match outcome {
                Outcome::Won(winner) => println!("{winner} wins the game"),
                _ => println!("The game is a tie"),
            },
        }
    }

    let record = handle
        .join()
        .map_err(|_| anyhow!("Game thread panicked"))??;
    info!(
        moves = record.moves().len(),
        duration_ms = record.duration().as_millis() as u64,
        "Game finished"
    );
    Ok(())
}

/// Run many games and print aggregate statistics
#[instrument(skip(config))]
fn run_simulate(config: AppConfig, games: usize, seed: Option<u64>, json: bool) -> Result<()> {
    let report = Simulator::new(config, seed).run(games)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialize report")?
        );
    } else {
        println!("{report}");
    }
    Ok(())
}
