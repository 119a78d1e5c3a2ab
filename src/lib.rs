//! Ultimate tic-tac-toe match runner
//!
//! Players, game orchestration and self-play statistics on top of the
//! `ultimate_engine` crate.
//!
//! # Architecture
//!
//! - **Config**: TOML player and heuristic settings
//! - **Players**: search, random, first-available and human move sources
//! - **Orchestrator**: runs one game between two players, emitting events
//! - **Simulator**: runs many games and aggregates outcomes and timings
//!
//! # Example
//!
//! ```
//! use ultimate_tictactoe::{AppConfig, Simulator};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = AppConfig::from_toml(
//!     "[player_x]\nkind = \"random\"\n[player_o]\nkind = \"first\"\n",
//! )?;
//! let report = Simulator::new(config, Some(7)).run(3)?;
//! assert_eq!(*report.games(), 3);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod orchestrator;
mod players;
mod simulator;

// Crate-level exports - Command line
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{AppConfig, ConfigError, DEFAULT_EVAL_DEPTH, PlayerConfig, PlayerKind};

// Crate-level exports - Players
pub use players::{
    FirstAvailable, GRID_PREFIX, HumanPlayer, MoveSource, RandomPlayer, SearchPlayer,
    build as build_player, parse_input,
};

// Crate-level exports - Running games
pub use orchestrator::{GameEvent, MatchRecord, Orchestrator};
pub use simulator::{DurationStats, SimulationReport, Simulator};
