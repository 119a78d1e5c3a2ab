//! Player and heuristic configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};
use ultimate_engine::{DepthPolicy, HeuristicWeights, SearchConfig, Strategy};

/// Fixed search depth of the evaluation bar when neither side searches.
pub const DEFAULT_EVAL_DEPTH: usize = 2;

/// Kind of player controlling one side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PlayerKind {
    /// Alpha-beta search.
    #[default]
    Minimax,
    /// Expectimax search.
    Expectimax,
    /// Uniformly random legal move.
    Random,
    /// First legal move.
    First,
    /// Moves typed on the terminal.
    Human,
}

/// Configuration of one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Which player to use.
    kind: PlayerKind,

    /// Depth policy for search players.
    depth: DepthPolicy,

    /// Randomize the opening move of search players.
    randomize_opening: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            kind: PlayerKind::default(),
            depth: DepthPolicy::Dynamic,
            randomize_opening: false,
        }
    }
}

impl PlayerConfig {
    /// Creates a player config.
    pub fn new(kind: PlayerKind, depth: DepthPolicy, randomize_opening: bool) -> Self {
        Self {
            kind,
            depth,
            randomize_opening,
        }
    }

    /// Same config with another kind.
    pub fn with_kind(mut self, kind: PlayerKind) -> Self {
        self.kind = kind;
        self
    }

    /// Search settings, for the kinds that search.
    pub fn search_config(&self) -> Option<SearchConfig> {
        let strategy = match self.kind {
            PlayerKind::Minimax => Strategy::AlphaBeta,
            PlayerKind::Expectimax => Strategy::Expectimax,
            PlayerKind::Random | PlayerKind::First | PlayerKind::Human => return None,
        };
        Some(SearchConfig {
            strategy,
            depth: self.depth,
            randomize_opening: self.randomize_opening,
        })
    }
}

/// Whole application configuration.
///
/// Every field is optional in the file.
#[derive(Debug, Clone, Default, PartialEq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Side X.
    player_x: PlayerConfig,

    /// Side O.
    player_o: PlayerConfig,

    /// Heuristic weights shared by both sides.
    heuristic: HeuristicWeights,
}

impl AppConfig {
    /// Creates a config from its parts.
    pub fn new(player_x: PlayerConfig, player_o: PlayerConfig, heuristic: HeuristicWeights) -> Self {
        Self {
            player_x,
            player_o,
            heuristic,
        }
    }

    /// Search settings for the evaluation bar: X's if X searches, else O's,
    /// else a [`DEFAULT_EVAL_DEPTH`] alpha-beta search.
    pub fn evaluation_config(&self) -> SearchConfig {
        self.player_x
            .search_config()
            .or_else(|| self.player_o.search_config())
            .unwrap_or_else(|| SearchConfig::alpha_beta(DEFAULT_EVAL_DEPTH))
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(
            x = %config.player_x.kind,
            o = %config.player_o.kind,
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Replaces the player kinds given on the command line.
    pub fn with_kinds(mut self, x: Option<PlayerKind>, o: Option<PlayerKind>) -> Self {
        if let Some(kind) = x {
            self.player_x = self.player_x.with_kind(kind);
        }
        if let Some(kind) = o {
            self.player_o = self.player_o.with_kind(kind);
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
