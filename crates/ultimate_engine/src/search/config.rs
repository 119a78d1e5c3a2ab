//! Search configuration: strategy and depth policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Depth a dynamic search starts at.
pub const DYNAMIC_INITIAL_DEPTH: usize = 5;
/// Own-move count after which a dynamic search starts deepening.
pub const DYNAMIC_THRESHOLD: usize = 18;
/// Deepening happens on own-move counts divisible by this.
pub const DYNAMIC_STEP: usize = 3;
/// Default per-move budget of a timed search.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 85;
/// Default depth cap of a timed search.
pub const DEFAULT_TIMED_DEPTH_CAP: usize = 4;

/// Tree search algorithm.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Strategy {
    /// Minimax with alpha-beta pruning: assumes an optimal opponent.
    #[default]
    AlphaBeta,
    /// Alternates best-reply plies with averaging plies: assumes an
    /// opponent replying uniformly at random.
    Expectimax,
}

/// How deep the search looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepthPolicy {
    /// Fixed ply count.
    Static(usize),
    /// Starts at [`DYNAMIC_INITIAL_DEPTH`] and deepens as the game goes on
    /// and the branching factor shrinks.
    #[default]
    Dynamic,
    /// Wall-clock budget per top-level move.
    Timed {
        /// Budget in milliseconds, re-armed at every top-level move.
        budget_ms: u64,
        /// Depth cap on the depth-first dive.
        depth_cap: usize,
    },
}

impl DepthPolicy {
    /// Timed policy with the default budget and cap.
    pub fn timed() -> Self {
        DepthPolicy::Timed {
            budget_ms: DEFAULT_TIME_BUDGET_MS,
            depth_cap: DEFAULT_TIMED_DEPTH_CAP,
        }
    }

    /// Target depth for a side that has already placed `moves_made` marks.
    ///
    /// The dynamic policy grows by 1, 2, 4, ... at every own-move count past
    /// [`DYNAMIC_THRESHOLD`] divisible by [`DYNAMIC_STEP`].
    pub fn target_depth(&self, moves_made: usize) -> usize {
        match *self {
            DepthPolicy::Static(depth) => depth,
            DepthPolicy::Timed { depth_cap, .. } => depth_cap,
            DepthPolicy::Dynamic => {
                let mut depth = DYNAMIC_INITIAL_DEPTH;
                let mut growth = 1usize;
                for count in (DYNAMIC_THRESHOLD + 1)..=moves_made {
                    if count % DYNAMIC_STEP == 0 {
                        depth = depth.saturating_add(growth);
                        growth = growth.saturating_mul(2);
                    }
                }
                depth
            }
        }
    }

    /// Time budget, for timed policies.
    pub fn budget(&self) -> Option<Duration> {
        match *self {
            DepthPolicy::Timed { budget_ms, .. } => Some(Duration::from_millis(budget_ms)),
            _ => None,
        }
    }
}

/// Everything [`Engine::choose_move`](crate::Engine::choose_move) needs to
/// know about how to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search algorithm.
    pub strategy: Strategy,
    /// Depth policy.
    pub depth: DepthPolicy,
    /// Play a random opening move instead of the center.
    pub randomize_opening: bool,
}

impl SearchConfig {
    /// Alpha-beta search to a fixed depth.
    pub fn alpha_beta(depth: usize) -> Self {
        Self {
            strategy: Strategy::AlphaBeta,
            depth: DepthPolicy::Static(depth),
            randomize_opening: false,
        }
    }

    /// Expectimax search to a fixed depth.
    pub fn expectimax(depth: usize) -> Self {
        Self {
            strategy: Strategy::Expectimax,
            depth: DepthPolicy::Static(depth),
            randomize_opening: false,
        }
    }

    /// Same config with another depth policy.
    pub fn with_depth(mut self, depth: DepthPolicy) -> Self {
        self.depth = depth;
        self
    }

    /// Same config with randomized openings switched on or off.
    pub fn with_random_opening(mut self, randomize: bool) -> Self {
        self.randomize_opening = randomize;
        self
    }
}
