//! Search-backed player.

use super::MoveSource;
use derive_new::new;
use ultimate_engine::{Engine, Move, Restriction, SearchConfig, Sign, State};

/// Plays the engine's best move under a fixed search config.
#[derive(Debug, Clone, new)]
pub struct SearchPlayer {
    name: String,
    config: SearchConfig,
}

impl MoveSource for SearchPlayer {
    fn choose(
        &mut self,
        engine: &mut Engine,
        state: &State,
        restriction: Restriction,
        sign: Sign,
    ) -> Option<Move> {
        engine.choose_move(state, restriction, sign, &self.config)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
