//! Baseline player that picks the first legal move.

use super::MoveSource;
use ultimate_engine::{Engine, Move, Restriction, Sign, State};

/// Always plays the lowest (board, cell) legal move.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl MoveSource for FirstAvailable {
    fn choose(
        &mut self,
        engine: &mut Engine,
        _state: &State,
        restriction: Restriction,
        _sign: Sign,
    ) -> Option<Move> {
        engine.legal_moves(restriction).first().copied()
    }

    fn name(&self) -> &str {
        "first"
    }
}
