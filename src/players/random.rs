//! Player that picks uniformly among legal moves.

use super::MoveSource;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use ultimate_engine::{Engine, Move, Restriction, Sign, State};

/// Uniformly random legal moves.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    /// Creates a random player, seeded for reproducible games when `seed`
    /// is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl MoveSource for RandomPlayer {
    fn choose(
        &mut self,
        engine: &mut Engine,
        _state: &State,
        restriction: Restriction,
        _sign: Sign,
    ) -> Option<Move> {
        engine.legal_moves(restriction).choose(&mut self.rng).copied()
    }

    fn name(&self) -> &str {
        "random"
    }
}
