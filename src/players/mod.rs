//! Move sources and their construction from config.

mod first;
mod human;
mod random;
mod search;

pub use first::FirstAvailable;
pub use human::{GRID_PREFIX, HumanPlayer, parse_input};
pub use random::RandomPlayer;
pub use search::SearchPlayer;

use crate::config::{PlayerConfig, PlayerKind};
use ultimate_engine::{Engine, Move, Restriction, Sign, State};

/// Anything that can pick a move for one side.
pub trait MoveSource: Send {
    /// Picks a move for `sign` in `state`, or `None` if nothing is legal.
    ///
    /// `engine` is the game's own engine; its legal-move tracker is in step
    /// with `state`.
    fn choose(
        &mut self,
        engine: &mut Engine,
        state: &State,
        restriction: Restriction,
        sign: Sign,
    ) -> Option<Move>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}

/// Builds the move source described by `config`.
///
/// `seed` only matters for random players. Human players read the
/// terminal.
pub fn build(config: &PlayerConfig, seed: Option<u64>) -> Box<dyn MoveSource> {
    match config.search_config() {
        Some(search) => Box::new(SearchPlayer::new(config.kind().to_string(), search)),
        None => match config.kind() {
            PlayerKind::Random => Box::new(RandomPlayer::new(seed)),
            PlayerKind::Human => Box::new(HumanPlayer::stdio(config.kind().to_string())),
            _ => Box::new(FirstAvailable),
        },
    }
}
