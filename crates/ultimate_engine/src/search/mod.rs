//! Game-tree search over positions.
//!
//! Two strategies share one node budget and one cutoff rule: a node becomes
//! a leaf when the meta-board is decided, when a timed search has run out of
//! time, or when the target depth is reached. Leaves are scored with
//! [`Evaluator::heuristic`] for the side to move.
//!
//! Inside the tree, moves are derived from the hypothetical state itself
//! ([`moves_in_state`]); the game's [`LegalMoves`](crate::LegalMoves)
//! tracker only drives the root.

mod alphabeta;
mod config;
mod expectimax;
mod opening;

pub use config::{
    DEFAULT_TIME_BUDGET_MS, DEFAULT_TIMED_DEPTH_CAP, DYNAMIC_INITIAL_DEPTH, DYNAMIC_STEP,
    DYNAMIC_THRESHOLD, DepthPolicy, SearchConfig, Strategy,
};
pub use opening::opening_move;

use crate::heuristic::Evaluator;
use crate::legal::moves_in_state;
use crate::state::{META, State};
use crate::types::{Move, Restriction, Sign};
use crate::update::{apply_move, next_restriction};
use crate::win::WinChecker;
use std::time::Instant;

/// Counters from one top-level search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes visited, root children included.
    pub nodes: u64,
    /// Depth the tree was cut at.
    pub target_depth: usize,
    /// True if a timed search hit its deadline.
    pub timed_out: bool,
}

/// One top-level search in progress.
///
/// Borrows the game's caches for its lifetime. Built fresh for every
/// top-level call so the deadline is re-armed each move.
pub(crate) struct Search<'a> {
    checker: &'a mut WinChecker,
    evaluator: &'a mut Evaluator,
    strategy: Strategy,
    target_depth: usize,
    deadline: Option<Instant>,
    stats: SearchStats,
}

impl<'a> Search<'a> {
    pub(crate) fn new(
        checker: &'a mut WinChecker,
        evaluator: &'a mut Evaluator,
        config: &SearchConfig,
        moves_made: usize,
    ) -> Self {
        let target_depth = config.depth.target_depth(moves_made);
        let deadline = config.depth.budget().map(|budget| Instant::now() + budget);
        Self {
            checker,
            evaluator,
            strategy: config.strategy,
            target_depth,
            deadline,
            stats: SearchStats {
                target_depth,
                ..SearchStats::default()
            },
        }
    }

    pub(crate) fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Plays `mv` for `sign` and scores the resulting position, one ply deep.
    pub(crate) fn score_move(&mut self, state: &State, mv: Move, sign: Sign) -> f64 {
        let (child, _) = apply_move(self.checker, state, mv.board, mv.cell, sign);
        let next = next_restriction(&child, mv.cell);
        let reply_maximizing = !sign.is_maximizing();
        match self.strategy {
            Strategy::AlphaBeta => self.alpha_beta(
                &child,
                next,
                1,
                f64::NEG_INFINITY,
                f64::INFINITY,
                reply_maximizing,
            ),
            Strategy::Expectimax => self.expectimax(&child, next, 1, reply_maximizing, true),
        }
    }

    /// Picks the best legal move among `moves` for `sign`.
    ///
    /// X maximizes and O minimizes. Only a strictly better score replaces
    /// the current best, so ties go to the earliest move.
    pub(crate) fn best_move(&mut self, state: &State, moves: &[Move], sign: Sign) -> Option<Move> {
        let mut best: Option<(Move, f64)> = None;
        for &mv in moves {
            let score = self.score_move(state, mv, sign);
            let improves = match best {
                None => true,
                Some((_, current)) => match sign {
                    Sign::X => score > current,
                    Sign::O => score < current,
                },
            };
            if improves {
                best = Some((mv, score));
            }
        }
        best.map(|(mv, _)| mv)
    }

    /// Mean score over `moves`, zero when there are none.
    pub(crate) fn average(&mut self, state: &State, moves: &[Move], sign: Sign) -> f64 {
        if moves.is_empty() {
            return 0.0;
        }
        let total: f64 = moves
            .iter()
            .map(|&mv| self.score_move(state, mv, sign))
            .sum();
        total / moves.len() as f64
    }

    /// Leaf value if the node at `depth` is a leaf.
    fn cutoff(
        &mut self,
        state: &State,
        next: Restriction,
        depth: usize,
        maximizing: bool,
    ) -> Option<f64> {
        self.stats.nodes += 1;
        let leaf = if self.checker.check(state, META).is_decided() {
            true
        } else if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            self.stats.timed_out = true;
            true
        } else {
            depth >= self.target_depth
        };
        leaf.then(|| self.leaf_value(state, next, maximizing))
    }

    fn leaf_value(&mut self, state: &State, next: Restriction, maximizing: bool) -> f64 {
        self.evaluator
            .heuristic(self.checker, state, next, Sign::from_maximizing(maximizing))
    }

    fn children(&self, state: &State, next: Restriction) -> Vec<Move> {
        moves_in_state(state, next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::HeuristicWeights;
    use std::time::Duration;

    #[test]
    fn test_deadline_stops_a_deep_search() {
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let config = SearchConfig::alpha_beta(0).with_depth(DepthPolicy::Timed {
            budget_ms: 20,
            depth_cap: 60,
        });
        let state = State::new();
        let moves = moves_in_state(&state, Restriction::Free);
        assert_eq!(moves.len(), 81);

        let started = Instant::now();
        let mut search = Search::new(&mut checker, &mut evaluator, &config, 0);
        let chosen = search.best_move(&state, &moves, Sign::X);
        let elapsed = started.elapsed();

        let stats = search.stats();
        assert!(chosen.is_some());
        assert!(stats.timed_out);
        assert_eq!(stats.target_depth, 60);
        assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
    }

    #[test]
    fn test_untimed_search_never_times_out() {
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let config = SearchConfig::expectimax(2);
        let state = State::new();
        let moves = moves_in_state(&state, Restriction::Board(5));
        let mut search = Search::new(&mut checker, &mut evaluator, &config, 0);
        search.best_move(&state, &moves, Sign::X);
        let stats = search.stats();
        assert!(!stats.timed_out);
        assert_eq!(stats.target_depth, 2);
        // Nine root moves. Replying on the center board leaves eight cells,
        // every other reply board is empty.
        assert_eq!(stats.nodes, 9 + 8 + 8 * 9);
    }
}
