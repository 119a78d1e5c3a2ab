//! Expectimax: best-reply plies alternating with averaging plies.

use super::Search;
use crate::state::State;
use crate::types::{Restriction, Sign};
use crate::update::{apply_move, next_restriction};

impl Search<'_> {
    /// Expectimax value of `state`.
    ///
    /// An averaging ply plays the side given by `maximizing` and returns the
    /// mean of its children, which are best-reply plies for the other side.
    /// A best-reply ply plays its own side and hands back to an averaging
    /// ply for the opponent.
    pub(crate) fn expectimax(
        &mut self,
        state: &State,
        next: Restriction,
        depth: usize,
        maximizing: bool,
        averaging: bool,
    ) -> f64 {
        if let Some(value) = self.cutoff(state, next, depth, maximizing) {
            return value;
        }

        let moves = self.children(state, next);
        if moves.is_empty() {
            return self.leaf_value(state, next, maximizing);
        }

        let sign = Sign::from_maximizing(maximizing);
        if averaging {
            let mut total = 0.0;
            for &mv in &moves {
                let (child, _) = apply_move(self.checker, state, mv.board, mv.cell, sign);
                let reply = next_restriction(&child, mv.cell);
                total += self.expectimax(&child, reply, depth + 1, !maximizing, false);
            }
            return total / moves.len() as f64;
        }

        let mut best = if maximizing {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
        for mv in moves {
            let (child, _) = apply_move(self.checker, state, mv.board, mv.cell, sign);
            let reply = next_restriction(&child, mv.cell);
            let value = self.expectimax(&child, reply, depth + 1, !maximizing, true);
            best = if maximizing {
                best.max(value)
            } else {
                best.min(value)
            };
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use crate::heuristic::{Evaluator, HeuristicWeights};
    use crate::search::{Search, SearchConfig};
    use crate::state::State;
    use crate::types::{Move, Restriction, Sign};
    use crate::update::{apply_move, next_restriction};
    use crate::win::WinChecker;

    #[test]
    fn test_averaging_ply_is_the_mean_of_children() {
        let state = State::from_sub_boards([
            "XO-------", "---------", "---------", "---------", "---------", "---------",
            "---------", "---------", "---------",
        ])
        .expect("valid boards");
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());

        // Children of an averaging X ply at depth 0 are cut at depth 1.
        let children: Vec<Move> = (3..=9).map(|cell| Move::new(1, cell)).collect();
        let mut sum = 0.0;
        for mv in &children {
            let (child, _) = apply_move(&mut checker, &state, mv.board, mv.cell, Sign::X);
            let next = next_restriction(&child, mv.cell);
            sum += evaluator.heuristic(&mut checker, &child, next, Sign::O);
        }
        let expected = sum / children.len() as f64;

        let config = SearchConfig::expectimax(1);
        let mut search = Search::new(&mut checker, &mut evaluator, &config, 1);
        let value = search.expectimax(&state, Restriction::Board(1), 0, true, true);
        assert!((value - expected).abs() < 1e-9);
    }

    #[test]
    fn test_expectimax_takes_an_immediate_win() {
        let state = State::from_sub_boards([
            "---------", "O--------", "---------", "---------", "XX-------", "---------",
            "---------", "O--------", "---------",
        ])
        .expect("valid boards");
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let config = SearchConfig::expectimax(1);
        let mut search = Search::new(&mut checker, &mut evaluator, &config, 2);
        let moves: Vec<Move> = (3..=9).map(|cell| Move::new(5, cell)).collect();
        assert_eq!(search.best_move(&state, &moves, Sign::X), Some(Move::new(5, 3)));
    }
}
