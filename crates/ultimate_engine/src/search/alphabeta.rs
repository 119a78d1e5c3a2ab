//! Minimax with alpha-beta pruning.

use super::Search;
use crate::state::State;
use crate::types::{Restriction, Sign};
use crate::update::{apply_move, next_restriction};

impl Search<'_> {
    /// Minimax value of `state` with `next` restricting the side to move.
    ///
    /// X is the maximizing side. Siblings stop being explored as soon as
    /// `alpha >= beta`.
    pub(crate) fn alpha_beta(
        &mut self,
        state: &State,
        next: Restriction,
        depth: usize,
        mut alpha: f64,
        mut beta: f64,
        maximizing: bool,
    ) -> f64 {
        if let Some(value) = self.cutoff(state, next, depth, maximizing) {
            return value;
        }

        let moves = self.children(state, next);
        if moves.is_empty() {
            return self.leaf_value(state, next, maximizing);
        }

        let sign = Sign::from_maximizing(maximizing);
        if maximizing {
            let mut best = f64::NEG_INFINITY;
            for mv in moves {
                let (child, _) = apply_move(self.checker, state, mv.board, mv.cell, sign);
                let reply = next_restriction(&child, mv.cell);
                let value = self.alpha_beta(&child, reply, depth + 1, alpha, beta, false);
                best = best.max(value);
                alpha = alpha.max(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        } else {
            let mut best = f64::INFINITY;
            for mv in moves {
                let (child, _) = apply_move(self.checker, state, mv.board, mv.cell, sign);
                let reply = next_restriction(&child, mv.cell);
                let value = self.alpha_beta(&child, reply, depth + 1, alpha, beta, true);
                best = best.min(value);
                beta = beta.min(best);
                if alpha >= beta {
                    break;
                }
            }
            best
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::heuristic::{Evaluator, HeuristicWeights};
    use crate::legal::moves_in_state;
    use crate::search::{Search, SearchConfig};
    use crate::state::{META, State};
    use crate::types::{Move, Restriction, Sign};
    use crate::update::{apply_move, next_restriction};
    use crate::win::WinChecker;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;

    /// Minimax without pruning, sharing the search's cutoff rule.
    fn minimax(
        search: &mut Search<'_>,
        state: &State,
        next: Restriction,
        depth: usize,
        maximizing: bool,
    ) -> f64 {
        if let Some(value) = search.cutoff(state, next, depth, maximizing) {
            return value;
        }
        let moves = search.children(state, next);
        if moves.is_empty() {
            return search.leaf_value(state, next, maximizing);
        }
        let sign = Sign::from_maximizing(maximizing);
        let values = moves.into_iter().map(|mv| {
            let (child, _) = apply_move(search.checker, state, mv.board, mv.cell, sign);
            let reply = next_restriction(&child, mv.cell);
            minimax(search, &child, reply, depth + 1, !maximizing)
        });
        let values: Vec<f64> = values.collect();
        if maximizing {
            values.into_iter().fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.into_iter().fold(f64::INFINITY, f64::min)
        }
    }

    /// A position reached by `plies` random moves, with its restriction and
    /// side to move, or `None` if the game ended on the way.
    fn random_position(
        checker: &mut WinChecker,
        rng: &mut StdRng,
        plies: usize,
    ) -> Option<(State, Restriction, Sign)> {
        let (mut state, mut next, mut sign) = (State::new(), Restriction::Free, Sign::X);
        for _ in 0..plies {
            let mv = *moves_in_state(&state, next).choose(rng)?;
            state = apply_move(checker, &state, mv.board, mv.cell, sign).0;
            next = next_restriction(&state, mv.cell);
            sign = sign.opponent();
            if checker.check(&state, META).is_decided() {
                return None;
            }
        }
        Some((state, next, sign))
    }

    #[test]
    fn test_depth_zero_is_the_heuristic() {
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let state = State::from_sub_boards([
            "X--------", "---------", "---------", "---------", "----O----", "---------",
            "---------", "---------", "---------",
        ])
        .expect("valid boards");
        let expected = evaluator.heuristic(&mut checker, &state, Restriction::Board(1), Sign::X);

        let config = SearchConfig::alpha_beta(0);
        let mut search = Search::new(&mut checker, &mut evaluator, &config, 1);
        let value = search.alpha_beta(
            &state,
            Restriction::Board(1),
            0,
            f64::NEG_INFINITY,
            f64::INFINITY,
            true,
        );
        assert_eq!(value, expected);
        assert_eq!(search.stats().nodes, 1);
    }

    #[test]
    fn test_pruning_matches_plain_minimax_choice() {
        // X threatens the top row of board 5; O is elsewhere.
        let state = State::from_sub_boards([
            "---------", "O--------", "---------", "---------", "XX-------", "---------",
            "---------", "O--------", "---------",
        ])
        .expect("valid boards");
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let config = SearchConfig::alpha_beta(2);
        let mut search = Search::new(&mut checker, &mut evaluator, &config, 2);
        let moves: Vec<Move> = (3..=9).map(|cell| Move::new(5, cell)).collect();
        assert_eq!(search.best_move(&state, &moves, Sign::X), Some(Move::new(5, 3)));
    }

    #[test]
    fn test_pruning_never_changes_the_value() {
        let mut rng = StdRng::seed_from_u64(30);
        let mut checked = 0;
        while checked < 12 {
            let mut checker = WinChecker::new();
            let plies = 10 + checked * 2;
            let Some((state, next, sign)) = random_position(&mut checker, &mut rng, plies) else {
                continue;
            };
            let mut evaluator = Evaluator::new(HeuristicWeights::default());
            let config = SearchConfig::alpha_beta(3);
            let maximizing = sign.is_maximizing();

            let mut search = Search::new(&mut checker, &mut evaluator, &config, 0);
            let pruned = search.alpha_beta(
                &state,
                next,
                0,
                f64::NEG_INFINITY,
                f64::INFINITY,
                maximizing,
            );
            let pruned_nodes = search.stats().nodes;

            let mut search = Search::new(&mut checker, &mut evaluator, &config, 0);
            let full = minimax(&mut search, &state, next, 0, maximizing);
            assert_eq!(pruned, full, "after {plies} plies, {sign} to move");
            assert!(pruned_nodes <= search.stats().nodes);
            checked += 1;
        }
    }
}
