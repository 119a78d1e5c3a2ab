//! Positional heuristic for sub-boards and whole positions.
//!
//! Sub-board scores are computed from the evaluated sign's point of view
//! and then signed: positive favors X, negative favors O. A position's score
//! is the sum over the nine sub-boards of (X score + O score), each scaled by
//! the sub-board's weight class.

use crate::codec::{BoardKey, LINE_SUM};
use crate::state::{META, State};
use crate::types::{Outcome, Restriction, Sign};
use crate::win::WinChecker;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Magic-square values of the four corner cells.
const CORNER_VALUES: [u8; 4] = [2, 4, 6, 8];
/// Magic-square value of the center cell.
const CENTER_VALUE: u8 = 5;
/// Corners plus center: the cells that can take part in a fork.
const FORK_VALUES: [u8; 5] = [2, 4, 6, 8, 5];
/// Marks needed on fork cells to earn the fork bonus.
const FORK_THRESHOLD: usize = 3;

/// Tunable weights.
///
/// Defaults are the hand-tuned values the engine plays with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Own mark on the center cell.
    pub center: i32,
    /// Own mark on a corner cell.
    pub corner: i32,
    /// Empty cell completing a line with two own marks.
    pub two_in_row: i32,
    /// At least three own marks among corners and center.
    pub fork: i32,
    /// Own mark sitting on a line with two opposing marks.
    pub blocking: i32,
    /// Won game. A won sub-board is worth half of this.
    pub win: i32,
    /// Tied game or sub-board.
    pub tie: i32,
    /// Charged to X (credited to O) when the next mover is unrestricted.
    pub free_move_penalty: f64,
    /// Scale of the center sub-board.
    pub scale_center: f64,
    /// Scale of corner sub-boards (1, 3, 7, 9).
    pub scale_corner: f64,
    /// Scale of edge sub-boards (2, 4, 6, 8).
    pub scale_edge: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            center: 40,
            corner: 16,
            two_in_row: 56,
            fork: 80,
            blocking: 40,
            win: 1000,
            tie: 0,
            free_move_penalty: 0.0,
            scale_center: 0.2,
            scale_corner: 0.15,
            scale_edge: 0.05,
        }
    }
}

impl HeuristicWeights {
    /// Scale applied to sub-board `idx`.
    pub fn scale(&self, idx: usize) -> f64 {
        match idx {
            5 => self.scale_center,
            1 | 3 | 7 | 9 => self.scale_corner,
            _ => self.scale_edge,
        }
    }
}

/// Greedy count of pairs in `values` that complete a line with `anchor`.
///
/// `values` must be sorted ascending. Each round two-pointer scans the
/// remaining values for a pair summing to `15 - anchor`; a found pair scores
/// `gain` and is removed, and the first round that finds nothing ends the
/// count. This is an approximation, not an enumeration of every pair.
pub fn row_score(anchor: u8, values: &[u8], gain: i32) -> i32 {
    let mut pool = values.to_vec();
    let mut score = 0;

    'rounds: while pool.len() >= 2 {
        let (mut left, mut right) = (0, pool.len() - 1);
        loop {
            match (anchor + pool[left] + pool[right]).cmp(&LINE_SUM) {
                std::cmp::Ordering::Less => left += 1,
                std::cmp::Ordering::Greater => right -= 1,
                std::cmp::Ordering::Equal => {
                    score += gain;
                    pool.remove(right);
                    pool.remove(left);
                    continue 'rounds;
                }
            }
            if left == right {
                break 'rounds;
            }
        }
    }
    score
}

/// Memoizing position evaluator.
///
/// Caches the combined X+O score of each sub-board display, storing the
/// negated score under the sign-inverted display as well.
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: HeuristicWeights,
    cache: HashMap<BoardKey, i32>,
}

impl Evaluator {
    /// Creates an evaluator with an empty cache.
    pub fn new(weights: HeuristicWeights) -> Self {
        Self {
            weights,
            cache: HashMap::new(),
        }
    }

    /// Weights in use.
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }

    /// Number of cached sub-board displays.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached score.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Score of board `idx` as seen by `sign`, signed toward X.
    ///
    /// Decided boards short-circuit: a tie scores [`HeuristicWeights::tie`],
    /// a win half of [`HeuristicWeights::win`] signed by the winner.
    pub fn evaluate_sub_board(
        &self,
        checker: &mut WinChecker,
        state: &State,
        idx: usize,
        sign: Sign,
    ) -> i32 {
        let w = &self.weights;
        match checker.check(state, idx) {
            Outcome::Tied => return w.tie,
            Outcome::Won(Sign::X) => return w.win / 2,
            Outcome::Won(Sign::O) => return -(w.win / 2),
            Outcome::InProgress => {}
        }

        let board = state.board(idx);
        let own = board.marks(sign).sorted();
        let other = board.marks(sign.opponent()).sorted();
        let empty: Vec<u8> = (1..=9u8)
            .filter(|v| !own.contains(v) && !other.contains(v))
            .collect();

        let mut score = 0;
        for &value in &own {
            if CORNER_VALUES.contains(&value) {
                score += w.corner;
            } else if value == CENTER_VALUE {
                score += w.center;
            }
            score += row_score(value, &other, w.blocking);
        }
        for &value in &empty {
            score += row_score(value, &own, w.two_in_row);
        }
        if own.iter().filter(|v| FORK_VALUES.contains(v)).count() >= FORK_THRESHOLD {
            score += w.fork;
        }

        match sign {
            Sign::X => score,
            Sign::O => -score,
        }
    }

    /// Combined X and O score of sub-board `idx`, memoized by display.
    pub fn board_score(&mut self, checker: &mut WinChecker, state: &State, idx: usize) -> i32 {
        let key = *state.board(idx).key();
        if let Some(score) = self.cache.get(&key) {
            return *score;
        }
        let score = self.evaluate_sub_board(checker, state, idx, Sign::X)
            + self.evaluate_sub_board(checker, state, idx, Sign::O);
        self.cache.insert(key, score);
        self.cache.insert(key.inverted(), -score);
        score
    }

    /// Heuristic value of a whole position, positive favoring X.
    ///
    /// `next` is the restriction the next mover faces and `sign` the side
    /// the position is scored for; both only affect the free-move
    /// adjustment. A decided game returns the fixed win/tie magnitudes.
    pub fn heuristic(
        &mut self,
        checker: &mut WinChecker,
        state: &State,
        next: Restriction,
        sign: Sign,
    ) -> f64 {
        match checker.check(state, META) {
            Outcome::Tied => return f64::from(self.weights.tie),
            Outcome::Won(winner) => return f64::from(self.weights.win) * winner.polarity(),
            Outcome::InProgress => {}
        }

        let mut score = 0.0;
        for idx in 1..=9 {
            let board = self.board_score(checker, state, idx);
            score += f64::from(board) * self.weights.scale(idx);
        }

        let free = match next {
            Restriction::Free => true,
            Restriction::Board(board) => state.is_board_closed(board),
        };
        if free {
            score -= self.weights.free_move_penalty * sign.polarity();
        }
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    fn state_with(idx: usize, cells: &str) -> State {
        let mut boards = ["---------"; 9];
        boards[idx - 1] = cells;
        State::from_sub_boards(boards).expect("valid boards")
    }

    #[test]
    fn test_row_score_single_pair() {
        // 5 + 2 + 8 = 15
        assert_eq!(row_score(5, &[2, 8], 10), 10);
        assert_eq!(row_score(5, &[2, 7], 10), 0);
        assert_eq!(row_score(5, &[2], 10), 0);
    }

    #[test]
    fn test_row_score_consumes_pairs() {
        // Anchor 5 pairs with (1,9), (2,8), (3,7), (4,6).
        assert_eq!(row_score(5, &[1, 2, 3, 4, 6, 7, 8, 9], 1), 4);
    }

    #[test]
    fn test_row_score_stops_at_first_barren_round() {
        // (4,6) pairs, then 1 and 3 cannot pair with anchor 5.
        assert_eq!(row_score(5, &[1, 3, 4, 6], 1), 1);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let mut checker = WinChecker::new();
        let evaluator = Evaluator::new(HeuristicWeights::default());
        let state = State::new();
        for idx in 1..=9 {
            assert_eq!(evaluator.evaluate_sub_board(&mut checker, &state, idx, Sign::X), 0);
            assert_eq!(evaluator.evaluate_sub_board(&mut checker, &state, idx, Sign::O), 0);
        }
    }

    #[test]
    fn test_center_and_corner_bonuses() {
        let mut checker = WinChecker::new();
        let evaluator = Evaluator::new(HeuristicWeights::default());
        let w = HeuristicWeights::default();

        let center = state_with(1, "----X----");
        assert_eq!(evaluator.evaluate_sub_board(&mut checker, &center, 1, Sign::X), w.center);

        let corner = state_with(1, "O--------");
        assert_eq!(evaluator.evaluate_sub_board(&mut checker, &corner, 1, Sign::O), -w.corner);
    }

    #[test]
    fn test_two_in_row_and_block() {
        let mut checker = WinChecker::new();
        let evaluator = Evaluator::new(HeuristicWeights::default());
        let w = HeuristicWeights::default();

        // X on 1 and 2 threatens 3; O on 3 blocks.
        let state = state_with(1, "XXO------");
        let x = evaluator.evaluate_sub_board(&mut checker, &state, 1, Sign::X);
        let o = evaluator.evaluate_sub_board(&mut checker, &state, 1, Sign::O);
        assert_eq!(x, w.corner);
        assert_eq!(o, -(w.corner + w.blocking));
    }

    #[test]
    fn test_fork_bonus() {
        let mut checker = WinChecker::new();
        let evaluator = Evaluator::new(HeuristicWeights::default());
        let w = HeuristicWeights::default();

        // X holds corners 1 and 3 and the center, with every line through
        // them broken by O, so only the placement and fork terms apply.
        let state = state_with(2, "XOX-X-O-O");
        let x = evaluator.evaluate_sub_board(&mut checker, &state, 2, Sign::X);
        assert_eq!(x, 2 * w.corner + w.center + w.fork);
    }

    #[test]
    fn test_decided_boards_short_circuit() {
        let mut checker = WinChecker::new();
        let evaluator = Evaluator::new(HeuristicWeights::default());
        let won = state_with(3, "OOO-XX-X-");
        assert_eq!(evaluator.evaluate_sub_board(&mut checker, &won, 3, Sign::X), -500);
        assert_eq!(evaluator.evaluate_sub_board(&mut checker, &won, 3, Sign::O), -500);

        let tied = state_with(3, "XOXXOOOXX");
        assert_eq!(evaluator.evaluate_sub_board(&mut checker, &tied, 3, Sign::O), 0);
    }

    #[test]
    fn test_board_score_symmetry_and_cache() {
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let state = state_with(4, "X-O-X----");
        let inverted = state_with(4, "O-X-O----");

        let score = evaluator.board_score(&mut checker, &state, 4);
        assert_eq!(evaluator.cached(), 2);
        assert_eq!(evaluator.board_score(&mut checker, &inverted, 4), -score);
        assert_eq!(evaluator.cached(), 2);

        let mut fresh = Evaluator::new(HeuristicWeights::default());
        assert_eq!(fresh.board_score(&mut checker, &inverted, 4), -score);
    }

    #[test]
    fn test_heuristic_on_empty_state_is_zero() {
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let state = State::new();
        for sign in [Sign::X, Sign::O] {
            assert_eq!(evaluator.heuristic(&mut checker, &state, Restriction::Free, sign), 0.0);
        }
    }

    #[test]
    fn test_heuristic_scales_by_board_class() {
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let w = HeuristicWeights::default();

        let center = state_with(5, "----X----");
        let edge = state_with(2, "----X----");
        let h_center = evaluator.heuristic(&mut checker, &center, Restriction::Board(5), Sign::O);
        let h_edge = evaluator.heuristic(&mut checker, &edge, Restriction::Board(5), Sign::O);
        assert!((h_center - f64::from(w.center) * w.scale_center).abs() < 1e-9);
        assert!((h_edge - f64::from(w.center) * w.scale_edge).abs() < 1e-9);
    }

    #[test]
    fn test_free_move_penalty() {
        let mut checker = WinChecker::new();
        let weights = HeuristicWeights {
            free_move_penalty: 2.0,
            ..HeuristicWeights::default()
        };
        let mut evaluator = Evaluator::new(weights);
        let state = State::new();
        assert_eq!(evaluator.heuristic(&mut checker, &state, Restriction::Free, Sign::X), -2.0);
        assert_eq!(evaluator.heuristic(&mut checker, &state, Restriction::Free, Sign::O), 2.0);
        assert_eq!(evaluator.heuristic(&mut checker, &state, Restriction::Board(1), Sign::X), 0.0);
    }

    #[test]
    fn test_game_win_short_circuits() {
        let mut checker = WinChecker::new();
        let mut evaluator = Evaluator::new(HeuristicWeights::default());
        let mut meta = Board::new();
        for board in [1, 5, 9] {
            meta.place(board, Sign::O);
        }
        let state = State::new().with_meta(meta);
        assert_eq!(evaluator.heuristic(&mut checker, &state, Restriction::Free, Sign::X), -1000.0);
    }
}
