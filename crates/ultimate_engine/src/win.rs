//! Win detection using the magic-square sum test.

use crate::codec::{BoardKey, LINE_SUM};
use crate::state::{META, State};
use crate::types::{Cell, Outcome, Sign};
use std::collections::HashMap;

/// True if some three of `values` sum to [`LINE_SUM`].
///
/// Sorts a copy, then for each anchor scans the remaining suffix with two
/// pointers.
pub fn has_line(values: &[u8]) -> bool {
    if values.len() < 3 {
        return false;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let len = sorted.len();

    for anchor in 0..len - 2 {
        let (mut left, mut right) = (anchor + 1, len - 1);
        while left != right {
            let sum = sorted[anchor] + sorted[left] + sorted[right];
            match sum.cmp(&LINE_SUM) {
                std::cmp::Ordering::Less => left += 1,
                std::cmp::Ordering::Greater => right -= 1,
                std::cmp::Ordering::Equal => return true,
            }
        }
    }
    false
}

/// Memoizing win checker.
///
/// Results are keyed by board display. Every computed result is stored
/// twice: under the literal key and under the sign-inverted key with the
/// inverted outcome.
#[derive(Debug, Clone, Default)]
pub struct WinChecker {
    cache: HashMap<BoardKey, Outcome>,
}

impl WinChecker {
    /// Creates a checker with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcome of board `idx` (0 = meta-board).
    pub fn check(&mut self, state: &State, idx: usize) -> Outcome {
        if idx != META {
            match state.meta().cell(idx) {
                Cell::Marked(sign) => return Outcome::Won(sign),
                Cell::Tied => return Outcome::Tied,
                Cell::Empty => {}
            }
        }

        let board = state.board(idx);
        let key = *board.key();
        if let Some(outcome) = self.cache.get(&key) {
            return *outcome;
        }

        let outcome = if has_line(board.marks(Sign::X).as_slice()) {
            Outcome::Won(Sign::X)
        } else if has_line(board.marks(Sign::O).as_slice()) {
            Outcome::Won(Sign::O)
        } else if !key.has_empty() {
            Outcome::Tied
        } else {
            Outcome::InProgress
        };

        self.cache.insert(key, outcome);
        self.cache.insert(key.inverted(), outcome.inverted());
        outcome
    }

    /// Number of cached board displays.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    /// Drops every cached result.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}
