//! Legal-move tracking.

use crate::state::State;
use crate::types::{Move, Restriction};
use tracing::{debug, instrument};

/// Bits 1-9 set: every cell open.
const ALL_OPEN: u16 = 0b11_1111_1110;

/// Open cells per sub-board for one game.
///
/// Starts with every cell open, only ever shrinks, and is reset when a new
/// game begins. One tracker per game; it is shared by both players because
/// legality is a property of the game, not of a side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegalMoves {
    open: [u16; 10],
}

impl LegalMoves {
    /// Creates a tracker with every cell open.
    pub fn new() -> Self {
        let mut open = [ALL_OPEN; 10];
        open[0] = 0;
        Self { open }
    }

    /// Reopens every cell for a new game.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        debug!("Resetting legal moves");
        *self = Self::new();
    }

    /// Records a played move.
    ///
    /// A completed sub-board loses all of its cells; otherwise only the
    /// played cell is closed.
    pub fn remove(&mut self, board: usize, cell: usize, completed: bool) {
        if completed {
            self.open[board] = 0;
        } else {
            self.open[board] &= !(1 << cell);
        }
    }

    /// True if `cell` of `board` is still open.
    pub fn is_open(&self, board: usize, cell: usize) -> bool {
        self.open[board] & (1 << cell) != 0
    }

    /// Open cells of `board` in ascending order.
    pub fn open_cells(&self, board: usize) -> impl Iterator<Item = usize> + '_ {
        (1..=9).filter(move |&cell| self.is_open(board, cell))
    }

    /// Number of open cells of `board`.
    pub fn open_count(&self, board: usize) -> usize {
        self.open[board].count_ones() as usize
    }

    /// Every legal move under `restriction`, ordered by board then cell.
    ///
    /// A restriction pointing at a board with no open cells is treated as
    /// free.
    pub fn moves_for(&self, restriction: Restriction) -> Vec<Move> {
        match restriction {
            Restriction::Board(board) if self.open[board] != 0 => self
                .open_cells(board)
                .map(|cell| Move::new(board, cell))
                .collect(),
            _ => (1..=9)
                .flat_map(|board| self.open_cells(board).map(move |cell| Move::new(board, cell)))
                .collect(),
        }
    }

    /// True if `mv` is among [`LegalMoves::moves_for`]`(restriction)`.
    pub fn allows(&self, restriction: Restriction, mv: Move) -> bool {
        if !(1..=9).contains(&mv.board) || !(1..=9).contains(&mv.cell) {
            return false;
        }
        match restriction {
            Restriction::Board(board) if self.open[board] != 0 => {
                mv.board == board && self.is_open(board, mv.cell)
            }
            _ => self.is_open(mv.board, mv.cell),
        }
    }
}

impl Default for LegalMoves {
    fn default() -> Self {
        Self::new()
    }
}

/// Legal moves read straight from a state.
///
/// Used inside search, where positions are hypothetical and the game's
/// tracker does not follow them. Agrees with a tracker kept in step with the
/// same game.
pub fn moves_in_state(state: &State, restriction: Restriction) -> Vec<Move> {
    match restriction {
        Restriction::Board(board) if !state.is_board_closed(board) => state
            .board(board)
            .key()
            .empty_cells()
            .map(|cell| Move::new(board, cell))
            .collect(),
        _ => (1..=9)
            .filter(|&board| !state.is_board_closed(board))
            .flat_map(|board| {
                state
                    .board(board)
                    .key()
                    .empty_cells()
                    .map(move |cell| Move::new(board, cell))
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sign;
    use crate::update::apply_move;
    use crate::win::WinChecker;

    #[test]
    fn test_new_tracker_is_full() {
        let legal = LegalMoves::new();
        assert_eq!(legal.moves_for(Restriction::Free).len(), 81);
        assert_eq!(legal.moves_for(Restriction::Board(4)).len(), 9);
        assert_eq!(legal.open_count(0), 0);
    }

    #[test]
    fn test_restricted_moves_stay_in_board() {
        let legal = LegalMoves::new();
        let moves = legal.moves_for(Restriction::Board(5));
        assert_eq!(moves, (1..=9).map(|c| Move::new(5, c)).collect::<Vec<_>>());
    }

    #[test]
    fn test_remove_single_cell() {
        let mut legal = LegalMoves::new();
        legal.remove(3, 5, false);
        assert!(!legal.is_open(3, 5));
        assert_eq!(legal.open_count(3), 8);
        assert_eq!(legal.moves_for(Restriction::Free).len(), 80);
    }

    #[test]
    fn test_remove_completed_board() {
        let mut legal = LegalMoves::new();
        legal.remove(2, 1, true);
        assert_eq!(legal.open_count(2), 0);
        assert!(legal.moves_for(Restriction::Free).iter().all(|m| m.board != 2));
        // Pointing at a finished board frees the mover.
        assert_eq!(legal.moves_for(Restriction::Board(2)).len(), 72);
    }

    #[test]
    fn test_reset_restores_everything() {
        let mut legal = LegalMoves::new();
        legal.remove(1, 1, false);
        legal.remove(9, 9, true);
        legal.reset();
        assert_eq!(legal, LegalMoves::new());
    }

    #[test]
    fn test_allows() {
        let mut legal = LegalMoves::new();
        legal.remove(4, 4, false);
        assert!(legal.allows(Restriction::Board(4), Move::new(4, 5)));
        assert!(!legal.allows(Restriction::Board(4), Move::new(4, 4)));
        assert!(!legal.allows(Restriction::Board(4), Move::new(5, 5)));
        assert!(legal.allows(Restriction::Free, Move::new(5, 5)));
        assert!(!legal.allows(Restriction::Free, Move::new(0, 5)));
        assert!(!legal.allows(Restriction::Free, Move::new(5, 10)));
    }

    #[test]
    fn test_state_moves_agree_with_tracker() {
        let mut checker = WinChecker::new();
        let mut legal = LegalMoves::new();
        let mut state = State::new();
        let plays = [(5, 1, Sign::X), (1, 5, Sign::O), (5, 5, Sign::X), (5, 2, Sign::O), (5, 9, Sign::X)];
        for (board, cell, sign) in plays {
            let (next, done) = apply_move(&mut checker, &state, board, cell, sign);
            legal.remove(board, cell, done);
            state = next;
        }
        assert!(state.is_board_closed(5));
        for restriction in [Restriction::Free, Restriction::Board(1), Restriction::Board(5)] {
            assert_eq!(moves_in_state(&state, restriction), legal.moves_for(restriction));
        }
    }
}
