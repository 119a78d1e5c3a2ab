//! Pure state transition for a single move.

use crate::state::{META, State};
use crate::types::{Outcome, Restriction, Sign};
use crate::win::WinChecker;

/// Plays `sign` at `cell` of sub-board `board` and returns the new state
/// together with whether that sub-board is now decided.
///
/// When the sub-board is won, the winner's marks on the meta-board gain the
/// sub-board's own magic-square value, so the meta-board is checked with
/// the same sum test. Legality is not checked.
pub fn apply_move(
    checker: &mut WinChecker,
    state: &State,
    board: usize,
    cell: usize,
    sign: Sign,
) -> (State, bool) {
    let mut next = *state;
    next.board_mut(board).place(cell, sign);

    match checker.check(&next, board) {
        Outcome::Won(winner) => {
            next.board_mut(META).place(board, winner);
            (next, true)
        }
        Outcome::Tied => {
            next.board_mut(META).place_tie(board);
            (next, true)
        }
        Outcome::InProgress => (next, false),
    }
}

/// Restriction for the reply to a move played in `cell`.
///
/// The reply must go to the sub-board with the same index, unless that
/// sub-board is already decided.
pub fn next_restriction(state: &State, cell: usize) -> Restriction {
    if state.is_board_closed(cell) {
        Restriction::Free
    } else {
        Restriction::Board(cell)
    }
}
