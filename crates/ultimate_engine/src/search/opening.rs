//! Opening shortcuts that skip the search.

use crate::state::State;
use crate::types::{Move, Restriction, Sign};
use rand::Rng;

/// Move to play without searching, if one applies.
///
/// X's very first move takes the center of the center board, or a uniformly
/// random cell when `randomize` is set. Being sent to an untouched board
/// means playing that board's matching cell, which sends the opponent back
/// to the same board.
///
/// The caller still has to check the result against the legal moves.
pub fn opening_move<R: Rng + ?Sized>(
    state: &State,
    restriction: Restriction,
    sign: Sign,
    randomize: bool,
    rng: &mut R,
) -> Option<Move> {
    if sign == Sign::X && state.marks_placed(Sign::X) == 0 {
        return Some(if randomize {
            Move::new(rng.gen_range(1..=9), rng.gen_range(1..=9))
        } else {
            Move::new(5, 5)
        });
    }
    match restriction {
        Restriction::Board(board) if state.board(board).is_untouched() => {
            Some(Move::new(board, board))
        }
        _ => None,
    }
}
