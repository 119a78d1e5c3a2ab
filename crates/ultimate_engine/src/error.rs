//! Error types for move validation and coordinate parsing.

use crate::types::{Move, Sign};

/// Error returned when a move is rejected by [`Game::make_move`](crate::Game::make_move).
///
/// The raw transition [`apply_move`](crate::apply_move) never produces these;
/// it trusts its caller.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// The game is already decided.
    #[display("Game is already over")]
    GameOver,

    /// It's not this sign's turn.
    #[display("It's not {_0}'s turn")]
    WrongPlayer(#[error(not(source))] Sign),

    /// Board or cell index outside 1-9.
    #[display("Move ({board}, {cell}) is outside the board")]
    OutOfRange {
        /// Requested sub-board.
        board: usize,
        /// Requested cell.
        cell: usize,
    },

    /// Not among the currently legal moves.
    #[display("Move {_0} is not legal here")]
    IllegalMove(#[error(not(source))] Move),
}

/// Error parsing a textual coordinate.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CoordError {
    /// Input is not two whitespace-separated integers.
    #[display("Expected two numbers, got {_0:?}")]
    Malformed(#[error(not(source))] String),

    /// Board/cell pair outside 1-9.
    #[display("Board and cell must be 1-9, got ({board}, {cell})")]
    OutOfRange {
        /// Parsed board.
        board: usize,
        /// Parsed cell.
        cell: usize,
    },

    /// Row/column pair outside 0-8.
    #[display("Row and column must be 0-8, got ({row}, {col})")]
    OutOfGrid {
        /// Parsed row.
        row: usize,
        /// Parsed column.
        col: usize,
    },
}
