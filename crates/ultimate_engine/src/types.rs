//! Core domain types for ultimate tic-tac-toe.

use serde::{Deserialize, Serialize};

/// Side to move.
///
/// X always opens the game and is the maximizing side in search; O is the
/// minimizing side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum Sign {
    /// Player X (goes first, maximizes).
    X,
    /// Player O (goes second, minimizes).
    O,
}

impl Sign {
    /// Returns the opponent sign.
    pub fn opponent(self) -> Self {
        match self {
            Sign::X => Sign::O,
            Sign::O => Sign::X,
        }
    }

    /// True for the side that maximizes the evaluation.
    pub fn is_maximizing(self) -> bool {
        self == Sign::X
    }

    /// The side whose turn it is in a search node.
    pub fn from_maximizing(is_maximizing: bool) -> Self {
        if is_maximizing { Sign::X } else { Sign::O }
    }

    /// Display character used in board keys.
    pub fn symbol(self) -> u8 {
        match self {
            Sign::X => b'X',
            Sign::O => b'O',
        }
    }

    /// `1.0` for X, `-1.0` for O.
    pub fn polarity(self) -> f64 {
        match self {
            Sign::X => 1.0,
            Sign::O => -1.0,
        }
    }
}

/// Contents of a single cell.
///
/// `Tied` only appears on the meta-board, where a cell stands for a
/// finished sub-board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Nothing played here yet.
    Empty,
    /// Occupied by a sign.
    Marked(Sign),
    /// Sub-board ended without a winner.
    Tied,
}

/// Result of checking a board, sub- or meta-.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Outcome {
    /// A sign has three in a row.
    #[display("{_0} wins")]
    Won(Sign),
    /// The board is full with no three in a row.
    #[display("Tie")]
    Tied,
    /// Still playable.
    #[display("In progress")]
    InProgress,
}

impl Outcome {
    /// True once the board can no longer change.
    pub fn is_decided(self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(self) -> Option<Sign> {
        match self {
            Outcome::Won(sign) => Some(sign),
            _ => None,
        }
    }

    /// The same outcome with X and O swapped.
    pub fn inverted(self) -> Self {
        match self {
            Outcome::Won(sign) => Outcome::Won(sign.opponent()),
            other => other,
        }
    }
}

/// A move: a cell (1-9) inside a sub-board (1-9).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({board}, {cell})")]
pub struct Move {
    /// Sub-board index, 1-9.
    pub board: usize,
    /// Cell index inside the sub-board, 1-9.
    pub cell: usize,
}

impl Move {
    /// Creates a new move.
    pub fn new(board: usize, cell: usize) -> Self {
        Self { board, cell }
    }
}

/// Which sub-board the next move must be played in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Restriction {
    /// Any undecided sub-board may be played.
    #[default]
    Free,
    /// Only the given sub-board (1-9) may be played.
    Board(usize),
}

impl Restriction {
    /// Returns the restricted board, if any.
    pub fn board(self) -> Option<usize> {
        match self {
            Restriction::Free => None,
            Restriction::Board(board) => Some(board),
        }
    }

    /// True when the next player may choose any open sub-board.
    pub fn is_free(self) -> bool {
        matches!(self, Restriction::Free)
    }
}

impl std::fmt::Display for Restriction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Restriction::Free => write!(f, "any board"),
            Restriction::Board(board) => write!(f, "board {board}"),
        }
    }
}
