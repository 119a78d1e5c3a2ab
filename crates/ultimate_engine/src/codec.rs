//! Magic-square encoding of board positions and display keys.
//!
//! Cells are numbered 1-9 in row-major order. Each cell maps to a value of
//! the 3x3 Lo Shu square:
//!
//! ```text
//! 2 7 6
//! 9 5 1
//! 4 3 8
//! ```
//!
//! Three distinct cells form a row, column or diagonal exactly when their
//! values sum to [`LINE_SUM`], which turns line detection into a
//! three-sum search over the occupied values.

use crate::error::CoordError;
use crate::types::{Cell, Move, Sign};
use serde::{Deserialize, Serialize};

/// Magic-square value of each cell. Index 0 is unused.
pub const MAGIC_SQUARE: [u8; 10] = [0, 2, 7, 6, 9, 5, 1, 4, 3, 8];

/// Sum of the values of any winning line.
pub const LINE_SUM: u8 = 15;

/// Board-type marker stored at index 0 of every key.
pub const MARKER: u8 = b'/';
/// Display character of an empty cell.
pub const EMPTY: u8 = b'-';
/// Display character of a tied sub-board on the meta-board.
pub const TIE: u8 = b'T';

/// Magic-square value of a cell index (1-9).
pub fn magic(cell: usize) -> u8 {
    MAGIC_SQUARE[cell]
}

/// Display of one board, used as the cache key for win checks and
/// evaluations.
///
/// Byte 0 is [`MARKER`]; bytes 1-9 hold `-`, `X`, `O` or (meta-board only)
/// `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardKey([u8; 10]);

impl BoardKey {
    /// Key of an empty board.
    pub const fn empty() -> Self {
        Self([MARKER, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY, EMPTY])
    }

    /// Builds a key from its ten display characters.
    ///
    /// Returns `None` unless the first byte is the marker and every other
    /// byte is one of `-XOT`.
    pub fn from_bytes(bytes: [u8; 10]) -> Option<Self> {
        let valid = bytes[0] == MARKER
            && bytes[1..]
                .iter()
                .all(|&b| matches!(b, EMPTY | b'X' | b'O' | TIE));
        valid.then_some(Self(bytes))
    }

    /// Raw display characters.
    pub fn bytes(&self) -> &[u8; 10] {
        &self.0
    }

    /// Contents of cell `idx` (1-9).
    pub fn cell(&self, idx: usize) -> Cell {
        match self.0[idx] {
            b'X' => Cell::Marked(Sign::X),
            b'O' => Cell::Marked(Sign::O),
            TIE => Cell::Tied,
            _ => Cell::Empty,
        }
    }

    /// Overwrites cell `idx` (1-9).
    pub fn set(&mut self, idx: usize, cell: Cell) {
        self.0[idx] = match cell {
            Cell::Empty => EMPTY,
            Cell::Marked(sign) => sign.symbol(),
            Cell::Tied => TIE,
        };
    }

    /// True if cell `idx` is empty.
    pub fn is_empty_at(&self, idx: usize) -> bool {
        self.0[idx] == EMPTY
    }

    /// Number of empty cells.
    pub fn empty_count(&self) -> usize {
        self.0[1..].iter().filter(|&&b| b == EMPTY).count()
    }

    /// True if at least one cell is empty.
    pub fn has_empty(&self) -> bool {
        self.0[1..].contains(&EMPTY)
    }

    /// Indices (1-9) of empty cells in ascending order.
    pub fn empty_cells(&self) -> impl Iterator<Item = usize> + '_ {
        (1..=9).filter(|&idx| self.0[idx] == EMPTY)
    }

    /// Number of cells holding `sign`.
    pub fn count(&self, sign: Sign) -> usize {
        let symbol = sign.symbol();
        self.0[1..].iter().filter(|&&b| b == symbol).count()
    }

    /// The same key with X and O swapped; ties, empties and the marker are
    /// kept.
    pub fn inverted(&self) -> Self {
        let mut bytes = self.0;
        for b in bytes.iter_mut() {
            *b = match *b {
                b'X' => b'O',
                b'O' => b'X',
                other => other,
            };
        }
        Self(bytes)
    }
}

impl Default for BoardKey {
    fn default() -> Self {
        Self::empty()
    }
}

impl std::fmt::Display for BoardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BoardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BoardKey(\"{self}\")")
    }
}

/// Converts a move to 0-based (row, col) on the 9x9 grid.
pub fn to_row_col(mv: Move) -> (usize, usize) {
    let (b, c) = (mv.board - 1, mv.cell - 1);
    ((b / 3) * 3 + c / 3, (b % 3) * 3 + c % 3)
}

/// Converts a 0-based (row, col) on the 9x9 grid to a move.
pub fn from_row_col(row: usize, col: usize) -> Result<Move, CoordError> {
    if row > 8 || col > 8 {
        return Err(CoordError::OutOfGrid { row, col });
    }
    let board = (row / 3) * 3 + col / 3 + 1;
    let cell = (row % 3) * 3 + col % 3 + 1;
    Ok(Move::new(board, cell))
}

/// Parses a move written as `"<board> <cell>"`, both 1-9.
pub fn parse_move(input: &str) -> Result<Move, CoordError> {
    let (board, cell) = parse_pair(input)?;
    if !(1..=9).contains(&board) || !(1..=9).contains(&cell) {
        return Err(CoordError::OutOfRange { board, cell });
    }
    Ok(Move::new(board, cell))
}

/// Parses a grid coordinate written as `"<row> <col>"`, both 0-8.
pub fn parse_row_col(input: &str) -> Result<Move, CoordError> {
    let (row, col) = parse_pair(input)?;
    from_row_col(row, col)
}

fn parse_pair(input: &str) -> Result<(usize, usize), CoordError> {
    let mut parts = input.split_whitespace();
    let (Some(first), Some(second), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CoordError::Malformed(input.to_string()));
    };
    let parse = |s: &str| {
        s.parse::<usize>()
            .map_err(|_| CoordError::Malformed(input.to_string()))
    };
    Ok((parse(first)?, parse(second)?))
}
