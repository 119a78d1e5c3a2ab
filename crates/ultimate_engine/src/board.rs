//! A single 3x3 board: one of the nine sub-boards, or the meta-board.

use crate::codec::{self, BoardKey};
use crate::types::{Cell, Sign};
use serde::{Deserialize, Serialize};

/// Magic-square values occupied by one sign, in placement order.
///
/// At most nine values fit; a board has nine cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Marks {
    values: [u8; 9],
    len: u8,
}

impl Marks {
    /// Appends a magic-square value.
    pub fn push(&mut self, value: u8) {
        self.values[self.len as usize] = value;
        self.len += 1;
    }

    /// Values in placement order.
    pub fn as_slice(&self) -> &[u8] {
        &self.values[..self.len as usize]
    }

    /// Values in ascending order.
    pub fn sorted(&self) -> Vec<u8> {
        let mut values = self.as_slice().to_vec();
        values.sort_unstable();
        values
    }

    /// Number of values.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    /// True if no value has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True if `value` has been recorded.
    pub fn contains(&self, value: u8) -> bool {
        self.as_slice().contains(&value)
    }
}

/// One 3x3 board.
///
/// Holds, per sign, the magic-square values of the cells it occupies, plus
/// the display key. On the meta-board, "cells" are finished sub-boards and
/// the marks are the magic-square values of the sub-boards each sign won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    x: Marks,
    o: Marks,
    key: BoardKey,
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks held by `sign`.
    pub fn marks(&self, sign: Sign) -> &Marks {
        match sign {
            Sign::X => &self.x,
            Sign::O => &self.o,
        }
    }

    /// Display key of this board.
    pub fn key(&self) -> &BoardKey {
        &self.key
    }

    /// Contents of cell `idx` (1-9).
    pub fn cell(&self, idx: usize) -> Cell {
        self.key.cell(idx)
    }

    /// True if cell `idx` is empty.
    pub fn is_empty_at(&self, idx: usize) -> bool {
        self.key.is_empty_at(idx)
    }

    /// True if no cell has been played.
    pub fn is_untouched(&self) -> bool {
        self.key.empty_count() == 9
    }

    /// Places `sign` at `idx`, recording the cell's magic-square value.
    ///
    /// The cell is not checked for occupancy.
    pub fn place(&mut self, idx: usize, sign: Sign) {
        let marks = match sign {
            Sign::X => &mut self.x,
            Sign::O => &mut self.o,
        };
        marks.push(codec::magic(idx));
        self.key.set(idx, Cell::Marked(sign));
    }

    /// Marks cell `idx` as a tie (meta-board only).
    pub fn place_tie(&mut self, idx: usize) {
        self.key.set(idx, Cell::Tied);
    }

    /// Builds a sub-board from its nine cell characters, e.g. `"XO-X-O--X"`.
    ///
    /// Marks are recorded in cell order. Returns `None` for anything other
    /// than nine of `-XO`.
    pub fn from_cells(cells: &str) -> Option<Self> {
        let bytes = cells.as_bytes();
        if bytes.len() != 9 {
            return None;
        }
        let mut board = Self::new();
        for (offset, byte) in bytes.iter().enumerate() {
            match byte {
                b'X' => board.place(offset + 1, Sign::X),
                b'O' => board.place(offset + 1, Sign::O),
                b'-' => {}
                _ => return None,
            }
        }
        Some(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_records_magic_value_and_display() {
        let mut board = Board::new();
        board.place(1, Sign::X);
        board.place(5, Sign::O);
        assert_eq!(board.marks(Sign::X).as_slice(), &[2]);
        assert_eq!(board.marks(Sign::O).as_slice(), &[5]);
        assert_eq!(board.cell(1), Cell::Marked(Sign::X));
        assert_eq!(board.cell(5), Cell::Marked(Sign::O));
        assert_eq!(board.key().to_string(), "/X---O----");
    }

    #[test]
    fn test_from_cells() {
        let board = Board::from_cells("X-O-X---X").expect("valid cells");
        assert_eq!(board.marks(Sign::X).sorted(), vec![2, 5, 8]);
        assert_eq!(board.marks(Sign::O).as_slice(), &[6]);
        assert!(Board::from_cells("X-O").is_none());
        assert!(Board::from_cells("X-O-T---X").is_none());
    }

    #[test]
    fn test_untouched() {
        let mut board = Board::new();
        assert!(board.is_untouched());
        board.place(9, Sign::O);
        assert!(!board.is_untouched());
    }
}
