//! Snapshot of a whole game: the meta-board plus nine sub-boards.

use crate::board::Board;
use crate::types::{Cell, Sign};
use serde::{Deserialize, Serialize};

/// Index of the meta-board in [`State::board`].
pub const META: usize = 0;

/// Full position.
///
/// Index 0 is the meta-board, 1-9 the sub-boards in row-major order.
/// `State` is `Copy`: every transition produces a new value and older
/// snapshots stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct State {
    boards: [Board; 10],
}

impl State {
    /// The empty starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Board `idx`: 0 for the meta-board, 1-9 for sub-boards.
    pub fn board(&self, idx: usize) -> &Board {
        &self.boards[idx]
    }

    /// The meta-board.
    pub fn meta(&self) -> &Board {
        &self.boards[META]
    }

    pub(crate) fn board_mut(&mut self, idx: usize) -> &mut Board {
        &mut self.boards[idx]
    }

    /// True once sub-board `idx` is won or tied.
    pub fn is_board_closed(&self, idx: usize) -> bool {
        !self.meta().is_empty_at(idx)
    }

    /// Number of marks `sign` has placed on the sub-boards.
    pub fn marks_placed(&self, sign: Sign) -> usize {
        self.boards[1..].iter().map(|b| b.key().count(sign)).sum()
    }

    /// Builds a state from nine sub-board cell strings (see
    /// [`Board::from_cells`]).
    ///
    /// The meta-board starts empty; use [`State::with_meta`] or replay the
    /// moves through [`apply_move`](crate::apply_move) when sub-boards are
    /// already decided.
    pub fn from_sub_boards(cells: [&str; 9]) -> Option<Self> {
        let mut state = Self::new();
        for (offset, c) in cells.iter().enumerate() {
            state.boards[offset + 1] = Board::from_cells(c)?;
        }
        Some(state)
    }

    /// Replaces the meta-board.
    pub fn with_meta(mut self, meta: Board) -> Self {
        self.boards[META] = meta;
        self
    }
}

fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '-',
        Cell::Marked(Sign::X) => 'X',
        Cell::Marked(Sign::O) => 'O',
        Cell::Tied => 'T',
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for band in [1, 4, 7] {
            for row in [1, 4, 7] {
                let line: Vec<String> = (band..band + 3)
                    .map(|b| {
                        let board = self.board(b);
                        (row..row + 3)
                            .map(|c| symbol(board.cell(c)).to_string())
                            .collect::<Vec<_>>()
                            .join(" ")
                    })
                    .collect();
                writeln!(f, "{}", line.join("  |  "))?;
            }
            if band != 7 {
                writeln!(f, "-------------------------")?;
            }
        }
        writeln!(f)?;
        for row in [1, 4, 7] {
            let line: Vec<String> = (row..row + 3)
                .map(|c| symbol(self.meta().cell(c)).to_string())
                .collect();
            writeln!(f, "{}", line.join(" | "))?;
            if row != 7 {
                writeln!(f, "---------")?;
            }
        }
        Ok(())
    }
}
