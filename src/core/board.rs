use crate::core::{
    mark::{Cell, Mark},
    rule_helper::{self, BOARD_SIDE, NUM_CELLS},
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[readonly::make]
pub struct CellLocation {
    pub row: usize,
    pub col: usize,
}

impl CellLocation {
    pub fn new(row: usize, col: usize) -> Result<Self, LocationError> {
        if !rule_helper::is_valid_row_or_col(row) {
            return Err(LocationError::RowOutOfRange { row });
        }
        if !rule_helper::is_valid_row_or_col(col) {
            return Err(LocationError::ColOutOfRange { col });
        }
        Ok(Self { row, col })
    }

    pub fn from_index(cell_index: usize) -> Result<Self, LocationError> {
        if !rule_helper::is_valid_cell_index(cell_index) {
            return Err(LocationError::IndexOutOfRange { cell_index });
        }
        let (row, col) = rule_helper::to_row_col(cell_index);
        Ok(Self { row, col })
    }

    pub fn index(self) -> usize {
        rule_helper::to_cell_index(self.row, self.col)
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}/{})", self.row, self.col)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LocationError {
    IndexOutOfRange { cell_index: usize },
    RowOutOfRange { row: usize },
    ColOutOfRange { col: usize },
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::IndexOutOfRange { cell_index } => write!(
                f,
                "cell index {cell_index} is outside 0..={}",
                NUM_CELLS - 1
            ),
            LocationError::RowOutOfRange { row } => {
                write!(f, "row {row} is outside 1..={BOARD_SIDE}")
            }
            LocationError::ColOutOfRange { col } => {
                write!(f, "col {col} is outside 1..={BOARD_SIDE}")
            }
        }
    }
}

impl std::error::Error for LocationError {}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Board {
    cells: [Cell; NUM_CELLS], // row-major
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; NUM_CELLS]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; NUM_CELLS] {
        &self.cells
    }

    pub fn cell(&self, cell_index: usize) -> Option<Cell> {
        self.cells.get(cell_index).copied()
    }

    pub fn is_empty_at(&self, cell_index: usize) -> bool {
        self.cell(cell_index).is_some_and(Cell::is_empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    /// Copy of this board with `mark` placed; the caller guarantees the cell is in range.
    pub(crate) fn with_mark(&self, cell_index: usize, mark: Mark) -> Self {
        let mut cells = self.cells;
        cells[cell_index] = Cell::Marked(mark);
        Self { cells }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(BOARD_SIDE)
    }

    pub fn labels(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| cell.label().to_string())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.mark().map(Mark::as_str).unwrap_or("."))
                    .join("")
            })
            .join("/");
        f.write_str(&text)
    }
}

/// Test fixture parser: rows of `X`, `O`, and `.` (empty); whitespace and `/` between rows are ignored.
#[cfg(test)]
pub(crate) fn board_from_text(text: &str) -> Board {
    let symbols = text
        .chars()
        .filter(|ch| !ch.is_whitespace() && *ch != '/')
        .collect::<Vec<_>>();
    assert_eq!(symbols.len(), NUM_CELLS, "board text {text:?} has wrong cell count");

    let mut cells = [Cell::Empty; NUM_CELLS];
    for (cell, symbol) in cells.iter_mut().zip(symbols) {
        *cell = match symbol {
            'X' | 'x' => Cell::Marked(Mark::X),
            'O' | 'o' => Cell::Marked(Mark::O),
            '.' => Cell::Empty,
            other => panic!("unknown cell symbol {other:?} in board text {text:?}"),
        };
    }
    Board::from_cells(cells)
}
