use crate::core::mark::Mark;

pub const BOARD_SIDE: usize = 3;
pub const NUM_CELLS: usize = BOARD_SIDE * BOARD_SIDE;

pub const FIRST_MARK: Mark = Mark::X;
pub const SECOND_MARK: Mark = Mark::O;

pub const INITIAL_STEP: usize = 0;

// rows, then columns, then diagonals; the win check reports the first match in this order
pub const WINNING_TRIPLES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub fn mark_for_step(step: usize) -> Mark {
    if step % 2 == 0 { FIRST_MARK } else { SECOND_MARK }
}

pub fn is_valid_cell_index(cell_index: usize) -> bool {
    cell_index < NUM_CELLS
}

pub fn is_valid_row_or_col(row_or_col: usize) -> bool {
    (1..=BOARD_SIDE).contains(&row_or_col)
}

/// One-based (row, col) for a row-major cell index.
pub fn to_row_col(cell_index: usize) -> (usize, usize) {
    (cell_index / BOARD_SIDE + 1, cell_index % BOARD_SIDE + 1)
}

/// Row-major cell index for a one-based (row, col).
pub fn to_cell_index(row: usize, col: usize) -> usize {
    (row - 1) * BOARD_SIDE + (col - 1)
}
