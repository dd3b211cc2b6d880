//! Distance heuristics for the 3x3 board.
//!
//! The goal value of the cell at row `r`, column `c` is `3*r + c`, so a
//! tile with value `v` belongs at row `v / 3`, column `v % 3`.

use crate::board::{Board, SIDE};

/// The search priority for a board. Lower is closer to solved.
///
/// Manhattan distance dominates the misplaced-tile count on every board,
/// so it is the one wired into the frontier ordering.
pub fn evaluate(board: &Board) -> u32 {
    manhattan(board)
}

/// Sum over all non-blank tiles of the row and column offsets between the
/// tile's current cell and its goal cell. Zero iff the board is solved.
pub fn manhattan(board: &Board) -> u32 {
    let mut distance = 0u32;
    for row in 0..SIDE {
        for col in 0..SIDE {
            let v = board.tile(row, col) as usize;
            if v == 0 {
                continue;
            }
            let goal_row = v / SIDE;
            let goal_col = v % SIDE;
            distance += row.abs_diff(goal_row) as u32;
            distance += col.abs_diff(goal_col) as u32;
        }
    }
    distance
}

/// Number of cells whose value differs from the solved layout, the blank
/// included.
pub fn misplaced(board: &Board) -> u32 {
    board
        .cells()
        .iter()
        .enumerate()
        .filter(|&(i, &v)| v as usize != i)
        .count() as u32
}
