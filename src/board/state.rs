//! Board state representation.
//!
//! Holds a snapshot of the nine tile positions together with the move
//! history that produced it from the search root. Equality and hashing
//! cover the tile cells only; the history and the provenance direction are
//! bookkeeping for the search, not part of a board's identity.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::direction::Direction;

/// Side length of the board.
pub const SIDE: usize = 3;

/// Number of cells, blank included.
pub const CELL_COUNT: usize = SIDE * SIDE;

/// Errors produced when constructing a board from raw tile values.
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("tile value {0} is out of range for a 3x3 board")]
    TileOutOfRange(u8),

    #[error("tile value {0} appears more than once")]
    DuplicateTile(u8),
}

/// A 3x3 sliding-tile board.
///
/// Invariant: `cells` is always a permutation of 0..=8 and `blank` always
/// indexes the cell holding 0. Both are established at construction and
/// maintained by `slide`.
#[derive(Debug, Clone)]
pub struct Board {
    cells: [u8; CELL_COUNT],
    blank: usize,
    /// Direction that produced this board from its parent; `None` at a root.
    last_move: Option<Direction>,
    history: Vec<Direction>,
}

impl Board {
    /// Builds a board from row-major rows, validating the tile permutation.
    pub fn from_rows(rows: [[u8; SIDE]; SIDE]) -> Result<Board, BoardError> {
        let mut cells = [0u8; CELL_COUNT];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r * SIDE + c] = v;
            }
        }
        Board::from_cells(cells)
    }

    /// Builds a board from a flat row-major cell array, validating the
    /// tile permutation.
    pub fn from_cells(cells: [u8; CELL_COUNT]) -> Result<Board, BoardError> {
        let mut seen = [false; CELL_COUNT];
        let mut blank = None;
        for (i, &v) in cells.iter().enumerate() {
            if v as usize >= CELL_COUNT {
                return Err(BoardError::TileOutOfRange(v));
            }
            if seen[v as usize] {
                return Err(BoardError::DuplicateTile(v));
            }
            seen[v as usize] = true;
            if v == 0 {
                blank = Some(i);
            }
        }
        // A full permutation of 0..=8 always contains the blank.
        let blank = blank.expect("permutation check guarantees a blank");
        Ok(Board {
            cells,
            blank,
            last_move: None,
            history: Vec::new(),
        })
    }

    /// Returns the solved board: 0 1 2 / 3 4 5 / 6 7 8.
    pub fn goal() -> Board {
        let mut cells = [0u8; CELL_COUNT];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = i as u8;
        }
        Board {
            cells,
            blank: 0,
            last_move: None,
            history: Vec::new(),
        }
    }

    /// Returns the flat row-major cells.
    pub fn cells(&self) -> &[u8; CELL_COUNT] {
        &self.cells
    }

    /// Returns the tile at the given row and column.
    pub fn tile(&self, row: usize, col: usize) -> u8 {
        self.cells[row * SIDE + col]
    }

    /// Returns the (row, col) of the blank.
    pub fn blank_pos(&self) -> (usize, usize) {
        (self.blank / SIDE, self.blank % SIDE)
    }

    /// Returns the moves that led from the search root to this board.
    pub fn history(&self) -> &[Direction] {
        &self.history
    }

    /// Returns the direction that produced this board, if any.
    pub fn last_move(&self) -> Option<Direction> {
        self.last_move
    }

    /// Forgets history and provenance, making this board a fresh root.
    pub fn reset_trail(&mut self) {
        self.history.clear();
        self.last_move = None;
    }

    /// True iff a row-major scan yields 0,1,...,8.
    pub fn is_goal(&self) -> bool {
        self.cells.iter().enumerate().all(|(i, &v)| v as usize == i)
    }

    /// True iff the blank may move in `dir`: its destination is in bounds
    /// and `dir` does not undo the move that produced this board. The
    /// reversal ban is a pruning rule; undoing a move always reproduces an
    /// already-seen position.
    pub fn can_slide(&self, dir: Direction) -> bool {
        if self.last_move == Some(dir.opposite()) {
            return false;
        }
        self.slide_target(dir).is_some()
    }

    /// Moves the blank in `dir`, swapping it with the neighboring tile.
    /// Records `dir` as the board's provenance and appends it to the
    /// history. Returns false without mutating if the destination is out
    /// of bounds.
    pub fn slide(&mut self, dir: Direction) -> bool {
        let Some(target) = self.slide_target(dir) else {
            return false;
        };
        self.cells.swap(self.blank, target);
        self.blank = target;
        self.last_move = Some(dir);
        self.history.push(dir);
        true
    }

    /// Returns the clone produced by sliding in `dir`, or `None` if the
    /// move is illegal from this board.
    pub fn child(&self, dir: Direction) -> Option<Board> {
        if !self.can_slide(dir) {
            return None;
        }
        let mut child = self.clone();
        child.slide(dir);
        Some(child)
    }

    /// Flat index of the blank's destination in `dir`, if in bounds.
    fn slide_target(&self, dir: Direction) -> Option<usize> {
        let (dr, dc) = dir.delta();
        let row = (self.blank / SIDE) as isize + dr;
        let col = (self.blank % SIDE) as isize + dc;
        if row < 0 || row >= SIDE as isize || col < 0 || col >= SIDE as isize {
            return None;
        }
        Some(row as usize * SIDE + col as usize)
    }

    /// Packs the nine cells into a `u64`, four bits per cell. Distinct
    /// positions always produce distinct keys, so the search can key its
    /// visited set on this instead of comparing grids.
    pub fn key(&self) -> u64 {
        self.cells
            .iter()
            .fold(0u64, |acc, &v| (acc << 4) | v as u64)
    }

    /// Permutation-parity solvability test. On an odd-width board a slide
    /// never changes the parity of the non-blank inversion count, and the
    /// goal has zero inversions, so a position is solvable iff its
    /// inversion count is even.
    pub fn solvable(&self) -> bool {
        self.inversions() % 2 == 0
    }

    /// Counts pairs of non-blank tiles that appear in reversed order in a
    /// row-major scan.
    fn inversions(&self) -> usize {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0)
            .map(|(i, &v)| {
                self.cells[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < v)
                    .count()
            })
            .sum()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Board) -> bool {
        self.cells == other.cells
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "╔═══╦═══╦═══╗")?;
        for row in 0..SIDE {
            write!(f, "║")?;
            for col in 0..SIDE {
                write!(f, " {} ║", self.tile(row, col))?;
            }
            writeln!(f)?;
            if row != SIDE - 1 {
                writeln!(f, "╠═══╬═══╬═══╣")?;
            }
        }
        writeln!(f, "╚═══╩═══╩═══╝")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::direction::ALL_DIRECTIONS;

    fn reference_board() -> Board {
        Board::from_rows([[7, 2, 4], [5, 0, 6], [8, 3, 1]]).unwrap()
    }

    #[test]
    fn construction_locates_blank() {
        let b = reference_board();
        assert_eq!(b.blank_pos(), (1, 1));
        assert_eq!(b.tile(0, 0), 7);
        assert_eq!(b.tile(2, 2), 1);
    }

    #[test]
    fn construction_rejects_out_of_range() {
        let err = Board::from_rows([[9, 1, 2], [3, 4, 5], [6, 7, 8]]).unwrap_err();
        assert!(matches!(err, BoardError::TileOutOfRange(9)));
    }

    #[test]
    fn construction_rejects_duplicates() {
        let err = Board::from_rows([[1, 1, 2], [3, 4, 5], [6, 7, 8]]).unwrap_err();
        assert!(matches!(err, BoardError::DuplicateTile(1)));
    }

    #[test]
    fn goal_is_goal() {
        assert!(Board::goal().is_goal());
        assert!(!reference_board().is_goal());
    }

    #[test]
    fn slide_moves_blank_and_tile() {
        let mut b = reference_board();
        assert!(b.slide(Direction::Up));
        // Blank swapped with the 2 that was above it.
        assert_eq!(b.blank_pos(), (0, 1));
        assert_eq!(b.tile(1, 1), 2);
        assert_eq!(b.history(), &[Direction::Up]);
        assert_eq!(b.last_move(), Some(Direction::Up));
    }

    #[test]
    fn slide_rejects_out_of_bounds() {
        let mut b = Board::goal();
        // Blank is at the top-left corner.
        assert!(!b.slide(Direction::Up));
        assert!(!b.slide(Direction::Left));
        assert!(b.history().is_empty());
        assert_eq!(b.blank_pos(), (0, 0));
    }

    #[test]
    fn reversal_ban_blocks_the_undo_only() {
        let mut b = reference_board();
        assert!(b.slide(Direction::Up));
        assert!(!b.can_slide(Direction::Down));
        assert!(b.can_slide(Direction::Left));
        assert!(b.can_slide(Direction::Right));
    }

    #[test]
    fn reversal_ban_survives_cloning() {
        let mut b = reference_board();
        b.slide(Direction::Up);
        let clone = b.clone();
        assert_eq!(clone.last_move(), Some(Direction::Up));
        assert!(!clone.can_slide(Direction::Down));
    }

    #[test]
    fn child_respects_legality() {
        let mut b = reference_board();
        b.slide(Direction::Up);
        assert!(b.child(Direction::Down).is_none());
        let child = b.child(Direction::Left).unwrap();
        assert_eq!(child.history(), &[Direction::Up, Direction::Left]);
        // The parent is untouched.
        assert_eq!(b.history(), &[Direction::Up]);
    }

    #[test]
    fn clone_isolates_the_original() {
        let original = reference_board();
        let before = *original.cells();
        let mut clone = original.clone();
        clone.slide(Direction::Up);
        assert_eq!(*original.cells(), before);
        assert_ne!(original, clone);
    }

    #[test]
    fn equality_ignores_history() {
        let a = reference_board();
        let mut b = reference_board();
        b.slide(Direction::Up);
        b.slide(Direction::Down);
        assert_eq!(a, b);
        assert_ne!(a.history(), b.history());
    }

    #[test]
    fn equality_is_an_equivalence_over_cells() {
        let a = reference_board();
        let b = a.clone();
        let c = reference_board();
        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(b, c);
        assert_eq!(a, c);
        assert_ne!(a, Board::goal());
    }

    #[test]
    fn reset_trail_clears_provenance() {
        let mut b = reference_board();
        b.slide(Direction::Up);
        b.reset_trail();
        assert!(b.history().is_empty());
        assert_eq!(b.last_move(), None);
        // The undo is legal again from a fresh root.
        assert!(b.can_slide(Direction::Down));
    }

    #[test]
    fn keys_distinguish_positions() {
        let goal = Board::goal();
        for dir in ALL_DIRECTIONS {
            if let Some(child) = goal.child(dir) {
                assert_ne!(child.key(), goal.key());
            }
        }
        assert_eq!(reference_board().key(), reference_board().key());
    }

    #[test]
    fn parity_classifies_known_positions() {
        assert!(Board::goal().solvable());
        assert!(reference_board().solvable());
        // The classic impossible position: 8 and 7 swapped.
        let unsolvable = Board::from_rows([[1, 2, 3], [4, 5, 6], [8, 7, 0]]).unwrap();
        assert!(!unsolvable.solvable());
    }

    #[test]
    fn sliding_preserves_solvability() {
        let mut b = reference_board();
        for dir in [Direction::Up, Direction::Left, Direction::Down] {
            assert!(b.slide(dir));
            assert!(b.solvable());
        }
    }

    #[test]
    fn display_renders_boxed_grid() {
        let text = reference_board().to_string();
        assert!(text.contains("╔═══╦═══╦═══╗"));
        assert!(text.contains("║ 7 ║ 2 ║ 4 ║"));
        assert!(text.contains("╚═══╩═══╩═══╝"));
    }
}
