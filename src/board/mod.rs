//! Board representation and move types.
//!
//! Contains the tile grid, the slide directions, move legality and
//! application, and the permutation-parity solvability test.

pub mod direction;
pub mod state;

pub use direction::{Direction, ALL_DIRECTIONS};
pub use state::{Board, BoardError, CELL_COUNT, SIDE};
