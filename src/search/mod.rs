//! Search.
//!
//! Explores the space of board states with a greedy best-first strategy,
//! expanding the frontier board with the lowest heuristic score until the
//! goal turns up or a budget runs out.

pub mod best_first;

pub use best_first::{solve, solve_with, SearchError, SearchLimits, Solution};
