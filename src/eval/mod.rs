//! Position evaluation.
//!
//! Scores a board by how far its tiles are from the solved layout. The
//! search orders its frontier by `evaluate`; the misplaced-tile count is
//! exposed alongside it as a coarser alternative measure.

pub(crate) mod heuristic;

pub use heuristic::{evaluate, manhattan, misplaced};
