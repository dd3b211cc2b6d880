//! Greedy best-first solver.
//!
//! Expands states from a priority frontier ordered by heuristic score and
//! deduplicates against a visited set of packed board keys. The comparator
//! uses only the heuristic estimate, never path cost, so the solver is
//! greedy best-first rather than A* and the returned path is not
//! guaranteed shortest.
//!
//! All search state lives inside one `solve` call; the function is
//! reentrant and safe to run from many threads at once.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::time::{Duration, Instant};

use crate::board::{Board, Direction, ALL_DIRECTIONS};
use crate::eval::evaluate;

/// How often the searcher emits an `info` line, in expansions.
const INFO_INTERVAL: u64 = 1000;

/// Ways a solve can fail. Unsolvable starts and exhausted budgets are
/// ordinary outcomes surfaced as values, never panics.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    #[error("position is unsolvable: tile permutation has odd parity")]
    Unsolvable,

    #[error("frontier exhausted after {0} expansions without reaching the goal")]
    Exhausted(u64),

    #[error("step budget of {0} expansions exceeded")]
    StepBudget(u64),

    #[error("time budget of {0:?} exceeded")]
    TimeBudget(Duration),

    #[error("search stopped before reaching the goal")]
    Stopped,
}

/// Optional budgets for a single solve call. The defaults impose none.
#[derive(Debug, Clone, Copy, Default)]
pub struct SearchLimits {
    /// Maximum number of expansions before giving up.
    pub max_steps: Option<u64>,
    /// Wall-clock budget, checked periodically.
    pub max_time: Option<Duration>,
}

/// A successful solve: the move sequence from the start board to the goal
/// and the work it took to find it.
#[derive(Debug, Clone)]
pub struct Solution {
    pub moves: Vec<Direction>,
    /// Boards taken off the frontier and expanded.
    pub expanded: u64,
    pub elapsed: Duration,
}

/// Frontier entry. Lower scores pop first; equal scores pop in insertion
/// order. The sequence number makes the ordering strict and the expansion
/// order deterministic.
struct Node {
    score: u32,
    seq: u64,
    board: Board,
}

impl PartialEq for Node {
    fn eq(&self, other: &Node) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl Eq for Node {}

impl Ord for Node {
    fn cmp(&self, other: &Node) -> Ordering {
        // BinaryHeap pops the greatest entry, so invert both keys.
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Node) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Solves a board with no budgets, discarding progress output.
pub fn solve(start: &Board) -> Result<Solution, SearchError> {
    solve_with(
        start,
        SearchLimits::default(),
        &mut io::sink(),
        &AtomicBool::new(false),
    )
}

/// Runs the greedy best-first search.
///
/// Checks solvability up front, so odd-parity starts fail in O(1) instead
/// of flooding the reachable half of the state space. Periodic `info`
/// lines go to `out`; setting `stop` ends the search at the next
/// expansion.
pub fn solve_with<W: Write>(
    start: &Board,
    limits: SearchLimits,
    out: &mut W,
    stop: &AtomicBool,
) -> Result<Solution, SearchError> {
    if !start.solvable() {
        return Err(SearchError::Unsolvable);
    }

    let begin = Instant::now();
    let mut root = start.clone();
    root.reset_trail();

    let mut frontier: BinaryHeap<Node> = BinaryHeap::new();
    let mut visited: HashSet<u64> = HashSet::new();
    visited.insert(root.key());

    let mut current = root;
    let mut expanded: u64 = 0;
    let mut seq: u64 = 0;

    loop {
        if current.is_goal() {
            let elapsed = begin.elapsed();
            let _ = writeln!(
                out,
                "info steps {} frontier {} score 0 time {}",
                expanded,
                frontier.len(),
                elapsed.as_millis()
            );
            return Ok(Solution {
                moves: current.history().to_vec(),
                expanded,
                elapsed,
            });
        }

        if stop.load(AtomicOrdering::Relaxed) {
            return Err(SearchError::Stopped);
        }
        if let Some(max) = limits.max_steps {
            if expanded >= max {
                return Err(SearchError::StepBudget(max));
            }
        }
        // Check the clock periodically rather than on every expansion.
        if let Some(max) = limits.max_time {
            if expanded & 63 == 0 && begin.elapsed() >= max {
                return Err(SearchError::TimeBudget(max));
            }
        }

        for dir in ALL_DIRECTIONS {
            let Some(child) = current.child(dir) else {
                continue;
            };
            if visited.insert(child.key()) {
                let score = evaluate(&child);
                frontier.push(Node {
                    score,
                    seq,
                    board: child,
                });
                seq += 1;
            }
        }
        expanded += 1;

        if expanded % INFO_INTERVAL == 0 {
            let _ = writeln!(
                out,
                "info steps {} frontier {} score {} time {}",
                expanded,
                frontier.len(),
                evaluate(&current),
                begin.elapsed().as_millis()
            );
        }

        current = match frontier.pop() {
            Some(node) => node.board,
            None => return Err(SearchError::Exhausted(expanded)),
        };
    }
}
