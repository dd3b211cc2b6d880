//! Bulk solving.
//!
//! Solves a stream of scrambles (or a suite of named positions) in one
//! run, recording per-puzzle results as JSONL for regression tracking.
//! Each solve owns its entire search state, so puzzles parallelize over a
//! rayon pool with nothing shared but the completed-record channel.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::Serialize;

use crate::board::Board;
use crate::notation::{encode_board, format_moves};
use crate::scramble::scramble;
use crate::search::{solve_with, SearchLimits};
use crate::suite::{Suite, SuiteError};

/// Configuration for a batch run.
#[derive(Clone)]
pub struct BatchConfig {
    /// Number of scrambles to solve (ignored for suite runs).
    pub num_puzzles: usize,
    /// Step budget per solve; 0 means unlimited.
    pub max_steps: u64,
    /// Number of parallel threads for concurrent solves.
    pub threads: usize,
    /// Random seed (0 = use entropy).
    pub seed: u64,
    /// Suppress per-puzzle progress output.
    pub quiet: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            num_puzzles: 100,
            max_steps: 500_000,
            threads: 4,
            seed: 0,
            quiet: false,
        }
    }
}

/// One solved (or failed) puzzle.
#[derive(Debug, Clone, Serialize)]
pub struct SolveRecord {
    pub name: String,
    /// Start position in digit notation.
    pub start: String,
    pub solved: bool,
    /// Move sequence as a letter string, when solved.
    pub moves: Option<String>,
    pub move_count: Option<usize>,
    /// Boards expanded by the search.
    pub expanded: u64,
    pub elapsed_us: u64,
    /// Error message, when not solved.
    pub error: Option<String>,
}

/// Solves `config.num_puzzles` seeded scrambles and collects the records.
pub fn run_batch(config: &BatchConfig) -> Vec<SolveRecord> {
    let mut records = Vec::with_capacity(config.num_puzzles);
    run_batch_with_callback(config, |r| records.push(r));
    records
}

/// Solves seeded scrambles, calling `on_record` with each completed
/// record. Lets the caller stream records to disk instead of holding the
/// whole run in memory.
pub fn run_batch_with_callback<F>(config: &BatchConfig, on_record: F)
where
    F: FnMut(SolveRecord) + Send,
{
    solve_all(config, scrambles(config), on_record);
}

/// Solves every position of a suite and collects the records.
pub fn run_suite(config: &BatchConfig, suite: &Suite) -> Result<Vec<SolveRecord>, SuiteError> {
    let work = suite.boards()?;
    let mut records = Vec::with_capacity(work.len());
    solve_all(config, work, |r| records.push(r));
    Ok(records)
}

/// Generates the scramble work list. Each puzzle gets its own rng derived
/// from the configured seed, so sequential and parallel runs solve
/// identical boards.
fn scrambles(config: &BatchConfig) -> Vec<(String, Board)> {
    (0..config.num_puzzles)
        .map(|i| {
            let mut rng = if config.seed != 0 {
                SmallRng::seed_from_u64(config.seed.wrapping_add(i as u64))
            } else {
                SmallRng::from_entropy()
            };
            (format!("scramble-{:04}", i), scramble(&mut rng))
        })
        .collect()
}

/// Dispatches the work list to the sequential or parallel path.
fn solve_all<F>(config: &BatchConfig, work: Vec<(String, Board)>, on_record: F)
where
    F: FnMut(SolveRecord) + Send,
{
    if config.threads > 1 {
        solve_all_parallel(config, work, on_record);
    } else {
        solve_all_sequential(config, work, on_record);
    }
}

/// Sequential path: solves puzzles one at a time.
fn solve_all_sequential<F>(config: &BatchConfig, work: Vec<(String, Board)>, mut on_record: F)
where
    F: FnMut(SolveRecord),
{
    let total = work.len();
    for (i, (name, board)) in work.into_iter().enumerate() {
        let record = solve_one(&name, &board, config.max_steps);
        if !config.quiet {
            eprintln!("Puzzle {}/{}: {}", i + 1, total, describe(&record));
        }
        on_record(record);
    }
}

/// Parallel path: solves puzzles concurrently using rayon.
/// A channel delivers completed records to the callback on this thread.
fn solve_all_parallel<F>(config: &BatchConfig, work: Vec<(String, Board)>, mut on_record: F)
where
    F: FnMut(SolveRecord) + Send,
{
    use rayon::prelude::*;
    use std::sync::mpsc;

    let total = work.len();
    let quiet = config.quiet;
    let max_steps = config.max_steps;
    let (tx, rx) = mpsc::channel::<SolveRecord>();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .expect("failed to build rayon thread pool");

    let handle = std::thread::spawn(move || {
        let completed = AtomicUsize::new(0);
        pool.install(|| {
            work.into_par_iter().for_each_with(tx, |tx, (name, board)| {
                let record = solve_one(&name, &board, max_steps);
                if !quiet {
                    let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    eprintln!("Puzzle {}/{}: {}", n, total, describe(&record));
                }
                let _ = tx.send(record);
            });
        });
    });

    // Receive completed records on the calling thread.
    for record in rx {
        on_record(record);
    }

    handle.join().expect("batch worker thread panicked");
}

/// Solves a single named board under the configured step budget.
fn solve_one(name: &str, board: &Board, max_steps: u64) -> SolveRecord {
    let limits = SearchLimits {
        max_steps: (max_steps > 0).then_some(max_steps),
        max_time: None,
    };
    let start = encode_board(board);

    match solve_with(board, limits, &mut io::sink(), &AtomicBool::new(false)) {
        Ok(solution) => SolveRecord {
            name: name.to_string(),
            start,
            solved: true,
            moves: Some(format_moves(&solution.moves)),
            move_count: Some(solution.moves.len()),
            expanded: solution.expanded,
            elapsed_us: solution.elapsed.as_micros() as u64,
            error: None,
        },
        Err(e) => SolveRecord {
            name: name.to_string(),
            start,
            solved: false,
            moves: None,
            move_count: None,
            expanded: 0,
            elapsed_us: 0,
            error: Some(e.to_string()),
        },
    }
}

/// One-line progress description for a record.
fn describe(record: &SolveRecord) -> String {
    if record.solved {
        format!(
            "{} solved in {} moves ({} expanded)",
            record.start,
            record.move_count.unwrap_or(0),
            record.expanded
        )
    } else {
        format!(
            "{} failed: {}",
            record.start,
            record.error.as_deref().unwrap_or("unknown")
        )
    }
}

/// Writes records as JSONL (one JSON object per line).
pub fn write_jsonl<W: Write>(records: &[SolveRecord], out: &mut W) -> io::Result<()> {
    for record in records {
        let line = serde_json::to_string(record)?;
        writeln!(out, "{}", line)?;
    }
    out.flush()
}

/// Prints a summary of a batch run to stderr.
pub fn print_summary(records: &[SolveRecord]) {
    let total = records.len();
    let solved: Vec<&SolveRecord> = records.iter().filter(|r| r.solved).collect();

    eprintln!("=== Batch Summary ===");
    eprintln!("Puzzles: {}", total);
    eprintln!(
        "Solved: {} ({:.1}%)",
        solved.len(),
        100.0 * solved.len() as f64 / total.max(1) as f64
    );
    if !solved.is_empty() {
        let total_moves: usize = solved.iter().filter_map(|r| r.move_count).sum();
        let total_expanded: u64 = solved.iter().map(|r| r.expanded).sum();
        eprintln!(
            "Avg moves: {:.1}",
            total_moves as f64 / solved.len() as f64
        );
        eprintln!(
            "Avg expansions: {:.1}",
            total_expanded as f64 / solved.len() as f64
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::{parse_board, parse_moves};
    use crate::suite::load_suite_from_str;

    fn quiet_config(puzzles: usize, threads: usize) -> BatchConfig {
        BatchConfig {
            num_puzzles: puzzles,
            threads,
            seed: 42,
            quiet: true,
            ..Default::default()
        }
    }

    #[test]
    fn sequential_run_produces_correct_count() {
        let records = run_batch(&quiet_config(3, 1));
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.solved));
    }

    #[test]
    fn parallel_run_produces_correct_count() {
        let records = run_batch(&quiet_config(4, 2));
        assert_eq!(records.len(), 4);
        assert!(records.iter().all(|r| r.solved));
    }

    #[test]
    fn parallel_and_sequential_solve_the_same_boards() {
        let mut seq: Vec<String> = run_batch(&quiet_config(4, 1))
            .into_iter()
            .map(|r| r.start)
            .collect();
        let mut par: Vec<String> = run_batch(&quiet_config(4, 2))
            .into_iter()
            .map(|r| r.start)
            .collect();
        seq.sort();
        par.sort();
        assert_eq!(seq, par);
    }

    #[test]
    fn records_replay_to_the_goal() {
        for record in run_batch(&quiet_config(3, 1)) {
            let mut board = parse_board(&record.start).unwrap();
            let moves = parse_moves(record.moves.as_deref().unwrap()).unwrap();
            for dir in moves {
                assert!(board.slide(dir));
            }
            assert!(board.is_goal(), "record {} did not replay", record.name);
        }
    }

    #[test]
    fn suite_run_covers_every_position() {
        let suite = load_suite_from_str(
            r#"{"positions": [
                {"name": "solved", "grid": "012/345/678"},
                {"name": "classic", "grid": "724/506/831"}
            ]}"#,
        )
        .unwrap();
        let records = run_suite(&quiet_config(0, 1), &suite).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].move_count, Some(0));
        assert!(records[1].solved);
    }

    #[test]
    fn unsolvable_position_records_the_error() {
        let suite = load_suite_from_str(
            r#"{"positions": [{"name": "impossible", "grid": "123/456/870"}]}"#,
        )
        .unwrap();
        let records = run_suite(&quiet_config(0, 1), &suite).unwrap();
        assert_eq!(records.len(), 1);
        assert!(!records[0].solved);
        assert!(records[0].error.as_deref().unwrap().contains("unsolvable"));
    }

    #[test]
    fn jsonl_output_parses_back() {
        let records = run_batch(&quiet_config(2, 1));
        let mut buf = Vec::new();
        write_jsonl(&records, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();

        assert_eq!(output.lines().count(), 2);
        for line in output.lines() {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(value.get("name").is_some());
            assert!(value.get("start").is_some());
            assert!(value.get("solved").is_some());
        }
    }
}
