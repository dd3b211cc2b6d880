//! Taquin -- an 8-puzzle solver.
//!
//! Solves a single position given in digit notation, or a random solvable
//! scramble when no position is supplied.
//!
//! Usage:
//!   taquin [OPTIONS] [POSITION]
//!
//! POSITION is three rows of digits separated by '/', 0 for the blank,
//! e.g. 724/506/831.
//!
//! Options:
//!   --seed N        Random seed for the scramble, 0 for entropy (default: 0)
//!   --max-steps N   Expansion budget, 0 for unlimited (default: 0)
//!   --movetime MS   Time budget in ms, 0 for unlimited (default: 0)
//!   --trace         Replay the solution board by board
//!   --quiet         Print only the move line

use std::io;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use taquin::board::Board;
use taquin::notation::{format_moves, parse_board};
use taquin::scramble::scramble;
use taquin::search::{solve_with, SearchLimits};

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut position: Option<String> = None;
    let mut seed: u64 = 0;
    let mut max_steps: u64 = 0;
    let mut movetime_ms: u64 = 0;
    let mut trace = false;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("invalid --seed value");
            }
            "--max-steps" => {
                i += 1;
                max_steps = args[i].parse().expect("invalid --max-steps value");
            }
            "--movetime" => {
                i += 1;
                movetime_ms = args[i].parse().expect("invalid --movetime value");
            }
            "--trace" => {
                trace = true;
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other if other.starts_with("--") => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
            other => {
                position = Some(other.to_string());
            }
        }
        i += 1;
    }

    let board = match position {
        Some(s) => match parse_board(&s) {
            Ok(b) => b,
            Err(e) => {
                eprintln!("bad position '{}': {}", s, e);
                std::process::exit(1);
            }
        },
        None => {
            let mut rng = if seed != 0 {
                SmallRng::seed_from_u64(seed)
            } else {
                SmallRng::from_entropy()
            };
            scramble(&mut rng)
        }
    };

    if !quiet {
        println!("Start position:\n{}", board);
    }

    let limits = SearchLimits {
        max_steps: (max_steps > 0).then_some(max_steps),
        max_time: (movetime_ms > 0).then_some(Duration::from_millis(movetime_ms)),
    };

    let mut sink = io::sink();
    let solution = match solve_with(&board, limits, &mut sink, &AtomicBool::new(false)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    println!("solution {}", format_moves(&solution.moves));
    if !quiet {
        println!(
            "Solved in {} moves ({} boards expanded, {} ms)",
            solution.moves.len(),
            solution.expanded,
            solution.elapsed.as_millis()
        );
    }

    if trace {
        replay(&board, &solution.moves);
    }
}

/// Replays the solution from the start board, printing each position.
fn replay(start: &Board, moves: &[taquin::board::Direction]) {
    let mut board = start.clone();
    for &dir in moves {
        board.slide(dir);
        println!("{}\n{}", dir, board);
    }
}

fn print_usage() {
    eprintln!("Usage: taquin [OPTIONS] [POSITION]");
    eprintln!();
    eprintln!("POSITION is digit notation, e.g. 724/506/831 (0 = blank).");
    eprintln!("Without a position, a random solvable scramble is solved.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --seed N        Random seed for the scramble, 0 for entropy (default: 0)");
    eprintln!("  --max-steps N   Expansion budget, 0 for unlimited (default: 0)");
    eprintln!("  --movetime MS   Time budget in ms, 0 for unlimited (default: 0)");
    eprintln!("  --trace         Replay the solution board by board");
    eprintln!("  --quiet         Print only the move line");
    eprintln!("  --help          Show this help");
}
