//! Batch solving CLI.
//!
//! Solves many scrambles (or a JSON suite of named positions) and writes
//! per-puzzle records as JSONL.
//!
//! Usage:
//!   cargo run --release --bin batch -- [OPTIONS]
//!
//! Options:
//!   --puzzles N     Number of scrambles to solve (default: 100)
//!   --suite FILE    Solve the positions of a JSON suite instead
//!   --max-steps N   Expansion budget per solve, 0 for unlimited (default: 500000)
//!   --threads N     Number of parallel threads (default: 4)
//!   --seed N        Random seed, 0 for entropy (default: 0)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress progress and summary output

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use std::time::Instant;

use taquin::batch::{self, BatchConfig};
use taquin::suite::load_suite;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let mut config = BatchConfig::default();
    let mut suite_path: Option<String> = None;
    let mut output_path: Option<String> = None;
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--puzzles" => {
                i += 1;
                config.num_puzzles = args[i].parse().expect("invalid --puzzles value");
            }
            "--suite" => {
                i += 1;
                suite_path = Some(args[i].clone());
            }
            "--max-steps" => {
                i += 1;
                config.max_steps = args[i].parse().expect("invalid --max-steps value");
            }
            "--threads" => {
                i += 1;
                config.threads = args[i].parse().expect("invalid --threads value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    config.quiet = quiet;

    let start = Instant::now();
    let records = match &suite_path {
        Some(path) => {
            let suite = match load_suite(Path::new(path)) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };
            match batch::run_suite(&config, &suite) {
                Ok(records) => records,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        None => batch::run_batch(&config),
    };
    let elapsed = start.elapsed();

    if !quiet {
        eprintln!(
            "Completed {} puzzles in {:.1}s",
            records.len(),
            elapsed.as_secs_f64()
        );
        batch::print_summary(&records);
    }

    match output_path {
        Some(path) => {
            let file = File::create(&path).expect("failed to create output file");
            let mut writer = BufWriter::new(file);
            batch::write_jsonl(&records, &mut writer).expect("failed to write output");
            if !quiet {
                eprintln!("Wrote {} records to {}", records.len(), path);
            }
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            batch::write_jsonl(&records, &mut writer).expect("failed to write output");
        }
    }
}

fn print_usage() {
    eprintln!("Usage: batch [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --puzzles N     Number of scrambles to solve (default: 100)");
    eprintln!("  --suite FILE    Solve the positions of a JSON suite instead");
    eprintln!("  --max-steps N   Expansion budget per solve, 0 for unlimited (default: 500000)");
    eprintln!("  --threads N     Number of parallel threads (default: 4)");
    eprintln!("  --seed N        Random seed, 0 for entropy (default: 0)");
    eprintln!("  --output FILE   Output file path (default: stdout)");
    eprintln!("  --quiet         Suppress progress and summary output");
    eprintln!("  --help          Show this help");
}
