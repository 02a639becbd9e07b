use std::{env, path::Path, process::ExitCode, time::Instant};

use env_logger::Env;
use log::{error, info};
use sudsolve::{
    error::BatchError,
    input::PuzzleInput,
    output::OutputBuffer,
    pool::{self, BatchSummary},
};

const OUTPUT_PATH: &str = "./PuzzleOutput.txt";

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info")); // RUST_LOG

    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        println!("Usage: sudsolve <puzzle_file>");
        return ExitCode::from(1);
    }

    match run(&args[1]) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::from(2)
        }
    }
}

fn run(input_path: &str) -> Result<BatchSummary, BatchError> {
    let input = PuzzleInput::load(Path::new(input_path))?;

    info!(
        "Loaded {} puzzles from '{}'",
        input.total_puzzles(),
        input_path
    );

    let output = OutputBuffer::prepare(&input);
    let started = Instant::now();
    let summary = pool::run_batch(&input, &output);
    let elapsed = started.elapsed();

    info!(
        "Solved {}/{} puzzles in {:.2?} ({:.0} puzzles/s, {} unsolvable)",
        summary.completed - summary.failed,
        summary.completed,
        elapsed,
        summary.completed as f64 / elapsed.as_secs_f64().max(f64::EPSILON),
        summary.failed
    );

    output.persist(Path::new(OUTPUT_PATH))?;
    info!("Wrote the solved collection to '{}'", OUTPUT_PATH);

    Ok(summary)
}
