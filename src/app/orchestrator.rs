//! Main application orchestrator.
//!
//! Coordinates one solver run:
//! 1. Initializes logging.
//! 2. Validates and reads the input file.
//! 3. Opens the optional graph adjacency dump.
//! 4. Delegates to `processing` for the selected puzzle.
//! 5. Prints both answers.
//!
//! The verbose log is flushed at every stage boundary unless running quiet.

use super::cli::{Cli, PuzzleKind};
use super::error::AppError;
use super::file_handler;
use super::logger;
use super::processing;
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.
use crate::puzzles::Answers;
use std::io::Write; // For BufWriter::flush

/// Runs the solver selected by the parsed command-line arguments.
///
/// # Errors
/// Returns `AppError` for an unreadable input file, malformed puzzle input,
/// or a failure in the graph or partition core.
pub fn run_app(cli: Cli) -> Result<(), AppError> {
    let quiet_mode = cli.quiet;

    if !quiet_mode {
        if let Err(e) = logger::init_global_logger(&cli.log_file) {
            // Keep going without the file log.
            eprintln!(
                "Warning: Failed to initialize verbose logger ({}): {}. Verbose file logging will be unavailable.",
                cli.log_file.display(),
                e
            );
        } else {
            verbose_println!(
                quiet_mode,
                "Verbose logging initialized to {}",
                cli.log_file.display()
            );
        }
    }

    verbose_println!(
        quiet_mode,
        "============================================================"
    );
    verbose_println!(
        quiet_mode,
        "Puzzle: {:?}, input: {}",
        cli.puzzle,
        cli.input.display()
    );
    verbose_println!(
        quiet_mode,
        "============================================================"
    );

    let result = solve(&cli, quiet_mode);

    if let Err(e) = &result {
        verbose_eprintln!(quiet_mode, "[ERROR] {}", e);
    }
    flush_log(quiet_mode);

    let answers = result?;
    if quiet_mode {
        println!("{}", answers.part1);
        println!("{}", answers.part2);
    } else {
        println!("{:?} part 1: {}", cli.puzzle, answers.part1);
        println!("{:?} part 2: {}", cli.puzzle, answers.part2);
        println!("See '{}' for verbose output.", cli.log_file.display());
    }

    Ok(())
}

fn solve(cli: &Cli, quiet_mode: bool) -> Result<Answers, AppError> {
    let input = file_handler::read_input_file(&cli.input, quiet_mode)?;
    flush_log(quiet_mode);

    match cli.puzzle {
        PuzzleKind::Beams => {
            let mut graph_log = match &cli.graph_log {
                Some(path) => Some(file_handler::init_graph_log_writer(path).map_err(|e| {
                    verbose_eprintln!(
                        quiet_mode,
                        "[ERROR] Failed to open graph log ({}): {}",
                        path.display(),
                        e
                    );
                    AppError::Io(e)
                })?),
                None => None,
            };

            let answers = processing::process_beams(&input, quiet_mode, graph_log.as_mut())?;

            if let Some(writer) = graph_log.as_mut() {
                if let Err(e) = writer.flush() {
                    verbose_eprintln!(
                        quiet_mode,
                        "[WARNING] Failed to flush graph log: {}. Some adjacency data might be lost.",
                        e
                    );
                }
            }
            Ok(answers)
        }
        PuzzleKind::Circuits => processing::process_circuits(&input, cli.connections, quiet_mode),
    }
}

fn flush_log(quiet_mode: bool) {
    if quiet_mode {
        return;
    }
    if let Err(e) = logger::flush_global_logger() {
        // The log itself may be what is failing, so go straight to stderr.
        eprintln!("[WARNING] Failed to flush verbose log: {}", e);
    }
}
