//! Runs a single puzzle with step-by-step verbose logging.
//!
//! Each solver goes through the same stages as the plain `solve` functions in
//! `crate::puzzles`, but reports intermediate sizes to the verbose log and
//! optionally dumps the beam graph.

use super::error::AppError;
use super::{verbose_eprintln, verbose_println}; // Macros for conditional logging.
use crate::puzzles::beams::Manifold;
use crate::puzzles::circuits::{self, LARGEST_CIRCUITS};
use crate::puzzles::Answers;
use std::fs::File;
use std::io::BufWriter;

/// Solves the beam-splitting puzzle.
///
/// # Arguments
/// * `input` - Raw puzzle input.
/// * `quiet_mode` - Suppresses verbose logging if true.
/// * `graph_log` - Receives the beam graph adjacency when present.
///
/// # Errors
/// Returns `AppError::Puzzle` for malformed input and `AppError::Graph` if
/// the beam graph cannot be counted.
pub fn process_beams(
    input: &str,
    quiet_mode: bool,
    graph_log: Option<&mut BufWriter<File>>,
) -> Result<Answers, AppError> {
    verbose_println!(quiet_mode, "[STEP 1] Parsing manifold...");
    let mut manifold = Manifold::parse(input)?;
    verbose_println!(
        quiet_mode,
        "   => {} rows x {} columns, start at column {}.",
        manifold.height(),
        manifold.width(),
        manifold.start().column
    );

    verbose_println!(quiet_mode, "[STEP 2] Simulating beams...");
    manifold.simulate();
    let splits = manifold.count_splits();
    verbose_println!(quiet_mode, "   => {} splitter(s) reached.", splits);

    verbose_println!(quiet_mode, "[STEP 3] Building beam graph...");
    let graph = manifold.beam_graph();
    verbose_println!(
        quiet_mode,
        "   => {} node(s), {} edge(s), {} sink(s).",
        graph.node_count(),
        graph.edge_count(),
        graph.sinks().count()
    );
    if let Some(writer) = graph_log {
        if let Err(e) = graph.write_adjacency(writer) {
            // Non-critical: the answers do not depend on the dump.
            verbose_eprintln!(quiet_mode, "   [ERROR] Failed to write graph adjacency: {}", e);
        }
    }

    verbose_println!(quiet_mode, "[STEP 4] Counting timelines...");
    let timelines = graph.count_distinct_paths(&manifold.start())?;
    verbose_println!(quiet_mode, "   => {} timeline(s).", timelines);

    Ok(Answers {
        part1: splits as u64,
        part2: i128::from(timelines),
    })
}

/// Solves the junction box circuit puzzle.
///
/// # Arguments
/// * `input` - Raw puzzle input.
/// * `connections` - Number of closest pairs to connect for part one.
/// * `quiet_mode` - Suppresses verbose logging if true.
///
/// # Errors
/// Returns `AppError::Puzzle` for malformed input or duplicate boxes.
pub fn process_circuits(
    input: &str,
    connections: usize,
    quiet_mode: bool,
) -> Result<Answers, AppError> {
    verbose_println!(quiet_mode, "[STEP 1] Parsing junction boxes...");
    let boxes = circuits::parse_boxes(input)?;
    verbose_println!(quiet_mode, "   => Found {} box(es).", boxes.len());

    verbose_println!(
        quiet_mode,
        "[STEP 2] Connecting the {} closest pair(s)...",
        connections
    );
    let sizes = circuits::circuit_sizes(&boxes, connections)?;
    let largest: Vec<usize> = sizes.iter().copied().take(LARGEST_CIRCUITS).collect();
    verbose_println!(
        quiet_mode,
        "   => {} circuit(s), largest {:?}.",
        sizes.len(),
        largest
    );
    let part1 = largest.iter().map(|&size| size as u64).product();

    verbose_println!(quiet_mode, "[STEP 3] Connecting until one circuit remains...");
    let part2 = match circuits::final_connection(&boxes)? {
        Some((a, b)) => {
            verbose_println!(quiet_mode, "   => Final connection {:?} <-> {:?}.", a, b);
            circuits::x_product(&a, &b)
        }
        None => {
            verbose_println!(quiet_mode, "   => Fewer than two boxes, nothing to connect.");
            0
        }
    };

    Ok(Answers { part1, part2 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn circuits_report_a_negative_x_product() {
        let answers = process_circuits("-3,0,0\n5,0,0\n", 1, true).unwrap();
        assert_eq!(
            answers,
            Answers {
                part1: 2,
                part2: -15
            }
        );
    }

    #[test]
    fn beams_count_a_splitter_under_the_start() {
        let answers = process_beams(".S.\n.^.\n...\n", true, None).unwrap();
        assert_eq!(answers, Answers { part1: 1, part2: 2 });
    }
}
