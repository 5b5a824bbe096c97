use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Solves the beam-splitting and circuit puzzles from a local input file.", long_about = None)]
pub struct Cli {
    /// Puzzle to solve
    #[clap(value_enum)]
    pub puzzle: PuzzleKind,

    /// Puzzle input file
    pub input: PathBuf,

    /// Suppress verbose output, only printing the two answers.
    #[clap(short, long)]
    pub quiet: bool,

    /// File receiving the verbose log.
    #[clap(long, default_value = "solver.log")]
    pub log_file: PathBuf,

    /// Also dump the beam graph adjacency to this file.
    #[clap(long)]
    pub graph_log: Option<PathBuf>,

    /// Number of closest pairs to connect for part one of the circuits puzzle.
    #[clap(long, default_value_t = 1000)]
    pub connections: usize,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PuzzleKind {
    /// Day 7: beam splitting through a manifold
    #[value(alias = "7")]
    Beams,
    /// Day 8: junction box circuits
    #[value(alias = "8")]
    Circuits,
}
