use crate::graph::GraphError;
use crate::partition::PartitionError;
use std::num::ParseIntError;
use thiserror::Error;

//─────────────────────────────────────────────────────────────────────────────

/// Error type for puzzle input parsing and solving.
#[derive(Error, Debug)]
pub enum PuzzleError {
    /// The input contained no non-blank lines.
    #[error("Puzzle input is empty")]
    EmptyInput,

    /// A grid row has a different width than the first row.
    #[error("Line {line}: expected {expected} columns, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// A grid cell holds a character outside the puzzle alphabet.
    #[error("Line {line}, column {column}: unexpected character '{found}'")]
    UnexpectedChar {
        line: usize,
        column: usize,
        found: char,
    },

    /// The first grid row has no beam start (`S`), or has more than one.
    #[error("Expected exactly one start marker 'S' in the first row, found {0}")]
    StartMarker(usize),

    /// A coordinate line does not have the expected number of fields.
    #[error("Line {line}: expected three comma-separated coordinates, got '{content}'")]
    MalformedLine { line: usize, content: String },

    /// A coordinate failed to parse as an integer.
    #[error("Line {line}: invalid number '{content}': {source}")]
    InvalidNumber {
        line: usize,
        content: String,
        source: ParseIntError,
    },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Partition error: {0}")]
    Partition(#[from] PartitionError),
}
