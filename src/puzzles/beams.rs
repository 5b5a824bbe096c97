//! Beam splitting through a tachyon manifold.
//!
//! A beam enters at `S` on the first row and travels straight down. When a
//! beam reaches a splitter (`^`) it stops and two new beams continue from the
//! columns directly left and right of the splitter. Part one counts the
//! splitters a beam actually reaches; part two counts the distinct routes
//! ("timelines") a single particle can take from `S` to the bottom row.

use super::error::PuzzleError;
use super::{numbered_lines, Answers};
use crate::graph::PathCountingGraph;

const EMPTY: char = '.';
const START: char = 'S';
const SPLITTER: char = '^';
const BEAM: char = '|';

/// A cell of the manifold, addressed as (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub column: usize,
    pub row: usize,
}

/// Graph of beam cells, keyed by the cell itself.
pub type BeamGraph = PathCountingGraph<Cell, Cell, fn(&Cell) -> Cell>;

fn cell_key(cell: &Cell) -> Cell {
    *cell
}

fn is_beam(tile: char) -> bool {
    tile == BEAM || tile == START
}

/// Rectangular character grid with a single start marker on its first row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifold {
    rows: Vec<Vec<char>>,
    start: usize,
}

impl Manifold {
    /// Parses the puzzle grid.
    ///
    /// # Errors
    /// Returns a `PuzzleError` when the grid is empty, ragged, contains
    /// unknown characters, or does not have exactly one `S` on its first row.
    pub fn parse(input: &str) -> Result<Self, PuzzleError> {
        let mut rows: Vec<Vec<char>> = Vec::new();
        for (line_no, line) in numbered_lines(input) {
            let row: Vec<char> = line.chars().collect();
            if let Some(first) = rows.first() {
                if row.len() != first.len() {
                    return Err(PuzzleError::RaggedRow {
                        line: line_no,
                        expected: first.len(),
                        found: row.len(),
                    });
                }
            }
            if let Some((column, &found)) = row
                .iter()
                .enumerate()
                .find(|(_, &tile)| !matches!(tile, EMPTY | START | SPLITTER | BEAM))
            {
                return Err(PuzzleError::UnexpectedChar {
                    line: line_no,
                    column: column + 1,
                    found,
                });
            }
            rows.push(row);
        }

        let first = rows.first().ok_or(PuzzleError::EmptyInput)?;
        let starts: Vec<usize> = first
            .iter()
            .enumerate()
            .filter(|(_, &tile)| tile == START)
            .map(|(column, _)| column)
            .collect();
        match starts.as_slice() {
            [start] => {
                let start = *start;
                Ok(Self { rows, start })
            }
            other => Err(PuzzleError::StartMarker(other.len())),
        }
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// The cell holding the start marker.
    pub fn start(&self) -> Cell {
        Cell {
            column: self.start,
            row: 0,
        }
    }

    pub fn tile(&self, cell: Cell) -> Option<char> {
        self.rows.get(cell.row)?.get(cell.column).copied()
    }

    /// Propagates beams downward one row at a time, marking beam cells
    /// with `|`.
    pub fn simulate(&mut self) {
        let width = self.width();
        for row in 1..self.rows.len() {
            let (above, below) = self.rows.split_at_mut(row);
            let prev = &above[row - 1];
            let curr = &mut below[0];

            for column in 0..width {
                if !is_beam(prev[column]) {
                    continue;
                }
                if curr[column] == SPLITTER {
                    if column > 0 {
                        curr[column - 1] = BEAM;
                    }
                    if column + 1 < width {
                        curr[column + 1] = BEAM;
                    }
                    continue;
                }
                curr[column] = BEAM;
            }
        }
    }

    /// Number of splitters hit by a beam (or the start marker) arriving from
    /// directly above. Only meaningful on a simulated manifold.
    pub fn count_splits(&self) -> usize {
        self.rows
            .windows(2)
            .map(|pair| {
                pair[0]
                    .iter()
                    .zip(&pair[1])
                    .filter(|(&above, &tile)| is_beam(above) && tile == SPLITTER)
                    .count()
            })
            .sum()
    }

    /// Builds the graph of beam cells of a simulated manifold. Every beam
    /// cell points at the beam cells it feeds in the row below: the cell
    /// straight down, or the two cells beside a splitter.
    pub fn beam_graph(&self) -> BeamGraph {
        let mut graph: BeamGraph = PathCountingGraph::new(cell_key as fn(&Cell) -> Cell);
        graph.upsert_node(self.start(), None);

        let width = self.width();
        for row in 1..self.rows.len() {
            let above = &self.rows[row - 1];
            let curr = &self.rows[row];

            for column in 0..width {
                if curr[column] != BEAM {
                    continue;
                }
                let here = Cell { column, row };
                graph.upsert_node(here, None);

                if is_beam(above[column]) {
                    graph.upsert_node(here, Some(Cell { column, row: row - 1 }));
                }
                // Split off a splitter on the left.
                if column > 0 && curr[column - 1] == SPLITTER && is_beam(above[column - 1]) {
                    graph.upsert_node(
                        here,
                        Some(Cell {
                            column: column - 1,
                            row: row - 1,
                        }),
                    );
                }
                // Split off a splitter on the right.
                if column + 1 < width && curr[column + 1] == SPLITTER && is_beam(above[column + 1])
                {
                    graph.upsert_node(
                        here,
                        Some(Cell {
                            column: column + 1,
                            row: row - 1,
                        }),
                    );
                }
            }
        }
        graph
    }
}

/// Solves both parts for a raw puzzle input.
///
/// # Errors
/// Propagates parse errors, and graph errors from path counting.
pub fn solve(input: &str) -> Result<Answers, PuzzleError> {
    let mut manifold = Manifold::parse(input)?;
    manifold.simulate();
    let splits = manifold.count_splits();
    let timelines = manifold
        .beam_graph()
        .count_distinct_paths(&manifold.start())?;
    Ok(Answers {
        part1: splits as u64,
        part2: i128::from(timelines),
    })
}
