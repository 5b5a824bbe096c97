//! Disjoint-set and DAG path counting structures, plus the puzzle solvers
//! built on them.

pub mod app;
pub mod graph;
pub mod partition;
pub mod puzzles;
