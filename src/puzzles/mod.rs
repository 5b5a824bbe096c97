// error module
mod error;

// beam splitting (day 7)
pub mod beams;
// junction box circuits (day 8)
pub mod circuits;

//─────────────────────────────────────────────────────────────────────────────
// Public re-exports.
//─────────────────────────────────────────────────────────────────────────────
pub use error::PuzzleError;

/// The two answers a puzzle produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Answers {
    pub part1: u64,
    pub part2: i128,
}

/// Non-blank lines of `input` with their 1-based line numbers.
fn numbered_lines(input: &str) -> impl Iterator<Item = (usize, &str)> {
    input
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}
