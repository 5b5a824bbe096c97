//! File system helpers for the solver front end.
//!
//! Validates and reads the puzzle input file, and opens the optional graph
//! adjacency dump. Uses the verbose logging macros from the parent `app`
//! module.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Error as IoError};
use std::path::Path;

use super::error::AppError;
use super::verbose_eprintln;

/// Checks that `input_path` exists and is a regular file, then reads it.
///
/// # Errors
/// Returns `AppError::InvalidPath` if the path is missing or not a file, and
/// `AppError::Io` if reading fails.
pub fn read_input_file(input_path: &Path, quiet_mode: bool) -> Result<String, AppError> {
    if !input_path.exists() {
        let error_msg = format!("File not found: {}", input_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }
    if !input_path.is_file() {
        let error_msg = format!("Path is not a file: {}", input_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::InvalidPath(error_msg));
    }

    let content = fs::read_to_string(input_path)?;
    if content.trim().is_empty() {
        let error_msg = format!("Input file is empty: {}", input_path.display());
        verbose_eprintln!(quiet_mode, "Input Error: {}", error_msg);
        return Err(AppError::General(error_msg));
    }
    Ok(content)
}

/// Opens a buffered writer for the graph adjacency dump, truncating any
/// previous dump. The writer flushes when dropped or when the caller
/// flushes it explicitly.
///
/// # Errors
/// Returns an `IoError` if the file cannot be opened or created.
pub fn init_graph_log_writer(file_path: &Path) -> Result<BufWriter<File>, IoError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(file_path)?;
    Ok(BufWriter::new(file))
}
