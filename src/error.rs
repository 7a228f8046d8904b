//! Error types for the bossfeed conversion pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - CSV reading and decoding errors
//! - [`PipelineError`] - Top-level conversion errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Fatal conditions (missing input file, missing required column,
//! unextractable boss id in strict mode) abort the whole run; row-level
//! data-quality problems never surface here, they are collected as
//! rejected rows by the cleaner instead.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Reading Errors
// =============================================================================

/// Errors while reading and decoding the source CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode bytes with the detected encoding.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(String),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level conversion errors.
///
/// This is the main error type returned by [`crate::transform::pipeline::convert_file`].
/// Every variant is fatal: the run aborts and no output file is written.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input file does not exist.
    #[error("Input file not found: {}", .0.display())]
    MissingInput(PathBuf),

    /// Required column(s) absent from the CSV header.
    #[error("CSV is missing column(s) {missing:?} (found {found:?})")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    /// A row's link carries no trailing digit run to extract a boss id from.
    ///
    /// Only raised in strict mode; with
    /// [`drop_bad_links`](crate::transform::pipeline::ConvertOptions::drop_bad_links)
    /// set, such rows are rejected individually instead.
    #[error("Row {row}: cannot extract boss id from link '{value}'")]
    InvalidLink { row: usize, value: String },

    /// CSV reading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write the output file.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));
    }

    #[test]
    fn test_missing_columns_names_them() {
        let err = PipelineError::MissingColumns {
            missing: vec!["boss_hp".into()],
            found: vec!["link".into(), "Date".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("boss_hp"));
        assert!(msg.contains("link"));
    }

    #[test]
    fn test_missing_input_names_path() {
        let err = PipelineError::MissingInput(PathBuf::from("data/boss_hp_master.csv"));
        assert!(err.to_string().contains("boss_hp_master.csv"));
    }
}
