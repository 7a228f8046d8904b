//! # Bossfeed - boss HP observations to grouped timeline JSON
//!
//! Bossfeed converts a CSV of boss hit-point observations into a nested
//! JSON document grouped by boss, for consumption by a front-end display.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│   Cleaner   │────▶│ Grouped JSON│
//! │ (boss obs.) │     │ (auto-enc)  │     │ (+ grouper) │     │ (per boss)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bossfeed::{convert_file, ConvertOptions};
//!
//! fn main() {
//!     let report = convert_file(&ConvertOptions::default()).unwrap();
//!     println!("Wrote {} boss records", report.records.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Observation, TimelinePoint, BossRecord)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Cleaning, grouping, and pipeline

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Transformation
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, CsvResult, PipelineError, PipelineResult};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{BossRecord, Observation, TimelinePoint};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, parse_bytes_auto, parse_bytes_with,
    parse_file_auto, parse_records, ParseResult,
};

// =============================================================================
// Re-exports - Cleaning
// =============================================================================

pub use transform::cleaner::{
    check_schema, clean_row, clean_rows, coerce_hp, extract_boss_id, parse_date, sort_and_dedupe,
    CleanResult, RejectReason, RejectedRow, REQUIRED_COLUMNS,
};

// =============================================================================
// Re-exports - Grouper
// =============================================================================

pub use transform::grouper::group_observations;

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    convert_bytes, convert_file, write_output, ConvertOptions, ConvertReport, CsvInfo,
};
