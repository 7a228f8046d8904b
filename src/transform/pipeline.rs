//! High-level conversion pipeline.
//!
//! Combines all stages: existence check, CSV parsing, schema check,
//! row cleaning, de-duplication, grouping, and the atomic output write.
//!
//! # Example
//!
//! ```rust,ignore
//! use bossfeed::{convert_file, ConvertOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let report = convert_file(&ConvertOptions::default())?;
//!     println!("Wrote {} boss records", report.records.len());
//!     Ok(())
//! }
//! ```

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{PipelineError, PipelineResult};
use crate::models::BossRecord;
use crate::parser::{parse_bytes_auto, parse_bytes_with, ParseResult};
use super::cleaner::{
    check_schema, clean_rows, sort_and_dedupe, RejectReason, RejectedRow,
};
use super::grouper::group_observations;

// =============================================================================
// Options
// =============================================================================

/// Conversion options.
///
/// Replaces the fixed module-level paths of ad-hoc converter scripts with
/// an explicit configuration passed into the pipeline.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Source CSV path. Default: `data/boss_hp_master.csv`.
    pub input: PathBuf,

    /// Destination JSON path, overwritten wholesale. Parent directories
    /// are created as needed. Default: `public/bosses.json`.
    pub output: PathBuf,

    /// Name of the column holding the boss page link whose trailing
    /// digits form the boss id. Default: `link`.
    pub link_column: String,

    /// CSV delimiter. Auto-detected when `None`.
    pub delimiter: Option<char>,

    /// Drop rows whose link has no trailing digits instead of aborting
    /// the run. Off by default: a strict integer conversion over the
    /// whole id column fails outright on the first bad link.
    pub drop_bad_links: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/boss_hp_master.csv"),
            output: PathBuf::from("public/bosses.json"),
            link_column: "link".to_string(),
            delimiter: None,
            drop_bad_links: false,
        }
    }
}

// =============================================================================
// Report
// =============================================================================

/// Result of a completed conversion.
#[derive(Debug)]
pub struct ConvertReport {
    /// One record per distinct boss name, ascending by name.
    pub records: Vec<BossRecord>,

    /// Rows excluded during cleaning, with reasons.
    pub rejected: Vec<RejectedRow>,

    /// Source CSV metadata.
    pub csv_info: CsvInfo,
}

/// Source CSV metadata.
#[derive(Debug, Clone)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
}

// =============================================================================
// Entry points
// =============================================================================

/// Convert a CSV file into the grouped JSON document.
///
/// Runs the whole pipeline and writes the output file. Fatal errors
/// (missing input, missing column, bad link in strict mode) abort
/// before anything is written; the destination is never touched on a
/// failure path.
pub fn convert_file(options: &ConvertOptions) -> PipelineResult<ConvertReport> {
    if !options.input.exists() {
        return Err(PipelineError::MissingInput(options.input.clone()));
    }

    let bytes = fs::read(&options.input).map_err(crate::error::CsvError::IoError)?;
    let report = convert_bytes(&bytes, options)?;

    write_output(&report.records, &options.output)?;
    Ok(report)
}

/// Convert raw CSV bytes without touching the filesystem.
///
/// Same pipeline as [`convert_file`] minus the existence check and the
/// output write.
pub fn convert_bytes(bytes: &[u8], options: &ConvertOptions) -> PipelineResult<ConvertReport> {
    let parsed = match options.delimiter {
        Some(delimiter) => parse_bytes_with(bytes, delimiter)?,
        None => parse_bytes_auto(bytes)?,
    };
    transform_parsed(parsed, options)
}

fn transform_parsed(
    parsed: ParseResult,
    options: &ConvertOptions,
) -> PipelineResult<ConvertReport> {
    check_schema(&parsed.headers, &options.link_column)?;

    let csv_info = CsvInfo {
        encoding: parsed.encoding.clone(),
        delimiter: parsed.delimiter,
        headers: parsed.headers.clone(),
        row_count: parsed.records.len(),
    };

    let cleaned = clean_rows(&parsed.records, &options.link_column);

    // Strict mode: a single unextractable link fails the whole run.
    if !options.drop_bad_links {
        if let Some(bad) = cleaned
            .rejected
            .iter()
            .find(|r| matches!(r.reason, RejectReason::BadLink(_)))
        {
            let RejectReason::BadLink(ref value) = bad.reason else {
                unreachable!()
            };
            return Err(PipelineError::InvalidLink {
                row: bad.row,
                value: value.clone(),
            });
        }
    }

    let observations = sort_and_dedupe(cleaned.observations);
    let records = group_observations(observations);

    Ok(ConvertReport {
        records,
        rejected: cleaned.rejected,
        csv_info,
    })
}

// =============================================================================
// Output
// =============================================================================

/// Serialize records and write them atomically to `path`.
///
/// The JSON is pretty-printed with non-ASCII characters preserved
/// literally. The document is written to a temp file in the destination
/// directory and renamed over the target, so readers never observe a
/// partial file.
pub fn write_output(records: &[BossRecord], path: &Path) -> PipelineResult<()> {
    let json = serde_json::to_string_pretty(records)?;

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
    tmp.write_all(json.as_bytes())?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
