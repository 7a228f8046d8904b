//! Row cleaning and de-duplication.
//!
//! Turns raw CSV rows (JSON objects from the parser) into validated
//! [`Observation`]s:
//!
//! 1. schema check - the required columns must exist in the header
//! 2. per-row validation - boss id extracted from the link's trailing
//!    digits, date parsed, hit points coerced to a number, name non-empty
//! 3. sort by `(boss_id, date_start)` ascending
//! 4. de-duplicate on `(boss_id, date_start, boss_name)`, last in sort
//!    order wins
//!
//! Rows that fail validation are not silently swallowed: each produces a
//! [`RejectedRow`] carrying the row index and the reason, collected next
//! to the surviving observations.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{PipelineError, PipelineResult};
use crate::models::Observation;

/// Columns every source file must carry, besides the configurable link
/// column. Names are case-sensitive.
pub const REQUIRED_COLUMNS: [&str; 3] = ["Date", "boss_name", "boss_hp"];

/// Maximal trailing run of decimal digits.
static TRAILING_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d+)$").unwrap());

/// Date formats accepted for the `Date` column, tried in order. A
/// datetime value is accepted by taking its date part.
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y"];
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

// =============================================================================
// Rejection accounting
// =============================================================================

/// Why a row was excluded from the output.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectReason {
    /// Link has no trailing digit run to extract a boss id from.
    BadLink(String),
    /// Boss name is absent or blank.
    EmptyName,
    /// Hit points did not parse as a number.
    BadHp(String),
    /// Date did not parse.
    BadDate(String),
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::BadLink(v) => write!(f, "no boss id in link '{v}'"),
            RejectReason::EmptyName => write!(f, "empty boss name"),
            RejectReason::BadHp(v) => write!(f, "non-numeric boss_hp '{v}'"),
            RejectReason::BadDate(v) => write!(f, "unparsable date '{v}'"),
        }
    }
}

/// A row that failed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRow {
    /// 0-based index of the source data row (header excluded).
    pub row: usize,
    pub reason: RejectReason,
}

/// Result of cleaning a batch of rows.
#[derive(Debug, Default)]
pub struct CleanResult {
    /// Rows that passed validation.
    pub observations: Vec<Observation>,
    /// Rows excluded, with reasons.
    pub rejected: Vec<RejectedRow>,
}

impl CleanResult {
    /// Summary statistics, one line.
    pub fn summary(&self) -> String {
        format!(
            "Cleaned: {} observations, {} rejected",
            self.observations.len(),
            self.rejected.len()
        )
    }
}

// =============================================================================
// Schema check
// =============================================================================

/// Verify the header carries the link column and every required column.
///
/// Fatal on failure: the error lists the missing column(s) and the
/// actual header set found.
pub fn check_schema(headers: &[String], link_column: &str) -> PipelineResult<()> {
    let mut missing = Vec::new();

    if !headers.iter().any(|h| h == link_column) {
        missing.push(link_column.to_string());
    }
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            missing.push(col.to_string());
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::MissingColumns {
            missing,
            found: headers.to_vec(),
        })
    }
}

// =============================================================================
// Field coercion
// =============================================================================

/// Extract the maximal trailing digit run of a link as the boss id.
pub fn extract_boss_id(link: &str) -> Option<u64> {
    TRAILING_DIGITS
        .captures(link.trim())
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

/// Coerce a raw hit-point value to a number.
pub fn coerce_hp(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a raw date value into a calendar date.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt.date());
        }
    }
    None
}

// =============================================================================
// Row cleaning
// =============================================================================

fn field<'a>(row: &'a Value, column: &str) -> &'a str {
    row.get(column).and_then(|v| v.as_str()).unwrap_or("")
}

/// Validate one raw row.
///
/// The link is checked first so that a row with several defects still
/// reports `BadLink`, which strict mode escalates to a run-level error.
pub fn clean_row(row: &Value, index: usize, link_column: &str) -> Result<Observation, RejectedRow> {
    let reject = |reason| RejectedRow { row: index, reason };

    let link = field(row, link_column);
    let boss_id =
        extract_boss_id(link).ok_or_else(|| reject(RejectReason::BadLink(link.to_string())))?;

    let boss_name = field(row, "boss_name").trim();
    if boss_name.is_empty() {
        return Err(reject(RejectReason::EmptyName));
    }

    let raw_hp = field(row, "boss_hp");
    let boss_hp = coerce_hp(raw_hp).ok_or_else(|| reject(RejectReason::BadHp(raw_hp.to_string())))?;

    let raw_date = field(row, "Date");
    let date_start =
        parse_date(raw_date).ok_or_else(|| reject(RejectReason::BadDate(raw_date.to_string())))?;

    Ok(Observation {
        row: index,
        boss_id,
        date_start,
        boss_name: boss_name.to_string(),
        boss_hp,
    })
}

/// Clean a batch of raw rows, splitting them into observations and
/// rejections.
pub fn clean_rows(records: &[Value], link_column: &str) -> CleanResult {
    let mut result = CleanResult::default();

    for (index, row) in records.iter().enumerate() {
        match clean_row(row, index, link_column) {
            Ok(obs) => result.observations.push(obs),
            Err(rejected) => result.rejected.push(rejected),
        }
    }

    result
}

// =============================================================================
// Sort + de-duplication
// =============================================================================

/// Sort observations by `(boss_id, date_start)` ascending and collapse
/// duplicates of the same `(boss_id, date_start, boss_name)` triple,
/// keeping the last one in sort order.
pub fn sort_and_dedupe(mut observations: Vec<Observation>) -> Vec<Observation> {
    observations.sort_by(|a, b| {
        (a.boss_id, a.date_start).cmp(&(b.boss_id, b.date_start))
    });

    // Last occurrence per key wins, at its own position.
    let mut last_index: HashMap<(u64, NaiveDate, String), usize> = HashMap::new();
    for (i, obs) in observations.iter().enumerate() {
        last_index.insert(
            (obs.boss_id, obs.date_start, obs.boss_name.clone()),
            i,
        );
    }

    observations
        .into_iter()
        .enumerate()
        .filter(|(i, obs)| {
            last_index[&(obs.boss_id, obs.date_start, obs.boss_name.clone())] == *i
        })
        .map(|(_, obs)| obs)
        .collect()
}
