//! Domain models for the bossfeed conversion pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`Observation`] - One cleaned source row (boss id, date, name, hp)
//! - [`TimelinePoint`] - One entry of a boss timeline in the output JSON
//! - [`BossRecord`] - One boss with its date-ordered timeline

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// =============================================================================
// Observation (cleaned source row)
// =============================================================================

/// A single cleaned observation of a boss's hit points.
///
/// Built by the cleaner from one CSV row that passed validation. The
/// hit points stay fractional until output time; the JSON carries the
/// truncated integer.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// 0-based index of the source data row (header excluded).
    pub row: usize,
    /// Boss identifier, the trailing digit run of the link column.
    pub boss_id: u64,
    /// Observation date.
    pub date_start: NaiveDate,
    /// Boss display name.
    pub boss_name: String,
    /// Observed hit points.
    pub boss_hp: f64,
}

impl Observation {
    /// Key used for de-duplication: two observations with the same key
    /// describe the same boss on the same day.
    pub fn dedupe_key(&self) -> (u64, NaiveDate, &str) {
        (self.boss_id, self.date_start, self.boss_name.as_str())
    }

    /// Convert to the output representation, truncating hit points
    /// toward zero.
    pub fn timeline_point(&self) -> TimelinePoint {
        TimelinePoint {
            date: self.date_start,
            hp: self.boss_hp as i64,
            boss_id: self.boss_id,
        }
    }
}

// =============================================================================
// Output Format
// =============================================================================

/// One point of a boss HP timeline.
///
/// `date` serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub hp: i64,
    pub boss_id: u64,
}

/// A boss with its complete HP timeline, sorted ascending by date.
///
/// The output file is a JSON array of these, one per distinct boss name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossRecord {
    pub boss_name: String,
    pub timeline: Vec<TimelinePoint>,
}

impl BossRecord {
    /// Create an empty record for a boss name.
    pub fn new(boss_name: impl Into<String>) -> Self {
        Self {
            boss_name: boss_name.into(),
            timeline: Vec::new(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_timeline_point_serialization() {
        let point = TimelinePoint {
            date: date("2024-01-05"),
            hp: 1000,
            boss_id: 12,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json["date"], "2024-01-05");
        assert_eq!(json["hp"], 1000);
        assert_eq!(json["boss_id"], 12);
    }

    #[test]
    fn test_hp_truncates_toward_zero() {
        let obs = Observation {
            row: 0,
            boss_id: 7,
            date_start: date("2024-03-01"),
            boss_name: "Hydra".into(),
            boss_hp: 999.9,
        };
        assert_eq!(obs.timeline_point().hp, 999);
    }

    #[test]
    fn test_boss_record_serialization() {
        let mut record = BossRecord::new("Dragon");
        record.timeline.push(TimelinePoint {
            date: date("2024-01-05"),
            hp: 1000,
            boss_id: 12,
        });
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"boss_name\":\"Dragon\""));
        assert!(json.contains("\"2024-01-05\""));
    }

    #[test]
    fn test_dedupe_key_equality() {
        let a = Observation {
            row: 0,
            boss_id: 12,
            date_start: date("2024-01-05"),
            boss_name: "Dragon".into(),
            boss_hp: 1000.0,
        };
        let mut b = a.clone();
        b.row = 5;
        b.boss_hp = 1050.0;
        assert_eq!(a.dedupe_key(), b.dedupe_key());
    }
}
