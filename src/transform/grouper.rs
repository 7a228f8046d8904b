//! Group cleaned observations into per-boss timelines.
//!
//! ```text
//! Observations (flat)                 Output (grouped)
//! ┌──────────────────────────┐        ┌─────────────────────────────┐
//! │ Dragon 2024-01-05 1000   │        │ Dragon                      │
//! │ Dragon 2024-01-06  900   │   →    │   timeline: [01-05, 01-06]  │
//! │ Hydra  2024-01-05  500   │        ├─────────────────────────────┤
//! └──────────────────────────┘        │ Hydra                       │
//!                                     │   timeline: [01-05]         │
//!                                     └─────────────────────────────┘
//! ```
//!
//! One [`BossRecord`] per distinct boss name, emitted in ascending name
//! order so repeated runs produce identical output. Each timeline is
//! sorted ascending by date.

use std::collections::BTreeMap;

use crate::models::{BossRecord, Observation};

/// Group observations by boss name into date-sorted timelines.
pub fn group_observations(observations: Vec<Observation>) -> Vec<BossRecord> {
    let mut groups: BTreeMap<String, Vec<Observation>> = BTreeMap::new();

    for obs in observations {
        groups.entry(obs.boss_name.clone()).or_default().push(obs);
    }

    groups
        .into_iter()
        .map(|(boss_name, mut group)| {
            group.sort_by_key(|obs| obs.date_start);
            BossRecord {
                boss_name,
                timeline: group.iter().map(Observation::timeline_point).collect(),
            }
        })
        .collect()
}
