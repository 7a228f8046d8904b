//! Transformation module.
//!
//! This module turns parsed CSV rows into the grouped output:
//! - Cleaner: per-row validation, sort, de-duplication
//! - Grouper: observations to per-boss timelines
//! - Pipeline: orchestration and output write

pub mod cleaner;
pub mod grouper;
pub mod pipeline;

pub use cleaner::*;
pub use grouper::group_observations;
pub use pipeline::*;
