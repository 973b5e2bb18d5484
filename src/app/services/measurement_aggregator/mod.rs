//! Measurement aggregation into a single time-ordered table
//!
//! This module merges parsed ALV measurements into one [`TableResult`]:
//! scalar metadata from the earliest measurement plus one data column per
//! derived quantity, one value per measurement in ascending acquisition time.
//!
//! # Architecture
//!
//! - [`aggregator`] - Ordering, baseline derivation and column derivation
//! - [`formatting`] - Number, token and timestamp rendering
//!
//! # Output Layout
//!
//! Metadata keys, in order: `Samplename`, `Device Info` (text before the first
//! `/`), `wavelength [nm]`, `measurement starting time`, optional column
//! summaries, `duration [s]`, `rows`, `columns`.
//!
//! Data columns, in order: `duration [s]` (seconds since the starting time)
//! followed by one column per [`SeriesField`](crate::app::models::SeriesField).

pub mod aggregator;
pub mod formatting;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use aggregator::MeasurementAggregator;

use crate::Result;
use crate::app::models::{MeasurementRecord, TableResult};

/// Aggregate records with the default options
pub fn aggregate_records(records: Vec<MeasurementRecord>) -> Result<TableResult> {
    MeasurementAggregator::default().aggregate(records)
}
