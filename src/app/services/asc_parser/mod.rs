//! ALV ASC parser for dynamic light scattering exports
//!
//! This module converts the decoded text lines of one ALV correlator ASC file
//! into a typed [`MeasurementRecord`]. Parsing is a pure transform: callers
//! supply the lines (decoded as Latin-1 so that `°`, `µ` and `²` in the field
//! labels survive) and receive a record or a `MalformedRecord` error naming the
//! file and field at fault.
//!
//! ## Architecture
//!
//! - [`parser`] - Line walking and record assembly
//! - [`field_parsers`] - Label/value splitting and typed value conversion
//!
//! ## Usage
//!
//! ```rust
//! use alv_processor::app::services::asc_parser::AscRecordParser;
//!
//! # fn example() -> alv_processor::Result<()> {
//! let lines = [
//!     "Samplename : \"Latex 100nm\"",
//!     "Datetime : 17.03.2016 15:41:38",
//!     "Duration [s] : 30",
//!     "Temperature [K] : 298.15",
//! ];
//! let record = AscRecordParser::new().parse("run_0001.asc", &lines)?;
//! assert_eq!(record.sample_name, "Latex 100nm");
//! # Ok(())
//! # }
//! ```

pub mod field_parsers;
pub mod parser;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use parser::AscRecordParser;

use crate::Result;
use crate::app::models::MeasurementRecord;

/// Parse one ASC file's lines with a default parser
pub fn parse_asc_record<S: AsRef<str>>(filename: &str, lines: &[S]) -> Result<MeasurementRecord> {
    AscRecordParser::new().parse(filename, lines)
}
