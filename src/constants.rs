//! Application constants for ALV processor
//!
//! This module contains the ASC field vocabulary, output key names,
//! timestamp formats and default values used throughout the application.

// =============================================================================
// File Discovery
// =============================================================================

/// Extension of ALV correlator text exports (compared case-insensitively)
pub const ASC_FILE_EXTENSION: &str = "asc";

/// Characters that mark a CLI input as a glob pattern rather than a path
pub const GLOB_META_CHARS: &[char] = &['*', '?', '['];

// =============================================================================
// ASC Field Labels
// =============================================================================

/// Instrument labels of the scalar fields recognised in ASC files
///
/// Labels must match exactly, including unit annotations. Series labels are
/// defined by [`crate::app::models::SeriesField`].
pub mod asc_labels {
    pub const SAMPLE_NAME: &str = "Samplename";
    pub const DEVICE_INFO: &str = "Device Info";
    pub const WAVELENGTH: &str = "Wavelength [nm]";
    pub const DURATION: &str = "Duration [s]";
    pub const DATETIME: &str = "Datetime";

    /// Native ALV exports split the start time over two lines
    pub const DATE: &str = "Date";
    pub const TIME: &str = "Time";
}

// =============================================================================
// Timestamp Formats
// =============================================================================

/// Formats accepted for a combined `Datetime` value
pub const DATETIME_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Formats accepted for a `Date` value
pub const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d"];

/// Format accepted for a `Time` value
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";

/// Format used to render the measurement starting time
pub const START_TIME_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// =============================================================================
// Output Keys
// =============================================================================

/// Metadata keys of the aggregated table, in output order
pub mod metadata_keys {
    pub const SAMPLE_NAME: &str = "Samplename";
    pub const DEVICE_INFO: &str = "Device Info";
    pub const WAVELENGTH: &str = "wavelength [nm]";
    pub const START_TIME: &str = "measurement starting time";
    pub const DURATION: &str = "duration [s]";
    pub const ROWS: &str = "rows";
    pub const COLUMNS: &str = "columns";
}

/// Data column holding each measurement's offset from the starting time
pub const TIME_LINE_COLUMN: &str = "duration [s]";

/// Separator between entries of a multi-valued series token
pub const SERIES_ENTRY_SEPARATOR: &str = "; ";

/// Separator between tokens in a column summary metadata entry
pub const COLUMN_SUMMARY_SEPARATOR: &str = ", ";

/// Separator between the canonical device label and its suffix
pub const DEVICE_SUFFIX_SEPARATOR: char = '/';

// =============================================================================
// Processing Defaults
// =============================================================================

/// Application name used for the configuration directory
pub const APP_NAME: &str = "alv-processor";

/// Configuration file name inside the configuration directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Upper bound on concurrent parse workers
pub const MAX_WORKERS: usize = 256;
