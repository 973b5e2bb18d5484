//! ALV Processor Library
//!
//! A Rust library for converting ALV dynamic light scattering (DLS) correlator
//! exports in ASC text format into a single, time-ordered metadata and data
//! table suitable for an electronic laboratory notebook.
//!
//! This library provides tools for:
//! - Parsing ALV ASC files into typed measurement records
//! - Aggregating measurements into one table ordered by acquisition time
//! - Discovering and decoding ASC files (Latin-1) on disk
//! - Parsing many files concurrently before a single aggregation step
//! - Exporting the aggregate as notebook table JSON or CSV

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod asc_parser;
        pub mod conversion;
        pub mod measurement_aggregator;
        pub mod table_export;
    }
    pub mod adapters {
        pub mod filesystem;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{FieldMap, MeasurementRecord, SeriesField, TableResult};
pub use app::services::asc_parser::{AscRecordParser, parse_asc_record};
pub use app::services::measurement_aggregator::{MeasurementAggregator, aggregate_records};
pub use config::Config;

/// Result type alias for the ALV processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ASC parsing, aggregation and conversion
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required field is missing or a recognised value could not be parsed
    #[error("Malformed record in file '{file}': field '{field}' {reason}")]
    MalformedRecord {
        file: String,
        field: String,
        reason: String,
    },

    /// Aggregation was invoked without any records
    #[error("No measurement records to aggregate")]
    EmptyInput,

    /// Records disagree on how many entries a series field contributes
    #[error(
        "Inconsistent series length for '{field}' in file '{file}': expected {expected} entries, found {found}"
    )]
    InconsistentSeriesLength {
        field: String,
        file: String,
        expected: usize,
        found: usize,
    },

    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File not found
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Directory traversal error
    #[error("Directory traversal error: {message}")]
    DirectoryTraversal {
        message: String,
        #[source]
        source: walkdir::Error,
    },

    /// Invalid glob pattern
    #[error("Invalid file pattern '{pattern}'")]
    GlobPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Output serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Processing interrupted
    #[error("Processing interrupted: {reason}")]
    ProcessingInterrupted { reason: String },
}

impl Error {
    /// Create a malformed record error for a file and field
    pub fn malformed_record(
        file: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedRecord {
            file: file.into(),
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an inconsistent series length error
    pub fn inconsistent_series_length(
        field: impl Into<String>,
        file: impl Into<String>,
        expected: usize,
        found: usize,
    ) -> Self {
        Self::InconsistentSeriesLength {
            field: field.into(),
            file: file.into(),
            expected,
            found,
        }
    }

    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a directory traversal error
    pub fn directory_traversal(message: impl Into<String>, source: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: message.into(),
            source,
        }
    }

    /// Create a glob pattern error
    pub fn glob_pattern(pattern: impl Into<String>, source: glob::PatternError) -> Self {
        Self::GlobPattern {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a processing interrupted error
    pub fn processing_interrupted(reason: impl Into<String>) -> Self {
        Self::ProcessingInterrupted {
            reason: reason.into(),
        }
    }

    /// Name of the file this error is attributed to, if any
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::MalformedRecord { file, .. } | Self::InconsistentSeriesLength { file, .. } => {
                Some(file)
            }
            Self::FileNotFound { path } => Some(path),
            _ => None,
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<walkdir::Error> for Error {
    fn from(error: walkdir::Error) -> Self {
        Self::DirectoryTraversal {
            message: "Directory traversal failed".to_string(),
            source: error,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {}", error),
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Serialization {
            message: format!("CSV output failed: {}", error),
        }
    }
}
