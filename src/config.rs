//! Configuration management and validation.
//!
//! Provides the configuration structures for conversion runs: worker count,
//! the malformed-file policy and aggregation options. Configuration can be
//! loaded from a JSON file and then overridden from the command line.

use crate::constants::{APP_NAME, CONFIG_FILE_NAME, MAX_WORKERS};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// How many entries a series field may contribute per measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesMultiplicity {
    /// At most one entry per measurement; repeated lines are rejected
    #[default]
    Single,
    /// Any count, provided every measurement reports the same count
    Uniform,
}

/// Options controlling how measurements are merged into one table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Accepted multiplicity of series fields
    pub series_multiplicity: SeriesMultiplicity,

    /// Also write each series column, joined, into the metadata
    pub include_column_summaries: bool,
}

/// Global configuration for ASC conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of files parsed concurrently
    pub workers: usize,

    /// Skip files that fail to parse instead of aborting the conversion
    pub skip_malformed: bool,

    /// Aggregation options
    pub aggregation: AggregationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().clamp(1, MAX_WORKERS),
            skip_malformed: false,
            aggregation: AggregationConfig::default(),
        }
    }
}

impl Config {
    /// Set the number of concurrent parse workers
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Skip malformed files rather than failing the whole conversion
    pub fn with_skip_malformed(mut self, skip: bool) -> Self {
        self.skip_malformed = skip;
        self
    }

    /// Set the accepted series multiplicity
    pub fn with_series_multiplicity(mut self, multiplicity: SeriesMultiplicity) -> Self {
        self.aggregation.series_multiplicity = multiplicity;
        self
    }

    /// Include joined column summaries in the table metadata
    pub fn with_column_summaries(mut self, enabled: bool) -> Self {
        self.aggregation.include_column_summaries = enabled;
        self
    }

    /// Default configuration file location for the current user
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::configuration("Could not determine user configuration directory")
        })?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from a JSON file; missing keys take default values
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = serde_json::from_str(&content).map_err(|e| {
            Error::configuration(format!(
                "Invalid config file {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(Error::configuration("workers must be at least 1"));
        }
        if self.workers > MAX_WORKERS {
            return Err(Error::configuration(format!(
                "workers must not exceed {} (got {})",
                MAX_WORKERS, self.workers
            )));
        }
        Ok(())
    }
}
