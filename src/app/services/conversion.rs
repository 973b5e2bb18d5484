//! Concurrent conversion of ASC files into one aggregated table
//!
//! Files are read and parsed independently on blocking worker tasks, bounded
//! by the configured worker count. Aggregation runs only once every parse has
//! finished, so the worker pool needs no shared state or locking.

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use tokio::task;
use tracing::{debug, error, info, warn};

use crate::app::adapters::filesystem::{AscSource, read_asc_file};
use crate::app::models::{MeasurementRecord, TableResult};
use crate::app::services::asc_parser::AscRecordParser;
use crate::app::services::measurement_aggregator::MeasurementAggregator;
use crate::config::Config;
use crate::{Error, Result};

/// Result of converting a set of ASC files
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// Aggregated table
    pub table: TableResult,

    /// Number of files parsed into records
    pub files_parsed: usize,

    /// Files skipped under the skip-malformed policy, with the reason
    pub skipped: Vec<(String, String)>,
}

/// Converter running the parse-then-aggregate pipeline
#[derive(Debug, Clone)]
pub struct AscConverter {
    config: Config,
    parser: AscRecordParser,
    aggregator: MeasurementAggregator,
}

impl AscConverter {
    /// Create a new converter from configuration
    pub fn new(config: Config) -> Self {
        let aggregator = MeasurementAggregator::new(config.aggregation.clone());
        Self {
            config,
            parser: AscRecordParser::new(),
            aggregator,
        }
    }

    /// Read, parse and aggregate ASC files from disk
    ///
    /// Parse results are collected in input order, so measurements sharing a
    /// timestamp keep the order of `paths`.
    pub async fn convert_files(
        &self,
        paths: &[PathBuf],
        progress: Option<&ProgressBar>,
    ) -> Result<ConversionOutcome> {
        info!(
            "Parsing {} ASC files with {} workers",
            paths.len(),
            self.config.workers
        );

        let results: Vec<(String, Result<MeasurementRecord>)> = stream::iter(paths)
            .map(|path| {
                let parser = self.parser;
                let path = path.clone();
                async move {
                    let name = display_name(&path);
                    let result = task::spawn_blocking(move || {
                        let source = read_asc_file(&path)?;
                        parser.parse(&source.filename, &source.lines)
                    })
                    .await
                    .map_err(|e| {
                        Error::processing_interrupted(format!("Parse task for {} failed: {}", name, e))
                    })
                    .and_then(|result| result);

                    if let Some(pb) = progress {
                        pb.inc(1);
                    }
                    (name, result)
                }
            })
            .buffered(self.config.workers.max(1))
            .collect()
            .await;

        self.finish(results)
    }

    /// Parse and aggregate sources that are already in memory
    pub fn convert_sources(&self, sources: Vec<AscSource>) -> Result<ConversionOutcome> {
        let results = sources
            .into_iter()
            .map(|source| {
                let result = self.parser.parse(&source.filename, &source.lines);
                (source.filename, result)
            })
            .collect();

        self.finish(results)
    }

    /// Apply the malformed-file policy, then aggregate
    fn finish(&self, results: Vec<(String, Result<MeasurementRecord>)>) -> Result<ConversionOutcome> {
        let mut records = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();

        for (name, result) in results {
            match result {
                Ok(record) => {
                    debug!("Parsed {}", name);
                    records.push(record);
                }
                Err(e @ Error::MalformedRecord { .. }) if self.config.skip_malformed => {
                    warn!("Skipping {}: {}", name, e);
                    skipped.push((name, e.to_string()));
                }
                Err(e) => {
                    error!("Failed to parse {}: {}", name, e);
                    return Err(e);
                }
            }
        }

        let files_parsed = records.len();
        let table = self.aggregator.aggregate(records)?;

        info!(
            "Converted {} files ({} skipped)",
            files_parsed,
            skipped.len()
        );

        Ok(ConversionOutcome {
            table,
            files_parsed,
            skipped,
        })
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
