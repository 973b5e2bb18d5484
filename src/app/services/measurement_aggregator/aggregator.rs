//! Main measurement aggregator implementation
//!
//! Orders parsed measurements by acquisition time, anchors the table metadata
//! on the earliest measurement and derives one data column per series field.

use tracing::{debug, info, warn};

use super::formatting::{elapsed_seconds, format_number, format_series_token, format_timestamp};
use crate::app::models::{FieldMap, MeasurementRecord, SeriesField, TableResult};
use crate::config::{AggregationConfig, SeriesMultiplicity};
use crate::constants::{COLUMN_SUMMARY_SEPARATOR, TIME_LINE_COLUMN, metadata_keys};
use crate::{Error, Result};

/// Aggregator merging measurement records into a single table
///
/// # Example
///
/// ```rust
/// use alv_processor::app::services::measurement_aggregator::MeasurementAggregator;
/// use alv_processor::config::AggregationConfig;
///
/// # fn example(records: Vec<alv_processor::MeasurementRecord>) -> alv_processor::Result<()> {
/// let aggregator = MeasurementAggregator::new(AggregationConfig::default());
/// let table = aggregator.aggregate(records)?;
/// println!("{} rows, {} columns", table.row_count(), table.column_count());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeasurementAggregator {
    config: AggregationConfig,
}

impl MeasurementAggregator {
    /// Create a new aggregator with the given options
    pub fn new(config: AggregationConfig) -> Self {
        Self { config }
    }

    /// Merge records into one table ordered by acquisition time
    ///
    /// Records with identical timestamps keep their input order. Fails with
    /// [`Error::EmptyInput`] when there is nothing to anchor the metadata on
    /// and with [`Error::InconsistentSeriesLength`] when measurements disagree
    /// on how many entries a series field has. Nothing is returned on failure.
    pub fn aggregate(&self, mut records: Vec<MeasurementRecord>) -> Result<TableResult> {
        if records.is_empty() {
            return Err(Error::EmptyInput);
        }

        // Vec::sort_by is stable
        records.sort_by(|a, b| a.datetime.cmp(&b.datetime));

        let first = &records[0];
        let baseline = first.datetime;
        info!(
            "Aggregating {} measurements of '{}' starting at {}",
            records.len(),
            first.sample_name,
            baseline
        );

        let mut metadata = FieldMap::new();
        metadata.insert(metadata_keys::SAMPLE_NAME, first.sample_name.clone());
        metadata.insert(metadata_keys::DEVICE_INFO, self.device_label(first));
        metadata.insert(metadata_keys::WAVELENGTH, self.wavelength(first));
        metadata.insert(metadata_keys::START_TIME, format_timestamp(baseline));

        let mut data = FieldMap::new();
        data.insert(
            TIME_LINE_COLUMN,
            records
                .iter()
                .map(|record| format_number(elapsed_seconds(baseline, record.datetime)))
                .collect::<Vec<_>>(),
        );

        for field in SeriesField::ALL {
            let column = self.derive_column(field, &records)?;
            debug!("Derived column '{}' ({} rows)", field.column_name(), column.len());
            data.insert(field.column_name(), column);
        }

        if self.config.include_column_summaries {
            for field in SeriesField::ALL {
                if let Some(column) = data.get(field.column_name()) {
                    metadata.insert(field.column_name(), column.join(COLUMN_SUMMARY_SEPARATOR));
                }
            }
        }

        metadata.insert(metadata_keys::DURATION, format_number(first.duration_s));

        let rows = data.values().next().map_or(0, Vec::len);
        let columns = data.len();
        metadata.insert(metadata_keys::ROWS, rows.to_string());
        metadata.insert(metadata_keys::COLUMNS, columns.to_string());

        info!("Aggregated table: {} rows, {} columns", rows, columns);
        Ok(TableResult { metadata, data })
    }

    /// One token per record for a series field, checking multiplicity
    fn derive_column(
        &self,
        field: SeriesField,
        records: &[MeasurementRecord],
    ) -> Result<Vec<String>> {
        let expected = records
            .first()
            .map_or(0, |record| record.series_values(field).len());

        records
            .iter()
            .map(|record| {
                let values = record.series_values(field);

                if self.config.series_multiplicity == SeriesMultiplicity::Single
                    && values.len() > 1
                {
                    return Err(Error::inconsistent_series_length(
                        field.instrument_label(),
                        &record.source_name,
                        1,
                        values.len(),
                    ));
                }

                if values.len() != expected {
                    return Err(Error::inconsistent_series_length(
                        field.instrument_label(),
                        &record.source_name,
                        expected,
                        values.len(),
                    ));
                }

                Ok(format_series_token(values))
            })
            .collect()
    }

    fn device_label(&self, record: &MeasurementRecord) -> String {
        match record.device_label() {
            Some(label) => label.to_string(),
            None => {
                warn!(
                    "{}: no device info, leaving '{}' empty",
                    record.source_name,
                    metadata_keys::DEVICE_INFO
                );
                String::new()
            }
        }
    }

    fn wavelength(&self, record: &MeasurementRecord) -> String {
        match record.wavelength_nm {
            Some(wavelength) => format_number(wavelength),
            None => {
                warn!(
                    "{}: no wavelength, leaving '{}' empty",
                    record.source_name,
                    metadata_keys::WAVELENGTH
                );
                String::new()
            }
        }
    }
}
