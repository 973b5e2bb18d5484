//! Core ALV ASC record parser
//!
//! Walks the lines of one ASC file, picks out the recognised fields and
//! assembles them into a [`MeasurementRecord`]. Unrecognised lines are
//! skipped so that firmware versions adding diagnostic output still parse.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::{debug, trace};

use super::field_parsers::{parse_date, parse_datetime, parse_number, parse_time, split_field_line};
use crate::app::models::{MeasurementRecord, SeriesField};
use crate::constants::asc_labels;
use crate::{Error, Result};

/// Parser for ALV correlator ASC exports
///
/// The parser is a pure function of file name and lines: it performs no I/O
/// and holds no state, so one instance can be shared across threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct AscRecordParser;

impl AscRecordParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse the decoded lines of one ASC file into a measurement record
    pub fn parse<S: AsRef<str>>(&self, filename: &str, lines: &[S]) -> Result<MeasurementRecord> {
        let mut builder = RecordBuilder::new(filename);

        for line in lines {
            builder.parse_line(line.as_ref())?;
        }

        let record = builder.build()?;
        debug!(
            "Parsed {}: sample='{}', datetime={}, {} series values",
            filename,
            record.sample_name,
            record.datetime,
            record.series.values().map(Vec::len).sum::<usize>()
        );

        Ok(record)
    }
}

/// Builder accumulating recognised fields for one file
struct RecordBuilder<'a> {
    file: &'a str,
    sample_name: Option<String>,
    device_info: Option<String>,
    wavelength_nm: Option<f64>,
    duration_s: Option<f64>,
    datetime: Option<NaiveDateTime>,
    date: Option<String>,
    time: Option<String>,
    series: BTreeMap<SeriesField, Vec<f64>>,
    lines_ignored: usize,
}

impl<'a> RecordBuilder<'a> {
    fn new(file: &'a str) -> Self {
        Self {
            file,
            sample_name: None,
            device_info: None,
            wavelength_nm: None,
            duration_s: None,
            datetime: None,
            date: None,
            time: None,
            series: SeriesField::ALL
                .into_iter()
                .map(|field| (field, Vec::new()))
                .collect(),
            lines_ignored: 0,
        }
    }

    fn parse_line(&mut self, line: &str) -> Result<()> {
        let Some((label, value)) = split_field_line(line) else {
            self.lines_ignored += 1;
            return Ok(());
        };

        if let Some(field) = SeriesField::from_instrument_label(label) {
            let number = parse_number(self.file, label, value)?;
            self.series.entry(field).or_default().push(number);
            return Ok(());
        }

        match label {
            asc_labels::SAMPLE_NAME if self.sample_name.is_none() => {
                self.sample_name = Some(value.to_string());
            }
            asc_labels::DEVICE_INFO if self.device_info.is_none() => {
                self.device_info = Some(value.to_string());
            }
            asc_labels::WAVELENGTH if self.wavelength_nm.is_none() => {
                self.wavelength_nm = Some(parse_number(self.file, label, value)?);
            }
            asc_labels::DURATION if self.duration_s.is_none() => {
                self.duration_s = Some(parse_number(self.file, label, value)?);
            }
            asc_labels::DATETIME if self.datetime.is_none() => {
                self.datetime = Some(parse_datetime(self.file, label, value)?);
            }
            asc_labels::DATE if self.date.is_none() => {
                self.date = Some(value.to_string());
            }
            asc_labels::TIME if self.time.is_none() => {
                self.time = Some(value.to_string());
            }
            asc_labels::SAMPLE_NAME
            | asc_labels::DEVICE_INFO
            | asc_labels::WAVELENGTH
            | asc_labels::DURATION
            | asc_labels::DATETIME
            | asc_labels::DATE
            | asc_labels::TIME => {
                debug!("{}: ignoring repeated '{}' line", self.file, label);
            }
            _ => {
                trace!("{}: ignoring unrecognised field '{}'", self.file, label);
                self.lines_ignored += 1;
            }
        }

        Ok(())
    }

    /// Acquisition time from `Datetime`, or from the native `Date`/`Time` pair
    fn resolve_datetime(&self) -> Result<NaiveDateTime> {
        if let Some(datetime) = self.datetime {
            return Ok(datetime);
        }

        match (&self.date, &self.time) {
            (Some(date), Some(time)) => {
                let date = parse_date(self.file, asc_labels::DATE, date)?;
                let time = parse_time(self.file, asc_labels::TIME, time)?;
                Ok(date.and_time(time))
            }
            (Some(_), None) => Err(Error::malformed_record(
                self.file,
                asc_labels::TIME,
                "is missing (required alongside Date)",
            )),
            (None, Some(_)) => Err(Error::malformed_record(
                self.file,
                asc_labels::DATE,
                "is missing (required alongside Time)",
            )),
            (None, None) => Err(Error::malformed_record(
                self.file,
                asc_labels::DATETIME,
                "is missing",
            )),
        }
    }

    fn build(self) -> Result<MeasurementRecord> {
        let datetime = self.resolve_datetime()?;

        let sample_name = self.sample_name.ok_or_else(|| {
            Error::malformed_record(self.file, asc_labels::SAMPLE_NAME, "is missing")
        })?;

        let duration_s = self.duration_s.ok_or_else(|| {
            Error::malformed_record(self.file, asc_labels::DURATION, "is missing")
        })?;

        if self.device_info.is_none() {
            debug!("{}: no '{}' line", self.file, asc_labels::DEVICE_INFO);
        }
        if self.wavelength_nm.is_none() {
            debug!("{}: no '{}' line", self.file, asc_labels::WAVELENGTH);
        }
        trace!("{}: {} lines ignored", self.file, self.lines_ignored);

        Ok(MeasurementRecord {
            source_name: self.file.to_string(),
            sample_name,
            device_info: self.device_info,
            wavelength_nm: self.wavelength_nm,
            duration_s,
            datetime,
            series: self.series,
        })
    }
}
