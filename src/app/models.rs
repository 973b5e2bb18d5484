//! Data models for ALV measurement processing
//!
//! This module contains the core data structures for representing a single
//! parsed ALV measurement and the aggregated, time-ordered table produced from
//! a set of measurements.

use crate::constants::DEVICE_SUFFIX_SEPARATOR;
use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

// =============================================================================
// Series Fields
// =============================================================================

/// Instrument quantities that may vary per detection angle or fit order
///
/// Each variant ties one ASC label to one output column. The aggregator
/// iterates [`SeriesField::ALL`] once to derive the data columns, so adding a
/// quantity means adding a variant here and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesField {
    RefractiveIndex,
    Temperature,
    Viscosity,
    DetectionAngle,
    DiffusionCoefficient,
    ExpansionParameter,
    HydrodynamicRadius,
}

impl SeriesField {
    /// All series fields in output column order
    pub const ALL: [SeriesField; 7] = [
        SeriesField::RefractiveIndex,
        SeriesField::Temperature,
        SeriesField::Viscosity,
        SeriesField::DetectionAngle,
        SeriesField::DiffusionCoefficient,
        SeriesField::ExpansionParameter,
        SeriesField::HydrodynamicRadius,
    ];

    /// Label as written by the instrument, including unit annotation
    pub fn instrument_label(self) -> &'static str {
        match self {
            SeriesField::RefractiveIndex => "Refractive Index",
            SeriesField::Temperature => "Temperature [K]",
            SeriesField::Viscosity => "Viscosity [cp]",
            SeriesField::DetectionAngle => "Angle [°]",
            SeriesField::DiffusionCoefficient => "Diffusion Coefficient 2. order fit [µm²/s]",
            SeriesField::ExpansionParameter => "Expansion Parameter µ2",
            SeriesField::HydrodynamicRadius => "Hydrodynamic Radius 2. order fit [nm]",
        }
    }

    /// Name of the derived column in the aggregated table
    pub fn column_name(self) -> &'static str {
        match self {
            SeriesField::RefractiveIndex => "refractive index",
            SeriesField::Temperature => "temperature [K]",
            SeriesField::Viscosity => "viscosity [mPas]",
            SeriesField::DetectionAngle => "detection angle [degrees]",
            SeriesField::DiffusionCoefficient => "average diffusion coefficient [micron^2/s]",
            SeriesField::ExpansionParameter => "second cumulant (expansion parameter)",
            SeriesField::HydrodynamicRadius => "hydrodynamic radius [nm]",
        }
    }

    /// Look up a series field by its exact instrument label
    pub fn from_instrument_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.instrument_label() == label)
    }
}

impl std::fmt::Display for SeriesField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column_name())
    }
}

// =============================================================================
// Measurement Record
// =============================================================================

/// One instrument run parsed from a single ASC file
///
/// Records are immutable once parsed and are consumed by the aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Originating file name, used for diagnostics
    pub source_name: String,

    /// Sample name as entered on the instrument
    pub sample_name: String,

    /// Raw instrument identifier, possibly with a `/`-delimited suffix
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_info: Option<String>,

    /// Laser wavelength in nanometres
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wavelength_nm: Option<f64>,

    /// Total measurement duration reported by the instrument, in seconds
    pub duration_s: f64,

    /// Acquisition start time, the sole ordering key
    pub datetime: NaiveDateTime,

    /// Every series field with its values in file order (empty when absent)
    pub series: BTreeMap<SeriesField, Vec<f64>>,
}

impl MeasurementRecord {
    /// Values reported for a series field, in file order
    pub fn series_values(&self, field: SeriesField) -> &[f64] {
        self.series.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Canonical device label: the device info text before the first `/`
    pub fn device_label(&self) -> Option<&str> {
        self.device_info.as_deref().map(device_label)
    }
}

/// Strip the `/`-delimited suffix from an instrument identifier
pub fn device_label(device_info: &str) -> &str {
    device_info
        .split(DEVICE_SUFFIX_SEPARATOR)
        .next()
        .unwrap_or(device_info)
        .trim()
}

// =============================================================================
// Ordered Field Map
// =============================================================================

/// Insertion-ordered string-keyed map
///
/// Output tables are read by people and by notebook importers that rely on
/// key order, so keys keep the order they were first inserted in. Inserting an
/// existing key replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> FieldMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a value, returning the previous value for the key if any
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Serialize> Serialize for FieldMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

// =============================================================================
// Aggregated Table
// =============================================================================

/// Aggregated result for one set of measurements
///
/// `metadata` holds human-readable scalar header fields; `data` holds one
/// column per derived quantity with one token per measurement, ordered by
/// acquisition time.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TableResult {
    pub metadata: FieldMap<String>,
    pub data: FieldMap<Vec<String>>,
}

impl TableResult {
    /// Number of rows, i.e. the length of the data columns
    pub fn row_count(&self) -> usize {
        self.data.values().next().map(Vec::len).unwrap_or(0)
    }

    /// Number of data columns
    pub fn column_count(&self) -> usize {
        self.data.len()
    }
}
