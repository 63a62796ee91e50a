//! Hour-of-day index with exact-match lookup.
//!
//! The index is rebuilt from a sensor's readings on every query and never
//! cached. Entries are sorted by `HH:MM` with a stable sort, so readings that
//! share an hour stay in ingestion order and a lookup returns the earliest
//! ingested one.

use crate::reading::Reading;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A validated `HH:MM` key.
///
/// Only the shape is checked (two digits, colon, two digits). Out-of-range
/// keys such as `"25:00"` are accepted and simply never match.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourKey(String);

impl HourKey {
    /// Returns the hour label of a reading.
    pub fn of(reading: &Reading) -> Self {
        HourKey(reading.hour())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for HourKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b':'
            && [0usize, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit());
        if well_formed {
            Ok(HourKey(s.to_string()))
        } else {
            Err(Error::InvalidHourKey(s.to_string()))
        }
    }
}

impl fmt::Display for HourKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One projected reading.
#[derive(Debug, Clone, PartialEq)]
pub struct HourEntry {
    pub hour: HourKey,
    pub value: f64,
}

/// Readings projected to `(hour, value)` and sorted by hour.
#[derive(Debug, Clone, Default)]
pub struct HourIndex {
    entries: Vec<HourEntry>,
}

impl HourIndex {
    /// Builds the index from readings in ingestion order.
    pub fn build(readings: &[Reading]) -> Self {
        let mut entries: Vec<HourEntry> = readings
            .iter()
            .map(|r| HourEntry {
                hour: HourKey::of(r),
                value: r.value(),
            })
            .collect();
        entries.sort_by(|a, b| a.hour.cmp(&b.hour));
        Self { entries }
    }

    /// Looks up the value recorded at `hour`.
    ///
    /// Returns the first entry in sorted order with that hour, or `None`.
    pub fn find(&self, hour: &HourKey) -> Option<f64> {
        let pos = self.entries.partition_point(|e| e.hour < *hour);
        self.entries
            .get(pos)
            .filter(|e| e.hour == *hour)
            .map(|e| e.value)
    }

    /// Returns the sorted entries.
    pub fn entries(&self) -> &[HourEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
