//! Sensors and their kind-specific queries.

use crate::aggregate::{self, Summary};
use crate::reading::Reading;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;

/// Body temperature above which a temperature series indicates fever.
pub const FEVER_THRESHOLD: f64 = 38.0;

/// The kind of quantity a sensor measures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SensorKind {
    /// Temperature in the given unit (e.g. "°C").
    Temperature { unit: String },
    /// Relative humidity in percent.
    Humidity,
}

impl SensorKind {
    /// Returns a short lowercase name for the kind.
    pub fn name(&self) -> &'static str {
        match self {
            SensorKind::Temperature { .. } => "temperature",
            SensorKind::Humidity => "humidity",
        }
    }
}

/// Comfort bucket derived from mean relative humidity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComfortLevel {
    VeryDry,
    Dry,
    Comfortable,
    Humid,
    VeryHumid,
}

impl ComfortLevel {
    /// Buckets a mean relative humidity.
    pub fn from_mean(mean: f64) -> Self {
        if mean < 30.0 {
            ComfortLevel::VeryDry
        } else if mean < 40.0 {
            ComfortLevel::Dry
        } else if mean < 60.0 {
            ComfortLevel::Comfortable
        } else if mean < 70.0 {
            ComfortLevel::Humid
        } else {
            ComfortLevel::VeryHumid
        }
    }
}

impl fmt::Display for ComfortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComfortLevel::VeryDry => write!(f, "Very dry"),
            ComfortLevel::Dry => write!(f, "Dry"),
            ComfortLevel::Comfortable => write!(f, "Comfortable"),
            ComfortLevel::Humid => write!(f, "Humid"),
            ComfortLevel::VeryHumid => write!(f, "Very humid"),
        }
    }
}

/// Kind-specific verdict for a sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Fever(bool),
    Comfort(ComfortLevel),
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Assessment::Fever(true) => write!(f, "Fever"),
            Assessment::Fever(false) => write!(f, "No fever"),
            Assessment::Comfort(level) => write!(f, "{}", level),
        }
    }
}

/// An append-only series of readings from one source.
#[derive(Debug, Clone)]
pub struct Sensor {
    id: String,
    kind: SensorKind,
    readings: Vec<Reading>,
}

impl Sensor {
    /// Creates a sensor of the given kind with no readings.
    pub fn new(id: impl Into<String>, kind: SensorKind) -> Self {
        Self {
            id: id.into(),
            kind,
            readings: Vec::new(),
        }
    }

    /// Creates a temperature sensor.
    pub fn temperature(id: impl Into<String>, unit: impl Into<String>) -> Self {
        Self::new(id, SensorKind::Temperature { unit: unit.into() })
    }

    /// Creates a humidity sensor.
    pub fn humidity(id: impl Into<String>) -> Self {
        Self::new(id, SensorKind::Humidity)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> &SensorKind {
        &self.kind
    }

    /// Returns the unit of measurement.
    pub fn unit(&self) -> &str {
        match &self.kind {
            SensorKind::Temperature { unit } => unit,
            SensorKind::Humidity => "%",
        }
    }

    /// Appends a reading.
    pub fn add_reading(&mut self, value: f64, timestamp: NaiveDateTime) {
        self.readings.push(Reading::new(value, timestamp));
    }

    /// Returns the readings in ingestion order.
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Returns the values in ingestion order.
    pub fn values(&self) -> Vec<f64> {
        self.value_iter().collect()
    }

    fn value_iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.readings.iter().map(Reading::value)
    }

    /// Returns the timestamps in ingestion order.
    pub fn timestamps(&self) -> Vec<NaiveDateTime> {
        self.readings.iter().map(Reading::timestamp).collect()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Minimum value, `0.0` when empty.
    pub fn min(&self) -> f64 {
        aggregate::min(self.value_iter())
    }

    /// Maximum value, `0.0` when empty.
    pub fn max(&self) -> f64 {
        aggregate::max(self.value_iter())
    }

    /// Mean value, `0.0` when empty.
    pub fn mean(&self) -> f64 {
        aggregate::mean(self.value_iter())
    }

    /// The earliest reading holding the minimum value.
    pub fn min_reading(&self) -> Option<&Reading> {
        aggregate::min_index(self.value_iter()).map(|i| &self.readings[i])
    }

    /// The earliest reading holding the maximum value.
    pub fn max_reading(&self) -> Option<&Reading> {
        aggregate::max_index(self.value_iter()).map(|i| &self.readings[i])
    }

    /// Whether the maximum exceeds [`FEVER_THRESHOLD`]. `None` for non-temperature sensors.
    pub fn has_fever(&self) -> Option<bool> {
        match self.kind {
            SensorKind::Temperature { .. } => Some(self.max() > FEVER_THRESHOLD),
            SensorKind::Humidity => None,
        }
    }

    /// Comfort bucket of the mean. `None` for non-humidity sensors.
    pub fn comfort_level(&self) -> Option<ComfortLevel> {
        match self.kind {
            SensorKind::Humidity => Some(ComfortLevel::from_mean(self.mean())),
            SensorKind::Temperature { .. } => None,
        }
    }

    /// The kind-specific verdict.
    pub fn assessment(&self) -> Assessment {
        match self.kind {
            SensorKind::Temperature { .. } => Assessment::Fever(self.max() > FEVER_THRESHOLD),
            SensorKind::Humidity => Assessment::Comfort(ComfortLevel::from_mean(self.mean())),
        }
    }

    /// Collects everything a report needs about this sensor.
    pub fn summary(&self) -> SensorSummary {
        let stats = Summary::compute(self.value_iter());
        SensorSummary {
            id: self.id.clone(),
            kind: self.kind.name(),
            unit: self.unit().to_string(),
            count: self.readings.len(),
            min: stats.map(|s| s.min).unwrap_or(0.0),
            min_at: stats.map(|s| self.readings[s.min_index].timestamp_string()),
            max: stats.map(|s| s.max).unwrap_or(0.0),
            max_at: stats.map(|s| self.readings[s.max_index].timestamp_string()),
            mean: stats.map(|s| s.mean).unwrap_or(0.0),
            assessment: self.assessment(),
        }
    }
}

/// Report data for one sensor.
///
/// Numeric fields are `0.0` for an empty sensor; `count` and the `*_at`
/// timestamps tell that case apart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSummary {
    pub id: String,
    pub kind: &'static str,
    pub unit: String,
    pub count: usize,
    pub min: f64,
    pub min_at: Option<String>,
    pub max: f64,
    pub max_at: Option<String>,
    pub mean: f64,
    pub assessment: Assessment,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reading::parse_timestamp;

    fn ts(s: &str) -> NaiveDateTime {
        parse_timestamp(s).unwrap()
    }

    #[test]
    fn test_empty_sensor_sentinels() {
        let sensor = Sensor::temperature("TEMP_001", "°C");
        assert!(sensor.is_empty());
        assert_eq!(sensor.min(), 0.0);
        assert_eq!(sensor.max(), 0.0);
        assert_eq!(sensor.mean(), 0.0);
        assert!(sensor.min_reading().is_none());
        assert!(sensor.max_reading().is_none());
        assert_eq!(sensor.has_fever(), Some(false));

        let summary = sensor.summary();
        assert_eq!(summary.count, 0);
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.min_at, None);
        assert_eq!(summary.max_at, None);
    }

    #[test]
    fn test_readings_keep_ingestion_order() {
        let mut sensor = Sensor::humidity("HUM_001");
        sensor.add_reading(60.0, ts("2024-01-01 10:00:00"));
        sensor.add_reading(40.0, ts("2024-01-01 08:00:00"));
        sensor.add_reading(50.0, ts("2024-01-01 09:00:00"));

        assert_eq!(sensor.values(), vec![60.0, 40.0, 50.0]);
        assert_eq!(sensor.timestamps()[1], ts("2024-01-01 08:00:00"));
        assert_eq!(sensor.len(), 3);
    }

    #[test]
    fn test_extremum_timestamps() {
        let mut sensor = Sensor::temperature("TEMP_001", "°C");
        sensor.add_reading(20.0, ts("2024-01-01 08:00:00"));
        sensor.add_reading(39.0, ts("2024-01-01 09:00:00"));
        sensor.add_reading(20.0, ts("2024-01-01 10:00:00"));
        sensor.add_reading(39.0, ts("2024-01-01 11:00:00"));

        assert_eq!(sensor.min_reading().unwrap().hour(), "08:00");
        assert_eq!(sensor.max_reading().unwrap().hour(), "09:00");

        let summary = sensor.summary();
        assert_eq!(summary.min_at.as_deref(), Some("2024-01-01 08:00:00"));
        assert_eq!(summary.max_at.as_deref(), Some("2024-01-01 09:00:00"));
        assert_eq!(summary.mean, 29.5);
    }

    #[test]
    fn test_summary_agrees_with_accessors() {
        let mut sensor = Sensor::humidity("HUM_001");
        for (i, value) in [48.0, 61.5, 33.0, 61.5, 33.0, 50.0].into_iter().enumerate() {
            sensor.add_reading(value, ts(&format!("2024-01-01 {:02}:00:00", i)));
        }

        let summary = sensor.summary();
        assert_eq!(summary.count, sensor.len());
        assert_eq!(summary.min, sensor.min());
        assert_eq!(summary.max, sensor.max());
        assert_eq!(summary.mean, sensor.mean());
        assert_eq!(
            summary.min_at,
            sensor.min_reading().map(Reading::timestamp_string)
        );
        assert_eq!(
            summary.max_at,
            sensor.max_reading().map(Reading::timestamp_string)
        );
        assert_eq!(summary.min_at.as_deref(), Some("2024-01-01 02:00:00"));
        assert_eq!(summary.max_at.as_deref(), Some("2024-01-01 01:00:00"));
    }

    #[test]
    fn test_has_fever() {
        let mut sensor = Sensor::temperature("TEMP_001", "°C");
        sensor.add_reading(38.0, ts("2024-01-01 08:00:00"));
        assert_eq!(sensor.has_fever(), Some(false));
        sensor.add_reading(38.1, ts("2024-01-01 09:00:00"));
        assert_eq!(sensor.has_fever(), Some(true));
        assert_eq!(sensor.assessment(), Assessment::Fever(true));
        assert_eq!(sensor.comfort_level(), None);

        let humidity = Sensor::humidity("HUM_001");
        assert_eq!(humidity.has_fever(), None);
    }

    #[test]
    fn test_comfort_level_buckets() {
        assert_eq!(ComfortLevel::from_mean(0.0), ComfortLevel::VeryDry);
        assert_eq!(ComfortLevel::from_mean(29.9), ComfortLevel::VeryDry);
        assert_eq!(ComfortLevel::from_mean(30.0), ComfortLevel::Dry);
        assert_eq!(ComfortLevel::from_mean(40.0), ComfortLevel::Comfortable);
        assert_eq!(ComfortLevel::from_mean(59.9), ComfortLevel::Comfortable);
        assert_eq!(ComfortLevel::from_mean(60.0), ComfortLevel::Humid);
        assert_eq!(ComfortLevel::from_mean(70.0), ComfortLevel::VeryHumid);
        assert_eq!(ComfortLevel::Comfortable.to_string(), "Comfortable");
        assert_eq!(ComfortLevel::VeryDry.to_string(), "Very dry");
    }

    #[test]
    fn test_humidity_assessment() {
        let mut sensor = Sensor::humidity("HUM_001");
        sensor.add_reading(55.0, ts("2024-01-01 08:00:00"));
        sensor.add_reading(55.0, ts("2024-01-01 09:00:00"));
        assert_eq!(sensor.comfort_level(), Some(ComfortLevel::Comfortable));
        assert_eq!(sensor.assessment().to_string(), "Comfortable");
        assert_eq!(sensor.unit(), "%");
    }
}
