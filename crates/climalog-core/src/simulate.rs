//! Synthetic data generation.
//!
//! Produces rows in the same format the ingester reads. The generator is
//! owned by the [`Simulator`] and seeded by the caller, so a seed always
//! reproduces the same file.

use crate::ingest::CsvRecord;
use crate::reading::parse_timestamp;
use crate::{Error, Result};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Latest year the `YYYY-MM-DD` timestamp field can hold.
const MAX_YEAR: i32 = 9999;

/// Parameters of a simulated run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Timestamp of the first row.
    pub start: NaiveDateTime,
    /// Minutes between consecutive rows.
    pub interval_minutes: u32,
    /// Number of rows.
    pub count: usize,
    pub temperature_mean: f64,
    pub temperature_std_dev: f64,
    pub humidity_mean: f64,
    pub humidity_std_dev: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
            interval_minutes: 60,
            count: 24,
            temperature_mean: 22.0,
            temperature_std_dev: 3.0,
            humidity_mean: 50.0,
            humidity_std_dev: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Sets the start time from its textual form.
    pub fn with_start(mut self, start: &str) -> Result<Self> {
        self.start = parse_timestamp(start)?;
        Ok(self)
    }

    /// Returns the timestamp of the last row, or `None` if it is not
    /// representable.
    pub fn last_timestamp(&self) -> Option<NaiveDateTime> {
        let steps = i64::try_from(self.count.saturating_sub(1)).ok()?;
        let minutes = steps.checked_mul(i64::from(self.interval_minutes))?;
        self.start.checked_add_signed(Duration::try_minutes(minutes)?)
    }
}

/// Seeded generator of temperature/humidity rows.
pub struct Simulator {
    config: SimulationConfig,
    rng: StdRng,
    temperature: Normal<f64>,
    humidity: Normal<f64>,
}

impl Simulator {
    /// Creates a simulator with its own generator seeded from `seed`.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Creates a simulator around a caller-provided generator.
    ///
    /// Fails if a distribution parameter is invalid, the interval is zero, or
    /// the last row would fall outside years 0 to 9999.
    pub fn with_rng(config: SimulationConfig, rng: StdRng) -> Result<Self> {
        let params = [
            config.temperature_mean,
            config.temperature_std_dev,
            config.humidity_mean,
            config.humidity_std_dev,
        ];
        if !params.iter().all(|p| p.is_finite()) {
            return Err(Error::InvalidSimulation(
                "means and deviations must be finite".to_string(),
            ));
        }
        let temperature = Normal::new(config.temperature_mean, config.temperature_std_dev)
            .map_err(|e| Error::InvalidSimulation(format!("temperature: {}", e)))?;
        let humidity = Normal::new(config.humidity_mean, config.humidity_std_dev)
            .map_err(|e| Error::InvalidSimulation(format!("humidity: {}", e)))?;
        if config.interval_minutes == 0 {
            return Err(Error::InvalidSimulation(
                "interval must be at least one minute".to_string(),
            ));
        }
        let in_range = |ts: NaiveDateTime| (0..=MAX_YEAR).contains(&ts.year());
        match config.last_timestamp() {
            Some(last) if in_range(config.start) && in_range(last) => {}
            _ => {
                return Err(Error::InvalidSimulation(format!(
                    "{} rows every {} minutes from {} run past year {}",
                    config.count, config.interval_minutes, config.start, MAX_YEAR
                )));
            }
        }
        Ok(Self {
            config,
            rng,
            temperature,
            humidity,
        })
    }

    /// Generates the configured number of rows.
    pub fn records(&mut self) -> Vec<CsvRecord> {
        let step = Duration::minutes(i64::from(self.config.interval_minutes));
        let mut next = Some(self.config.start);
        let mut records = Vec::with_capacity(self.config.count);

        for i in 0..self.config.count {
            let Some(timestamp) = next else { break };
            let temperature = round1(self.temperature.sample(&mut self.rng));
            let humidity = round1(self.humidity.sample(&mut self.rng).clamp(0.0, 100.0));
            records.push(CsvRecord {
                index: (i + 1).to_string(),
                timestamp,
                temperature,
                humidity,
            });
            next = timestamp.checked_add_signed(step);
        }

        records
    }
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
