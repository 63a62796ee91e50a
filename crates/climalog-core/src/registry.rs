//! Sensor registry.

use crate::ingest::{self, IngestReport, HUMIDITY_SENSOR_ID, TEMPERATURE_SENSOR_ID};
use crate::sensor::Sensor;
use crate::{Error, Result};
use std::io::BufRead;
use std::path::Path;

/// Stable handle to a registered sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SensorIndex(usize);

impl SensorIndex {
    pub fn get(&self) -> usize {
        self.0
    }
}

/// Owns every sensor of a run, in registration order.
///
/// The registry is mutated during setup and ingestion only. Afterwards it is
/// plain owned data and can be shared by reference for queries.
#[derive(Debug, Default)]
pub struct SensorRegistry {
    sensors: Vec<Sensor>,
}

impl SensorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the temperature and humidity sensors the
    /// data file feeds.
    pub fn with_default_sensors(temperature_unit: &str) -> Self {
        Self {
            sensors: vec![
                Sensor::temperature(TEMPERATURE_SENSOR_ID, temperature_unit),
                Sensor::humidity(HUMIDITY_SENSOR_ID),
            ],
        }
    }

    /// Registers a sensor. Fails if the id is already taken.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<SensorIndex> {
        if self.find(sensor.id()).is_some() {
            return Err(Error::DuplicateSensor(sensor.id().to_string()));
        }
        self.sensors.push(sensor);
        Ok(SensorIndex(self.sensors.len() - 1))
    }

    /// Finds a sensor by id.
    pub fn find(&self, id: &str) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.id() == id)
    }

    /// Finds a sensor by id for appending readings.
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Sensor> {
        self.sensors.iter_mut().find(|s| s.id() == id)
    }

    /// Returns the sensor behind a handle.
    pub fn get(&self, index: SensorIndex) -> Option<&Sensor> {
        self.sensors.get(index.0)
    }

    /// Iterates sensors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    /// Ingests a data file into the registered sensors.
    pub fn ingest_file<P: AsRef<Path>>(&mut self, path: P) -> Result<IngestReport> {
        ingest::ingest_file(path, self)
    }

    /// Ingests data from a reader into the registered sensors.
    pub fn ingest_reader<R: BufRead>(&mut self, reader: R) -> Result<IngestReport> {
        ingest::ingest(reader, self)
    }
}
