//! Climalog core library
//!
//! In-memory model of timestamped temperature and humidity readings:
//! delimited file ingestion, aggregate queries, hour-of-day search and
//! plot-ready series for an external chart renderer.

pub mod aggregate;
pub mod chart;
pub mod error;
pub mod hour_index;
pub mod ingest;
pub mod reading;
pub mod registry;
pub mod sensor;
pub mod simulate;

pub use aggregate::Summary;
pub use chart::{ChartSeries, SortedView};
pub use error::{Error, Result};
pub use hour_index::{HourIndex, HourKey};
pub use ingest::{CsvRecord, IngestReport, LineError, HUMIDITY_SENSOR_ID, TEMPERATURE_SENSOR_ID};
pub use reading::Reading;
pub use registry::{SensorIndex, SensorRegistry};
pub use sensor::{Assessment, ComfortLevel, Sensor, SensorKind, SensorSummary};
pub use simulate::{SimulationConfig, Simulator};
