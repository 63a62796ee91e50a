//! Error types for the climalog core library.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or querying sensor data.
#[derive(Error, Debug)]
pub enum Error {
    /// Data file could not be opened.
    #[error("Cannot open data file {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while reading or writing data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Line does not have the expected column layout.
    #[error("Malformed line: {0}")]
    MalformedLine(String),

    /// Numeric column could not be parsed.
    #[error("Invalid {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },

    /// Timestamp is not in `YYYY-MM-DD HH:MM:SS` form.
    #[error("Invalid timestamp (expected YYYY-MM-DD HH:MM:SS): {0:?}")]
    InvalidTimestamp(String),

    /// Search key is not in `HH:MM` form.
    #[error("Invalid hour (expected HH:MM): {0:?}")]
    InvalidHourKey(String),

    /// A sensor with this id is already registered.
    #[error("Sensor already registered: {0}")]
    DuplicateSensor(String),

    /// Simulation parameters are out of range.
    #[error("Invalid simulation parameters: {0}")]
    InvalidSimulation(String),
}
