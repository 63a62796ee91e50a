//! Delimited data file reading and writing.
//!
//! Format: one header line (ignored), then
//! `<index>,<YYYY-MM-DD HH:MM:SS>,<temperature>,<humidity>` per line.
//! No quoting or escaping. Lines that fail to parse are skipped and reported
//! in the [`IngestReport`]; they never abort the ingestion.

use crate::reading::{parse_timestamp, TIMESTAMP_FORMAT};
use crate::registry::SensorRegistry;
use crate::{Error, Result};
use chrono::NaiveDateTime;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use tracing::{debug, trace, warn};

/// Id of the sensor that receives the temperature column.
pub const TEMPERATURE_SENSOR_ID: &str = "TEMP_001";

/// Id of the sensor that receives the humidity column.
pub const HUMIDITY_SENSOR_ID: &str = "HUM_001";

/// Header written by [`write_csv`].
pub const CSV_HEADER: &str = "index,timestamp,temperature,humidity";

/// One parsed data line.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRecord {
    /// First column, kept verbatim.
    pub index: String,
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
    pub humidity: f64,
}

/// Parses one data line.
pub fn parse_line(line: &str) -> Result<CsvRecord> {
    let mut fields = line.splitn(4, ',');
    let (Some(index), Some(timestamp), Some(temperature), Some(humidity)) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        let commas = line.matches(',').count();
        return Err(Error::MalformedLine(format!(
            "expected 4 comma-separated fields, found {} comma(s)",
            commas
        )));
    };

    Ok(CsvRecord {
        index: index.trim().to_string(),
        timestamp: parse_timestamp(timestamp.trim())?,
        temperature: parse_number("temperature", temperature)?,
        humidity: parse_number("humidity", humidity)?,
    })
}

fn parse_number(field: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidNumber {
            field,
            value: raw.to_string(),
        })
}

/// A line that was skipped, with its 1-based line number in the file.
#[derive(Debug)]
pub struct LineError {
    pub line: usize,
    pub error: Error,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

/// Outcome of ingesting one file.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Number of data lines stored.
    pub accepted: usize,
    /// Lines rejected by the parser.
    pub skipped: Vec<LineError>,
}

impl IngestReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Ingests a data file into the registry.
pub fn ingest_file<P: AsRef<Path>>(path: P, registry: &mut SensorRegistry) -> Result<IngestReport> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| Error::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let report = ingest(BufReader::new(file), registry)?;
    debug!(
        "Ingested {}: {} line(s) accepted, {} skipped",
        path.display(),
        report.accepted,
        report.skipped.len()
    );
    Ok(report)
}

/// Ingests data from any buffered reader into the registry.
///
/// The first line is discarded as a header. Blank lines are ignored. Rows
/// are stored only once the whole input has been read, so a read error
/// leaves the registry unchanged.
pub fn ingest<R: BufRead>(mut reader: R, registry: &mut SensorRegistry) -> Result<IngestReport> {
    let mut report = IngestReport::default();
    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;
        if line_no == 1 {
            continue;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim_end_matches(|c: char| c == '\n' || c == '\r'),
            Err(_) => {
                skip(&mut report, line_no, Error::MalformedLine("not valid UTF-8".into()));
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(line) {
            Ok(record) => records.push(record),
            Err(e) => skip(&mut report, line_no, e),
        }
    }

    for record in &records {
        store(registry, record);
    }
    report.accepted = records.len();
    Ok(report)
}

fn skip(report: &mut IngestReport, line: usize, error: Error) {
    warn!("Skipping line {}: {}", line, error);
    report.skipped.push(LineError { line, error });
}

fn store(registry: &mut SensorRegistry, record: &CsvRecord) {
    match registry.find_mut(TEMPERATURE_SENSOR_ID) {
        Some(sensor) => sensor.add_reading(record.temperature, record.timestamp),
        None => trace!("No sensor {}, dropping temperature", TEMPERATURE_SENSOR_ID),
    }
    match registry.find_mut(HUMIDITY_SENSOR_ID) {
        Some(sensor) => sensor.add_reading(record.humidity, record.timestamp),
        None => trace!("No sensor {}, dropping humidity", HUMIDITY_SENSOR_ID),
    }
}

/// Writes records in the data file format, header first.
pub fn write_csv<W: Write>(mut writer: W, records: &[CsvRecord]) -> Result<()> {
    writeln!(writer, "{}", CSV_HEADER)?;
    for record in records {
        writeln!(
            writer,
            "{},{},{},{}",
            record.index,
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.temperature,
            record.humidity
        )?;
    }
    writer.flush()?;
    Ok(())
}
