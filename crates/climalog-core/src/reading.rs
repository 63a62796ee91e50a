//! A single timestamped observation.

use crate::{Error, Result};
use chrono::NaiveDateTime;

/// Textual timestamp format used by the data file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of a formatted timestamp (`YYYY-MM-DD HH:MM:SS`).
pub const TIMESTAMP_LEN: usize = 19;

/// Format of the hour label derived from a timestamp.
pub const HOUR_FORMAT: &str = "%H:%M";

/// Parses a `YYYY-MM-DD HH:MM:SS` timestamp.
///
/// Only the exact 19-character form is accepted; padded, signed or
/// single-digit fields that chrono would otherwise tolerate are rejected.
pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    if !has_timestamp_shape(s.as_bytes()) {
        return Err(Error::InvalidTimestamp(s.to_string()));
    }
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .map_err(|_| Error::InvalidTimestamp(s.to_string()))
}

// Separator positions of `YYYY-MM-DD HH:MM:SS`; every other byte is a digit.
fn has_timestamp_shape(bytes: &[u8]) -> bool {
    bytes.len() == TIMESTAMP_LEN
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b' ',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        })
}

/// One value observed at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    value: f64,
    timestamp: NaiveDateTime,
}

impl Reading {
    /// Creates a new reading.
    pub fn new(value: f64, timestamp: NaiveDateTime) -> Self {
        Self { value, timestamp }
    }

    /// Returns the observed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns the observation time.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Returns the timestamp in the data file format.
    pub fn timestamp_string(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Returns the `HH:MM` label of this reading.
    pub fn hour(&self) -> String {
        self.timestamp.format(HOUR_FORMAT).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("2024-01-01 14:30:05").unwrap();
        let reading = Reading::new(21.5, ts);
        assert_eq!(reading.hour(), "14:30");
        assert_eq!(reading.timestamp_string(), "2024-01-01 14:30:05");
        assert_eq!(reading.value(), 21.5);
    }

    #[test]
    fn test_parse_timestamp_rejects_short_input() {
        assert!(matches!(
            parse_timestamp("2024-01-01 14:30"),
            Err(Error::InvalidTimestamp(_))
        ));
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2024-1-1 8:00:00").is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_bad_fields() {
        assert!(parse_timestamp("2024-13-01 14:30:05").is_err());
        assert!(parse_timestamp("2024-01-01T14:30:05").is_err());
        assert!(parse_timestamp("2024-01-01 25:30:05").is_err());
        assert!(parse_timestamp("abcd-ef-gh ij:kl:mn").is_err());
    }

    #[test]
    fn test_parse_timestamp_rejects_padded_or_signed_fields() {
        for bad in [
            "2024-01-01  8:00:00",
            "2024-01- 1 08:00:00",
            "+2024-01-1 08:00:00",
            "2024-01-01 08:00: 0",
            "2024/01/01 08:00:00",
            "2024-01-01 08-00-00",
        ] {
            assert!(
                matches!(parse_timestamp(bad), Err(Error::InvalidTimestamp(_))),
                "accepted {:?}",
                bad
            );
        }
    }
}
