//! Configuration management.

use anyhow::{Context, Result};
use climalog_core::SimulationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the readings file
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Unit label for the temperature sensor
    #[serde(default = "default_temperature_unit")]
    pub temperature_unit: String,

    /// Synthetic data settings
    #[serde(default)]
    pub simulation: SimulationSettings,
}

/// Synthetic data configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    /// First timestamp ("YYYY-MM-DD HH:MM:SS")
    #[serde(default = "default_start")]
    pub start: String,

    /// Minutes between rows
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,

    /// Number of rows
    #[serde(default = "default_count")]
    pub count: usize,

    /// Generator seed
    #[serde(default)]
    pub seed: u64,

    #[serde(default = "default_temperature_mean")]
    pub temperature_mean: f64,

    #[serde(default = "default_temperature_std_dev")]
    pub temperature_std_dev: f64,

    #[serde(default = "default_humidity_mean")]
    pub humidity_mean: f64,

    #[serde(default = "default_humidity_std_dev")]
    pub humidity_std_dev: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            start: default_start(),
            interval_minutes: default_interval(),
            count: default_count(),
            seed: 0,
            temperature_mean: default_temperature_mean(),
            temperature_std_dev: default_temperature_std_dev(),
            humidity_mean: default_humidity_mean(),
            humidity_std_dev: default_humidity_std_dev(),
        }
    }
}

impl SimulationSettings {
    /// Converts to the core simulation parameters.
    pub fn to_simulation_config(&self) -> Result<SimulationConfig> {
        let config = SimulationConfig {
            interval_minutes: self.interval_minutes,
            count: self.count,
            temperature_mean: self.temperature_mean,
            temperature_std_dev: self.temperature_std_dev,
            humidity_mean: self.humidity_mean,
            humidity_std_dev: self.humidity_std_dev,
            ..SimulationConfig::default()
        };
        config
            .with_start(&self.start)
            .context("Invalid simulation start time")
    }
}

// Default value functions
fn default_data_file() -> String {
    "datos.csv".to_string()
}

fn default_temperature_unit() -> String {
    "°C".to_string()
}

fn default_start() -> String {
    "2024-01-01 00:00:00".to_string()
}

fn default_interval() -> u32 {
    60
}

fn default_count() -> usize {
    24
}

fn default_temperature_mean() -> f64 {
    22.0
}

fn default_temperature_std_dev() -> f64 {
    3.0
}

fn default_humidity_mean() -> f64 {
    50.0
}

fn default_humidity_std_dev() -> f64 {
    10.0
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).context("Failed to read configuration file")?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        std::fs::write(path.as_ref(), content).context("Failed to write configuration file")?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            temperature_unit: default_temperature_unit(),
            simulation: SimulationSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.data_file, "datos.csv");
        assert_eq!(config.simulation.count, 24);
    }

    #[test]
    fn test_partial_override() {
        let config = Config::parse(
            r#"
            data_file = "readings.csv"

            [simulation]
            seed = 7
            count = 48
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, "readings.csv");
        assert_eq!(config.temperature_unit, "°C");
        assert_eq!(config.simulation.seed, 7);
        assert_eq!(config.simulation.count, 48);
        assert_eq!(config.simulation.interval_minutes, 60);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.temperature_unit = "°F".to_string();
        config.simulation.humidity_mean = 65.5;
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_simulation_settings_conversion() {
        let settings = SimulationSettings {
            start: "2024-06-01 12:00:00".to_string(),
            count: 3,
            ..SimulationSettings::default()
        };
        let sim = settings.to_simulation_config().unwrap();
        assert_eq!(sim.count, 3);
        assert_eq!(sim.start.to_string(), "2024-06-01 12:00:00");

        let bad = SimulationSettings {
            start: "tomorrow".to_string(),
            ..SimulationSettings::default()
        };
        assert!(bad.to_simulation_config().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        assert!(Config::parse("data_file = [").is_err());
    }
}
