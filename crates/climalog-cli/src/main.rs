//! Climalog command-line tool
//!
//! Loads a readings file and reports aggregates, hour lookups and chart data.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use climalog_core::{
    ChartSeries, HourIndex, HourKey, IngestReport, Sensor, SensorRegistry, SensorSummary,
    Simulator, SortedView, TEMPERATURE_SENSOR_ID,
};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use config::Config;

#[derive(Parser)]
#[command(name = "climalog")]
#[command(about = "Temperature and humidity log analysis")]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Readings file, overrides the configured one
    #[arg(long)]
    file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show min, max, mean and status of every sensor
    Summary {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Look up the value recorded at an hour
    Search {
        /// Hour in HH:MM form (prompted for when omitted)
        hour: Option<String>,

        /// Sensor id
        #[arg(long, default_value = TEMPERATURE_SENSOR_ID)]
        sensor: String,
    },
    /// Print plot-ready series as JSON
    Chart {
        /// Sort readings by value
        #[arg(long)]
        sorted: bool,

        /// Sensor id (all sensors when omitted)
        #[arg(long)]
        sensor: Option<String>,
    },
    /// Generate a synthetic readings file
    Simulate {
        /// Number of rows (default from configuration)
        #[arg(long)]
        count: Option<usize>,

        /// Generator seed (default from configuration)
        #[arg(long)]
        seed: Option<u64>,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the default configuration to a file
    InitConfig {
        /// Output path
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            let config = Config::load(path).context("Failed to load configuration")?;
            info!("Loaded configuration from: {}", path.display());
            config
        }
        None => Config::default(),
    };
    if let Some(file) = cli.file {
        config.data_file = file;
    }

    match cli.command {
        Commands::Summary { json } => handle_summary(&config, json),
        Commands::Search { hour, sensor } => handle_search(&config, hour, &sensor),
        Commands::Chart { sorted, sensor } => handle_chart(&config, sorted, sensor.as_deref()),
        Commands::Simulate {
            count,
            seed,
            output,
        } => handle_simulate(&config, count, seed, output),
        Commands::InitConfig { path } => {
            Config::default().save(&path)?;
            println!("Configuration written to: {}", path.display());
            Ok(())
        }
    }
}

fn load_registry(config: &Config) -> Result<(SensorRegistry, IngestReport)> {
    let mut registry = SensorRegistry::with_default_sensors(&config.temperature_unit);
    let report = registry
        .ingest_file(&config.data_file)
        .with_context(|| format!("Failed to load readings from {}", config.data_file))?;
    debug!(
        "Loaded {} row(s) from {}",
        report.accepted, config.data_file
    );
    Ok((registry, report))
}

/// Notes skipped lines on stderr for commands whose stdout is the answer.
fn report_skipped(config: &Config, report: &IngestReport) {
    if !report.is_clean() {
        eprintln!(
            "Skipped {} malformed line(s) in {} (see `climalog summary`)",
            report.skipped.len(),
            config.data_file
        );
    }
}

/// JSON form of the `summary` command.
#[derive(Debug, Serialize)]
struct SummaryReport {
    accepted: usize,
    skipped: Vec<SkippedLine>,
    sensors: Vec<SensorSummary>,
}

#[derive(Debug, Serialize)]
struct SkippedLine {
    line: usize,
    error: String,
}

impl SummaryReport {
    fn new(registry: &SensorRegistry, report: &IngestReport) -> Self {
        Self {
            accepted: report.accepted,
            skipped: report
                .skipped
                .iter()
                .map(|s| SkippedLine {
                    line: s.line,
                    error: s.error.to_string(),
                })
                .collect(),
            sensors: registry.iter().map(Sensor::summary).collect(),
        }
    }
}

fn find_sensor<'a>(registry: &'a SensorRegistry, id: &str) -> Result<&'a Sensor> {
    registry
        .find(id)
        .with_context(|| format!("Unknown sensor: {}", id))
}

fn handle_summary(config: &Config, json: bool) -> Result<()> {
    let (registry, report) = load_registry(config)?;

    if json {
        let summary = SummaryReport::new(&registry, &report);
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }
    let summaries = registry.iter().map(Sensor::summary);

    println!("Rows loaded: {}", report.accepted);
    if !report.is_clean() {
        println!("Rows skipped: {}", report.skipped.len());
        for skipped in &report.skipped {
            println!("  {}", skipped);
        }
    }

    for summary in summaries {
        println!();
        println!("{} ({}, {})", summary.id, summary.kind, summary.unit);
        if summary.count == 0 {
            println!("  No readings");
            continue;
        }
        println!("  Readings: {}", summary.count);
        println!(
            "  Min: {:.2} at {}",
            summary.min,
            summary.min_at.unwrap_or_default()
        );
        println!(
            "  Max: {:.2} at {}",
            summary.max,
            summary.max_at.unwrap_or_default()
        );
        println!("  Mean: {:.2}", summary.mean);
        println!("  Status: {}", summary.assessment);
    }

    Ok(())
}

fn handle_search(config: &Config, hour: Option<String>, sensor_id: &str) -> Result<()> {
    let raw = match hour {
        Some(hour) => hour,
        None => prompt_hour()?,
    };
    let key: HourKey = raw.trim().parse()?;

    let (registry, report) = load_registry(config)?;
    report_skipped(config, &report);
    let sensor = find_sensor(&registry, sensor_id)?;
    let index = HourIndex::build(sensor.readings());
    debug!("Searching {} entries of {}", index.len(), sensor_id);

    match index.find(&key) {
        Some(value) => println!("{} at {}: {:.2} {}", sensor_id, key, value, sensor.unit()),
        None => println!("{} at {}: not found", sensor_id, key),
    }

    Ok(())
}

fn prompt_hour() -> Result<String> {
    print!("Hour to search (HH:MM): ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read search key")?;
    Ok(line)
}

fn handle_chart(config: &Config, sorted: bool, sensor_id: Option<&str>) -> Result<()> {
    let (registry, report) = load_registry(config)?;
    report_skipped(config, &report);
    let sensors: Vec<&Sensor> = match sensor_id {
        Some(id) => vec![find_sensor(&registry, id)?],
        None => registry.iter().collect(),
    };

    let output = if sorted {
        let views: Vec<SortedView> = sensors.into_iter().map(SortedView::build).collect();
        serde_json::to_string_pretty(&views)?
    } else {
        let series: Vec<ChartSeries> = sensors.into_iter().map(ChartSeries::by_position).collect();
        serde_json::to_string_pretty(&series)?
    };
    println!("{}", output);

    Ok(())
}

fn handle_simulate(
    config: &Config,
    count: Option<usize>,
    seed: Option<u64>,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut sim_config = config.simulation.to_simulation_config()?;
    if let Some(count) = count {
        sim_config.count = count;
    }
    let seed = seed.unwrap_or(config.simulation.seed);

    let records = Simulator::new(sim_config, seed)?.records();
    match output {
        Some(path) => {
            let file = std::fs::File::create(&path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            climalog_core::ingest::write_csv(io::BufWriter::new(file), &records)?;
            println!("Wrote {} row(s) to: {}", records.len(), path.display());
        }
        None => climalog_core::ingest::write_csv(io::stdout().lock(), &records)?,
    }

    Ok(())
}
