//! Plot-ready series for an external chart renderer.
//!
//! Two views are produced: readings by position with their hour labels, and
//! readings sorted by value. The renderer draws exactly what it receives.

use crate::reading::Reading;
use crate::sensor::Sensor;
use serde::Serialize;
use std::cmp::Ordering;

/// Target number of labelled ticks on the x axis.
pub const TARGET_TICKS: usize = 8;

/// Fraction of the value range added above and below the sorted view.
pub const AXIS_MARGIN_RATIO: f64 = 0.15;

/// Margin used when every value is equal.
const FLAT_AXIS_MARGIN: f64 = 1.0;

/// A labelled x-axis tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tick {
    /// 1-based position on the x axis.
    pub position: usize,
    pub label: String,
}

/// Parallel arrays describing one plotted line.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub sensor_id: String,
    pub unit: String,
    /// 1-based x positions.
    pub positions: Vec<usize>,
    pub values: Vec<f64>,
    /// `HH:MM` label per point.
    pub labels: Vec<String>,
    pub ticks: Vec<Tick>,
}

impl ChartSeries {
    /// Series of a sensor's readings in ingestion order.
    pub fn by_position(sensor: &Sensor) -> Self {
        Self::from_readings(sensor, sensor.readings().iter())
    }

    fn from_readings<'a>(sensor: &Sensor, readings: impl Iterator<Item = &'a Reading>) -> Self {
        let (values, labels): (Vec<f64>, Vec<String>) =
            readings.map(|r| (r.value(), r.hour())).unzip();
        let positions = (1..=values.len()).collect();
        let ticks = ticks(&labels);
        Self {
            sensor_id: sensor.id().to_string(),
            unit: sensor.unit().to_string(),
            positions,
            values,
            labels,
            ticks,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Spacing between labelled ticks for `n` points.
pub fn tick_stride(n: usize) -> usize {
    (n / TARGET_TICKS).max(1)
}

/// Thins labels to every `tick_stride`-th point.
pub fn ticks(labels: &[String]) -> Vec<Tick> {
    labels
        .iter()
        .enumerate()
        .step_by(tick_stride(labels.len()))
        .map(|(i, label)| Tick {
            position: i + 1,
            label: label.clone(),
        })
        .collect()
}

/// A value with the hour it was observed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabeledValue {
    pub value: f64,
    pub label: String,
}

/// Y-axis limits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisRange {
    pub lower: f64,
    pub upper: f64,
}

impl AxisRange {
    /// Pads `[min, max]` by [`AXIS_MARGIN_RATIO`] of the range on each side.
    pub fn with_margin(min: f64, max: f64) -> Self {
        let range = max - min;
        let margin = if range > 0.0 {
            range * AXIS_MARGIN_RATIO
        } else {
            FLAT_AXIS_MARGIN
        };
        Self {
            lower: min - margin,
            upper: max + margin,
        }
    }
}

/// Readings sorted ascending by value, with their extremes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SortedView {
    pub series: ChartSeries,
    pub min: Option<LabeledValue>,
    pub max: Option<LabeledValue>,
    pub axis: Option<AxisRange>,
}

impl SortedView {
    /// Builds the sorted view. Equal values are ordered by hour label, then
    /// by ingestion order.
    pub fn build(sensor: &Sensor) -> Self {
        let mut readings: Vec<&Reading> = sensor.readings().iter().collect();
        readings.sort_by(|a, b| match a.value().total_cmp(&b.value()) {
            Ordering::Equal => a.hour().cmp(&b.hour()),
            other => other,
        });
        let series = ChartSeries::from_readings(sensor, readings.into_iter());

        let labeled = |i: usize| LabeledValue {
            value: series.values[i],
            label: series.labels[i].clone(),
        };
        let min = (!series.is_empty()).then(|| labeled(0));
        let max = (!series.is_empty()).then(|| labeled(series.len() - 1));
        let axis = match (&min, &max) {
            (Some(lo), Some(hi)) => Some(AxisRange::with_margin(lo.value, hi.value)),
            _ => None,
        };

        Self {
            series,
            min,
            max,
            axis,
        }
    }
}
