//! Aggregate statistics over a sequence of values.
//!
//! The free functions return `0.0` for an empty sequence. That sentinel cannot
//! be told apart from a genuine zero reading; callers that need to know use
//! [`Summary::compute`], which returns `None` instead.
//!
//! Every function consumes its input once, so a sensor can pass an iterator
//! over its readings without collecting the values first.

use serde::Serialize;

/// Returns the smallest value, or `0.0` when `values` is empty.
pub fn min(values: impl IntoIterator<Item = f64>) -> f64 {
    extremum(values, |candidate, best| candidate < best).map_or(0.0, |(_, v)| v)
}

/// Returns the largest value, or `0.0` when `values` is empty.
pub fn max(values: impl IntoIterator<Item = f64>) -> f64 {
    extremum(values, |candidate, best| candidate > best).map_or(0.0, |(_, v)| v)
}

/// Returns the arithmetic mean, or `0.0` when `values` is empty.
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (count, sum) = values
        .into_iter()
        .fold((0usize, 0.0), |(count, sum), v| (count + 1, sum + v));
    if count == 0 {
        return 0.0;
    }
    sum / count as f64
}

/// Index of the first occurrence of the minimum.
pub fn min_index(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    extremum(values, |candidate, best| candidate < best).map(|(i, _)| i)
}

/// Index of the first occurrence of the maximum.
pub fn max_index(values: impl IntoIterator<Item = f64>) -> Option<usize> {
    extremum(values, |candidate, best| candidate > best).map(|(i, _)| i)
}

// Strict comparison keeps the earliest index among equal extremes.
fn extremum(
    values: impl IntoIterator<Item = f64>,
    better: impl Fn(f64, f64) -> bool,
) -> Option<(usize, f64)> {
    let mut iter = values.into_iter().enumerate();
    let first = iter.next()?;
    Some(iter.fold(first, |best, (i, v)| if better(v, best.1) { (i, v) } else { best }))
}

/// All aggregates of a non-empty sequence, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Index of the first occurrence of `min`.
    pub min_index: usize,
    /// Index of the first occurrence of `max`.
    pub max_index: usize,
}

impl Summary {
    /// Computes the summary, or `None` when there is no data.
    pub fn compute(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let mut summary = Summary {
            count: 1,
            min: first,
            max: first,
            mean: 0.0,
            min_index: 0,
            max_index: 0,
        };
        let mut sum = first;
        for (i, v) in iter.enumerate() {
            if v < summary.min {
                summary.min = v;
                summary.min_index = i + 1;
            }
            if v > summary.max {
                summary.max = v;
                summary.max_index = i + 1;
            }
            sum += v;
            summary.count += 1;
        }
        summary.mean = sum / summary.count as f64;
        Some(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::iter;

    #[test]
    fn test_empty_returns_sentinel() {
        assert_eq!(min(iter::empty()), 0.0);
        assert_eq!(max(iter::empty()), 0.0);
        assert_eq!(mean(iter::empty()), 0.0);
        assert_eq!(min_index(iter::empty()), None);
        assert_eq!(max_index(iter::empty()), None);
        assert!(Summary::compute(iter::empty()).is_none());
    }

    #[test]
    fn test_basic_aggregates() {
        let values = [20.0, 39.0, 25.0];
        assert_eq!(min(values.iter().copied()), 20.0);
        assert_eq!(max(values.iter().copied()), 39.0);
        assert_eq!(mean(values.iter().copied()), 28.0);
    }

    #[test]
    fn test_first_occurrence_tie_break() {
        let values = [5.0, 1.0, 9.0, 1.0, 9.0];
        assert_eq!(min_index(values.iter().copied()), Some(1));
        assert_eq!(max_index(values.iter().copied()), Some(2));

        let summary = Summary::compute(values.iter().copied()).unwrap();
        assert_eq!(summary.min_index, 1);
        assert_eq!(summary.max_index, 2);
    }

    #[test]
    fn test_summary_matches_independent_scans() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let len = rng.random_range(1..40);
            let values: Vec<f64> = (0..len)
                .map(|_| (rng.random_range(-200..200) as f64) / 4.0)
                .collect();
            let summary = Summary::compute(values.iter().copied()).unwrap();
            assert_eq!(summary.count, values.len());
            assert_eq!(summary.min, min(values.iter().copied()));
            assert_eq!(summary.max, max(values.iter().copied()));
            assert_eq!(summary.mean, mean(values.iter().copied()));
            assert_eq!(Some(summary.min_index), min_index(values.iter().copied()));
            assert_eq!(Some(summary.max_index), max_index(values.iter().copied()));
        }
    }

    #[test]
    fn test_mean_between_extremes() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let len = rng.random_range(1..64);
            let values: Vec<f64> = (0..len).map(|_| rng.random_range(-50.0..150.0)).collect();
            let m = mean(values.iter().copied());
            assert!(min(values.iter().copied()) <= m, "min > mean for {:?}", values);
            assert!(m <= max(values.iter().copied()), "mean > max for {:?}", values);
        }
    }
}
