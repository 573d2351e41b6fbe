//! Series types for charting

use crate::{Sample, Timestamp};
use serde::{Deserialize, Serialize};

/// Source of a plotted series
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "lowercase")]
pub enum SeriesKind {
    Historical,
    Forecast,
    /// Pre-computed overlay such as `SMA 20` or `EMA 50`
    Indicator(String),
}

impl SeriesKind {
    pub fn indicator(name: impl Into<String>) -> Self {
        Self::Indicator(name.into())
    }

    /// Label shown next to the value in tooltips
    pub fn label(&self) -> &str {
        match self {
            Self::Historical => "historical",
            Self::Forecast => "forecast",
            Self::Indicator(name) => name,
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Historical => write!(f, "historical"),
            Self::Forecast => write!(f, "forecast"),
            Self::Indicator(name) => write!(f, "indicator:{}", name),
        }
    }
}

/// Ordered samples forming one plotted line.
///
/// Samples are expected ascending by timestamp with no duplicates. That is a
/// precondition on the upstream data; [`Series::normalized`] repairs payloads
/// that break it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub kind: SeriesKind,
    pub samples: Vec<Sample>,
}

impl Series {
    pub fn new(kind: SeriesKind) -> Self {
        Self {
            kind,
            samples: Vec::new(),
        }
    }

    pub fn with_samples(kind: SeriesKind, samples: Vec<Sample>) -> Self {
        Self { kind, samples }
    }

    pub fn historical(samples: Vec<Sample>) -> Self {
        Self::with_samples(SeriesKind::Historical, samples)
    }

    pub fn forecast(samples: Vec<Sample>) -> Self {
        Self::with_samples(SeriesKind::Forecast, samples)
    }

    pub fn indicator(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        Self::with_samples(SeriesKind::indicator(name), samples)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn first(&self) -> Option<&Sample> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn label(&self) -> &str {
        self.kind.label()
    }

    /// The most recent `n` samples as a new series of the same kind
    pub fn tail(&self, n: usize) -> Self {
        let start = self.samples.len().saturating_sub(n);
        Self::with_samples(self.kind.clone(), self.samples[start..].to_vec())
    }

    /// Time range (first timestamp, last timestamp)
    pub fn time_range(&self) -> Option<(Timestamp, Timestamp)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }

    /// Value range over finite samples (min, max)
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.samples
            .iter()
            .map(|s| s.value)
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }

    /// Strictly ascending timestamps (sorted, no duplicates)
    pub fn is_well_ordered(&self) -> bool {
        self.samples
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp)
    }

    /// Sort by timestamp and drop duplicate timestamps, keeping the sample
    /// that appeared last in the input.
    pub fn normalized(mut self) -> Self {
        if self.is_well_ordered() {
            return self;
        }

        // Stable sort keeps input order among equal timestamps
        self.samples.sort_by_key(|s| s.timestamp);

        let mut deduped: Vec<Sample> = Vec::with_capacity(self.samples.len());
        for sample in self.samples {
            match deduped.last_mut() {
                Some(prev) if prev.timestamp == sample.timestamp => *prev = sample,
                _ => deduped.push(sample),
            }
        }

        Self::with_samples(self.kind, deduped)
    }

    /// Median spacing between consecutive samples in milliseconds
    pub fn median_spacing(&self) -> Option<i64> {
        if self.samples.len() < 2 {
            return None;
        }

        let mut gaps: Vec<i64> = self
            .samples
            .windows(2)
            .map(|pair| pair[1].timestamp.saturating_sub(pair[0].timestamp))
            .collect();
        gaps.sort_unstable();

        let mid = gaps.len() / 2;
        if gaps.len() % 2 == 0 {
            Some(((gaps[mid - 1] as i128 + gaps[mid] as i128) / 2) as i64)
        } else {
            Some(gaps[mid])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DAY_MS;

    fn daily(values: &[f64]) -> Series {
        Series::historical(
            values
                .iter()
                .enumerate()
                .map(|(i, &v)| Sample::new(i as i64 * DAY_MS, v))
                .collect(),
        )
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SeriesKind::Historical.to_string(), "historical");
        assert_eq!(SeriesKind::indicator("SMA 20").to_string(), "indicator:SMA 20");
        assert_eq!(SeriesKind::indicator("SMA 20").label(), "SMA 20");
    }

    #[test]
    fn test_tail_keeps_most_recent() {
        let series = daily(&[1.0, 2.0, 3.0, 4.0]);
        let tail = series.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.first().map(|s| s.value), Some(3.0));
        assert_eq!(tail.kind, SeriesKind::Historical);
        assert_eq!(series.tail(10).len(), 4);
    }

    #[test]
    fn test_value_range_skips_non_finite() {
        let series = daily(&[5.0, f64::NAN, 2.0, f64::INFINITY, 9.0]);
        assert_eq!(series.value_range(), Some((2.0, 9.0)));
        assert_eq!(daily(&[f64::NAN]).value_range(), None);
    }

    #[test]
    fn test_normalized_sorts_and_dedupes() {
        let series = Series::forecast(vec![
            Sample::new(30, 3.0),
            Sample::new(10, 1.0),
            Sample::new(30, 4.0),
            Sample::new(20, 2.0),
        ]);
        assert!(!series.is_well_ordered());

        let fixed = series.normalized();
        assert!(fixed.is_well_ordered());
        assert_eq!(
            fixed.samples,
            vec![Sample::new(10, 1.0), Sample::new(20, 2.0), Sample::new(30, 4.0)]
        );
    }

    #[test]
    fn test_median_spacing() {
        let series = Series::historical(vec![
            Sample::new(0, 1.0),
            Sample::new(DAY_MS, 1.0),
            Sample::new(2 * DAY_MS, 1.0),
            Sample::new(5 * DAY_MS, 1.0),
        ]);
        assert_eq!(series.median_spacing(), Some(DAY_MS));

        let even = Series::historical(vec![
            Sample::new(0, 1.0),
            Sample::new(10, 1.0),
            Sample::new(40, 1.0),
        ]);
        assert_eq!(even.median_spacing(), Some(20));
        assert_eq!(daily(&[1.0]).median_spacing(), None);
    }
}
