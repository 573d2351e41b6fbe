//! Summary metrics over a single series

use crate::{Series, Timestamp};
use serde::{Deserialize, Serialize};

/// Overview metrics for a price series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    pub latest: f64,
    pub latest_at: Timestamp,
    /// Percent change of the latest sample against the one before it
    pub pct_change: f64,
    pub range_high: f64,
    pub range_low: f64,
    pub data_points: usize,
}

impl SeriesStats {
    pub fn of(series: &Series) -> Option<Self> {
        let last = series.last()?;
        let previous = series
            .samples
            .len()
            .checked_sub(2)
            .map(|i| series.samples[i].value)
            .unwrap_or(last.value);

        let pct_change = if previous == 0.0 {
            0.0
        } else {
            (last.value - previous) / previous * 100.0
        };

        let (range_low, range_high) = series.value_range().unwrap_or((last.value, last.value));

        Some(Self {
            latest: last.value,
            latest_at: last.timestamp,
            pct_change,
            range_high,
            range_low,
            data_points: series.len(),
        })
    }

    pub fn is_up(&self) -> bool {
        self.pct_change >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sample;

    #[test]
    fn test_stats_of_series() {
        let series = Series::historical(vec![
            Sample::new(1, 90.0),
            Sample::new(2, 120.0),
            Sample::new(3, 100.0),
            Sample::new(4, 110.0),
        ]);
        let stats = SeriesStats::of(&series).unwrap();
        assert_eq!(stats.latest, 110.0);
        assert_eq!(stats.latest_at, 4);
        assert!((stats.pct_change - 10.0).abs() < 1e-9);
        assert_eq!(stats.range_high, 120.0);
        assert_eq!(stats.range_low, 90.0);
        assert_eq!(stats.data_points, 4);
        assert!(stats.is_up());
    }

    #[test]
    fn test_single_sample_has_no_change() {
        let series = Series::historical(vec![Sample::new(1, 42.0)]);
        let stats = SeriesStats::of(&series).unwrap();
        assert_eq!(stats.pct_change, 0.0);
        assert!(SeriesStats::of(&Series::historical(Vec::new())).is_none());
    }
}
