//! Per-series lookup tables and nearest-sample resolution for hover queries

use forecast_core::{MINUTE_MS, Sample, Series, Timestamp, WEEK_MS};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tolerance when matching one series' timestamp against another
/// (history vs. forecast may be sampled at different granularities)
pub const CROSS_SERIES_TOLERANCE_MS: i64 = WEEK_MS;

/// Tolerance when matching within the hovered series itself
pub const SAME_SERIES_TOLERANCE_MS: i64 = MINUTE_MS;

/// Timestamp → value table built once per series per render
#[derive(Debug, Clone, Default)]
pub struct LookupTable {
    entries: Vec<Sample>,
    exact: HashMap<Timestamp, f64>,
    strictly_ascending: bool,
}

impl LookupTable {
    pub fn from_samples(samples: &[Sample]) -> Self {
        let mut exact = HashMap::with_capacity(samples.len());
        for sample in samples {
            exact.entry(sample.timestamp).or_insert(sample.value);
        }

        Self {
            entries: samples.to_vec(),
            exact,
            strictly_ascending: samples.windows(2).all(|w| w[0].timestamp < w[1].timestamp),
        }
    }

    pub fn from_series(series: &Series) -> Self {
        Self::from_samples(&series.samples)
    }

    /// Exact-match lookup
    pub fn get(&self, timestamp: Timestamp) -> Option<f64> {
        self.exact.get(&timestamp).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Nearest-sample value within `tolerance` ms of `query`, by linear scan.
///
/// On equal distances the first entry in table order wins. Returns `None` for
/// an empty table, a negative tolerance, or when the nearest sample is too far.
pub fn resolve(table: &LookupTable, query: Timestamp, tolerance: i64) -> Option<f64> {
    if tolerance < 0 {
        return None;
    }

    let mut best: Option<(u64, f64)> = None;
    for sample in &table.entries {
        let distance = sample.distance_to(query);
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, sample.value));
        }
    }

    best.filter(|(distance, _)| *distance <= tolerance as u64)
        .map(|(_, value)| value)
}

/// Same contract as [`resolve`], in O(log n) over a strictly ascending table.
/// Unsorted tables fall back to the linear scan.
pub fn resolve_indexed(table: &LookupTable, query: Timestamp, tolerance: i64) -> Option<f64> {
    if !table.strictly_ascending {
        return resolve(table, query, tolerance);
    }
    if tolerance < 0 {
        return None;
    }

    let entries = &table.entries;
    let idx = entries.partition_point(|s| s.timestamp < query);

    let before = idx.checked_sub(1).map(|i| entries[i]);
    let after = entries.get(idx).copied();

    let nearest = match (before, after) {
        (Some(b), Some(a)) => {
            // Earlier entry wins ties
            if b.distance_to(query) <= a.distance_to(query) { b } else { a }
        }
        (Some(b), None) => b,
        (None, Some(a)) => a,
        (None, None) => return None,
    };

    (nearest.distance_to(query) <= tolerance as u64).then_some(nearest.value)
}

/// Lookup algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupStrategy {
    /// Linear scan; fine for the ~120 samples a chart keeps
    #[default]
    Linear,
    /// Binary search for larger series
    Indexed,
}

impl LookupStrategy {
    pub fn resolve(&self, table: &LookupTable, query: Timestamp, tolerance: i64) -> Option<f64> {
        match self {
            Self::Linear => resolve(table, query, tolerance),
            Self::Indexed => resolve_indexed(table, query, tolerance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::DAY_MS;

    fn table(points: &[(i64, f64)]) -> LookupTable {
        let samples: Vec<Sample> = points.iter().copied().map(Sample::from).collect();
        LookupTable::from_samples(&samples)
    }

    #[test]
    fn test_exact_get() {
        let t = table(&[(10, 1.0), (20, 2.0)]);
        assert_eq!(t.get(20), Some(2.0));
        assert_eq!(t.get(15), None);
    }

    #[test]
    fn test_resolve_within_one_ms() {
        let t = table(&[(0, 1.0), (DAY_MS, 2.0)]);
        assert_eq!(resolve(&t, DAY_MS - 1, 1), Some(2.0));
        assert_eq!(resolve(&t, DAY_MS, 0), Some(2.0));
    }

    #[test]
    fn test_resolve_beyond_tolerance_is_none() {
        let t = table(&[(0, 1.0), (DAY_MS, 2.0)]);
        assert_eq!(resolve(&t, DAY_MS / 2, SAME_SERIES_TOLERANCE_MS), None);
        assert_eq!(resolve(&t, DAY_MS / 2 + 1, CROSS_SERIES_TOLERANCE_MS), Some(2.0));
        assert_eq!(resolve(&t, 0, -1), None);
        assert_eq!(resolve(&LookupTable::default(), 0, i64::MAX), None);
    }

    #[test]
    fn test_tie_goes_to_first_entry() {
        let t = table(&[(0, 1.0), (100, 2.0)]);
        assert_eq!(resolve(&t, 50, 1_000), Some(1.0));
        assert_eq!(resolve_indexed(&t, 50, 1_000), Some(1.0));

        // Table order, not timestamp order, decides for unsorted input
        let unsorted = table(&[(100, 2.0), (0, 1.0)]);
        assert_eq!(resolve(&unsorted, 50, 1_000), Some(2.0));
        assert_eq!(resolve_indexed(&unsorted, 50, 1_000), Some(2.0));
    }

    #[test]
    fn test_indexed_matches_linear() {
        let points: Vec<(i64, f64)> = (0..120).map(|i| (i * DAY_MS + (i % 7) * 3_600_000, i as f64)).collect();
        let t = table(&points);

        for query in (-3 * DAY_MS..125 * DAY_MS).step_by(5_432_109) {
            for tolerance in [0, SAME_SERIES_TOLERANCE_MS, DAY_MS / 3, CROSS_SERIES_TOLERANCE_MS] {
                assert_eq!(
                    resolve(&t, query, tolerance),
                    resolve_indexed(&t, query, tolerance),
                    "query {} tolerance {}",
                    query,
                    tolerance
                );
            }
        }
    }

    #[test]
    fn test_strategy_dispatch() {
        let t = table(&[(0, 1.0), (10, 2.0)]);
        assert_eq!(LookupStrategy::Linear.resolve(&t, 9, 5), Some(2.0));
        assert_eq!(LookupStrategy::Indexed.resolve(&t, 9, 5), Some(2.0));
        assert_eq!(LookupStrategy::default(), LookupStrategy::Linear);
    }
}
