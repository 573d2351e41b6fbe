//! Tooltip composition for pointer queries

use crate::ToleranceConfig;
use forecast_charts::{LookupStrategy, LookupTable};
use forecast_core::{Series, SeriesKind, Timestamp};
use serde::{Deserialize, Serialize};

/// One series' value at the hovered timestamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipEntry {
    pub series: String,
    pub value: f64,
}

/// Everything shown for a hover or tap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub timestamp: Timestamp,
    pub entries: Vec<TooltipEntry>,
}

impl Tooltip {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Value for the series labelled `series`, if it matched
    pub fn get(&self, series: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.series == series)
            .map(|entry| entry.value)
    }
}

/// Resolve `timestamp` against every layer.
///
/// The `active` series (the one under the pointer) uses the same-series
/// tolerance, all others the cross-series one. Layers without a match within
/// their tolerance are left out rather than filled with a stale value.
pub fn resolve_tooltip<'a, I>(
    layers: I,
    timestamp: Timestamp,
    active: Option<&SeriesKind>,
    tolerance: ToleranceConfig,
    strategy: LookupStrategy,
) -> Tooltip
where
    I: IntoIterator<Item = (&'a Series, &'a LookupTable)>,
{
    let entries = layers
        .into_iter()
        .filter_map(|(series, table)| {
            let window = if active == Some(&series.kind) {
                tolerance.same_series_ms
            } else {
                tolerance.cross_series_ms
            };

            strategy
                .resolve(table, timestamp, window)
                .map(|value| TooltipEntry {
                    series: series.label().to_string(),
                    value,
                })
        })
        .collect();

    Tooltip { timestamp, entries }
}
