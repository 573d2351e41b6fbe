//! Bridging a forecast series onto the end of the historical series
//!
//! The forecast line must start exactly at the last historical sample. A small
//! gap is closed by moving the first forecast sample onto the anchor; a large
//! one by inserting the anchor itself as the first forecast sample.

use forecast_core::{HOUR_MS, Sample, Series};
use serde::{Deserialize, Serialize};

/// Gaps above this are bridged by insertion rather than snapping
pub const BRIDGE_THRESHOLD_MS: i64 = 12 * HOUR_MS;

// ============================================================================
// STRATEGY PATTERN: Bridge Threshold Policy
// ============================================================================

/// How the insert/snap threshold is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BridgePolicy {
    /// Constant threshold
    Fixed { threshold_ms: i64 },
    /// `max(floor_ms, factor × median historical spacing)`, so coarse
    /// intervals (weekly, monthly) are snapped instead of bridged
    Adaptive { floor_ms: i64, factor: f64 },
}

impl Default for BridgePolicy {
    fn default() -> Self {
        Self::Fixed {
            threshold_ms: BRIDGE_THRESHOLD_MS,
        }
    }
}

impl BridgePolicy {
    pub fn adaptive() -> Self {
        Self::Adaptive {
            floor_ms: BRIDGE_THRESHOLD_MS,
            factor: 1.5,
        }
    }

    /// Threshold in milliseconds for bridging onto `historical`
    pub fn threshold_for(&self, historical: &Series) -> i64 {
        match *self {
            Self::Fixed { threshold_ms } => threshold_ms.max(0),
            Self::Adaptive { floor_ms, factor } => {
                let floor = floor_ms.max(0);
                let scaled = historical
                    .median_spacing()
                    .filter(|_| factor.is_finite() && factor > 0.0)
                    .map(|spacing| (spacing as f64 * factor) as i64)
                    .unwrap_or(0);
                floor.max(scaled)
            }
        }
    }
}

/// Which bridge [`align_with`] applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bridge {
    /// Nothing to bridge (an empty side, or already anchored)
    Unchanged,
    /// Anchor inserted as the new first forecast sample
    Inserted,
    /// First forecast sample moved onto the anchor timestamp
    Snapped,
}

impl Bridge {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Inserted => "inserted",
            Self::Snapped => "snapped",
        }
    }
}

/// Aligned forecast plus the bridge that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    pub forecast: Series,
    pub bridge: Bridge,
}

/// Align `forecast` onto `historical` with the fixed 12 hour threshold.
///
/// The historical series is never modified; only the forecast is returned.
pub fn align(historical: &Series, forecast: &Series) -> Series {
    align_with(historical, forecast, BridgePolicy::default()).forecast
}

/// Align `forecast` onto `historical` using `policy` for the threshold.
///
/// Forecast samples that would end up at or before the anchor are dropped
/// (all of them when inserting, those after the head when snapping), so the
/// result starts at the anchor and stays strictly ascending.
pub fn align_with(historical: &Series, forecast: &Series, policy: BridgePolicy) -> Alignment {
    let (Some(anchor), Some(head)) = (historical.last(), forecast.first()) else {
        return Alignment {
            forecast: forecast.clone(),
            bridge: Bridge::Unchanged,
        };
    };

    let gap = head.distance_to(anchor.timestamp);
    if gap == 0 {
        return Alignment {
            forecast: forecast.clone(),
            bridge: Bridge::Unchanged,
        };
    }

    let threshold = policy.threshold_for(historical);
    let mut samples: Vec<Sample> = forecast.samples.clone();

    let bridge = if gap > threshold as u64 {
        let overlap = samples
            .iter()
            .take_while(|s| s.timestamp <= anchor.timestamp)
            .count();
        if overlap > 0 {
            tracing::debug!("Dropping {} forecast samples behind the anchor", overlap);
            samples.drain(..overlap);
        }
        samples.insert(0, *anchor);
        Bridge::Inserted
    } else {
        // Later samples still behind the anchor would run backwards once the
        // head moves onto it
        let behind = samples[1..]
            .iter()
            .take_while(|s| s.timestamp <= anchor.timestamp)
            .count();
        if behind > 0 {
            tracing::debug!("Dropping {} forecast samples behind the snapped head", behind);
            samples.drain(1..=behind);
        }
        samples[0].timestamp = anchor.timestamp;
        Bridge::Snapped
    };

    tracing::trace!(
        "Forecast bridge {} (gap {}ms, threshold {}ms)",
        bridge.label(),
        gap,
        threshold
    );

    Alignment {
        forecast: Series::with_samples(forecast.kind.clone(), samples),
        bridge,
    }
}
