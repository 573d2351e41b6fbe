//! # forecast-core
//!
//! Core domain types for the forecast chart engine.
//! Samples, series and viewports shared by every chart, plus the
//! backend payload shapes they are decoded from.

pub mod payload;
pub mod series;
pub mod stats;

pub use payload::*;
pub use series::*;
pub use stats::*;

use serde::{Deserialize, Serialize};

/// Unix timestamp in milliseconds
pub type Timestamp = i64;

// ============================================================================
// TIME CONSTANTS
// ============================================================================

pub const MINUTE_MS: i64 = 60_000;
pub const HOUR_MS: i64 = 60 * MINUTE_MS;
pub const DAY_MS: i64 = 24 * HOUR_MS;
pub const WEEK_MS: i64 = 7 * DAY_MS;

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// One plotted point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Unix timestamp in milliseconds
    pub timestamp: Timestamp,
    pub value: f64,
}

impl Sample {
    pub const fn new(timestamp: Timestamp, value: f64) -> Self {
        Self { timestamp, value }
    }

    /// Absolute time distance to `timestamp`, saturating at the type bounds
    pub fn distance_to(&self, timestamp: Timestamp) -> u64 {
        self.timestamp.abs_diff(timestamp)
    }
}

impl From<(Timestamp, f64)> for Sample {
    fn from((timestamp, value): (Timestamp, f64)) -> Self {
        Self::new(timestamp, value)
    }
}

/// Axis-unit bounding box of the visible plot area.
///
/// `min_x <= max_x` and `min_y <= max_y` always hold for viewports produced by
/// the bounds calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub min_x: Timestamp,
    pub max_x: Timestamp,
    pub min_y: f64,
    pub max_y: f64,
}

impl Viewport {
    pub const fn new(min_x: Timestamp, max_x: Timestamp, min_y: f64, max_y: f64) -> Self {
        Self { min_x, max_x, min_y, max_y }
    }

    /// Width of the time domain in milliseconds
    pub fn x_span(&self) -> i64 {
        self.max_x.saturating_sub(self.min_x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_distance_is_symmetric() {
        let sample = Sample::new(1_000, 1.0);
        assert_eq!(sample.distance_to(400), 600);
        assert_eq!(sample.distance_to(1_600), 600);
    }

    #[test]
    fn test_sample_distance_saturates() {
        let sample = Sample::new(i64::MIN, 1.0);
        assert_eq!(sample.distance_to(i64::MAX), u64::MAX);
    }

    #[test]
    fn test_viewport_x_span() {
        let viewport = Viewport::new(DAY_MS, 3 * DAY_MS, 10.0, 25.0);
        assert_eq!(viewport.x_span(), 2 * DAY_MS);
        assert_eq!(Viewport::new(i64::MIN, i64::MAX, 0.0, 1.0).x_span(), i64::MAX);
    }
}
