//! Viewport ↔ plot-area pixel mapping
//!
//! Both scales work in plot-area coordinates (margins already removed, see
//! [`ChartDimensions::to_inner_x`]). Renderers place samples with `to_px`;
//! pointer positions come back through `from_px` for hover queries.

use crate::ChartDimensions;
use forecast_core::{Timestamp, Viewport};

/// Value axis: `max` at the top edge of the plot, `min` at the bottom
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    min: f64,
    max: f64,
    height: f64,
}

impl LinearScale {
    pub fn new(min: f64, max: f64, height: f64) -> Self {
        Self { min, max, height }
    }

    pub fn from_viewport(viewport: &Viewport, dims: &ChartDimensions) -> Self {
        Self::new(viewport.min_y, viewport.max_y, dims.inner_height())
    }

    /// Pixel row of `value`; a flat domain sits mid-plot
    pub fn to_px(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            return self.height / 2.0;
        }
        (self.max - value) / span * self.height
    }

    /// Value under pixel row `y`
    pub fn from_px(&self, y: f64) -> f64 {
        if self.height <= 0.0 || !y.is_finite() {
            return self.min + (self.max - self.min) / 2.0;
        }
        self.max - y / self.height * (self.max - self.min)
    }
}

/// Time axis: `min` at the left edge of the plot, `max` at the right
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    min: Timestamp,
    max: Timestamp,
    width: f64,
}

impl TimeScale {
    pub fn new(min: Timestamp, max: Timestamp, width: f64) -> Self {
        Self { min, max, width }
    }

    pub fn from_viewport(viewport: &Viewport, dims: &ChartDimensions) -> Self {
        Self::new(viewport.min_x, viewport.max_x, dims.inner_width())
    }

    /// Pixel column of `timestamp`; a single-instant domain sits mid-plot
    pub fn to_px(&self, timestamp: Timestamp) -> f64 {
        let span = self.max.saturating_sub(self.min);
        if span == 0 {
            return self.width / 2.0;
        }
        timestamp.saturating_sub(self.min) as f64 / span as f64 * self.width
    }

    /// Timestamp under pixel column `x`, rounded to the millisecond
    pub fn from_px(&self, x: f64) -> Timestamp {
        let span = self.max.saturating_sub(self.min);
        if self.width <= 0.0 || !x.is_finite() {
            return self.min.saturating_add(span / 2);
        }
        let offset = (x / self.width * span as f64).round() as Timestamp;
        self.min.saturating_add(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ChartMargin;
    use forecast_core::DAY_MS;

    fn dims() -> ChartDimensions {
        ChartDimensions::new(420.0, 220.0).with_margin(ChartMargin::uniform(10.0))
    }

    #[test]
    fn test_time_scale_round_trip() {
        let viewport = Viewport::new(0, 10 * DAY_MS, 90.0, 110.0);
        let x = TimeScale::from_viewport(&viewport, &dims());

        assert_eq!(x.to_px(5 * DAY_MS), 200.0);
        assert_eq!(x.from_px(200.0), 5 * DAY_MS);
        assert_eq!(x.from_px(0.0), 0);
        assert_eq!(x.to_px(10 * DAY_MS), 400.0);
    }

    #[test]
    fn test_value_scale_is_top_down() {
        let viewport = Viewport::new(0, 10 * DAY_MS, 90.0, 110.0);
        let y = LinearScale::from_viewport(&viewport, &dims());

        assert_eq!(y.to_px(110.0), 0.0);
        assert_eq!(y.to_px(90.0), 200.0);
        assert_eq!(y.from_px(100.0), 100.0);
        assert_eq!(y.from_px(0.0), 110.0);
    }

    #[test]
    fn test_degenerate_scales() {
        assert_eq!(TimeScale::new(100, 100, 50.0).to_px(100), 25.0);
        assert_eq!(TimeScale::new(0, 10, 0.0).from_px(5.0), 5);
        assert_eq!(TimeScale::new(0, 10, 5.0).from_px(f64::NAN), 5);

        assert_eq!(LinearScale::new(5.0, 5.0, 80.0).to_px(5.0), 40.0);
        assert_eq!(LinearScale::new(0.0, 10.0, 0.0).from_px(3.0), 5.0);
    }
}
