//! # forecast-charts
//!
//! Chart scaling and series alignment for history + forecast line charts.
//! Every function here is pure: build the inputs fresh per render, call, and
//! discard the results on the next refresh.
//!
//! ## Modules
//!
//! - `ticks` - Nice-number tick generation for value and time axes
//! - `labels` - Magnitude-adaptive value labels and time labels
//! - `bounds` - Viewport computation across overlaid series
//! - `align` - Bridging the forecast onto the last historical sample
//! - `lookup` - Lookup tables and nearest-sample resolution for hovers
//! - `scale` - Viewport to plot-area pixel scales

pub mod align;
pub mod bounds;
pub mod labels;
pub mod lookup;
pub mod scale;
pub mod ticks;

pub use align::*;
pub use bounds::*;
pub use labels::*;
pub use lookup::*;
pub use scale::*;
pub use ticks::*;

use serde::{Deserialize, Serialize};

/// Chart margin configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl ChartMargin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top, right, bottom, left }
    }

    pub const fn uniform(margin: f64) -> Self {
        Self::new(margin, margin, margin, margin)
    }

    /// Standard chart margins (value labels on the left)
    pub const fn standard() -> Self {
        Self::new(20.0, 20.0, 30.0, 60.0)
    }
}

impl Default for ChartMargin {
    fn default() -> Self {
        Self::standard()
    }
}

/// Chart dimensions with margin handling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartDimensions {
    pub width: f64,
    pub height: f64,
    pub margin: ChartMargin,
}

impl ChartDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: ChartMargin::default(),
        }
    }

    pub fn with_margin(mut self, margin: ChartMargin) -> Self {
        self.margin = margin;
        self
    }

    /// Inner width (excluding margins)
    pub fn inner_width(&self) -> f64 {
        (self.width - self.margin.left - self.margin.right).max(0.0)
    }

    /// Inner height (excluding margins)
    pub fn inner_height(&self) -> f64 {
        (self.height - self.margin.top - self.margin.bottom).max(0.0)
    }

    /// Pointer x in chart coordinates to x within the plot area
    pub fn to_inner_x(&self, x: f64) -> f64 {
        x - self.margin.left
    }

    /// Pointer y in chart coordinates to y within the plot area
    pub fn to_inner_y(&self, y: f64) -> f64 {
        y - self.margin.top
    }
}

impl Default for ChartDimensions {
    fn default() -> Self {
        Self::new(800.0, 400.0)
    }
}
