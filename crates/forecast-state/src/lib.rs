//! # forecast-state
//!
//! Render-pass state for forecast charts.
//! A [`ChartFrame`] is built from the latest fetched series on every refresh
//! and answers pointer queries until the next one replaces it.

pub mod config;
pub mod frame;
pub mod tooltip;

pub use config::*;
pub use frame::*;
pub use tooltip::*;

/// Configuration constants
pub const HISTORY_LIMIT: usize = 120;
pub const MAX_INDICATORS: usize = 4;
