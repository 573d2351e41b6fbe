//! "Nice" axis tick generation
//!
//! Steps are rounded up to `k × 10^n`. The lower admission window is half a
//! step and the upper one a full step, so the last tick may sit just beyond the
//! data maximum. Renderers match gridlines against these exact values.

use forecast_core::Timestamp;

/// Default number of ticks per axis
pub const DEFAULT_TICK_COUNT: usize = 4;

/// Spans narrower than this are treated as a single value
const DEGENERATE_SPAN: f64 = 1e-6;

/// Extra walk iterations past the requested count
const WALK_SLACK: usize = 4;

/// Generate tick values covering `[min, max]`.
///
/// Never fails: non-finite bounds or `desired_count <= 1` yield `[min]`, and a
/// zero-width domain yields four values spread around the single value.
pub fn generate_ticks(min: f64, max: f64, desired_count: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || desired_count <= 1 {
        return vec![min];
    }

    if (max - min).abs() < DEGENERATE_SPAN {
        let baseline = if max == 0.0 { 1.0 } else { max.abs() };
        return vec![
            min - baseline / 2.0,
            min,
            min + baseline / 2.0,
            min + baseline,
        ];
    }

    let (min, max) = if min > max { (max, min) } else { (min, max) };

    let raw_step = (max - min) / (desired_count - 1) as f64;
    let magnitude = 10.0_f64.powf(raw_step.log10().floor());
    let step = (raw_step / magnitude).ceil() * magnitude;

    // Overflowing spans end up here
    if !step.is_finite() || step <= 0.0 {
        return vec![min];
    }

    let start = (min / magnitude).floor() * magnitude;
    let lower = min - step * 0.5;
    let upper = max + step;

    let ticks = strictly_increasing(
        (0..desired_count + WALK_SLACK)
            .map(|i| start + step * i as f64)
            .filter(|&tick| tick.is_finite() && tick >= lower && tick <= upper),
    );

    if ticks.len() < 2 {
        return strictly_increasing([min, min + step, max]);
    }

    ticks
}

/// Keep only values above the previous kept one. Steps finer than the float
/// spacing around `start` round several walk positions to the same value.
fn strictly_increasing(values: impl IntoIterator<Item = f64>) -> Vec<f64> {
    let mut out: Vec<f64> = Vec::new();
    for value in values {
        if out.last().is_none_or(|&last| value > last) {
            out.push(value);
        }
    }
    out
}

/// Tick timestamps for a time axis.
///
/// Runs the same nice-number walk over epoch milliseconds. A single-instant
/// domain gets one tick at that instant rather than a synthetic range.
pub fn generate_time_ticks(min: Timestamp, max: Timestamp, desired_count: usize) -> Vec<Timestamp> {
    if min == max {
        return vec![min];
    }

    let mut ticks: Vec<Timestamp> = generate_ticks(min as f64, max as f64, desired_count)
        .into_iter()
        .map(|tick| tick.round() as Timestamp)
        .collect();
    ticks.dedup();
    ticks
}
