//! Axis label formatting
//!
//! Value labels shrink with magnitude: compact suffixes for thousands and up,
//! then progressively more decimals for smaller values. Time labels go through
//! a [`TimeLabelFormatter`] so the renderer can swap in a locale-aware one.

use chrono::{TimeZone, Utc};
use forecast_core::{DAY_MS, Timestamp};
use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Formatter Traits
// ============================================================================

/// Strategy trait for value-axis labels
pub trait TickFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// Strategy trait for time-axis labels
pub trait TimeLabelFormatter: Send + Sync {
    /// Format `timestamp` for an axis covering `span_ms` milliseconds
    fn format(&self, timestamp: Timestamp, span_ms: i64) -> String;
}

/// A tick position paired with its rendered label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick<T> {
    pub value: T,
    pub label: String,
}

impl<T> AxisTick<T> {
    pub fn new(value: T, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

// ============================================================================
// VALUE LABELS
// ============================================================================

const COMPACT_UNITS: [(f64, &str); 4] = [
    (1_000.0, "K"),
    (1_000_000.0, "M"),
    (1_000_000_000.0, "B"),
    (1_000_000_000_000.0, "T"),
];

/// Format a tick value with magnitude-adaptive precision
pub fn format_tick(value: f64) -> String {
    // -0.0 would otherwise render as "-0.000"
    let value = if value == 0.0 { 0.0 } else { value };
    let abs = value.abs();

    if abs.is_finite() && abs >= 1_000.0 {
        format_compact(value)
    } else if abs >= 100.0 {
        format!("{:.0}", value)
    } else if abs >= 10.0 {
        format!("{:.1}", value)
    } else if abs >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.3}", value)
    }
}

/// Compact notation with one decimal (`1.2M`, `3.4K`, `1B`)
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };

    let Some(mut unit) = COMPACT_UNITS.iter().rposition(|(size, _)| abs >= *size) else {
        return format!("{}{:.1}", sign, abs);
    };

    let mut text = format!("{:.1}", abs / COMPACT_UNITS[unit].0);

    // 999_950 rounds to "1000.0K"; promote to the next unit instead
    if unit + 1 < COMPACT_UNITS.len() && text.parse::<f64>().is_ok_and(|v| v >= 1_000.0) {
        unit += 1;
        text = format!("{:.1}", abs / COMPACT_UNITS[unit].0);
    }

    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{}{}{}", sign, text, COMPACT_UNITS[unit].1)
}

/// Default value-axis formatter backed by [`format_tick`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactTickFormatter;

impl TickFormatter for CompactTickFormatter {
    fn format(&self, value: f64) -> String {
        format_tick(value)
    }
}

// ============================================================================
// TIME LABELS
// ============================================================================

/// Picks a date pattern from the visible time span (UTC)
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanTimeFormatter;

impl SpanTimeFormatter {
    pub fn pattern_for(span_ms: i64) -> &'static str {
        if span_ms >= 365 * DAY_MS {
            "%b %Y"
        } else if span_ms >= 2 * DAY_MS {
            "%b %d"
        } else if span_ms >= DAY_MS {
            "%b %d %H:%M"
        } else {
            "%H:%M"
        }
    }
}

impl TimeLabelFormatter for SpanTimeFormatter {
    fn format(&self, timestamp: Timestamp, span_ms: i64) -> String {
        format_timestamp(timestamp, Self::pattern_for(span_ms))
    }
}

/// Format epoch milliseconds as UTC; out-of-range timestamps print raw
pub fn format_timestamp(timestamp: Timestamp, pattern: &str) -> String {
    match Utc.timestamp_millis_opt(timestamp).single() {
        Some(dt) => dt.format(pattern).to_string(),
        None => timestamp.to_string(),
    }
}
