//! Viewport bounds across overlaid series

use forecast_core::{Series, Viewport};

/// Headroom below the minimum, as a fraction of its magnitude
const PAD_BELOW: f64 = 0.02;
/// Headroom above the maximum
const PAD_ABOVE: f64 = 0.02;

/// Symmetric headroom for a flat series
const PAD_FLAT: f64 = 0.05;

/// Compute the visible viewport over every supplied series.
///
/// Returns `None` when no series holds a plottable sample; the caller renders
/// an empty-state chart. Timestamps bound the x axis; every finite value of
/// every series bounds the y axis before padding.
pub fn compute_viewport(series: &[Series]) -> Option<Viewport> {
    let mut x: Option<(i64, i64)> = None;
    let mut y: Option<(f64, f64)> = None;

    for s in series {
        if let Some((first, last)) = s.time_range() {
            x = Some(match x {
                None => (first, last),
                Some((min, max)) => (min.min(first), max.max(last)),
            });
        }

        if let Some((low, high)) = s.value_range() {
            y = Some(match y {
                None => (low, high),
                Some((min, max)) => (min.min(low), max.max(high)),
            });
        }
    }

    let Some((min_x, max_x)) = x else {
        tracing::debug!("No samples across {} series, empty viewport", series.len());
        return None;
    };

    let Some((min_y, max_y)) = y else {
        tracing::warn!("Series have samples but no finite values, empty viewport");
        return None;
    };

    let (min_y, max_y) = pad_values(min_y, max_y);
    Some(Viewport::new(min_x, max_x, min_y, max_y))
}

/// Apply proportional headroom to a value range.
///
/// For positive values this is `min * 0.98, max * 1.02` (or `0.95 / 1.05` when
/// flat). Negative bounds are padded outward by the same fraction. An all-zero
/// range falls back to `-1..1`. Padded bounds saturate at `±f64::MAX`.
pub fn pad_values(min_y: f64, max_y: f64) -> (f64, f64) {
    let (low, high) = if min_y == max_y {
        let pad = min_y.abs() * PAD_FLAT;
        if pad == 0.0 {
            (min_y - 1.0, max_y + 1.0)
        } else {
            (min_y - pad, max_y + pad)
        }
    } else {
        (min_y - min_y.abs() * PAD_BELOW, max_y + max_y.abs() * PAD_ABOVE)
    };

    (low.max(-f64::MAX), high.min(f64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::{DAY_MS, Sample};

    fn series_at(start: i64, values: &[f64]) -> Vec<Sample> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Sample::new(start + i as i64 * DAY_MS, v))
            .collect()
    }

    #[test]
    fn test_all_empty_is_none() {
        assert_eq!(compute_viewport(&[]), None);
        assert_eq!(
            compute_viewport(&[Series::historical(Vec::new()), Series::forecast(Vec::new())]),
            None
        );
    }

    #[test]
    fn test_flat_series_padding() {
        let history = Series::historical(series_at(0, &[50.0, 50.0, 50.0]));
        let forecast = Series::forecast(series_at(3 * DAY_MS, &[50.0]));
        let viewport = compute_viewport(&[history, forecast]).unwrap();

        assert!((viewport.min_y - 47.5).abs() < 1e-9);
        assert!((viewport.max_y - 52.5).abs() < 1e-9);
        assert_eq!(viewport.min_x, 0);
        assert_eq!(viewport.max_x, 3 * DAY_MS);
    }

    #[test]
    fn test_spread_padding_covers_indicators() {
        let history = Series::historical(series_at(0, &[100.0, 110.0]));
        let forecast = Series::forecast(series_at(2 * DAY_MS, &[120.0, 125.0]));
        let sma = Series::indicator("SMA 5", series_at(0, &[90.0, 105.0]));
        let viewport = compute_viewport(&[history, forecast, sma]).unwrap();

        assert!((viewport.min_y - 90.0 * 0.98).abs() < 1e-9);
        assert!((viewport.max_y - 125.0 * 1.02).abs() < 1e-9);
        assert_eq!(viewport.max_x, 3 * DAY_MS);
    }

    #[test]
    fn test_x_bounds_ignore_series_order() {
        let forecast = Series::forecast(series_at(10 * DAY_MS, &[1.0, 2.0]));
        let history = Series::historical(series_at(0, &[1.0, 2.0]));
        let viewport = compute_viewport(&[forecast, Series::historical(Vec::new()), history]).unwrap();
        assert_eq!(viewport.min_x, 0);
        assert_eq!(viewport.max_x, 11 * DAY_MS);
    }

    #[test]
    fn test_padding_keeps_order_for_negatives_and_zero() {
        let (low, high) = pad_values(-100.0, -99.0);
        assert!(low < -100.0 && high > -99.0 && low < high);

        assert_eq!(pad_values(0.0, 0.0), (-1.0, 1.0));

        let (low, high) = pad_values(-20.0, -20.0);
        assert_eq!((low, high), (-21.0, -19.0));
    }

    #[test]
    fn test_padding_saturates_near_float_limit() {
        let (low, high) = pad_values(f64::MAX, f64::MAX);
        assert!(low.is_finite() && high.is_finite());
        assert!(low < high);
        assert_eq!(high, f64::MAX);

        let (low, high) = pad_values(-f64::MAX, f64::MAX / 2.0);
        assert_eq!(low, -f64::MAX);
        assert!(high.is_finite());

        let history = Series::historical(series_at(0, &[f64::MAX, f64::MAX]));
        let viewport = compute_viewport(&[history]).unwrap();
        assert!(viewport.max_y.is_finite());
        assert!(crate::generate_ticks(viewport.min_y, viewport.max_y, 4).len() > 1);
    }

    #[test]
    fn test_non_finite_values_are_skipped() {
        let history = Series::historical(series_at(0, &[f64::NAN, 10.0, 20.0]));
        let viewport = compute_viewport(&[history]).unwrap();
        assert!(viewport.min_y.is_finite() && viewport.max_y.is_finite());
        assert_eq!(viewport.min_x, 0);

        let all_nan = Series::historical(series_at(0, &[f64::NAN]));
        assert_eq!(compute_viewport(&[all_nan]), None);
    }
}
