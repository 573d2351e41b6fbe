//! One render pass: aligned series, viewport, axes and lookup tables

use crate::{ChartConfig, ToleranceConfig, Tooltip, resolve_tooltip};
use forecast_charts::{
    AxisTick, Bridge, ChartDimensions, CompactTickFormatter, LinearScale, LookupStrategy,
    LookupTable, SpanTimeFormatter, TickFormatter, TimeLabelFormatter, TimeScale, align_with,
    compute_viewport, generate_ticks, generate_time_ticks,
};
use forecast_core::{ForecastResponse, Series, SeriesKind, SeriesStats, Timestamp, Viewport};

/// Raw series supplied on a data refresh
#[derive(Debug, Clone)]
pub struct ChartInputs {
    pub historical: Series,
    pub forecast: Series,
    pub indicators: Vec<Series>,
}

impl ChartInputs {
    pub fn new(historical: Series, forecast: Series) -> Self {
        Self {
            historical,
            forecast,
            indicators: Vec::new(),
        }
    }

    pub fn with_indicator(mut self, indicator: Series) -> Self {
        self.indicators.push(indicator);
        self
    }

    pub fn from_response(response: &ForecastResponse) -> Self {
        Self {
            historical: response.history_series(),
            forecast: response.forecast_series(),
            indicators: response.indicator_series(),
        }
    }
}

/// Immutable result of one render pass.
///
/// Built fresh from the latest data; a new ticker, interval or indicator
/// selection means building a new frame.
#[derive(Debug, Clone)]
pub struct ChartFrame {
    pub historical: Series,
    /// Forecast after bridging onto the historical anchor
    pub forecast: Series,
    pub indicators: Vec<Series>,
    pub bridge: Bridge,
    /// `None` when there is nothing to plot
    pub viewport: Option<Viewport>,
    pub x_axis: Vec<AxisTick<Timestamp>>,
    pub y_axis: Vec<AxisTick<f64>>,
    /// Parallel to [`ChartFrame::series`]
    tables: Vec<LookupTable>,
    tolerance: ToleranceConfig,
    lookup: LookupStrategy,
}

impl ChartFrame {
    /// Build with the default label formatters
    pub fn build(inputs: ChartInputs, config: &ChartConfig) -> Self {
        Self::build_with(inputs, config, &SpanTimeFormatter, &CompactTickFormatter)
    }

    /// Build with renderer-supplied label formatters
    pub fn build_with(
        inputs: ChartInputs,
        config: &ChartConfig,
        time_formatter: &dyn TimeLabelFormatter,
        value_formatter: &dyn TickFormatter,
    ) -> Self {
        let ChartInputs {
            historical,
            forecast,
            mut indicators,
        } = inputs;

        if indicators.len() > config.max_indicators {
            tracing::warn!(
                "{} indicator overlays supplied, keeping the first {}",
                indicators.len(),
                config.max_indicators
            );
            indicators.truncate(config.max_indicators);
        }

        let historical = limit(ordered(historical), config.history_limit);
        let forecast = ordered(forecast);
        let indicators: Vec<Series> = indicators
            .into_iter()
            .map(|s| limit(ordered(s), config.history_limit))
            .collect();

        let alignment = align_with(&historical, &forecast, config.bridge);
        let forecast = alignment.forecast;

        let mut plotted: Vec<Series> = Vec::with_capacity(2 + indicators.len());
        plotted.push(historical);
        plotted.push(forecast);
        plotted.extend(indicators);

        let viewport = compute_viewport(&plotted);

        let (x_axis, y_axis) = match &viewport {
            Some(v) => (
                time_axis(v, config.time_tick_count, time_formatter),
                value_axis(v, config.tick_count, value_formatter),
            ),
            None => (Vec::new(), Vec::new()),
        };

        let tables: Vec<LookupTable> = plotted.iter().map(LookupTable::from_series).collect();

        let mut plotted = plotted.into_iter();
        let historical = plotted.next().unwrap_or_else(|| Series::new(SeriesKind::Historical));
        let forecast = plotted.next().unwrap_or_else(|| Series::new(SeriesKind::Forecast));
        let indicators: Vec<Series> = plotted.collect();

        tracing::debug!(
            "Chart frame: {} historical, {} forecast ({}), {} indicators, {} x ticks, {} y ticks",
            historical.len(),
            forecast.len(),
            alignment.bridge.label(),
            indicators.len(),
            x_axis.len(),
            y_axis.len()
        );

        Self {
            historical,
            forecast,
            indicators,
            bridge: alignment.bridge,
            viewport,
            x_axis,
            y_axis,
            tables,
            tolerance: config.tolerance,
            lookup: config.lookup,
        }
    }

    /// Nothing to plot; render the empty state
    pub fn is_empty(&self) -> bool {
        self.viewport.is_none()
    }

    /// Plotted series in drawing order: historical, forecast, indicators
    pub fn series(&self) -> impl Iterator<Item = &Series> {
        [&self.historical, &self.forecast]
            .into_iter()
            .chain(self.indicators.iter())
    }

    pub fn table(&self, kind: &SeriesKind) -> Option<&LookupTable> {
        self.series()
            .position(|s| &s.kind == kind)
            .and_then(|i| self.tables.get(i))
    }

    /// Values of every series at `timestamp`, for tooltip composition
    pub fn hover(&self, timestamp: Timestamp, active: Option<&SeriesKind>) -> Tooltip {
        resolve_tooltip(
            self.series().zip(self.tables.iter()),
            timestamp,
            active,
            self.tolerance,
            self.lookup,
        )
    }

    /// Hover at a pointer x position in chart coordinates
    pub fn hover_at_px(
        &self,
        x_px: f64,
        dims: &ChartDimensions,
        active: Option<&SeriesKind>,
    ) -> Option<Tooltip> {
        let viewport = self.viewport.as_ref()?;
        let timestamp = TimeScale::from_viewport(viewport, dims).from_px(dims.to_inner_x(x_px));
        Some(self.hover(timestamp, active))
    }

    /// Value under a pointer y position in chart coordinates, for the
    /// crosshair's value-axis label
    pub fn value_at_px(&self, y_px: f64, dims: &ChartDimensions) -> Option<f64> {
        let viewport = self.viewport.as_ref()?;
        Some(LinearScale::from_viewport(viewport, dims).from_px(dims.to_inner_y(y_px)))
    }

    /// Plot-area position of the last historical sample, where the forecast
    /// line starts
    pub fn anchor_px(&self, dims: &ChartDimensions) -> Option<(f64, f64)> {
        let viewport = self.viewport.as_ref()?;
        let anchor = self.historical.last()?;
        let x = TimeScale::from_viewport(viewport, dims).to_px(anchor.timestamp);
        let y = LinearScale::from_viewport(viewport, dims).to_px(anchor.value);
        Some((x, y))
    }

    /// Overview metrics of the historical series
    pub fn stats(&self) -> Option<SeriesStats> {
        SeriesStats::of(&self.historical)
    }
}

fn ordered(series: Series) -> Series {
    if series.is_well_ordered() {
        return series;
    }
    tracing::warn!("{} series is out of order, normalizing", series.kind);
    series.normalized()
}

fn limit(series: Series, history_limit: usize) -> Series {
    if history_limit == 0 || series.len() <= history_limit {
        series
    } else {
        series.tail(history_limit)
    }
}

fn time_axis(
    viewport: &Viewport,
    count: usize,
    formatter: &dyn TimeLabelFormatter,
) -> Vec<AxisTick<Timestamp>> {
    let span = viewport.x_span();
    generate_time_ticks(viewport.min_x, viewport.max_x, count)
        .into_iter()
        .map(|t| AxisTick::new(t, formatter.format(t, span)))
        .collect()
}

fn value_axis(viewport: &Viewport, count: usize, formatter: &dyn TickFormatter) -> Vec<AxisTick<f64>> {
    generate_ticks(viewport.min_y, viewport.max_y, count)
        .into_iter()
        .map(|v| AxisTick::new(v, formatter.format(v)))
        .collect()
}
