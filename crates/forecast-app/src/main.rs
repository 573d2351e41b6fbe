//! Forecast chart engine - command line frame builder
//!
//! Builds one chart frame from a forecast payload (or a mock one) and prints
//! the axes, viewport, bridge and a tooltip at the last historical sample.
//!
//! Usage: `forecast-app [payload.json] [--config config.json] [--json]`

mod mock;

use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use forecast_charts::{ChartDimensions, format_tick};
use forecast_core::{ForecastResponse, SeriesKind};
use forecast_state::{ChartConfig, ChartFrame, ChartInputs};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    payload: Option<PathBuf>,
    config: Option<PathBuf>,
    json: bool,
}

impl Args {
    fn parse(argv: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut args = Self::default();
        let mut argv = argv.into_iter();

        while let Some(arg) = argv.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = argv.next().ok_or("--config needs a path")?;
                    args.config = Some(PathBuf::from(path));
                }
                "--json" => args.json = true,
                flag if flag.starts_with('-') => return Err(format!("unknown flag: {}", flag)),
                path => args.payload = Some(PathBuf::from(path)),
            }
        }

        Ok(args)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => ChartConfig::load_or_default(path),
        None => ChartConfig::default(),
    };

    let response = match &args.payload {
        Some(path) => {
            tracing::info!("Loading forecast payload from {}", path.display());
            ForecastResponse::from_path(path)?
        }
        None => {
            tracing::info!("No payload given, generating mock data");
            mock::mock_response("DEMO", Utc::now())
        }
    };

    let frame = ChartFrame::build(ChartInputs::from_response(&response), &config);

    if args.json {
        print_json(&response, &frame)?;
    } else {
        print_summary(&response, &frame);
    }

    Ok(())
}

fn print_summary(response: &ForecastResponse, frame: &ChartFrame) {
    println!("{} ({} forecast)", response.ticker, response.source);
    if let Some(note) = &response.note {
        println!("  note: {}", note);
    }

    let Some(viewport) = frame.viewport else {
        println!("  no data to plot");
        return;
    };

    if let Some(stats) = frame.stats() {
        println!(
            "  latest {} ({} {:+.2}%), range {} - {}, {} points",
            format_tick(stats.latest),
            if stats.is_up() { "up" } else { "down" },
            stats.pct_change,
            format_tick(stats.range_low),
            format_tick(stats.range_high),
            stats.data_points
        );
    }

    println!(
        "  viewport y {} .. {}",
        format_tick(viewport.min_y),
        format_tick(viewport.max_y)
    );
    println!("  forecast bridge: {}", frame.bridge.label());
    if let Some((x, y)) = frame.anchor_px(&ChartDimensions::default()) {
        println!("  forecast starts at ({:.0}, {:.0}) in an 800x400 plot", x, y);
    }

    let x_labels: Vec<&str> = frame.x_axis.iter().map(|t| t.label.as_str()).collect();
    let y_labels: Vec<&str> = frame.y_axis.iter().map(|t| t.label.as_str()).collect();
    println!("  x axis: {}", x_labels.join(" | "));
    println!("  y axis: {}", y_labels.join(" | "));

    for series in frame.series() {
        println!("  {:<12} {} samples", series.label(), series.len());
    }

    if let Some(anchor) = frame.historical.last() {
        let tooltip = frame.hover(anchor.timestamp, Some(&SeriesKind::Historical));
        let entries: Vec<String> = tooltip
            .entries
            .iter()
            .map(|e| format!("{}={:.2}", e.series, e.value))
            .collect();
        println!("  tooltip @ anchor: {}", entries.join(", "));
    }
}

fn print_json(response: &ForecastResponse, frame: &ChartFrame) -> Result<(), serde_json::Error> {
    let tooltip = frame
        .historical
        .last()
        .map(|anchor| frame.hover(anchor.timestamp, Some(&SeriesKind::Historical)));

    let output = serde_json::json!({
        "ticker": response.ticker,
        "viewport": frame.viewport,
        "bridge": frame.bridge,
        "x_axis": frame.x_axis,
        "y_axis": frame.y_axis,
        "series": frame.series().collect::<Vec<_>>(),
        "tooltip": tooltip,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = Args::parse(argv(&["data.json", "--config", "chart.json", "--json"])).unwrap();
        assert_eq!(args.payload, Some(PathBuf::from("data.json")));
        assert_eq!(args.config, Some(PathBuf::from("chart.json")));
        assert!(args.json);
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(Args::parse(argv(&["--config"])).is_err());
        assert!(Args::parse(argv(&["--verbose"])).is_err());
        assert!(Args::parse(Vec::new()).unwrap().payload.is_none());
    }

    #[test]
    fn test_mock_frame() {
        let response = mock::mock_response("DEMO", Utc::now());
        let frame = ChartFrame::build(ChartInputs::from_response(&response), &ChartConfig::default());

        assert!(!frame.is_empty());
        assert_eq!(frame.historical.len(), 120);
        assert_eq!(frame.forecast.first(), frame.historical.last());
        assert_eq!(frame.indicators.len(), 2);
    }
}
