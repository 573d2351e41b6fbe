//! Mock forecast payload for demo/development

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use forecast_core::{ForecastPoint, ForecastResponse, IndicatorPayload, PricePoint};

const HISTORY_DAYS: i64 = 150;
const FORECAST_DAYS: i64 = 30;

struct MockMarket {
    price: f64,
    volatility: f64,
    trend: f64,
}

impl MockMarket {
    fn new(initial_price: f64) -> Self {
        Self {
            price: initial_price,
            volatility: 0.015,
            trend: 0.0,
        }
    }

    fn tick(&mut self) -> f64 {
        let mut rng = rand::thread_rng();
        let drift = self.trend * 0.002;
        let random = (rng.r#gen::<f64>() - 0.5) * 2.0 * self.volatility;

        if rng.r#gen::<f64>() < 0.05 {
            self.trend = (rng.r#gen::<f64>() - 0.5) * 2.0;
        }

        self.price *= 1.0 + drift + random;
        self.price = self.price.max(1.0);
        self.price
    }
}

/// Random-walk history, a drifting forecast and two moving-average overlays
pub fn mock_response(ticker: &str, end: DateTime<Utc>) -> ForecastResponse {
    let mut rng = rand::thread_rng();
    let mut market = MockMarket::new(rng.gen_range(20.0..400.0));

    let start = end - Duration::days(HISTORY_DAYS - 1);
    let history: Vec<PricePoint> = (0..HISTORY_DAYS)
        .map(|day| PricePoint {
            date: start + Duration::days(day),
            close: market.tick(),
        })
        .collect();

    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();
    let last = closes.last().copied().unwrap_or(market.price);
    let daily_drift: f64 = rng.gen_range(-0.004..0.006);

    let forecast: Vec<ForecastPoint> = (1..=FORECAST_DAYS)
        .map(|day| ForecastPoint {
            date: end + Duration::days(day),
            value: last * (1.0 + daily_drift).powi(day as i32),
        })
        .collect();

    let indicators = vec![
        overlay("SMA 20", &history, &simple_average(&closes, 20)),
        overlay("EMA 50", &history, &exponential_average(&closes, 50)),
    ];

    ForecastResponse {
        ticker: ticker.to_string(),
        source: "mock".to_string(),
        forecast,
        history,
        note: Some("Generated locally".to_string()),
        indicators,
    }
}

fn overlay(name: &str, history: &[PricePoint], values: &[Option<f64>]) -> IndicatorPayload {
    IndicatorPayload {
        name: name.to_string(),
        points: history
            .iter()
            .zip(values)
            .filter_map(|(point, value)| {
                value.map(|value| ForecastPoint {
                    date: point.date,
                    value,
                })
            })
            .collect(),
    }
}

fn simple_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    (0..closes.len())
        .map(|i| {
            (i + 1 >= window).then(|| closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64)
        })
        .collect()
}

fn exponential_average(closes: &[f64], span: usize) -> Vec<Option<f64>> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut ema: Option<f64> = None;
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let next = ema.map_or(close, |prev| alpha * close + (1.0 - alpha) * prev);
            ema = Some(next);
            (i + 1 >= span).then_some(next)
        })
        .collect()
}
