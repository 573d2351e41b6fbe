//! Backend payload shapes (history, forecast, indicator overlays)
//!
//! The analytics service serializes dates either as RFC 3339 strings or as
//! naive ISO datetimes without an offset. Naive values are taken as UTC.

use crate::{Sample, Series, SeriesKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;

/// Payload decoding errors
#[derive(Error, Debug)]
pub enum PayloadError {
    #[error("Failed to read payload file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Historical close price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    pub close: f64,
}

impl From<&PricePoint> for Sample {
    fn from(point: &PricePoint) -> Self {
        Sample::new(point.date.timestamp_millis(), point.close)
    }
}

/// Predicted (or indicator) value at a date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    pub value: f64,
}

impl From<&ForecastPoint> for Sample {
    fn from(point: &ForecastPoint) -> Self {
        Sample::new(point.date.timestamp_millis(), point.value)
    }
}

/// Named, pre-computed indicator overlay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorPayload {
    pub name: String,
    pub points: Vec<ForecastPoint>,
}

impl IndicatorPayload {
    pub fn to_series(&self) -> Series {
        Series::with_samples(
            SeriesKind::indicator(self.name.clone()),
            self.points.iter().map(Sample::from).collect(),
        )
    }
}

/// Forecast endpoint response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub ticker: String,
    /// Model that produced the forecast (`linear`, `lstm`, ...)
    pub source: String,
    pub forecast: Vec<ForecastPoint>,
    pub history: Vec<PricePoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub indicators: Vec<IndicatorPayload>,
}

impl ForecastResponse {
    pub fn from_json(json: &str) -> Result<Self, PayloadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PayloadError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn history_series(&self) -> Series {
        Series::historical(self.history.iter().map(Sample::from).collect())
    }

    pub fn forecast_series(&self) -> Series {
        Series::forecast(self.forecast.iter().map(Sample::from).collect())
    }

    pub fn indicator_series(&self) -> Vec<Series> {
        self.indicators.iter().map(IndicatorPayload::to_series).collect()
    }
}

/// Parse an RFC 3339, naive ISO datetime or plain ISO date string as UTC
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw)))
}
