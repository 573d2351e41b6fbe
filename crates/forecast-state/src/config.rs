//! Chart configuration loaded from JSON

use crate::{HISTORY_LIMIT, MAX_INDICATORS};
use forecast_charts::{
    BridgePolicy, CROSS_SERIES_TOLERANCE_MS, DEFAULT_TICK_COUNT, LookupStrategy,
    SAME_SERIES_TOLERANCE_MS,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Hover matching windows in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToleranceConfig {
    /// Matching other series against the hovered timestamp
    pub cross_series_ms: i64,
    /// Matching within the series under the pointer
    pub same_series_ms: i64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            cross_series_ms: CROSS_SERIES_TOLERANCE_MS,
            same_series_ms: SAME_SERIES_TOLERANCE_MS,
        }
    }
}

/// Per-chart settings. Missing keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Value-axis tick count
    pub tick_count: usize,
    /// Time-axis tick count
    pub time_tick_count: usize,
    /// Most recent samples kept per historical/indicator series (0 keeps all)
    pub history_limit: usize,
    /// Indicator overlays drawn at once
    pub max_indicators: usize,
    pub bridge: BridgePolicy,
    pub tolerance: ToleranceConfig,
    pub lookup: LookupStrategy,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            tick_count: DEFAULT_TICK_COUNT,
            time_tick_count: DEFAULT_TICK_COUNT,
            history_limit: HISTORY_LIMIT,
            max_indicators: MAX_INDICATORS,
            bridge: BridgePolicy::default(),
            tolerance: ToleranceConfig::default(),
            lookup: LookupStrategy::default(),
        }
    }
}

impl ChartConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load from `path`, falling back to defaults when the file is missing or
    /// invalid.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(config) => {
                tracing::info!("Loaded chart config from {}", path.display());
                config
            }
            Err(ConfigError::Read(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No chart config at {}, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                tracing::warn!("Ignoring chart config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChartConfig::default();
        assert_eq!(config.tick_count, 4);
        assert_eq!(config.history_limit, 120);
        assert_eq!(config.max_indicators, 4);
        assert_eq!(config.tolerance.cross_series_ms, 604_800_000);
        assert_eq!(config.tolerance.same_series_ms, 60_000);
        assert_eq!(config.bridge, BridgePolicy::Fixed { threshold_ms: 43_200_000 });
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ChartConfig::from_json(
            r#"{
                "tick_count": 6,
                "lookup": "indexed",
                "bridge": {"mode": "adaptive", "floor_ms": 43200000, "factor": 1.5},
                "tolerance": {"same_series_ms": 1000}
            }"#,
        )
        .unwrap();

        assert_eq!(config.tick_count, 6);
        assert_eq!(config.time_tick_count, 4);
        assert_eq!(config.lookup, LookupStrategy::Indexed);
        assert_eq!(config.bridge, BridgePolicy::adaptive());
        assert_eq!(config.tolerance.same_series_ms, 1000);
        assert_eq!(config.tolerance.cross_series_ms, CROSS_SERIES_TOLERANCE_MS);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ChartConfig::from_json("{\"tick_count\": \"many\"}"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("forecast-config-{}.json", std::process::id()));
        let config = ChartConfig {
            history_limit: 60,
            ..ChartConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(ChartConfig::load(&path).unwrap(), config);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ChartConfig::load_or_default("/nonexistent/forecast/config.json");
        assert_eq!(config, ChartConfig::default());
    }
}
