use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Tunable parameters for the aggregation and speculation pipelines.
///
/// Every field has a sensible default, so hosts can embed the engine
/// with `EngineConfig::default()` or overlay a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub aggregation: AggregationConfig,
    pub speculation: SpeculationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AggregationConfig {
    /// Lookback window for sales, in days.
    pub window_days: u32,
    /// Fraction trimmed from each end of the sorted totals.
    pub trim_fraction: Decimal,
    /// Minimum pre-trim sample count before trimming activates.
    pub min_trim_samples: usize,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            trim_fraction: dec!(0.1),
            min_trim_samples: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpeculationConfig {
    pub value_weight: Decimal,
    pub trend_weight: Decimal,
    pub risk_weight: Decimal,
    pub liquidity_weight: Decimal,
    /// Discount thresholds (percent) for the value-tier flags.
    pub excellent_value_pct: Decimal,
    pub good_value_pct: Decimal,
    pub fair_value_pct: Decimal,
    /// Snapshot confidence below this raises LOW_CONFIDENCE.
    pub low_confidence_threshold: Decimal,
    /// Conservative callers drop one tier below this overall score.
    pub conservative_cutoff: Decimal,
}

impl Default for SpeculationConfig {
    fn default() -> Self {
        Self {
            value_weight: dec!(0.4),
            trend_weight: dec!(0.3),
            risk_weight: dec!(0.2),
            liquidity_weight: dec!(0.1),
            excellent_value_pct: dec!(30),
            good_value_pct: dec!(15),
            fair_value_pct: dec!(5),
            low_confidence_threshold: dec!(0.7),
            conservative_cutoff: dec!(70),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Failed to parse engine config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let contents = std::fs::read_to_string("config/default.toml")
            .expect("config/default.toml should exist");
        let config: EngineConfig = toml::from_str(&contents).expect("should parse");
        assert_eq!(config.aggregation.window_days, 30);
        assert_eq!(config.aggregation.trim_fraction, dec!(0.1));
        assert_eq!(config.speculation.value_weight, dec!(0.4));
        assert_eq!(config.speculation.conservative_cutoff, dec!(70));
    }

    #[test]
    fn test_defaults_match_shipped_config() {
        let config = EngineConfig::default();
        assert_eq!(config.aggregation.min_trim_samples, 10);
        assert_eq!(config.speculation.low_confidence_threshold, dec!(0.7));
    }

    #[test]
    fn test_partial_config_falls_back_to_defaults() {
        let config = EngineConfig::from_toml_str(
            r#"
            [aggregation]
            window_days = 90
            "#,
        )
        .unwrap();
        assert_eq!(config.aggregation.window_days, 90);
        assert_eq!(config.aggregation.trim_fraction, dec!(0.1));
        assert_eq!(config.speculation.trend_weight, dec!(0.3));
    }
}
