//! Multi-factor speculative analysis of candidate listings.
//!
//! Blends value, trend, risk, and liquidity signals into a weighted
//! score and a discrete recommendation. Trend and risk models are
//! pluggable seams; the defaults shipped here are placeholders pending
//! real models.

pub mod engine;

pub use engine::{RecommendationResult, SpeculationEngine};

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::market::models::MarketSnapshot;

/// Holding period the caller is analyzing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Short,
    Medium,
    Long,
}

impl Timeframe {
    /// Expected time before the projected value is realized.
    pub fn horizon(self) -> &'static str {
        match self {
            Self::Short => "3-6 months",
            Self::Medium => "6-18 months",
            Self::Long => "1-3 years",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketConditions {
    Bull,
    Bear,
    Neutral,
}

/// Caller-supplied analysis parameters; not persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    pub timeframe: Timeframe,
    pub risk_tolerance: RiskTolerance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_conditions: Option<MarketConditions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub key_events: Vec<String>,
}

impl Default for AnalysisContext {
    fn default() -> Self {
        Self {
            timeframe: Timeframe::Medium,
            risk_tolerance: RiskTolerance::Moderate,
            market_conditions: None,
            key_events: Vec::new(),
        }
    }
}

/// Discrete verdict, strongest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Hold,
    Pass,
    Avoid,
}

impl Recommendation {
    /// One tier more cautious; `Avoid` is terminal.
    pub fn downgrade(self) -> Self {
        match self {
            Self::StrongBuy => Self::Buy,
            Self::Buy => Self::Hold,
            Self::Hold => Self::Pass,
            Self::Pass | Self::Avoid => Self::Avoid,
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrongBuy => write!(f, "strong_buy"),
            Self::Buy => write!(f, "buy"),
            Self::Hold => write!(f, "hold"),
            Self::Pass => write!(f, "pass"),
            Self::Avoid => write!(f, "avoid"),
        }
    }
}

/// Seam for a future market-trend model.
pub trait TrendModel: Send + Sync {
    /// 0–100 momentum score for the item's market.
    fn trend_score(&self, market: &MarketSnapshot, context: &AnalysisContext) -> Decimal;

    /// Upside narratives for the analysis payload.
    fn opportunities(&self, market: &MarketSnapshot, context: &AnalysisContext) -> Vec<String>;
}

/// Placeholder trend model: mildly positive momentum for every market.
pub struct FlatTrendModel;

impl TrendModel for FlatTrendModel {
    fn trend_score(&self, _market: &MarketSnapshot, _context: &AnalysisContext) -> Decimal {
        dec!(75)
    }

    fn opportunities(&self, _market: &MarketSnapshot, _context: &AnalysisContext) -> Vec<String> {
        vec![
            "Undervalued relative to market".to_string(),
            "Strong fundamentals".to_string(),
            "Growing collector interest".to_string(),
        ]
    }
}

/// Seam for a future risk model.
pub trait RiskModel: Send + Sync {
    /// 0–100 score; higher means less risk.
    fn risk_score(&self, market: &MarketSnapshot, context: &AnalysisContext) -> Decimal;

    /// Downside narratives for the analysis payload.
    fn risk_factors(&self, market: &MarketSnapshot, context: &AnalysisContext) -> Vec<String>;
}

/// Placeholder risk model: trusts the snapshot's own confidence.
pub struct ConfidenceRiskModel;

impl RiskModel for ConfidenceRiskModel {
    fn risk_score(&self, market: &MarketSnapshot, _context: &AnalysisContext) -> Decimal {
        market.confidence * dec!(100)
    }

    fn risk_factors(&self, _market: &MarketSnapshot, _context: &AnalysisContext) -> Vec<String> {
        vec![
            "Market volatility".to_string(),
            "Grade authentication risk".to_string(),
            "Liquidity constraints".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_context_is_medium_moderate() {
        let context = AnalysisContext::default();
        assert_eq!(context.timeframe, Timeframe::Medium);
        assert_eq!(context.risk_tolerance, RiskTolerance::Moderate);
        assert!(context.market_conditions.is_none());
        assert!(context.key_events.is_empty());
    }

    #[test]
    fn timeframe_horizons() {
        assert_eq!(Timeframe::Short.horizon(), "3-6 months");
        assert_eq!(Timeframe::Medium.horizon(), "6-18 months");
        assert_eq!(Timeframe::Long.horizon(), "1-3 years");
    }

    #[test]
    fn downgrade_walks_one_tier_and_stops_at_avoid() {
        assert_eq!(Recommendation::StrongBuy.downgrade(), Recommendation::Buy);
        assert_eq!(Recommendation::Buy.downgrade(), Recommendation::Hold);
        assert_eq!(Recommendation::Hold.downgrade(), Recommendation::Pass);
        assert_eq!(Recommendation::Pass.downgrade(), Recommendation::Avoid);
        assert_eq!(Recommendation::Avoid.downgrade(), Recommendation::Avoid);
    }

    #[test]
    fn recommendation_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Recommendation::StrongBuy).unwrap(),
            "\"strong_buy\""
        );
        assert_eq!(Recommendation::StrongBuy.to_string(), "strong_buy");
    }
}
