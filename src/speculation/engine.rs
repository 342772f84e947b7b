//! Weighted multi-factor recommendation pipeline.
//!
//! Every call is a single stateless transformation: validate, compute
//! component scores, blend by weight, tier the verdict, and assemble
//! the structured analysis payload.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::SpeculationConfig;
use crate::error::EngineError;
use crate::market::models::{ListingDetails, MarketSnapshot, Trend};
use crate::scoring::{round2, value_score, Flag, LOW_SAMPLE_THRESHOLD};
use crate::speculation::{
    AnalysisContext, ConfidenceRiskModel, FlatTrendModel, Recommendation, RiskModel, RiskTolerance,
    TrendModel,
};

/// Version tag stamped into every result while the trend/risk models
/// remain placeholders.
pub const ENGINE_VERSION: &str = "1.0.0-stub";
pub const ANALYSIS_TYPE: &str = "comprehensive";

/// Full structured analysis payload returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub score_id: String,
    pub listing_id: String,
    /// Weighted blend of the component scores, in `[0, 100]`.
    pub overall_score: Decimal,
    pub confidence: Decimal,
    pub recommendation: Recommendation,
    pub components: ComponentScores,
    pub flags: Vec<Flag>,
    pub analysis: AnalysisReport,
    pub metadata: ScoreMetadata,
}

/// Individual factor scores, each in `[0, 100]` at two decimals.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentScores {
    pub value_score: Decimal,
    pub trend_score: Decimal,
    pub risk_score: Decimal,
    pub liquidity_score: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub current_value: Decimal,
    pub projected_value: Decimal,
    pub time_to_realization: String,
    pub risk_factors: Vec<String>,
    pub opportunities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMetadata {
    pub computed_at: DateTime<Utc>,
    pub engine_version: String,
    pub analysis_type: String,
}

/// Multi-factor scorer with pluggable trend and risk models.
pub struct SpeculationEngine {
    config: SpeculationConfig,
    trend_model: Box<dyn TrendModel>,
    risk_model: Box<dyn RiskModel>,
}

impl Default for SpeculationEngine {
    fn default() -> Self {
        Self::new(SpeculationConfig::default())
    }
}

impl SpeculationEngine {
    /// Engine with the placeholder trend and risk models.
    pub fn new(config: SpeculationConfig) -> Self {
        Self::with_models(
            config,
            Box::new(FlatTrendModel),
            Box::new(ConfidenceRiskModel),
        )
    }

    pub fn with_models(
        config: SpeculationConfig,
        trend_model: Box<dyn TrendModel>,
        risk_model: Box<dyn RiskModel>,
    ) -> Self {
        Self {
            config,
            trend_model,
            risk_model,
        }
    }

    /// Analyze a listing against a market snapshot, evaluated against
    /// the current clock.
    pub fn recommend(
        &self,
        listing: &ListingDetails,
        market: &MarketSnapshot,
        context: &AnalysisContext,
    ) -> Result<RecommendationResult, EngineError> {
        self.recommend_at(listing, market, context, Utc::now())
    }

    /// Clock-injected form of [`Self::recommend`] for reproducible
    /// results.
    pub fn recommend_at(
        &self,
        listing: &ListingDetails,
        market: &MarketSnapshot,
        context: &AnalysisContext,
        now: DateTime<Utc>,
    ) -> Result<RecommendationResult, EngineError> {
        if listing.price < Decimal::ZERO {
            return Err(EngineError::NegativeAmount {
                field: "listing price",
            });
        }
        if listing.shipping_cost < Decimal::ZERO {
            return Err(EngineError::NegativeAmount {
                field: "shipping cost",
            });
        }
        if market.median_price <= Decimal::ZERO {
            return Err(EngineError::NonPositiveMedian);
        }

        let total_price = listing.total();
        let discount_pct = value_score(total_price, market.median_price);

        let value = discount_pct;
        let trend = clamp_score(self.trend_model.trend_score(market, context));
        let risk = clamp_score(self.risk_model.risk_score(market, context));
        let liquidity = liquidity_score(market.sample_count);

        let overall = round2(
            value * self.config.value_weight
                + trend * self.config.trend_weight
                + risk * self.config.risk_weight
                + liquidity * self.config.liquidity_weight,
        );

        let mut recommendation = recommendation_tier(overall);
        if context.risk_tolerance == RiskTolerance::Conservative
            && overall < self.config.conservative_cutoff
        {
            recommendation = recommendation.downgrade();
        }

        let flags = self.build_flags(total_price, discount_pct, market);

        let projected_value = round2(
            market.median_price * (Decimal::ONE + (trend - dec!(50)) / dec!(100)),
        );

        info!(
            listing_id = %listing.listing_id,
            overall = %overall,
            recommendation = %recommendation,
            "speculative analysis complete"
        );

        Ok(RecommendationResult {
            score_id: format!("spec-{}-{}", listing.listing_id, now.timestamp_millis()),
            listing_id: listing.listing_id.clone(),
            overall_score: overall,
            confidence: market.confidence,
            recommendation,
            components: ComponentScores {
                value_score: round2(value),
                trend_score: round2(trend),
                risk_score: round2(risk),
                liquidity_score: round2(liquidity),
            },
            flags,
            analysis: AnalysisReport {
                current_value: market.median_price,
                projected_value,
                time_to_realization: context.timeframe.horizon().to_string(),
                risk_factors: self.risk_model.risk_factors(market, context),
                opportunities: self.trend_model.opportunities(market, context),
            },
            metadata: ScoreMetadata {
                computed_at: now,
                engine_version: ENGINE_VERSION.to_string(),
                analysis_type: ANALYSIS_TYPE.to_string(),
            },
        })
    }

    /// At most one value-tier flag, then the data-quality and trend
    /// markers.
    fn build_flags(
        &self,
        total_price: Decimal,
        discount_pct: Decimal,
        market: &MarketSnapshot,
    ) -> Vec<Flag> {
        let mut flags = Vec::new();
        if discount_pct > self.config.excellent_value_pct {
            flags.push(Flag::ExcellentValue);
        } else if discount_pct > self.config.good_value_pct {
            flags.push(Flag::GoodValue);
        } else if discount_pct > self.config.fair_value_pct {
            flags.push(Flag::FairValue);
        } else if total_price > market.median_price {
            flags.push(Flag::AboveMarket);
        }
        if market.sample_count < LOW_SAMPLE_THRESHOLD {
            flags.push(Flag::LowSampleSize);
        }
        if market.confidence < self.config.low_confidence_threshold {
            flags.push(Flag::LowConfidence);
        }
        match market.trend {
            Some(Trend::Rising) => flags.push(Flag::RisingTrend),
            Some(Trend::Falling) => flags.push(Flag::FallingTrend),
            Some(Trend::Stable) | None => {}
        }
        flags
    }
}

fn recommendation_tier(overall: Decimal) -> Recommendation {
    if overall >= dec!(80) {
        Recommendation::StrongBuy
    } else if overall >= dec!(60) {
        Recommendation::Buy
    } else if overall >= dec!(40) {
        Recommendation::Hold
    } else if overall >= dec!(20) {
        Recommendation::Pass
    } else {
        Recommendation::Avoid
    }
}

fn clamp_score(score: Decimal) -> Decimal {
    score.clamp(Decimal::ZERO, dec!(100))
}

/// Thin markets are illiquid: ten points per observed sale, capped.
fn liquidity_score(sample_count: usize) -> Decimal {
    (Decimal::from(sample_count as u64) * dec!(10)).min(dec!(100))
}
