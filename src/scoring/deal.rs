//! Baseline price-versus-market deal scoring.
//!
//! Scores a candidate listing against an aggregated market value and
//! attaches data-quality and deal-tier flags for display.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EngineError;
use crate::market::models::{Listing, MarketValueSummary};
use crate::scoring::{round2, value_score, Flag, LOW_SAMPLE_THRESHOLD};

/// At or above these scores a listing rates excellent/good.
const EXCELLENT_DEAL_MIN: Decimal = dec!(50);
const GOOD_DEAL_MIN: Decimal = dec!(25);

/// Normalized favorability of one listing relative to market value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DealScore {
    /// 0–100 score, two decimal places.
    pub score: Decimal,
    pub low_data: bool,
    pub price_above_market: bool,
    pub flags: Vec<Flag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Score a listing against a market value summary.
///
/// `score = clamp(100 × (1 − total/median), 0, 100)`, rounded to two
/// decimals. Emits every applicable data-quality flag plus exactly one
/// deal-tier flag.
pub fn score_listing(
    listing: &Listing,
    market: &MarketValueSummary,
) -> Result<DealScore, EngineError> {
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
    if market.median <= Decimal::ZERO {
        return Err(EngineError::NonPositiveMedian);
    }

    let total_price = listing.total();
    let score = round2(value_score(total_price, market.median));

    let low_sample = market.sample_count < LOW_SAMPLE_THRESHOLD;
    let low_data = market.low_confidence || low_sample;
    let price_above_market = total_price > market.median;

    let mut flags = Vec::new();
    let mut notes = Vec::new();

    if market.low_confidence {
        flags.push(Flag::LowConfidence);
        notes.push("Market data has low confidence".to_string());
    }
    if low_sample {
        flags.push(Flag::LowSampleSize);
        notes.push(format!("Small sample size: {} items", market.sample_count));
    }
    if price_above_market {
        flags.push(Flag::AboveMarket);
        notes.push("Price exceeds market median".to_string());
    }
    flags.push(deal_tier(score));

    debug!(%score, low_data, price_above_market, "deal scored");

    Ok(DealScore {
        score,
        low_data,
        price_above_market,
        flags,
        notes: if notes.is_empty() {
            None
        } else {
            Some(notes.join("; "))
        },
    })
}

/// Exactly one tier flag per score.
fn deal_tier(score: Decimal) -> Flag {
    if score >= EXCELLENT_DEAL_MIN {
        Flag::ExcellentDeal
    } else if score >= GOOD_DEAL_MIN {
        Flag::GoodDeal
    } else if score > Decimal::ZERO {
        Flag::FairDeal
    } else {
        Flag::PoorDeal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(price: Decimal, shipping_cost: Decimal) -> Listing {
        Listing {
            price,
            shipping_cost,
        }
    }

    fn market(median: Decimal, sample_count: usize, low_confidence: bool) -> MarketValueSummary {
        MarketValueSummary {
            median,
            mean: median,
            std_dev: Decimal::ZERO,
            min: median,
            max: median,
            sample_count,
            last_updated: Utc::now(),
            low_confidence,
        }
    }

    #[test]
    fn score_formula_basic() {
        // 110 total vs 200 median → 45% below market
        let result = score_listing(&listing(dec!(100), dec!(10)), &market(dec!(200), 10, false))
            .unwrap();
        assert_eq!(result.score, dec!(45));
        assert!(!result.low_data);
        assert!(!result.price_above_market);
        assert_eq!(result.flags, vec![Flag::GoodDeal]);
        assert!(result.notes.is_none());
    }

    #[test]
    fn free_listing_scores_one_hundred() {
        let result =
            score_listing(&listing(dec!(0), dec!(0)), &market(dec!(200), 10, false)).unwrap();
        assert_eq!(result.score, dec!(100));
        assert_eq!(result.flags, vec![Flag::ExcellentDeal]);
    }

    #[test]
    fn above_market_clamps_to_zero() {
        let result = score_listing(&listing(dec!(180), dec!(30)), &market(dec!(200), 10, false))
            .unwrap();
        assert_eq!(result.score, Decimal::ZERO);
        assert!(result.price_above_market);
        assert_eq!(result.flags, vec![Flag::AboveMarket, Flag::PoorDeal]);
        assert_eq!(result.notes.as_deref(), Some("Price exceeds market median"));
    }

    #[test]
    fn exactly_at_market_is_not_above() {
        let result = score_listing(&listing(dec!(190), dec!(10)), &market(dec!(200), 10, false))
            .unwrap();
        assert_eq!(result.score, Decimal::ZERO);
        assert!(!result.price_above_market);
        assert_eq!(result.flags, vec![Flag::PoorDeal]);
    }

    #[test]
    fn score_rounds_to_two_decimals() {
        // 100 vs 300 → 66.666…%
        let result =
            score_listing(&listing(dec!(100), dec!(0)), &market(dec!(300), 10, false)).unwrap();
        assert_eq!(result.score, dec!(66.67));
    }

    #[test]
    fn low_data_from_sample_size() {
        let result =
            score_listing(&listing(dec!(50), dec!(0)), &market(dec!(200), 3, false)).unwrap();
        assert!(result.low_data);
        assert!(result.flags.contains(&Flag::LowSampleSize));
        assert_eq!(result.notes.as_deref(), Some("Small sample size: 3 items"));
    }

    #[test]
    fn low_data_from_confidence_flag() {
        let result =
            score_listing(&listing(dec!(50), dec!(0)), &market(dec!(200), 10, true)).unwrap();
        assert!(result.low_data);
        assert!(result.flags.contains(&Flag::LowConfidence));
        assert!(!result.flags.contains(&Flag::LowSampleSize));
    }

    #[test]
    fn all_notes_join_with_semicolons() {
        let result =
            score_listing(&listing(dec!(250), dec!(0)), &market(dec!(200), 2, true)).unwrap();
        assert_eq!(
            result.notes.as_deref(),
            Some(
                "Market data has low confidence; Small sample size: 2 items; \
                 Price exceeds market median"
            )
        );
        assert_eq!(
            result.flags,
            vec![
                Flag::LowConfidence,
                Flag::LowSampleSize,
                Flag::AboveMarket,
                Flag::PoorDeal
            ]
        );
    }

    #[test]
    fn deal_tier_boundaries() {
        assert_eq!(deal_tier(dec!(50)), Flag::ExcellentDeal);
        assert_eq!(deal_tier(dec!(49.99)), Flag::GoodDeal);
        assert_eq!(deal_tier(dec!(25)), Flag::GoodDeal);
        assert_eq!(deal_tier(dec!(24.99)), Flag::FairDeal);
        assert_eq!(deal_tier(dec!(0.01)), Flag::FairDeal);
        assert_eq!(deal_tier(Decimal::ZERO), Flag::PoorDeal);
    }

    #[test]
    fn negative_price_rejected() {
        let err = score_listing(&listing(dec!(-1), dec!(0)), &market(dec!(200), 10, false))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::NegativeAmount {
                field: "listing price"
            }
        );
    }

    #[test]
    fn negative_shipping_rejected() {
        let err = score_listing(&listing(dec!(10), dec!(-2)), &market(dec!(200), 10, false))
            .unwrap_err();
        assert_eq!(
            err,
            EngineError::NegativeAmount {
                field: "shipping cost"
            }
        );
    }

    #[test]
    fn non_positive_median_rejected() {
        let err =
            score_listing(&listing(dec!(10), dec!(0)), &market(dec!(0), 10, false)).unwrap_err();
        assert_eq!(err, EngineError::NonPositiveMedian);
        assert_eq!(err.to_string(), "market median price must be positive");
    }
}
