//! Shared scoring primitives and flag vocabulary.
//!
//! Both the basic deal scorer and the speculation engine measure a
//! listing against the market median; the common price-vs-market
//! computation lives here so the two stay in lockstep.

pub mod deal;

pub use deal::{score_listing, DealScore};

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Sample sizes below this are treated as thin data everywhere.
pub const LOW_SAMPLE_THRESHOLD: usize = 5;

/// How favorable `total_price` is against the market median, as a
/// percentage discount clamped to `[0, 100]`.
///
/// `100 × (1 − total/median)` and the raw discount percentage
/// `(median − total)/median × 100` coincide once floored at zero, so
/// one primitive serves both scorers.
pub fn value_score(total_price: Decimal, median: Decimal) -> Decimal {
    let raw = dec!(100) * (Decimal::ONE - total_price / median);
    raw.clamp(Decimal::ZERO, dec!(100))
}

/// Round a score to two decimal places, away from zero on midpoints.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Qualitative markers attached to scores and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Flag {
    LowConfidence,
    LowSampleSize,
    AboveMarket,
    ExcellentDeal,
    GoodDeal,
    FairDeal,
    PoorDeal,
    ExcellentValue,
    GoodValue,
    FairValue,
    RisingTrend,
    FallingTrend,
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LowConfidence => "LOW_CONFIDENCE",
            Self::LowSampleSize => "LOW_SAMPLE_SIZE",
            Self::AboveMarket => "ABOVE_MARKET",
            Self::ExcellentDeal => "EXCELLENT_DEAL",
            Self::GoodDeal => "GOOD_DEAL",
            Self::FairDeal => "FAIR_DEAL",
            Self::PoorDeal => "POOR_DEAL",
            Self::ExcellentValue => "EXCELLENT_VALUE",
            Self::GoodValue => "GOOD_VALUE",
            Self::FairValue => "FAIR_VALUE",
            Self::RisingTrend => "RISING_TREND",
            Self::FallingTrend => "FALLING_TREND",
        };
        write!(f, "{name}")
    }
}
