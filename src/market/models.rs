use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One historical transaction for an item, externally sourced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Decimal>,
    pub date: DateTime<Utc>,
}

impl Sale {
    /// All-in cost of the transaction.
    pub fn total(&self) -> Decimal {
        self.price + self.shipping.unwrap_or_default()
    }
}

/// Statistical fair-value estimate computed from a window of sales.
///
/// Derived and recomputed on demand; never persisted by this crate.
/// `sample_count` is the post-filter, pre-trim count, and
/// `low_confidence` is always `sample_count < LOW_SAMPLE_THRESHOLD`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketValueSummary {
    pub median: Decimal,
    pub mean: Decimal,
    pub std_dev: Decimal,
    pub min: Decimal,
    pub max: Decimal,
    pub sample_count: usize,
    pub last_updated: DateTime<Utc>,
    pub low_confidence: bool,
}

/// A single candidate purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub price: Decimal,
    pub shipping_cost: Decimal,
}

impl Listing {
    pub fn total(&self) -> Decimal {
        self.price + self.shipping_cost
    }
}

/// Identified candidate listing with the display fields the handler
/// layer carries alongside the raw prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    pub listing_id: String,
    pub item_id: String,
    pub grade_id: String,
    pub price: Decimal,
    pub shipping_cost: Decimal,
    pub title: String,
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ListingDetails {
    pub fn total(&self) -> Decimal {
        self.price + self.shipping_cost
    }
}

/// Direction of recent price movement for an item's market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Rising,
    Falling,
    Stable,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rising => write!(f, "rising"),
            Self::Falling => write!(f, "falling"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

/// Richer market-data form consumed by the speculation engine.
///
/// Assembled by the caller from a [`MarketValueSummary`] plus whatever
/// trend/volatility signals its price-guide sources provide.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub market_value_id: String,
    pub item_id: String,
    pub grade_id: String,
    pub median_price: Decimal,
    pub mean_price: Decimal,
    pub sample_count: usize,
    pub price_range: PriceRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volatility: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    /// Source confidence in `[0, 1]`.
    pub confidence: Decimal,
    pub window_days: u32,
    pub last_updated: DateTime<Utc>,
}

/// Conservative / central / premium price band derived from a median.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TieredValue {
    pub low: Decimal,
    pub medium: Decimal,
    pub high: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn sale_total_defaults_missing_shipping_to_zero() {
        let with = Sale {
            price: dec!(100),
            shipping: Some(dec!(10)),
            date: Utc::now(),
        };
        let without = Sale {
            price: dec!(100),
            shipping: None,
            date: Utc::now(),
        };
        assert_eq!(with.total(), dec!(110));
        assert_eq!(without.total(), dec!(100));
    }

    #[test]
    fn listing_total_includes_shipping() {
        let listing = Listing {
            price: dec!(80),
            shipping_cost: dec!(4.50),
        };
        assert_eq!(listing.total(), dec!(84.50));
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Rising).unwrap(), "\"rising\"");
        assert_eq!(Trend::Falling.to_string(), "falling");
    }
}
