//! Market value aggregation from historical sale records.
//!
//! Filters sales to a lookback window, trims outliers from both ends,
//! and produces summary statistics with a confidence indicator.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use tracing::debug;

use crate::config::AggregationConfig;
use crate::error::EngineError;
use crate::market::models::{MarketValueSummary, Sale, TieredValue};
use crate::scoring::LOW_SAMPLE_THRESHOLD;

const LOW_TIER_MULTIPLIER: Decimal = dec!(0.75);
const HIGH_TIER_MULTIPLIER: Decimal = dec!(1.25);

/// Aggregate a sales history into a market value summary, evaluated
/// against the current clock.
pub fn aggregate(
    sales: &[Sale],
    config: &AggregationConfig,
) -> Result<MarketValueSummary, EngineError> {
    aggregate_at(sales, config, Utc::now())
}

/// Clock-injected form of [`aggregate`] for reproducible results.
///
/// Sales with a negative price or shipping amount, or dated outside
/// `[now − window, now]`, are dropped rather than failing the whole
/// aggregation; the call errors only when nothing usable remains.
pub fn aggregate_at(
    sales: &[Sale],
    config: &AggregationConfig,
    now: DateTime<Utc>,
) -> Result<MarketValueSummary, EngineError> {
    if sales.is_empty() {
        return Err(EngineError::EmptySales);
    }
    if config.window_days == 0 {
        return Err(EngineError::InvalidWindow);
    }

    let cutoff = now - Duration::days(i64::from(config.window_days));
    let mut totals: Vec<Decimal> = sales
        .iter()
        .filter(|sale| is_usable(sale, cutoff, now))
        .map(Sale::total)
        .collect();

    if totals.is_empty() {
        return Err(EngineError::NoValidSales);
    }

    let dropped = sales.len() - totals.len();
    if dropped > 0 {
        debug!(dropped, kept = totals.len(), "dropped unusable sales");
    }

    totals.sort_unstable();
    let sample_count = totals.len();
    let trimmed = trim_outliers(&totals, config);

    let mean = mean_of(trimmed);

    Ok(MarketValueSummary {
        median: median_of(trimmed),
        mean,
        std_dev: sample_std_dev(trimmed, mean),
        min: trimmed[0],
        max: trimmed[trimmed.len() - 1],
        sample_count,
        last_updated: now,
        low_confidence: sample_count < LOW_SAMPLE_THRESHOLD,
    })
}

/// Conservative / central / premium price band callers persist
/// alongside the summary.
pub fn tiered_values(median: Decimal) -> TieredValue {
    TieredValue {
        low: median * LOW_TIER_MULTIPLIER,
        medium: median,
        high: median * HIGH_TIER_MULTIPLIER,
    }
}

fn is_usable(sale: &Sale, cutoff: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    sale.price >= Decimal::ZERO
        && sale.shipping.unwrap_or_default() >= Decimal::ZERO
        && sale.date >= cutoff
        && sale.date <= now
}

/// Drop the cheapest and dearest ~`trim_fraction` of sorted totals.
///
/// Trimming only activates once the window holds `min_trim_samples`
/// observations; below that the extremes still carry real signal and
/// removing them would collapse the spread statistics.
fn trim_outliers<'a>(sorted: &'a [Decimal], config: &AggregationConfig) -> &'a [Decimal] {
    let n = sorted.len();
    if n < config.min_trim_samples {
        return sorted;
    }
    let trim_count = (Decimal::from(n as u64) * config.trim_fraction)
        .floor()
        .to_usize()
        .unwrap_or(0)
        .max(1);
    if n <= 2 * trim_count {
        return sorted;
    }
    &sorted[trim_count..n - trim_count]
}

/// Median of a sorted, non-empty slice: the middle value, or the mean
/// of the middle two for even counts.
fn median_of(sorted: &[Decimal]) -> Decimal {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / dec!(2)
    } else {
        sorted[mid]
    }
}

fn mean_of(values: &[Decimal]) -> Decimal {
    let sum: Decimal = values.iter().copied().sum();
    sum / Decimal::from(values.len() as u64)
}

/// Sample standard deviation (n − 1 denominator); zero for a single
/// observation.
fn sample_std_dev(values: &[Decimal], mean: Decimal) -> Decimal {
    if values.len() <= 1 {
        return Decimal::ZERO;
    }
    let sum_sq: Decimal = values.iter().map(|v| (*v - mean) * (*v - mean)).sum();
    let variance = sum_sq / Decimal::from((values.len() - 1) as u64);
    variance.sqrt().unwrap_or(Decimal::ZERO)
}
