//! Typed failures for the valuation and scoring pipelines.

use thiserror::Error;

/// Structural contract violations surfaced to callers.
///
/// Messages are stable so the handler layer can map user-input errors
/// (400-style) separately from data-unavailability errors (404-style).
/// Malformed individual sale records are not errors; the aggregator
/// drops them and only fails when nothing usable remains.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Aggregation was invoked with an empty sales history.
    #[error("sales history cannot be empty")]
    EmptySales,

    /// The lookback window is zero days wide.
    #[error("window days must be greater than zero")]
    InvalidWindow,

    /// Every sale was dropped by the window/amount filter.
    #[error("no valid sales found within the specified time window")]
    NoValidSales,

    /// A monetary field that must be non-negative was negative.
    #[error("{field} must be non-negative")]
    NegativeAmount { field: &'static str },

    /// The market median used as a score baseline must be positive.
    #[error("market median price must be positive")]
    NonPositiveMedian,
}
