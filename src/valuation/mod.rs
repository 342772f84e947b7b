pub mod aggregate;

pub use aggregate::{aggregate, aggregate_at, tiered_values};
