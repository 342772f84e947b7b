//! Pure computation core for collectible deal scouting.
//!
//! Turns historical sale observations into a statistical market value,
//! scores candidate listings against it, and produces multi-factor
//! buy/hold/avoid recommendations. The crate performs no I/O: callers
//! fetch the inputs and persist or render the outputs.

pub mod config;
pub mod error;
pub mod market;
pub mod scoring;
pub mod speculation;
pub mod telemetry;
pub mod valuation;

pub use config::EngineConfig;
pub use error::EngineError;
