//! Leveraged price path simulation library
//!
//! This crate estimates the annual return and volatility of an instrument
//! from its daily closes, simulates forward price paths under a discrete
//! lognormal model, and compares an unleveraged position against a
//! fixed-leverage one. It supports:
//! - Seedable, reproducible Monte Carlo path generation
//! - Leveraged returns driven by the same random draws as the base position
//! - Terminal-price and realized-volatility statistics per ensemble
//! - A pluggable historical estimator and a price-series cache interface
//!
//! # Example
//!
//! ```ignore
//! use levsim_core::{SimulationParameters, compare};
//! use rand::SeedableRng;
//!
//! let params = SimulationParameters::new(100.0, 0.08, 0.20, 3.0, 5).with_path_count(5_000);
//! let mut rng = rand::rngs::SmallRng::seed_from_u64(7);
//! let run = compare(&params, &mut rng)?;
//! println!("{:.2}", run.comparison.leveraged.median_terminal_price);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod aggregate;
pub mod cache;
pub mod comparison;
pub mod error;
pub mod estimator;
pub mod simulation;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use aggregate::summarize;
pub use cache::{MemoryCache, SeriesCache, cache_key};
pub use comparison::{
    ComparisonRun, HistoricalRun, LeverageComparison, TheoreticalReturns, compare,
    compare_from_history,
};
pub use error::{Error, HistoryError, SimulationError};
pub use estimator::{LogReturnEstimator, ReturnEstimator, estimate};
pub use model::{
    MarketEstimate, PathMatrix, PriceBar, PriceSeries, SimulationParameters, SummaryStatistics,
};
pub use simulation::{SimulatedPaths, simulate, simulate_seeded};
