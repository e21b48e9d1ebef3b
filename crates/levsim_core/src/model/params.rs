//! Simulation parameters and their per-step (daily) conversion

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

use super::estimate::MarketEstimate;

/// Trading days in a year, the usual `steps_per_year`
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// Lower bound applied to every simple return before it is compounded.
/// A return of -1 or below would zero out or flip the sign of a price.
pub const RETURN_FLOOR: f64 = -0.999_999;

/// Immutable description of a single simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    pub initial_price: f64,
    /// Expected annual simple return (e.g. 0.08 for 8%)
    pub annual_drift: f64,
    pub annual_volatility: f64,
    pub leverage: f64,
    pub horizon_years: u32,
    pub steps_per_year: u32,
    pub path_count: usize,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            initial_price: 100.0,
            annual_drift: 0.0,
            annual_volatility: 0.0,
            leverage: 1.0,
            horizon_years: 1,
            steps_per_year: TRADING_DAYS_PER_YEAR,
            path_count: 1_000,
        }
    }
}

/// Per-step parameters derived from the annual drift and volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyParameters {
    pub dt: f64,
    pub sigma_daily: f64,
    /// `ln(1 + mu) * dt`, the per-step log growth rate
    pub mu_geom_daily: f64,
    /// Mean of the simple daily return, including the `sigma^2 / 2` convexity term
    pub mu_daily: f64,
}

impl SimulationParameters {
    #[must_use]
    pub fn new(
        initial_price: f64,
        annual_drift: f64,
        annual_volatility: f64,
        leverage: f64,
        horizon_years: u32,
    ) -> Self {
        Self {
            initial_price,
            annual_drift,
            annual_volatility,
            leverage,
            horizon_years,
            ..Default::default()
        }
    }

    /// Build parameters whose drift and volatility come from a historical estimate.
    #[must_use]
    pub fn from_estimate(
        estimate: &MarketEstimate,
        initial_price: f64,
        leverage: f64,
        horizon_years: u32,
    ) -> Self {
        Self::new(
            initial_price,
            estimate.annual_return,
            estimate.annual_volatility,
            leverage,
            horizon_years,
        )
    }

    #[must_use]
    pub fn with_steps_per_year(mut self, steps_per_year: u32) -> Self {
        self.steps_per_year = steps_per_year;
        self
    }

    #[must_use]
    pub fn with_path_count(mut self, path_count: usize) -> Self {
        self.path_count = path_count;
        self
    }

    /// Number of columns in each simulated path matrix
    #[must_use]
    pub fn total_steps(&self) -> usize {
        self.horizon_years as usize * self.steps_per_year as usize
    }

    #[must_use]
    pub fn daily(&self) -> DailyParameters {
        let steps = f64::from(self.steps_per_year);
        let dt = 1.0 / steps;
        let sigma_daily = self.annual_volatility / steps.sqrt();
        let mu_geom_daily = self.annual_drift.ln_1p() * dt;
        DailyParameters {
            dt,
            sigma_daily,
            mu_geom_daily,
            mu_daily: mu_geom_daily + 0.5 * sigma_daily * sigma_daily,
        }
    }

    /// Check every field before anything is allocated.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.initial_price.is_finite() || self.initial_price <= 0.0 {
            return Err(SimulationError::invalid(
                "initial_price",
                self.initial_price,
                "must be positive and finite",
            ));
        }
        if !self.annual_drift.is_finite() || self.annual_drift <= -1.0 {
            return Err(SimulationError::invalid(
                "annual_drift",
                self.annual_drift,
                "must be finite and greater than -1",
            ));
        }
        if !self.annual_volatility.is_finite() || self.annual_volatility < 0.0 {
            return Err(SimulationError::invalid(
                "annual_volatility",
                self.annual_volatility,
                "must be non-negative and finite",
            ));
        }
        if !self.leverage.is_finite() {
            return Err(SimulationError::invalid(
                "leverage",
                self.leverage,
                "must be finite",
            ));
        }
        if self.horizon_years == 0 {
            return Err(SimulationError::invalid(
                "horizon_years",
                0.0,
                "must be at least 1",
            ));
        }
        if self.steps_per_year == 0 {
            return Err(SimulationError::invalid(
                "steps_per_year",
                0.0,
                "must be at least 1",
            ));
        }
        if self.path_count == 0 {
            return Err(SimulationError::invalid(
                "path_count",
                0.0,
                "must be at least 1",
            ));
        }
        if self.total_steps() < 2 {
            return Err(SimulationError::invalid(
                "total_steps",
                self.total_steps() as f64,
                "horizon_years * steps_per_year must be at least 2",
            ));
        }
        Ok(())
    }
}
