//! Annualized return and volatility estimated from daily closes.
//!
//! The estimation window is always the most recent
//! `window_years * steps_per_year` bars of the (chronological) series.

use crate::error::HistoryError;
use crate::model::{MarketEstimate, PriceBar, PriceSeries, TRADING_DAYS_PER_YEAR};

/// Turns a price history into the annual drift and volatility fed to the simulator.
pub trait ReturnEstimator {
    /// Number of daily observations a window of `window_years` covers
    fn observations(&self, window_years: u32) -> usize;

    fn annualized_return(&self, series: &PriceSeries, window_years: u32)
    -> Result<f64, HistoryError>;

    fn annualized_volatility(
        &self,
        series: &PriceSeries,
        window_years: u32,
    ) -> Result<f64, HistoryError>;
}

/// Geometric annual return over the window and annualized sample standard
/// deviation of daily log returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogReturnEstimator {
    pub steps_per_year: u32,
}

impl Default for LogReturnEstimator {
    fn default() -> Self {
        Self {
            steps_per_year: TRADING_DAYS_PER_YEAR,
        }
    }
}

impl LogReturnEstimator {
    #[must_use]
    pub fn new(steps_per_year: u32) -> Self {
        Self { steps_per_year }
    }

    fn window<'a>(
        &self,
        series: &'a PriceSeries,
        window_years: u32,
    ) -> Result<&'a [PriceBar], HistoryError> {
        if window_years == 0 {
            return Err(HistoryError::InvalidWindow {
                window_years,
                reason: "window must cover at least one year",
            });
        }
        let required = self.observations(window_years);
        if required < 2 {
            return Err(HistoryError::InvalidWindow {
                window_years,
                reason: "window must contain at least two observations",
            });
        }
        series
            .latest(required)
            .ok_or(HistoryError::InsufficientHistory {
                required,
                available: series.len(),
            })
    }
}

impl ReturnEstimator for LogReturnEstimator {
    fn observations(&self, window_years: u32) -> usize {
        window_years as usize * self.steps_per_year as usize
    }

    fn annualized_return(
        &self,
        series: &PriceSeries,
        window_years: u32,
    ) -> Result<f64, HistoryError> {
        let window = self.window(series, window_years)?;
        let start = window[0].close;
        let end = window[window.len() - 1].close;
        Ok((end / start).powf(1.0 / f64::from(window_years)) - 1.0)
    }

    fn annualized_volatility(
        &self,
        series: &PriceSeries,
        window_years: u32,
    ) -> Result<f64, HistoryError> {
        let window = self.window(series, window_years)?;
        let log_returns: Vec<f64> = window
            .windows(2)
            .map(|pair| (pair[1].close / pair[0].close).ln())
            .collect();

        let n = log_returns.len() as f64;
        let mean = log_returns.iter().sum::<f64>() / n;
        let variance = if log_returns.len() > 1 {
            log_returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };

        Ok(variance.sqrt() * f64::from(self.steps_per_year).sqrt())
    }
}

/// Run both estimates over the same window.
pub fn estimate<E: ReturnEstimator + ?Sized>(
    series: &PriceSeries,
    estimator: &E,
    window_years: u32,
) -> Result<MarketEstimate, HistoryError> {
    let annual_return = estimator.annualized_return(series, window_years)?;
    let annual_volatility = estimator.annualized_volatility(series, window_years)?;
    Ok(MarketEstimate {
        annual_return,
        annual_volatility,
        window_years,
        observations: estimator.observations(window_years),
    })
}
