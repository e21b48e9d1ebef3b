//! Leveraged vs. unleveraged comparison built on top of the simulator and
//! the aggregator.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::aggregate::summarize;
use crate::error::{Error, SimulationError};
use crate::estimator::{ReturnEstimator, estimate};
use crate::model::{MarketEstimate, PriceSeries, SimulationParameters, SummaryStatistics};
use crate::simulation::{SimulatedPaths, simulate};

/// Continuous-time geometric growth rate of a position held at `leverage`:
/// `leverage * mu - (leverage * sigma)^2 / 2`.
#[must_use]
pub fn theoretical_geometric_return(mu: f64, sigma: f64, leverage: f64) -> f64 {
    leverage * mu - 0.5 * (leverage * sigma).powi(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalReturns {
    pub unleveraged: f64,
    pub leveraged: f64,
}

impl TheoreticalReturns {
    #[must_use]
    pub fn for_parameters(params: &SimulationParameters) -> Self {
        Self {
            unleveraged: theoretical_geometric_return(
                params.annual_drift,
                params.annual_volatility,
                1.0,
            ),
            leveraged: theoretical_geometric_return(
                params.annual_drift,
                params.annual_volatility,
                params.leverage,
            ),
        }
    }
}

/// Statistics for both positions of one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeverageComparison {
    pub parameters: SimulationParameters,
    pub unleveraged: SummaryStatistics,
    pub leveraged: SummaryStatistics,
    pub theoretical: TheoreticalReturns,
}

impl LeverageComparison {
    /// Summarize both ensembles of a finished run with identical formulas.
    pub fn from_paths(
        params: &SimulationParameters,
        paths: &SimulatedPaths,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            parameters: *params,
            unleveraged: summarize(
                &paths.unleveraged,
                params.horizon_years,
                params.steps_per_year,
            )?,
            leveraged: summarize(&paths.leveraged, params.horizon_years, params.steps_per_year)?,
            theoretical: TheoreticalReturns::for_parameters(params),
        })
    }
}

/// Simulated paths together with their summary
#[derive(Debug, Clone)]
pub struct ComparisonRun {
    pub paths: SimulatedPaths,
    pub comparison: LeverageComparison,
}

/// Simulate and summarize one parameter set.
pub fn compare<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<ComparisonRun, SimulationError> {
    let paths = simulate(params, rng)?;
    let comparison = LeverageComparison::from_paths(params, &paths)?;
    Ok(ComparisonRun { paths, comparison })
}

/// A comparison whose drift and volatility were estimated from history
#[derive(Debug, Clone)]
pub struct HistoricalRun {
    pub estimate: MarketEstimate,
    pub run: ComparisonRun,
}

/// Estimate drift and volatility from `series`, then simulate with those
/// values in place of `base`'s drift and volatility.
///
/// Estimator failures (such as too little history) are returned unchanged
/// as [`Error::History`]; no fallback parameters are substituted.
pub fn compare_from_history<E, R>(
    series: &PriceSeries,
    estimator: &E,
    window_years: u32,
    base: &SimulationParameters,
    rng: &mut R,
) -> Result<HistoricalRun, Error>
where
    E: ReturnEstimator + ?Sized,
    R: Rng + ?Sized,
{
    let estimate = estimate(series, estimator, window_years)?;
    let params = SimulationParameters::from_estimate(
        &estimate,
        base.initial_price,
        base.leverage,
        base.horizon_years,
    )
    .with_steps_per_year(base.steps_per_year)
    .with_path_count(base.path_count);
    let run = compare(&params, rng)?;
    Ok(HistoricalRun { estimate, run })
}
