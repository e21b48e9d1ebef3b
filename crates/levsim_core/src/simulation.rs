//! Monte Carlo path simulation for an unleveraged position and its
//! fixed-leverage counterpart.
//!
//! Each step draws one simple daily return per path from a normal
//! distribution whose mean carries the lognormal convexity correction.
//! The leveraged path reuses the same draw scaled by the leverage factor,
//! so both ensembles are driven by identical randomness.

use rand::{Rng, SeedableRng, distr::Distribution};
use rand_distr::Normal;
#[cfg(feature = "parallel")]
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};

use crate::error::SimulationError;
use crate::model::{PathMatrix, RETURN_FLOOR, SimulationParameters};

/// The two price ensembles produced by one simulation run
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPaths {
    pub unleveraged: PathMatrix,
    pub leveraged: PathMatrix,
}

/// Source of simple daily returns.
///
/// A zero scale always yields the mean and never touches the RNG.
#[derive(Debug, Clone)]
enum DailyReturnSampler {
    Constant(f64),
    Normal(Normal<f64>),
}

impl DailyReturnSampler {
    fn new(mean: f64, std_dev: f64) -> Result<Self, SimulationError> {
        let invalid = || {
            SimulationError::invalid(
                "annual_volatility",
                std_dev,
                "daily volatility must be non-negative and finite",
            )
        };
        if !std_dev.is_finite() || std_dev < 0.0 {
            return Err(invalid());
        }
        if std_dev == 0.0 {
            return Ok(DailyReturnSampler::Constant(mean));
        }
        Normal::new(mean, std_dev)
            .map(DailyReturnSampler::Normal)
            .map_err(|_| invalid())
    }

    fn fill<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        match self {
            DailyReturnSampler::Constant(mean) => out.fill(*mean),
            DailyReturnSampler::Normal(dist) => {
                for slot in out.iter_mut() {
                    *slot = dist.sample(rng);
                }
            }
        }
    }
}

/// Clamp a simple return to [`RETURN_FLOOR`].
#[must_use]
#[inline]
pub fn floor_return(r: f64) -> f64 {
    r.max(RETURN_FLOOR)
}

#[inline]
fn checked_price(value: f64, path: usize, step: usize) -> Result<f64, SimulationError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(SimulationError::NumericDegeneracy { path, step, value })
    }
}

#[inline]
fn advance_path(
    path: usize,
    step: usize,
    row: &mut [f64],
    row_lev: &mut [f64],
    draw: f64,
    leverage: f64,
) -> Result<(), SimulationError> {
    let r = floor_return(draw);
    let r_lev = floor_return(r * leverage);
    row[step] = checked_price(row[step - 1] * (1.0 + r), path, step)?;
    row_lev[step] = checked_price(row_lev[step - 1] * (1.0 + r_lev), path, step)?;
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn advance_step(
    unleveraged: &mut PathMatrix,
    leveraged: &mut PathMatrix,
    draws: &[f64],
    leverage: f64,
    step: usize,
) -> Result<(), SimulationError> {
    unleveraged
        .rows_mut()
        .zip(leveraged.rows_mut())
        .zip(draws)
        .enumerate()
        .try_for_each(|(path, ((row, row_lev), &draw))| {
            advance_path(path, step, row, row_lev, draw, leverage)
        })
}

// Draws are generated sequentially before this point, so the parallel
// update produces the same prices as the sequential one.
#[cfg(feature = "parallel")]
fn advance_step(
    unleveraged: &mut PathMatrix,
    leveraged: &mut PathMatrix,
    draws: &[f64],
    leverage: f64,
    step: usize,
) -> Result<(), SimulationError> {
    unleveraged
        .par_rows_mut()
        .zip(leveraged.par_rows_mut())
        .zip(draws.par_iter())
        .enumerate()
        .try_for_each(|(path, ((row, row_lev), &draw))| {
            advance_path(path, step, row, row_lev, draw, leverage)
        })
}

/// Simulate `path_count` paths of `total_steps` prices for both the
/// unleveraged and the leveraged position.
///
/// Parameters are validated before any matrix is allocated; on error no
/// partial result is returned.
pub fn simulate<R: Rng + ?Sized>(
    params: &SimulationParameters,
    rng: &mut R,
) -> Result<SimulatedPaths, SimulationError> {
    params.validate()?;

    let daily = params.daily();
    let sampler = DailyReturnSampler::new(daily.mu_daily, daily.sigma_daily)?;
    let steps = params.total_steps();

    let mut unleveraged =
        PathMatrix::with_initial_price(params.path_count, steps, params.initial_price);
    let mut leveraged = unleveraged.clone();
    let mut draws = vec![0.0; params.path_count];

    for step in 1..steps {
        sampler.fill(rng, &mut draws);
        advance_step(
            &mut unleveraged,
            &mut leveraged,
            &draws,
            params.leverage,
            step,
        )?;
    }

    Ok(SimulatedPaths {
        unleveraged,
        leveraged,
    })
}

/// [`simulate`] with a `SmallRng` seeded from `seed`.
pub fn simulate_seeded(
    params: &SimulationParameters,
    seed: u64,
) -> Result<SimulatedPaths, SimulationError> {
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    simulate(params, &mut rng)
}
