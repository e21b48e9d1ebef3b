//! Summary statistics over a finished path matrix.
//!
//! The same functions serve the unleveraged and the leveraged ensemble;
//! nothing here knows which one it is looking at.

use crate::error::SimulationError;
use crate::model::{PathMatrix, PercentileSet, SummaryStatistics};

/// Arithmetic mean; `NaN` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population (divide by n) standard deviation.
#[must_use]
pub fn population_std_dev(values: &[f64]) -> f64 {
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Quantile `q` in `[0, 1]` of an ascending slice, interpolating linearly
/// between the two nearest order statistics. Returns `None` when empty.
#[must_use]
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let pos = q.clamp(0.0, 1.0) * last as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Median of an unsorted slice (mean of the middle pair for even lengths).
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    let sorted = sorted_copy(values);
    quantile(&sorted, 0.5)
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

/// Reject matrices containing any price that cannot be logged.
fn ensure_positive(matrix: &PathMatrix) -> Result<(), SimulationError> {
    for (path, row) in matrix.paths().enumerate() {
        if let Some((step, &value)) = row
            .iter()
            .enumerate()
            .find(|(_, p)| !p.is_finite() || **p <= 0.0)
        {
            return Err(SimulationError::NumericDegeneracy { path, step, value });
        }
    }
    Ok(())
}

/// Per-path `(terminal / initial)^(1 / horizon_years) - 1`.
#[must_use]
pub fn annualized_geometric_returns(matrix: &PathMatrix, horizon_years: u32) -> Vec<f64> {
    let exponent = 1.0 / f64::from(horizon_years);
    matrix
        .paths()
        .map(|row| (row[row.len() - 1] / row[0]).powf(exponent) - 1.0)
        .collect()
}

/// Per-path standard deviation of daily log returns, scaled by `sqrt(steps_per_year)`.
#[must_use]
pub fn annualized_realized_volatilities(matrix: &PathMatrix, steps_per_year: u32) -> Vec<f64> {
    let scale = f64::from(steps_per_year).sqrt();
    let mut log_returns = Vec::with_capacity(matrix.steps() - 1);
    matrix
        .paths()
        .map(|row| {
            log_returns.clear();
            log_returns.extend(row.windows(2).map(|w| (w[1] / w[0]).ln()));
            population_std_dev(&log_returns) * scale
        })
        .collect()
}

/// Compute terminal-price and realized-volatility statistics for one ensemble.
pub fn summarize(
    matrix: &PathMatrix,
    horizon_years: u32,
    steps_per_year: u32,
) -> Result<SummaryStatistics, SimulationError> {
    if horizon_years == 0 {
        return Err(SimulationError::invalid(
            "horizon_years",
            0.0,
            "must be at least 1",
        ));
    }
    if steps_per_year == 0 {
        return Err(SimulationError::invalid(
            "steps_per_year",
            0.0,
            "must be at least 1",
        ));
    }
    ensure_positive(matrix)?;

    let terminal = matrix.terminal_prices();
    let sorted = sorted_copy(&terminal);
    let log_terminal: Vec<f64> = terminal.iter().map(|p| p.ln()).collect();

    let returns = annualized_geometric_returns(matrix, horizon_years);
    let volatilities = annualized_realized_volatilities(matrix, steps_per_year);

    // A PathMatrix always holds at least one path, so none of these are empty.
    let empty = || SimulationError::InvalidShape {
        rows: matrix.path_count(),
        columns: matrix.steps(),
        reason: "no paths to summarize",
    };
    let percentile = |q| quantile(&sorted, q).ok_or_else(empty);

    Ok(SummaryStatistics {
        path_count: matrix.path_count(),
        mean_terminal_price: mean(&terminal),
        median_terminal_price: percentile(0.5)?,
        log_mean_terminal_price: mean(&log_terminal).exp(),
        median_annualized_return: median(&returns).ok_or_else(empty)?,
        median_annualized_volatility: median(&volatilities).ok_or_else(empty)?,
        terminal_percentiles: PercentileSet {
            p5: percentile(0.05)?,
            p50: percentile(0.5)?,
            p95: percentile(0.95)?,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile(&sorted, 1.0), Some(4.0));
        assert_eq!(quantile(&sorted, 0.5), Some(2.5));
        assert!((quantile(&sorted, 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[7.0]), Some(7.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_population_std_dev() {
        // Population std dev of 2,4,4,4,5,5,7,9 is exactly 2
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_std_dev(&values) - 2.0).abs() < 1e-12);
        assert_eq!(population_std_dev(&[3.0, 3.0, 3.0]), 0.0);
    }

    #[test]
    fn test_ensure_positive_finds_first_bad_price() {
        let matrix =
            PathMatrix::from_rows(vec![vec![1.0, 2.0, 3.0], vec![1.0, -2.0, 0.0]]).unwrap();
        match ensure_positive(&matrix) {
            Err(SimulationError::NumericDegeneracy { path, step, value }) => {
                assert_eq!((path, step), (1, 1));
                assert_eq!(value, -2.0);
            }
            other => panic!("expected degeneracy error, got {other:?}"),
        }
    }
}
