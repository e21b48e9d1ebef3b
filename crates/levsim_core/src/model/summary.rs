use serde::{Deserialize, Serialize};

/// Terminal-price percentiles (linear interpolation between order statistics)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentileSet {
    pub p5: f64,
    pub p50: f64,
    pub p95: f64,
}

/// Scalar aggregates derived from one finished path matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub path_count: usize,
    pub mean_terminal_price: f64,
    pub median_terminal_price: f64,
    /// `exp(mean(ln(terminal_price)))`
    pub log_mean_terminal_price: f64,
    /// Median across paths of `(terminal / initial)^(1 / years) - 1`
    pub median_annualized_return: f64,
    /// Median across paths of the annualized std dev of daily log returns
    pub median_annualized_volatility: f64,
    pub terminal_percentiles: PercentileSet,
}
