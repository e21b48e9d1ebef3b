use serde::{Deserialize, Serialize};

/// Annualized drift and volatility estimated from a trailing window of closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketEstimate {
    pub annual_return: f64,
    pub annual_volatility: f64,
    pub window_years: u32,
    /// Number of daily observations inside the window
    pub observations: usize,
}
