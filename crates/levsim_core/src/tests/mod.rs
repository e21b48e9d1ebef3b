//! Integration tests for the levsim simulation engine
//!
//! Tests are organized by topic:
//! - `simulation` - Path generation invariants (column 0, positivity, seeding, leverage)
//! - `aggregate` - Summary statistics over hand-built path matrices
//! - `estimator` - Historical return/volatility estimation windows
//! - `comparison` - History → parameters → simulation pipeline


use jiff::ToSpan;

use crate::model::{PriceBar, PriceSeries};

/// Daily series starting 2000-01-01 with one bar per close.
pub(crate) fn series_from_closes(closes: &[f64]) -> PriceSeries {
    let start = jiff::civil::date(2000, 1, 1);
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| PriceBar {
            date: start.saturating_add((i as i64).days()),
            open: close,
            high: close,
            low: close,
            close,
        })
        .collect();
    PriceSeries::new(bars).unwrap()
}
