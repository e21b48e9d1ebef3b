//! Daily price history

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// One day of open/high/low/close prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: Date,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Chronologically ordered (oldest first) daily bars with strictly
/// increasing dates and positive closes.
///
/// Sources may deliver bars in either order; they are sorted on construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PriceBar>", into = "Vec<PriceBar>")]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(mut bars: Vec<PriceBar>) -> Result<Self, HistoryError> {
        bars.sort_unstable_by_key(|bar| bar.date);

        if let Some(pair) = bars.windows(2).find(|pair| pair[0].date == pair[1].date) {
            return Err(HistoryError::DuplicateDate(pair[0].date));
        }
        if let Some(bar) = bars
            .iter()
            .find(|bar| !bar.close.is_finite() || bar.close <= 0.0)
        {
            return Err(HistoryError::NonPositiveClose {
                date: bar.date,
                close: bar.close,
            });
        }

        Ok(Self { bars })
    }

    #[must_use]
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.bars.iter().map(|bar| bar.close)
    }

    #[must_use]
    pub fn first(&self) -> Option<&PriceBar> {
        self.bars.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// The `n` most recent bars, or `None` if fewer are available
    #[must_use]
    pub fn latest(&self, n: usize) -> Option<&[PriceBar]> {
        self.bars.len().checked_sub(n).map(|start| &self.bars[start..])
    }
}

impl TryFrom<Vec<PriceBar>> for PriceSeries {
    type Error = HistoryError;

    fn try_from(bars: Vec<PriceBar>) -> Result<Self, Self::Error> {
        Self::new(bars)
    }
}

impl From<PriceSeries> for Vec<PriceBar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    fn bar(d: Date, close: f64) -> PriceBar {
        PriceBar {
            date: d,
            open: close,
            high: close,
            low: close,
            close,
        }
    }

    #[test]
    fn test_series_sorted_oldest_first() {
        // Providers commonly return the most recent day first
        let series = PriceSeries::new(vec![
            bar(date(2024, 1, 4), 103.0),
            bar(date(2024, 1, 2), 101.0),
            bar(date(2024, 1, 3), 102.0),
        ])
        .unwrap();

        assert_eq!(series.closes().collect::<Vec<_>>(), vec![101.0, 102.0, 103.0]);
        assert_eq!(series.first().unwrap().date, date(2024, 1, 2));
        assert_eq!(series.last().unwrap().date, date(2024, 1, 4));
    }

    #[test]
    fn test_series_rejects_duplicates_and_bad_closes() {
        let dup = PriceSeries::new(vec![bar(date(2024, 1, 2), 1.0), bar(date(2024, 1, 2), 2.0)]);
        assert!(matches!(dup, Err(HistoryError::DuplicateDate(_))));

        let zero = PriceSeries::new(vec![bar(date(2024, 1, 2), 0.0)]);
        assert!(matches!(zero, Err(HistoryError::NonPositiveClose { .. })));

        let nan = PriceSeries::new(vec![bar(date(2024, 1, 2), f64::NAN)]);
        assert!(matches!(nan, Err(HistoryError::NonPositiveClose { .. })));
    }

    #[test]
    fn test_latest_window() {
        let series = PriceSeries::new(
            (1..=5)
                .map(|d| bar(date(2024, 1, d), f64::from(d)))
                .collect(),
        )
        .unwrap();

        let window = series.latest(2).unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(window[0].close, 4.0);
        assert_eq!(window[1].close, 5.0);
        assert!(series.latest(6).is_none());
        assert_eq!(series.latest(5).unwrap().len(), 5);
    }

    #[test]
    fn test_serde_round_trip_revalidates() {
        let series = PriceSeries::new(vec![bar(date(2024, 1, 2), 10.0)]).unwrap();
        let json = serde_json::to_string(&series).unwrap();
        let back: PriceSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(back, series);

        let bad = r#"[{"date":"2024-01-02","open":1.0,"high":1.0,"low":1.0,"close":-1.0}]"#;
        assert!(serde_json::from_str::<PriceSeries>(bad).is_err());
    }
}
