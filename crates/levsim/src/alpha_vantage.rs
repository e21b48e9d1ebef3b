//! Import of Alpha Vantage `TIME_SERIES_DAILY` documents
//!
//! The provider returns a JSON object whose `"Time Series (Daily)"` member
//! maps `YYYY-MM-DD` dates to bars with string-encoded prices:
//!
//! ```text
//! { "Time Series (Daily)": { "2024-01-02": { "1. open": "472.16", "2. high": "473.67",
//!                                            "3. low": "470.49", "4. close": "472.65",
//!                                            "5. volume": "123007793" } } }
//! ```
//!
//! Failed requests come back as a JSON object with an `"Error Message"`,
//! `"Note"` or `"Information"` member instead.

use std::collections::BTreeMap;
use std::path::Path;

use jiff::civil::Date;
use levsim_core::{HistoryError, PriceBar, PriceSeries};
use serde::Deserialize;

#[derive(Debug)]
pub enum ImportError {
    Io(String),
    Json(String),
    /// The provider answered with an error or rate-limit notice
    Provider(String),
    MissingTimeSeries,
    InvalidDate(String),
    InvalidNumber {
        date: String,
        field: &'static str,
        value: String,
    },
    History(HistoryError),
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::Io(msg) => write!(f, "IO error: {}", msg),
            ImportError::Json(msg) => write!(f, "Invalid JSON: {}", msg),
            ImportError::Provider(msg) => write!(f, "Provider returned an error: {}", msg),
            ImportError::MissingTimeSeries => {
                write!(f, "Document has no \"Time Series (Daily)\" member")
            }
            ImportError::InvalidDate(date) => write!(f, "Invalid date '{}'", date),
            ImportError::InvalidNumber { date, field, value } => {
                write!(f, "Invalid {} '{}' on {}", field, value, date)
            }
            ImportError::History(e) => write!(f, "Invalid price history: {}", e),
        }
    }
}

impl std::error::Error for ImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImportError::History(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HistoryError> for ImportError {
    fn from(e: HistoryError) -> Self {
        ImportError::History(e)
    }
}

#[derive(Debug, Deserialize)]
struct DailyDocument {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<BTreeMap<String, RawBar>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawBar {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
}

fn parse_price(date: &str, field: &'static str, value: &str) -> Result<f64, ImportError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ImportError::InvalidNumber {
            date: date.to_string(),
            field,
            value: value.to_string(),
        })
}

impl RawBar {
    fn into_bar(self, date: &str) -> Result<PriceBar, ImportError> {
        let parsed: Date = date
            .parse()
            .map_err(|_| ImportError::InvalidDate(date.to_string()))?;
        Ok(PriceBar {
            date: parsed,
            open: parse_price(date, "open", &self.open)?,
            high: parse_price(date, "high", &self.high)?,
            low: parse_price(date, "low", &self.low)?,
            close: parse_price(date, "close", &self.close)?,
        })
    }
}

/// Parse a daily time series document into a chronological series.
pub fn parse_daily_document(json: &str) -> Result<PriceSeries, ImportError> {
    let document: DailyDocument =
        serde_json::from_str(json).map_err(|e| ImportError::Json(e.to_string()))?;

    if let Some(message) = document
        .error_message
        .or(document.note)
        .or(document.information)
    {
        return Err(ImportError::Provider(message));
    }

    let raw = document.time_series.ok_or(ImportError::MissingTimeSeries)?;
    let bars = raw
        .into_iter()
        .map(|(date, bar)| bar.into_bar(&date))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PriceSeries::new(bars)?)
}

/// Read and parse a daily time series document from disk.
pub fn load_daily_file(path: &Path) -> Result<PriceSeries, ImportError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ImportError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    let series = parse_daily_document(&content)?;
    tracing::info!(
        path = %path.display(),
        bars = series.len(),
        "Imported daily price history"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    const SAMPLE: &str = r#"{
        "Meta Data": {
            "1. Information": "Daily Prices (open, high, low, close) and Volumes",
            "2. Symbol": "SPY"
        },
        "Time Series (Daily)": {
            "2024-01-04": {
                "1. open": "470.4300",
                "2. high": "472.0400",
                "3. low": "467.8700",
                "4. close": "467.9200",
                "5. volume": "84232169"
            },
            "2024-01-02": {
                "1. open": "472.1600",
                "2. high": "473.6700",
                "3. low": "470.4900",
                "4. close": "472.6500",
                "5. volume": "123007793"
            },
            "2024-01-03": {
                "1. open": "470.4300",
                "2. high": "471.1900",
                "3. low": "468.1700",
                "4. close": "468.7900",
                "5. volume": "103585861"
            }
        }
    }"#;

    #[test]
    fn test_parse_sample_document() {
        let series = parse_daily_document(SAMPLE).unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.first().unwrap().date, date(2024, 1, 2));
        assert_eq!(series.last().unwrap().date, date(2024, 1, 4));
        let closes: Vec<f64> = series.closes().collect();
        assert_eq!(closes, vec![472.65, 468.79, 467.92]);
        assert_eq!(series.first().unwrap().open, 472.16);
    }

    #[test]
    fn test_provider_messages_become_errors() {
        let err = parse_daily_document(r#"{"Error Message": "Invalid API call."}"#).unwrap_err();
        assert!(matches!(err, ImportError::Provider(ref m) if m == "Invalid API call."));

        let err = parse_daily_document(r#"{"Note": "Thank you for using Alpha Vantage!"}"#)
            .unwrap_err();
        assert!(matches!(err, ImportError::Provider(_)));

        let err = parse_daily_document(r#"{"Information": "rate limit"}"#).unwrap_err();
        assert!(matches!(err, ImportError::Provider(_)));
    }

    #[test]
    fn test_missing_time_series() {
        let err = parse_daily_document(r#"{"Meta Data": {}}"#).unwrap_err();
        assert!(matches!(err, ImportError::MissingTimeSeries));
    }

    #[test]
    fn test_bad_values() {
        let bad_close = r#"{"Time Series (Daily)": {"2024-01-02": {
            "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "n/a"}}}"#;
        assert!(matches!(
            parse_daily_document(bad_close),
            Err(ImportError::InvalidNumber { field: "close", .. })
        ));

        let bad_date = r#"{"Time Series (Daily)": {"yesterday": {
            "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "1"}}}"#;
        assert!(matches!(
            parse_daily_document(bad_date),
            Err(ImportError::InvalidDate(_))
        ));

        let zero_close = r#"{"Time Series (Daily)": {"2024-01-02": {
            "1. open": "1", "2. high": "1", "3. low": "1", "4. close": "0"}}}"#;
        assert!(matches!(
            parse_daily_document(zero_close),
            Err(ImportError::History(HistoryError::NonPositiveClose { .. }))
        ));
    }

    #[test]
    fn test_load_daily_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spy.json");
        std::fs::write(&path, SAMPLE).unwrap();

        assert_eq!(load_daily_file(&path).unwrap().len(), 3);
        assert!(matches!(
            load_daily_file(&dir.path().join("missing.json")),
            Err(ImportError::Io(_))
        ));
    }
}
