//! Key-value cache for price histories, keyed by instrument symbol.

use std::convert::Infallible;

use rustc_hash::FxHashMap;

use crate::model::PriceSeries;

/// Storage for previously retrieved price series.
pub trait SeriesCache {
    type Error: std::error::Error;

    fn get(&self, key: &str) -> Result<Option<PriceSeries>, Self::Error>;

    fn put(&mut self, key: &str, series: &PriceSeries) -> Result<(), Self::Error>;
}

/// Normalize a ticker symbol into a cache key ("SPY " -> "spy").
#[must_use]
pub fn cache_key(symbol: &str) -> String {
    symbol.trim().to_lowercase()
}

/// Return the cached series for `symbol`, or fetch, store and return it.
pub fn get_or_insert_with<C, F, E>(cache: &mut C, symbol: &str, fetch: F) -> Result<PriceSeries, E>
where
    C: SeriesCache + ?Sized,
    F: FnOnce() -> Result<PriceSeries, E>,
    E: From<C::Error>,
{
    let key = cache_key(symbol);
    if let Some(series) = cache.get(&key)? {
        return Ok(series);
    }
    let series = fetch()?;
    cache.put(&key, &series)?;
    Ok(series)
}

/// In-process cache
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    entries: FxHashMap<String, PriceSeries>,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SeriesCache for MemoryCache {
    type Error = Infallible;

    fn get(&self, key: &str) -> Result<Option<PriceSeries>, Self::Error> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, series: &PriceSeries) -> Result<(), Self::Error> {
        self.entries.insert(key.to_string(), series.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::error::Error;

    use super::*;
    use crate::model::PriceBar;
    use jiff::civil::date;

    fn series(close: f64) -> PriceSeries {
        PriceSeries::new(vec![PriceBar {
            date: date(2024, 3, 1),
            open: close,
            high: close,
            low: close,
            close,
        }])
        .unwrap()
    }

    #[test]
    fn test_cache_key_normalizes() {
        assert_eq!(cache_key("SPY"), "spy");
        assert_eq!(cache_key("  Tsla\n"), "tsla");
    }

    #[test]
    fn test_get_or_insert_fetches_once() {
        let mut cache = MemoryCache::new();
        let calls = Cell::new(0);

        let fetch = || -> Result<PriceSeries, Box<dyn Error>> {
            calls.set(calls.get() + 1);
            Ok(series(42.0))
        };

        let first = get_or_insert_with(&mut cache, "SPY", fetch).unwrap();
        let second = get_or_insert_with(&mut cache, "spy", fetch).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
        assert!(cache.get("spy").unwrap().is_some());
    }

    #[test]
    fn test_fetch_error_leaves_cache_empty() {
        let mut cache = MemoryCache::new();
        let result: Result<_, Box<dyn Error>> =
            get_or_insert_with(&mut cache, "qqq", || Err("provider unavailable".into()));

        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
