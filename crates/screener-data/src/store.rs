//! In-memory price series store.

use std::collections::HashMap;
use screener_core::error::DataError;
use screener_core::types::{PriceBar, TickerSeries};

/// Already-fetched daily bars, keyed by ticker.
///
/// Downstream stages only borrow series from the store.
#[derive(Debug, Default)]
pub struct PriceSeriesStore {
    series: HashMap<String, TickerSeries>,
}

impl PriceSeriesStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the series for a ticker.
    pub fn get_series(&self, ticker: &str) -> Result<&TickerSeries, DataError> {
        self.series
            .get(ticker)
            .ok_or_else(|| DataError::TickerNotFound(ticker.to_string()))
    }

    /// Store a series, replacing any previous one for the same ticker.
    pub fn insert(&mut self, series: TickerSeries) {
        self.series.insert(series.ticker.clone(), series);
    }

    /// Store bars for a ticker.
    pub fn put(&mut self, ticker: &str, bars: Vec<PriceBar>) {
        self.insert(TickerSeries::new(ticker, bars));
    }

    /// Number of tickers held.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Tickers held, in no particular order.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }
}

impl FromIterator<TickerSeries> for PriceSeriesStore {
    fn from_iter<T: IntoIterator<Item = TickerSeries>>(iter: T) -> Self {
        let mut store = Self::new();
        for series in iter {
            store.insert(series);
        }
        store
    }
}
