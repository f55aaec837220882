//! Daily OHLCV bars and per-ticker series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

/// One trading day of OHLCV data.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    /// Trading date
    pub date: NaiveDate,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl PriceBar {
    /// Create a new bar.
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check that every price field is a finite number.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// Ordered daily bars for one ticker, oldest first.
///
/// Gaps for non-trading days are allowed; duplicate or out-of-order dates
/// are not, see [`TickerSeries::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerSeries {
    /// Ticker code
    pub ticker: String,
    bars: Vec<PriceBar>,
}

impl TickerSeries {
    /// Create a series from bars already in ascending date order.
    pub fn new(ticker: impl Into<String>, bars: Vec<PriceBar>) -> Self {
        Self {
            ticker: ticker.into(),
            bars,
        }
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    /// Get the most recent bar.
    pub fn last(&self) -> Option<&PriceBar> {
        self.bars.last()
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Reject series with non-ascending dates or non-finite prices.
    pub fn validate(&self) -> Result<(), DataError> {
        if let Some(bar) = self.bars.iter().find(|b| !b.is_finite()) {
            return Err(DataError::MalformedSeries {
                ticker: self.ticker.clone(),
                detail: format!("non-numeric price on {}", bar.date),
            });
        }

        if let Some(pair) = self.bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(DataError::MalformedSeries {
                ticker: self.ticker.clone(),
                detail: format!("date {} does not follow {}", pair[1].date, pair[0].date),
            });
        }

        Ok(())
    }
}
