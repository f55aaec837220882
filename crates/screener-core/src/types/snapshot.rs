//! Latest indicator values for one ticker.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Indicator values at the most recent bar of a series.
///
/// Only ever built from full lookback windows; a ticker with too little
/// history gets an exclusion instead of a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    /// Ticker code
    pub ticker: String,
    /// Date of the bar the values belong to
    pub date: NaiveDate,
    /// Closing price of that bar
    pub close: f64,
    /// Short-window moving average
    pub sma_short: f64,
    /// Long-window moving average
    pub sma_long: f64,
    /// RSI over the short lookback
    pub rsi_short: f64,
    /// RSI over the long lookback
    pub rsi_long: f64,
    /// MACD line (fast EMA - slow EMA)
    pub macd_line: f64,
    /// Signal line (EMA of MACD line)
    pub macd_signal: f64,
    /// MACD line - signal line
    pub macd_histogram: f64,
}
