//! Signal classification types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{IndicatorSnapshot, TickerMeta};

/// Classification of a ticker at its latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    /// All buy conditions hold
    Buy,
    /// All sell conditions hold
    Sell,
    /// Neither rule matched, or no snapshot was available
    #[default]
    None,
}

impl SignalType {
    /// Check if this is an actionable signal (buy or sell).
    #[inline]
    pub fn is_actionable(&self) -> bool {
        !matches!(self, SignalType::None)
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalType::Buy => "BUY",
            SignalType::Sell => "SELL",
            SignalType::None => "NONE",
        };
        write!(f, "{}", s)
    }
}

/// One row of a buy or sell result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRecord {
    pub ticker: String,
    pub market_segment: String,
    pub name: String,
    pub date: NaiveDate,
    pub close: f64,
    pub sma_short: f64,
    pub sma_long: f64,
    pub rsi_short: f64,
    pub rsi_long: f64,
    pub macd_line: f64,
    pub macd_signal: f64,
    pub macd_histogram: f64,
}

impl SignalRecord {
    /// Build a record from a snapshot and the ticker's universe metadata.
    pub fn from_snapshot(snapshot: &IndicatorSnapshot, meta: &TickerMeta) -> Self {
        Self {
            ticker: snapshot.ticker.clone(),
            market_segment: meta.market_segment.clone(),
            name: meta.name.clone(),
            date: snapshot.date,
            close: snapshot.close,
            sma_short: snapshot.sma_short,
            sma_long: snapshot.sma_long,
            rsi_short: snapshot.rsi_short,
            rsi_long: snapshot.rsi_long,
            macd_line: snapshot.macd_line,
            macd_signal: snapshot.macd_signal,
            macd_histogram: snapshot.macd_histogram,
        }
    }
}
