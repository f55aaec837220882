//! Gathers classified tickers into the buy and sell result sets.

use serde::Serialize;
use screener_core::types::{SignalRecord, SignalType};
use tracing::warn;

/// Records of one signal direction, ascending by ticker, no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<SignalRecord>);

impl ResultSet {
    /// Sort records by ticker and drop repeated tickers (first one wins).
    pub fn from_records(mut records: Vec<SignalRecord>) -> Self {
        records.sort_by(|a, b| a.ticker.cmp(&b.ticker));

        let before = records.len();
        records.dedup_by(|later, earlier| later.ticker == earlier.ticker);
        if records.len() < before {
            warn!(dropped = before - records.len(), "Duplicate tickers removed from result set");
        }

        Self(records)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignalRecord> {
        self.0.iter()
    }

    pub fn records(&self) -> &[SignalRecord] {
        &self.0
    }

    /// Ticker codes in output order.
    pub fn tickers(&self) -> Vec<&str> {
        self.0.iter().map(|r| r.ticker.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a SignalRecord;
    type IntoIter = std::slice::Iter<'a, SignalRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Splits classified records by direction.
///
/// Arrival order does not matter; ordering is imposed in [`finish`](Self::finish).
#[derive(Debug, Default)]
pub struct ResultAggregator {
    buy: Vec<SignalRecord>,
    sell: Vec<SignalRecord>,
}

impl ResultAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one classified record. NONE records are ignored.
    pub fn push(&mut self, signal: SignalType, record: SignalRecord) {
        match signal {
            SignalType::Buy => self.buy.push(record),
            SignalType::Sell => self.sell.push(record),
            SignalType::None => {}
        }
    }

    /// Produce the sorted buy and sell result sets.
    pub fn finish(self) -> (ResultSet, ResultSet) {
        (
            ResultSet::from_records(self.buy),
            ResultSet::from_records(self.sell),
        )
    }

    /// Aggregate a batch of classified records in one call.
    pub fn collect<I>(classified: I) -> (ResultSet, ResultSet)
    where
        I: IntoIterator<Item = (SignalType, SignalRecord)>,
    {
        let mut aggregator = Self::new();
        for (signal, record) in classified {
            aggregator.push(signal, record);
        }
        aggregator.finish()
    }
}
