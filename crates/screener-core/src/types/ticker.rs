//! Ticker universe metadata.

use serde::{Deserialize, Serialize};

/// Display metadata for one ticker in the universe.
///
/// Passed through to result rows untouched; never used for classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerMeta {
    /// Ticker code
    pub ticker: String,
    /// Company display name
    pub name: String,
    /// Market segment label (e.g. "Prime", "Standard", "Growth")
    pub market_segment: String,
}

impl TickerMeta {
    /// Create ticker metadata.
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        market_segment: impl Into<String>,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            market_segment: market_segment.into(),
        }
    }
}
