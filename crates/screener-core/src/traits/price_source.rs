//! Price source trait definitions.

use crate::error::DataError;
use crate::types::PriceBar;
use async_trait::async_trait;

/// Trait for end-of-day price history providers.
///
/// Implementations own any network access, batching, retry and rate
/// limiting. The screener only sees the resulting bars.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Fetch the full daily history for a ticker.
    ///
    /// # Returns
    /// Bars ordered from oldest to newest, or
    /// [`DataError::TickerNotFound`] when the provider has nothing for it
    async fn fetch_series(&self, ticker: &str) -> Result<Vec<PriceBar>, DataError>;

    /// Get the source name.
    fn name(&self) -> &str;
}
