//! Bounded concurrent loading of a ticker universe into a store.

use futures::stream::{self, StreamExt};
use screener_core::error::DataError;
use screener_core::traits::PriceSource;
use screener_core::types::{Exclusion, TickerSeries};
use tracing::{info, warn};

use crate::PriceSeriesStore;

/// Everything a fetch pass produced.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    /// Series that were retrieved
    pub store: PriceSeriesStore,
    /// Tickers the source could not provide, sorted by ticker
    pub exclusions: Vec<Exclusion>,
}

/// Fetch every ticker from `source`, at most `concurrency` at a time.
///
/// A failure for one ticker never stops the others; it is recorded as an
/// exclusion instead.
pub async fn fetch_all<S, I>(source: &S, tickers: I, concurrency: usize) -> FetchOutcome
where
    S: PriceSource + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let tickers: Vec<String> = tickers.into_iter().map(|t| t.as_ref().to_string()).collect();
    let requested = tickers.len();

    let results: Vec<(String, Result<_, DataError>)> = stream::iter(tickers)
        .map(|ticker| async move {
            let result = source.fetch_series(&ticker).await;
            (ticker, result)
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let mut outcome = FetchOutcome::default();

    for (ticker, result) in results {
        match result {
            Ok(bars) => outcome.store.insert(TickerSeries::new(ticker, bars)),
            Err(DataError::TickerNotFound(_)) => {
                warn!(ticker = %ticker, source = source.name(), "No price data");
                outcome.exclusions.push(Exclusion::not_found(ticker));
            }
            Err(e) => {
                warn!(ticker = %ticker, source = source.name(), error = %e, "Failed to load price data");
                outcome.exclusions.push(Exclusion::malformed(ticker, e.to_string()));
            }
        }
    }

    outcome.exclusions.sort_by(|a, b| a.ticker.cmp(&b.ticker));

    info!(
        source = source.name(),
        requested,
        loaded = outcome.store.len(),
        failed = outcome.exclusions.len(),
        "Price fetch complete"
    );

    outcome
}
