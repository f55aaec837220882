//! Ticker universe loading.

use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use screener_core::error::DataError;
use screener_core::types::TickerMeta;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
struct UniverseRecord {
    #[serde(alias = "Ticker", alias = "ticker", alias = "Code", alias = "code")]
    ticker: String,
    #[serde(alias = "Name", alias = "name", default)]
    name: String,
    #[serde(alias = "Market", alias = "market", alias = "Segment", alias = "segment", default)]
    market: String,
}

/// Load the ticker universe from a CSV with `Ticker,Name,Market` columns.
///
/// Blank tickers are skipped and repeated tickers keep their first row.
/// An empty universe is an error.
pub fn load_universe(path: &Path) -> Result<Vec<TickerMeta>, DataError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;

    let mut seen = HashSet::new();
    let mut universe = Vec::new();

    for result in reader.deserialize() {
        let record: UniverseRecord =
            result.map_err(|e| DataError::ParseError(format!("{}: {}", path.display(), e)))?;

        if record.ticker.is_empty() {
            continue;
        }
        if !seen.insert(record.ticker.clone()) {
            warn!(ticker = %record.ticker, "Duplicate ticker in universe, keeping first entry");
            continue;
        }

        universe.push(TickerMeta::new(record.ticker, record.name, record.market));
    }

    if universe.is_empty() {
        return Err(DataError::EmptyUniverse);
    }

    debug!(path = %path.display(), tickers = universe.len(), "Loaded ticker universe");
    Ok(universe)
}
