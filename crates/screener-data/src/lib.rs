//! Price series storage and data sources for the screener.

mod csv_source;
mod fetch;
mod store;
mod universe;

pub use csv_source::CsvPriceSource;
pub use fetch::{fetch_all, FetchOutcome};
pub use store::PriceSeriesStore;
pub use universe::load_universe;
