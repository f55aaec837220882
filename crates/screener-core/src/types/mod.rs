//! Core data types for the screener.

mod bar;
mod exclusion;
mod signal;
mod snapshot;
mod ticker;

pub use bar::{PriceBar, TickerSeries};
pub use exclusion::{Exclusion, ExclusionReason};
pub use signal::{SignalRecord, SignalType};
pub use snapshot::IndicatorSnapshot;
pub use ticker::TickerMeta;
