//! Core types and traits for the signal screener.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (PriceBar, TickerSeries, TickerMeta)
//! - Derived values (IndicatorSnapshot, SignalRecord, SignalType)
//! - Per-ticker exclusion reasons
//! - Core traits for indicators

pub mod types;
pub mod traits;
pub mod error;

pub use error::{ScreenerError, ScreenerResult};
pub use types::*;
pub use traits::*;
