//! Indicator computation, signal classification and result aggregation.
//!
//! Data flows one way through this crate:
//! - [`IndicatorEngine`] turns a ticker's series into an indicator snapshot
//! - [`SignalClassifier`] maps the snapshot to BUY, SELL or NONE
//! - [`ResultAggregator`] gathers classified tickers into sorted result sets
//! - [`ResultSink`] persists both result sets
//!
//! [`ScreeningPipeline`] runs the first three stages over a whole universe.

mod aggregator;
mod classifier;
mod engine;
mod output;
mod pipeline;
mod report;

pub use aggregator::{ResultAggregator, ResultSet};
pub use classifier::SignalClassifier;
pub use engine::IndicatorEngine;
pub use output::{format_decimal, CsvResultWriter, PersistSummary, ResultSink, OUTPUT_HEADER};
pub use pipeline::{Evaluation, ScreeningPipeline};
pub use report::ScreeningReport;
