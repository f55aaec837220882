//! Error types for the screener.

use thiserror::Error;

/// Top-level screener error.
#[derive(Error, Debug)]
pub enum ScreenerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Worker pool error: {0}")]
    WorkerPool(String),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Ticker not found: {0}")]
    TickerNotFound(String),

    #[error("Ticker universe is empty")]
    EmptyUniverse,

    #[error("Malformed series for {ticker}: {detail}")]
    MalformedSeries { ticker: String, detail: String },

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },
}

/// Result persistence errors. Always fatal to a run.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Aggregation failure writing {path}: {detail}")]
    AggregationFailure { path: String, detail: String },
}

/// Result type alias for screener operations.
pub type ScreenerResult<T> = Result<T, ScreenerError>;
