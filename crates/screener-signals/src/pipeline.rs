//! Universe-wide screening pass.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use screener_config::ScreenerConfig;
use screener_core::error::{DataError, ScreenerError, ScreenerResult};
use screener_core::types::{
    Exclusion, ExclusionReason, IndicatorSnapshot, SignalRecord, SignalType, TickerMeta,
};
use screener_data::PriceSeriesStore;
use tracing::{debug, info, warn};

use crate::{IndicatorEngine, ResultAggregator, ScreeningReport, SignalClassifier};

/// Result of screening a single ticker.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub meta: TickerMeta,
    pub outcome: Result<IndicatorSnapshot, Exclusion>,
    pub signal: SignalType,
}

impl Evaluation {
    /// Output row for this ticker, if it has a snapshot.
    pub fn record(&self) -> Option<SignalRecord> {
        self.outcome
            .as_ref()
            .ok()
            .map(|snapshot| SignalRecord::from_snapshot(snapshot, &self.meta))
    }
}

/// Runs indicator computation and classification over a universe.
///
/// Tickers are independent; computation runs on a dedicated worker pool
/// and ordering is only imposed when the result sets are built.
pub struct ScreeningPipeline {
    engine: IndicatorEngine,
    classifier: SignalClassifier,
    pool: ThreadPool,
}

impl ScreeningPipeline {
    /// Build a pipeline from a configuration.
    pub fn new(config: &ScreenerConfig) -> ScreenerResult<Self> {
        config.validate()?;

        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("screener-{}", i));
        if config.runtime.concurrency_limit > 0 {
            builder = builder.num_threads(config.runtime.concurrency_limit);
        }
        let pool = builder
            .build()
            .map_err(|e| ScreenerError::WorkerPool(e.to_string()))?;

        debug!(
            workers = pool.current_num_threads(),
            required_history = config.indicators.required_history(),
            "Screening pipeline ready"
        );

        Ok(Self {
            engine: IndicatorEngine::new(&config.indicators),
            classifier: SignalClassifier::new(&config.signals),
            pool,
        })
    }

    pub fn engine(&self) -> &IndicatorEngine {
        &self.engine
    }

    pub fn classifier(&self) -> &SignalClassifier {
        &self.classifier
    }

    /// Worker threads used for computation.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Screen one ticker.
    pub fn evaluate(&self, store: &PriceSeriesStore, meta: &TickerMeta) -> Evaluation {
        let outcome = match store.get_series(&meta.ticker) {
            Ok(series) => self.engine.compute(series),
            Err(_) => Err(Exclusion::not_found(&meta.ticker)),
        };
        let signal = self.classifier.classify_outcome(&outcome);

        Evaluation {
            meta: meta.clone(),
            outcome,
            signal,
        }
    }

    /// Screen every ticker in the universe and aggregate the results.
    pub fn run(
        &self,
        store: &PriceSeriesStore,
        universe: &[TickerMeta],
    ) -> ScreenerResult<ScreeningReport> {
        if universe.is_empty() {
            return Err(DataError::EmptyUniverse.into());
        }

        info!(tickers = universe.len(), workers = self.workers(), "Screening universe");

        let evaluations: Vec<Evaluation> = self.pool.install(|| {
            universe
                .par_iter()
                .map(|meta| self.evaluate(store, meta))
                .collect()
        });

        let mut report = ScreeningReport {
            evaluated: evaluations.len(),
            ..Default::default()
        };
        let mut aggregator = ResultAggregator::new();

        for evaluation in evaluations {
            if let Err(exclusion) = &evaluation.outcome {
                log_exclusion(exclusion);
                report.excluded.push(exclusion.clone());
                continue;
            }
            if !evaluation.signal.is_actionable() {
                report.neutral += 1;
                continue;
            }
            if let Some(record) = evaluation.record() {
                debug!(ticker = %record.ticker, signal = %evaluation.signal, rsi_long = record.rsi_long, "Signal");
                aggregator.push(evaluation.signal, record);
            }
        }

        let (buy, sell) = aggregator.finish();
        report.buy = buy;
        report.sell = sell;
        report.excluded.sort_by(|a, b| a.ticker.cmp(&b.ticker));

        info!(
            evaluated = report.evaluated,
            buy = report.buy.len(),
            sell = report.sell.len(),
            neutral = report.neutral,
            excluded = report.excluded.len(),
            "Screening complete"
        );

        Ok(report)
    }
}

fn log_exclusion(exclusion: &Exclusion) {
    match &exclusion.reason {
        ExclusionReason::InsufficientHistory { required, available } => {
            debug!(ticker = %exclusion.ticker, required, available, "Skipped: insufficient history")
        }
        ExclusionReason::MalformedSeries { detail } => {
            warn!(ticker = %exclusion.ticker, detail = %detail, "Skipped: malformed series")
        }
        ExclusionReason::NotFound => warn!(ticker = %exclusion.ticker, "Skipped: no price series"),
    }
}
