//! Screening run command.

use anyhow::{Context, Result};
use screener_config::ScreenerConfig;
use screener_data::{fetch_all, load_universe, CsvPriceSource};
use screener_signals::{CsvResultWriter, ResultSink, ScreeningPipeline};
use tracing::info;

use crate::cli::{ReportFormat, RunArgs};

pub async fn run(args: RunArgs, mut config: ScreenerConfig) -> Result<()> {
    if let Some(prices) = args.prices {
        config.data.prices_dir = prices;
    }
    if let Some(output) = args.output {
        config.output.directory = output;
    }
    let universe_path = match (args.universe, args.test) {
        (Some(path), _) => path,
        (None, true) => config.data.test_universe_file.clone(),
        (None, false) => config.data.universe_file.clone(),
    };

    info!(
        universe = %universe_path.display(),
        prices = %config.data.prices_dir.display(),
        test = args.test,
        "Starting screening run"
    );

    let pipeline = ScreeningPipeline::new(&config).context("Invalid configuration")?;

    let universe = load_universe(&universe_path)
        .with_context(|| format!("Failed to load universe from {}", universe_path.display()))?;

    let source = CsvPriceSource::new(&config.data.prices_dir)?;
    let fetched = fetch_all(
        &source,
        universe.iter().map(|m| m.ticker.as_str()),
        config.data.fetch_concurrency,
    )
    .await;

    let report = pipeline
        .run(&fetched.store, &universe)?
        .with_upstream(fetched.exclusions);

    let writer = CsvResultWriter::new(&config.output);
    let persisted = writer
        .persist(&report.buy, &report.sell)
        .context("Failed to write result files")?;

    match args.format {
        ReportFormat::Json => println!("{}", report.to_json()?),
        ReportFormat::Text => println!("{}", report.summary()),
    }

    info!(
        buy = %persisted.buy_path.display(),
        sell = %persisted.sell_path.display(),
        "Results saved"
    );

    Ok(())
}
