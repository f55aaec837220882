//! Single-ticker inspection command.

use anyhow::{Context, Result};
use screener_config::ScreenerConfig;
use screener_core::traits::PriceSource;
use screener_core::types::TickerSeries;
use screener_data::CsvPriceSource;
use screener_signals::{format_decimal, ScreeningPipeline};

use crate::cli::InspectArgs;

pub async fn run(args: InspectArgs, mut config: ScreenerConfig) -> Result<()> {
    if let Some(prices) = args.prices {
        config.data.prices_dir = prices;
    }

    let pipeline = ScreeningPipeline::new(&config).context("Invalid configuration")?;
    let source = CsvPriceSource::new(&config.data.prices_dir)?;
    let bars = source
        .fetch_series(&args.ticker)
        .await
        .with_context(|| format!("Failed to load prices for {}", args.ticker))?;
    let series = TickerSeries::new(&args.ticker, bars);

    let engine = pipeline.engine();
    let dp = config.output.decimal_places;

    println!("Ticker:            {}", series.ticker);
    println!("Bars:              {}", series.len());
    println!("Required:          {}", engine.required_history());

    match engine.compute(&series) {
        Ok(snapshot) => {
            let signal = pipeline.classifier().classify(&snapshot);
            println!("Date:              {}", snapshot.date);
            println!("Close:             {}", format_decimal(snapshot.close, dp));
            println!("SMA short:         {}", format_decimal(snapshot.sma_short, dp));
            println!("SMA long:          {}", format_decimal(snapshot.sma_long, dp));
            println!("RSI short:         {}", format_decimal(snapshot.rsi_short, dp));
            println!("RSI long:          {}", format_decimal(snapshot.rsi_long, dp));
            println!("MACD:              {}", format_decimal(snapshot.macd_line, dp));
            println!("MACD signal:       {}", format_decimal(snapshot.macd_signal, dp));
            println!("MACD histogram:    {}", format_decimal(snapshot.macd_histogram, dp));
            println!("Signal:            {}", signal);
        }
        Err(exclusion) => {
            println!("Excluded:          {}", exclusion.reason);
        }
    }

    Ok(())
}
