//! Validate configuration command.

use anyhow::Result;
use screener_config::{ConfigError, ScreenerConfig};
use std::path::Path;

pub async fn run(config_path: &Path, loaded: Result<ScreenerConfig, ConfigError>) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let indicators = &config.indicators;
    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!("Universe: {}", config.data.universe_file.display());
    println!("Prices: {}", config.data.prices_dir.display());
    println!(
        "Moving averages: {} / {} ({:?})",
        indicators.short_window, indicators.long_window, indicators.moving_average
    );
    println!(
        "RSI: {} / {}",
        indicators.rsi_short_period, indicators.rsi_long_period
    );
    println!(
        "MACD: {} / {} / {}",
        indicators.macd_fast, indicators.macd_slow, indicators.macd_signal_period
    );
    println!("Required history: {} bars", indicators.required_history());
    println!(
        "Buy when long RSI <= {}, sell when long RSI >= {}",
        config.signals.buy_rsi_long_ceiling, config.signals.sell_rsi_long_floor
    );
    println!("Output: {}", config.output.directory.display());

    Ok(())
}
