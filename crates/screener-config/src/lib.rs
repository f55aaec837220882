//! Configuration management.

mod settings;

pub use settings::{
    AppSettings, DataSettings, IndicatorSettings, LoggingConfig, OutputSettings, RuntimeSettings,
    ScreenerConfig, SignalSettings,
};

pub use config::ConfigError;

use config::{Config, Environment, File};
use std::path::Path;

/// Load configuration from file and environment.
///
/// Values from `SCREENER__SECTION__KEY` environment variables override the
/// file.
pub fn load_config(path: &Path) -> Result<ScreenerConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(true))
        .add_source(
            Environment::with_prefix("SCREENER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}
