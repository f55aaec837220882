//! Stock screener CLI application.

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use screener_config::load_config;
use screener_monitor::setup_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli.config);

    // Setup logging
    let logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_default();
    let log_level = match (&cli.command, cli.log_level) {
        (Commands::Run(args), _) if args.test => "debug",
        (_, Some(level)) => level.as_str(),
        (_, None) => logging.level.as_str(),
    };
    let json = cli.json_logs || logging.format.eq_ignore_ascii_case("json");
    let _guard = setup_logging(log_level, json, logging.file.as_deref());

    // Execute command
    match cli.command {
        Commands::Run(args) => cli::commands::run::run(args, config?).await,
        Commands::Inspect(args) => cli::commands::inspect::run(args, config?).await,
        Commands::ValidateConfig => cli::commands::validate::run(&cli.config, config).await,
    }
}
