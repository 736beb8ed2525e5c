//! Main entry point for the qqwry-seek CLI

use anyhow::Context;
use clap::Parser;
use log::info;

use qqwry_seek::AppConfig;
use qqwry_seek::cli::Cli;

fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Load configuration
    let mut config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}, using defaults", e);
        let mut config = AppConfig::default();
        config.apply_env();
        config
    });
    cli.apply(&mut config);

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.global.log_level()),
    )
    .init();

    info!("Starting qqwry-seek v{}", env!("CARGO_PKG_VERSION"));
    if let Some(ref path) = config.global.config_path {
        info!("Using config file {}", path.display());
    }

    cli.run(config).context("query failed")?;

    Ok(())
}
