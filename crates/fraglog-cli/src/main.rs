use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fraglog_cli::commands::{export, report};
use fraglog_cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Commands::Report { log, json } => report::run(log, *json)?,
        Commands::Export { log, out } => export::run(log, out)?,
    }

    Ok(())
}
