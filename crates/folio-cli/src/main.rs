//! Folio CLI - extract brokerage holdings and report on them.
//!
//! # Usage
//!
//! ```bash
//! # Process a saved holdings page into a fresh session directory
//! folio process "Empower Holdings.txt"
//!
//! # Write artifacts named B* into a fixed directory, as JSON
//! folio --format json process holdings.txt --base-name B --out ./out
//!
//! # Remove session directories older than 12 hours
//! folio sessions prune --max-age-hours 12
//!
//! # Show the effective configuration
//! folio --config folio.toml config show
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use folio_config::FolioConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::CommandContext;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let config = FolioConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    let ctx = CommandContext {
        format: cli.format,
        quiet: cli.quiet,
        config,
        config_path: cli.config,
    };

    // Execute command
    match cli.command {
        Commands::Process(args) => commands::process::execute(args, &ctx)?,
        Commands::Sessions(args) => commands::sessions::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, &ctx)?,
    }

    Ok(())
}

/// Logs go to stderr so that JSON output on stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "info,folio=debug,folio_engine=debug,folio_ext_file=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
