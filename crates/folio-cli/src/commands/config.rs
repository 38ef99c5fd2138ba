//! Config command implementation.
//!
//! Shows the effective configuration and writes a starter file.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use folio_config::{FolioConfig, DEFAULT_CONFIG_PATH};

use super::CommandContext;
use crate::cli::OutputFormat;
use crate::error::CliError;
use crate::output::{print_header, print_info, print_json, print_success, print_table, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Show which configuration file is in use
    Path,

    /// Write a configuration file with default settings
    Init(InitArgs),
}

/// Arguments for init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Destination (defaults to ./folio.toml)
    pub path: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, ctx: &CommandContext) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => path(ctx),
        ConfigCommand::Init(init_args) => init(init_args),
    }
}

fn show(ctx: &CommandContext) -> Result<()> {
    let config = &ctx.config;
    match ctx.format {
        OutputFormat::Json => print_json(config)?,
        OutputFormat::Table => {
            if ctx.quiet {
                print!("{}", config.to_toml_string()?);
                return Ok(());
            }
            print_header("Configuration");
            print_table(&[
                KeyValue::new("output_root", config.output_root.display().to_string()),
                KeyValue::new("top_holdings", config.top_holdings.to_string()),
                KeyValue::new(
                    "session_max_age_hours",
                    config.session_max_age_hours.to_string(),
                ),
                KeyValue::new("use_sessions", config.use_sessions.to_string()),
                KeyValue::new("parser.delimiter", config.parser.delimiter.to_string()),
            ]);
            print_header("TOML");
            print!("{}", config.to_toml_string()?);
        }
    }
    Ok(())
}

fn effective_path(ctx: &CommandContext) -> Option<PathBuf> {
    match &ctx.config_path {
        Some(path) => Some(path.clone()),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            default.is_file().then_some(default)
        }
    }
}

fn path(ctx: &CommandContext) -> Result<()> {
    let path = effective_path(ctx);
    match ctx.format {
        OutputFormat::Json => print_json(&serde_json::json!({ "path": path }))?,
        OutputFormat::Table => match path {
            Some(path) => println!("{}", path.display()),
            None => print_info("No configuration file; using defaults"),
        },
    }
    Ok(())
}

fn init(args: InitArgs) -> Result<()> {
    let path = args.path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    if path.exists() && !args.force {
        return Err(CliError::AlreadyExists(path.display().to_string()).into());
    }

    std::fs::write(&path, FolioConfig::default().to_toml_string()?)?;
    print_success(&format!("Wrote {}", path.display()));
    Ok(())
}
