//! Sessions command implementation.
//!
//! Lists and prunes per-run session directories under the output root.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{DateTime, Local};
use clap::{Args, Subcommand};
use folio_engine::{is_session_name, prune_stale_sessions};
use serde::Serialize;
use tabled::Tabled;

use super::{max_age_from_hours, CommandContext};
use crate::cli::OutputFormat;
use crate::output::{print_info, print_json, print_success, print_table, print_warning};

/// Arguments for the sessions command.
#[derive(Args, Debug)]
pub struct SessionsArgs {
    #[command(subcommand)]
    pub command: SessionsCommand,
}

/// Sessions subcommands.
#[derive(Subcommand, Debug)]
pub enum SessionsCommand {
    /// List session directories
    List,

    /// Remove session directories older than the maximum age
    Prune(PruneArgs),
}

/// Arguments for prune subcommand.
#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Maximum age in hours (defaults to the configured value)
    #[arg(long)]
    pub max_age_hours: Option<u64>,
}

/// Execute the sessions command.
pub fn execute(args: SessionsArgs, ctx: &CommandContext) -> Result<()> {
    match args.command {
        SessionsCommand::List => list(ctx),
        SessionsCommand::Prune(prune) => self::prune(prune, ctx),
    }
}

#[derive(Debug, Serialize, Tabled)]
struct SessionRow {
    #[tabled(rename = "Session")]
    id: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Files")]
    files: usize,
}

fn session_rows(root: &Path) -> Vec<SessionRow> {
    let Ok(entries) = fs::read_dir(root) else {
        return Vec::new();
    };

    let mut rows: Vec<SessionRow> = entries
        .flatten()
        .filter_map(|entry| {
            let id = entry.file_name().to_str()?.to_string();
            let meta = entry.metadata().ok()?;
            if !meta.is_dir() || !is_session_name(&id) {
                return None;
            }
            let modified = meta
                .modified()
                .map(|t| DateTime::<Local>::from(t).format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            let files = fs::read_dir(entry.path()).map(|d| d.count()).unwrap_or(0);
            Some(SessionRow {
                id,
                modified,
                files,
            })
        })
        .collect();
    rows.sort_by(|a, b| a.id.cmp(&b.id));
    rows
}

fn list(ctx: &CommandContext) -> Result<()> {
    let root = &ctx.config.output_root;
    let rows = session_rows(root);

    match ctx.format {
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Table => {
            if !ctx.quiet {
                print_info(&format!("Sessions under {}", root.display()));
            }
            print_table(&rows);
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct PruneSummary<'a> {
    root: &'a Path,
    max_age_hours: u64,
    removed: &'a [PathBuf],
    failed: &'a [PathBuf],
}

fn prune(args: PruneArgs, ctx: &CommandContext) -> Result<()> {
    let root = &ctx.config.output_root;
    let hours = args
        .max_age_hours
        .unwrap_or(ctx.config.session_max_age_hours);
    let report = prune_stale_sessions(root, max_age_from_hours(hours)?, None);

    match ctx.format {
        OutputFormat::Json => print_json(&PruneSummary {
            root,
            max_age_hours: hours,
            removed: &report.removed,
            failed: &report.failed,
        })?,
        OutputFormat::Table => {
            for path in &report.failed {
                print_warning(&format!("Could not remove {}", path.display()));
            }
            if !ctx.quiet {
                print_success(&format!(
                    "Removed {} session(s) older than {}h from {}",
                    report.removed.len(),
                    hours,
                    root.display()
                ));
            }
        }
    }
    Ok(())
}
