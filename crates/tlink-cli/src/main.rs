//! Tlink CLI - Command line interface for temporal consistency checking

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{check, completions, compose, table};
use config::Config;
use output::OutputFormat;
use tlink_core::CompositionTable;

#[derive(Parser)]
#[command(name = "tlink")]
#[command(author, version, about = "Consistency checking for temporal relations with Allen's interval algebra")]
pub struct Cli {
    /// Composition table file (default: built-in Allen table)
    #[arg(short, long, env = "TLINK_TABLE", global = true)]
    pub table: Option<PathBuf>,

    /// Output format: text, json
    #[arg(short, long, global = true)]
    pub format: Option<String>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check a file of assertions and print the path-consistent closure
    Check(check::CheckArgs),
    /// Compose two relation sets
    Compose(compose::ComposeArgs),
    /// Invert a relation set
    Inverse(compose::InverseArgs),
    /// Inspect a composition table
    Table(table::TableArgs),
    /// Manage configuration
    Config(commands::config::ConfigArgs),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Application context resolved from flags, environment and config file
pub struct AppContext {
    pub format: OutputFormat,
    table_path: Option<PathBuf>,
}

impl AppContext {
    pub fn new(cli: &Cli) -> Self {
        let config = Config::load();
        let table_path = cli.table.clone().or_else(|| config.table.clone());
        let format = cli
            .format
            .as_deref()
            .or(config.format.as_deref())
            .map(OutputFormat::from)
            .unwrap_or(OutputFormat::Text);

        Self { format, table_path }
    }

    /// Where the composition table comes from, for display
    pub fn table_source(&self) -> String {
        self.table_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "built-in".to_string())
    }

    /// Load the configured composition table
    pub fn load_table(&self) -> anyhow::Result<Arc<CompositionTable>> {
        let table = match &self.table_path {
            Some(path) => CompositionTable::from_path(path)
                .with_context(|| format!("Failed to load composition table from {}", path.display()))?,
            None => {
                tracing::debug!("Using built-in composition table");
                CompositionTable::canonical()
            }
        };
        Ok(Arc::new(table))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    tracing::debug!("Starting tlink CLI");

    let ctx = AppContext::new(&cli);

    match &cli.command {
        Commands::Check(args) => {
            if !check::run(args, &ctx)? {
                std::process::exit(2);
            }
        }
        Commands::Compose(args) => compose::run_compose(args, &ctx)?,
        Commands::Inverse(args) => compose::run_inverse(args, &ctx)?,
        Commands::Table(args) => table::run(args, &ctx)?,
        Commands::Config(args) => commands::config::run(args)?,
        Commands::Completions(args) => completions::run(args)?,
    }

    Ok(())
}
