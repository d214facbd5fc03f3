//! # factgraph CLI Module
//!
//! This module implements the CLI interface for factgraph.
//!
//! The store lives for one process run: data files given with `--data` (or
//! listed in the config file) are imported first, then the command runs.
//!
//! ## Available Commands
//!
//! - `import` - Import `.nt` files and report per-line diagnostics
//! - `query` - Run one query line
//! - `query-file` - Run every line of a `.nt` query file
//! - `shell` - Read query lines from stdin
//! - `export` - Write the loaded store as a `.nt` file
//! - `status` - Show store metrics

mod commands;

use crate::config::Config;
use crate::error::AppError;
use clap::{Parser, Subcommand};
use factgraph_core::FactStore;
use std::io::{self, Write};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// factgraph - subject/predicate/object fact store
///
/// Import triples from `.nt` files and answer wildcard pattern queries such
/// as `Harvard locatedIn ?.`
#[derive(Parser, Debug)]
#[command(name = "factgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress import summaries
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Data file to import before running the command (repeatable)
    #[arg(short = 'd', long = "data", global = true)]
    pub data: Vec<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import triples from one or more .nt files
    Import {
        /// Path to a .nt file (repeatable)
        #[arg(short, long, required = true)]
        file: Vec<PathBuf>,
    },

    /// Run a single query, e.g. "Harvard locatedIn ?."
    Query {
        /// Query tokens; quote the line or pass the three tokens separately
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Run every line of a .nt query file
    QueryFile {
        /// Path to the query file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Read query lines from stdin until EOF
    Shell,

    /// Export the loaded store as a .nt file
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Show store metrics
    Status,
}

/// Options shared by every command after config and flags are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    pub json_mode: bool,
    pub quiet: bool,
    /// Config data files first, then `--data` files.
    pub data: Vec<PathBuf>,
}

impl Settings {
    /// Merge config file values with command-line flags.
    #[must_use]
    pub fn merge(cli: &Cli, config: &Config) -> Self {
        let mut data = config.data.clone();
        data.extend(cli.data.iter().cloned());
        Self {
            json_mode: cli.json_mode || config.json_mode,
            quiet: cli.quiet,
            data,
        }
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments, writing results to stdout.
pub fn execute(cli: Cli, config: &Config) -> Result<(), AppError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run(cli, config, &mut out)?;
    out.flush()?;
    Ok(())
}

/// Execute the CLI against an arbitrary writer.
pub fn run(cli: Cli, config: &Config, out: &mut dyn Write) -> Result<(), AppError> {
    let settings = Settings::merge(&cli, config);
    let mut store = FactStore::new();
    preload(&mut store, &settings)?;

    match cli.command {
        Some(Commands::Import { file }) => cmd_import(&mut store, &file, &settings, out),
        Some(Commands::Query { query }) => cmd_query(&mut store, &query.join(" "), &settings, out),
        Some(Commands::QueryFile { file }) => cmd_query_file(&mut store, &file, &settings, out),
        Some(Commands::Shell) => {
            let stdin = io::stdin();
            cmd_shell(&mut store, stdin.lock(), &settings, out)
        }
        Some(Commands::Export { output }) => cmd_export(&store, &output, &settings, out),
        Some(Commands::Status) | None => cmd_status(&store, &settings, out),
    }
}
