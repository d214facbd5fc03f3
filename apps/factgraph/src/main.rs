//! # factgraph
//!
//! The main binary for the factgraph fact store.
//!
//! ## Usage
//!
//! ```bash
//! # Import and report diagnostics
//! factgraph import -f facts.nt
//!
//! # Query against preloaded data
//! factgraph -d facts.nt query "Harvard locatedIn ?."
//! factgraph -d facts.nt query-file -f queries.nt
//!
//! # Interactive
//! factgraph -d facts.nt shell
//! ```

use clap::Parser;
use factgraph::cli;
use factgraph::config::{Config, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    let config = match cli.config.as_deref().map(Config::load).transpose() {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            init_tracing(LogFormat::from_env().unwrap_or_default(), cli.verbose);
            tracing::error!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // FACTGRAPH_LOG_FORMAT=json enables machine-parseable output.
    init_tracing(
        LogFormat::from_env().unwrap_or(config.log_format),
        cli.verbose,
    );

    // Execute command
    if let Err(e) = cli::execute(cli, &config) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing on stderr; stdout carries command output.
fn init_tracing(format: LogFormat, verbose: bool) {
    let default_filter = if verbose {
        "factgraph=debug"
    } else {
        "factgraph=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}
