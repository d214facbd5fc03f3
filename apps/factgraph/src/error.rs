//! # Application Errors
//!
//! Errors raised by the CLI layer. Store and file errors come from
//! `factgraph-core` unchanged.

use factgraph_core::FactError;
use thiserror::Error;

/// Errors that end a CLI run with a non-zero exit code.
#[derive(Debug, Error)]
pub enum AppError {
    /// An error from the core engine.
    #[error(transparent)]
    Fact(#[from] FactError),

    /// The config file could not be read or parsed.
    #[error("Invalid config '{path}': {message}")]
    Config { path: String, message: String },

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}
