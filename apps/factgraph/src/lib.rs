//! # factgraph
//!
//! Command-line front end for `factgraph-core`.
//!
//! - `cli` - clap command definitions and implementations
//! - `config` - optional TOML configuration
//! - `error` - application error type

pub mod cli;
pub mod config;
pub mod error;
