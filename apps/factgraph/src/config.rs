//! # Configuration
//!
//! Optional TOML configuration for the factgraph CLI.
//!
//! ```toml
//! log_format = "json"     # "text" (default) or "json"
//! json_mode = false       # print results as JSON
//! data = ["facts.nt"]     # files imported before every command
//! ```
//!
//! Precedence: command-line flags, then `FACTGRAPH_LOG_FORMAT` (log format
//! only), then the config file, then defaults.

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "FACTGRAPH_LOG_FORMAT";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse a format name; anything other than `json` is text.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }

    /// Format selected by [`LOG_FORMAT_ENV`], if set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        std::env::var(LOG_FORMAT_ENV).ok().map(|v| Self::parse(&v))
    }
}

/// Settings read from a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Log output format.
    pub log_format: LogFormat,
    /// Print command results as JSON.
    pub json_mode: bool,
    /// Data files to import before running the command.
    pub data: Vec<PathBuf>,
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, AppError> {
        toml::from_str(text).map_err(|e| AppError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a config file.
    ///
    /// Relative `data` paths are resolved against the config file's directory.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let origin = path.display().to_string();
        let config_error = |message: String| AppError::Config {
            path: origin.clone(),
            message,
        };

        let metadata = std::fs::metadata(path).map_err(|e| config_error(e.to_string()))?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(config_error(format!(
                "file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let mut config = Self::from_toml_str(&text, &origin)?;

        let base = path.parent().unwrap_or(Path::new("."));
        for file in &mut config.data {
            if file.is_relative() {
                *file = base.join(&*file);
            }
        }

        Ok(config)
    }
}
