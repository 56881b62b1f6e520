//! Configuration management for perf-summary
//!
//! Config file location:
//! - Linux: ~/.config/perf-summary/config.toml
//! - macOS: ~/Library/Application Support/org.perf-summary.perf-summary/config.toml
//! - Windows: %APPDATA%/perf-summary/perf-summary/config/config.toml
//!
//! You can override the config location by setting `PERF_SUMMARY_CONFIG_PATH`.
//! A missing file means defaults; the tool never writes one on its own.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const CONFIG_PATH_ENV: &str = "PERF_SUMMARY_CONFIG_PATH";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input log settings
    #[serde(default)]
    pub input: InputConfig,
}

impl Config {
    /// Load configuration from file or fall back to defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

            Self::from_toml(&content).with_context(|| {
                format!("Failed to parse config from {}", config_path.display())
            })
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(PathBuf::from(trimmed));
            }
        }

        let proj_dirs = ProjectDirs::from("org", "perf-summary", "perf-summary")
            .context("Could not determine project directories")?;

        Ok(proj_dirs.config_dir().join("config.toml"))
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("shell_perf.log")
}

/// Input configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Log analyzed when no file is given on the command line.
    /// Relative paths resolve against the working directory.
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
        }
    }
}
