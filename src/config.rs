//! # Configuration Persistence
//!
//! User configuration stored in `~/.config/daoscope/config.json`.
//!
//! Every setting has a default and the file is optional; command-line flags
//! override whatever is loaded. The `directories` crate resolves the
//! platform-appropriate config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted user configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Tab shown on startup.
    #[serde(default = "default_tab")]
    pub default_tab: String,
    /// Log destination; logging is disabled when unset.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Simulated provider latency in milliseconds.
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
}

fn default_tab() -> String {
    "overview".to_string()
}

fn default_latency_ms() -> u64 {
    150
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_tab: default_tab(),
            log_file: None,
            latency_ms: default_latency_ms(),
        }
    }
}

impl Config {
    /// Load configuration from disk. Returns `Config::default()` if the file
    /// does not exist or cannot be parsed.
    pub fn load() -> Self {
        Self::try_load().unwrap_or_default()
    }

    fn try_load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    /// Load configuration from a specific path. Returns `Config::default()` if
    /// the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    fn config_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "daoscope")
            .context("Could not determine config directory")?;
        Ok(dirs.config_dir().join("config.json"))
    }
}
