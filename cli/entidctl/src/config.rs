//! Configuration management.
//!
//! Handles:
//! - Default shard count for routing commands
//! - Default output format

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Configuration file name.
const CONFIG_FILE: &str = "config.json";

/// Shard count used when neither flag, env, nor config sets one.
pub const DEFAULT_SHARDS: u32 = 16;

/// Get the config directory path.
fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "entid", "eid")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
}

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default number of shards for `eid shard`.
    #[serde(default = "default_shards")]
    pub shards: u32,

    /// Default output format (table or json).
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_shards() -> u32 {
    DEFAULT_SHARDS
}

fn default_format() -> String {
    "table".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            shards: default_shards(),
            format: default_format(),
        }
    }
}

impl Config {
    /// Load config from disk, or return default.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from disk, falling back to defaults if it cannot be read.
    ///
    /// For commands that only read settings; a broken config file should not
    /// stop them from working.
    pub fn load_or_default() -> Self {
        match config_dir() {
            Ok(dir) => Self::load_from_or_default(&dir.join(CONFIG_FILE)),
            Err(e) => {
                tracing::warn!(error = %e, "no config directory, using default config");
                Self::default()
            }
        }
    }

    /// Load config from a specific file, falling back to defaults if it cannot be read.
    pub fn load_from_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|e| {
            tracing::warn!(error = ?e, "ignoring unreadable config, using defaults");
            Self::default()
        })
    }

    /// Load config from a specific file, or return default if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Save config to disk.
    pub fn save(&self) -> Result<PathBuf> {
        let dir = config_dir()?;
        let path = dir.join(CONFIG_FILE);
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to a specific file, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))
    }

    /// The configured shard count, rejecting zero.
    pub fn shard_count(&self) -> Result<NonZeroU32, CliError> {
        NonZeroU32::new(self.shards).ok_or(CliError::InvalidShardCount(self.shards))
    }
}
