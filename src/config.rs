use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::PlaybackError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub playback: PlaybackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub base_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Deployment-level sponsor integration switch; individual videos still
    /// carry their own `is_enabled` flag.
    #[serde(default = "default_true")]
    pub enable_sponsorblock: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from an explicit path. A missing file writes the defaults back
    /// so the user has something to edit.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = fs::read_to_string(path).context("Failed to read config file")?;
            let config: Config = toml::from_str(&contents).map_err(|e| {
                PlaybackError::Configuration(format!("invalid config at {path:?}: {e}"))
            })?;
            Ok(config)
        } else {
            info!("No config file found, using defaults");
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, contents).context("Failed to write config file")?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| PlaybackError::Configuration("no user config directory".to_string()))?;
        Ok(config_dir.join("playhead").join("config.toml"))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            enable_sponsorblock: default_true(),
        }
    }
}

fn default_true() -> bool {
    true
}
