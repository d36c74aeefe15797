//! Application configuration loaded from `stardust.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::follower::FollowerConfig;
use crate::preset::TrailPreset;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub preset: TrailPreset,
    pub follower: FollowerConfig,
    pub data_path: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            preset: TrailPreset::default(),
            follower: FollowerConfig::default(),
            data_path: PathBuf::from("data/projects.json"),
        }
    }
}

impl AppConfig {
    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            info!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        let config = toml::from_str(&text)?;
        info!("config loaded from {}", path.display());
        Ok(config)
    }
}
