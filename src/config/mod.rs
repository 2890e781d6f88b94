//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::Stage;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Dataset layout and windowing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Match catalog file, relative to the data directory
    #[serde(default = "default_matches_file")]
    pub matches_file: PathBuf,

    /// Directory holding one `{match_id}.json` event log per match
    #[serde(default = "default_events_dir")]
    pub events_dir: PathBuf,

    /// Events at or past this minute are dropped (extra-time shootouts)
    #[serde(default = "default_max_minute")]
    pub max_minute: u32,

    /// Number of matches per stage, in tournament order
    #[serde(default = "default_stage_counts")]
    pub stage_counts: [usize; Stage::COUNT],
}

fn default_matches_file() -> PathBuf {
    PathBuf::from("matches/43.json")
}

fn default_events_dir() -> PathBuf {
    PathBuf::from("events")
}

fn default_max_minute() -> u32 {
    120
}

fn default_stage_counts() -> [usize; Stage::COUNT] {
    [47, 8, 4, 2, 1, 1]
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            matches_file: default_matches_file(),
            events_dir: default_events_dir(),
            max_minute: default_max_minute(),
            stage_counts: default_stage_counts(),
        }
    }
}

impl DatasetConfig {
    /// Total number of matches the stage layout expects.
    pub fn expected_matches(&self) -> usize {
        self.stage_counts.iter().sum()
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dataset: DatasetConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            server: ServerConfig::default(),
            dataset: DatasetConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &PathBuf) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        if self.dataset.max_minute == 0 {
            return Err(ConfigError::ValidationError(
                "max_minute must be greater than 0".to_string(),
            ));
        }

        if self.dataset.expected_matches() == 0 {
            return Err(ConfigError::ValidationError(
                "stage_counts must cover at least one match".to_string(),
            ));
        }

        Ok(())
    }
}
