//! Filesystem dataset operations.
//!
//! Handles reading the StatsBomb source files and writing derived tables:
//! - Match catalog (one JSON array)
//! - Per-match event logs (`events/{match_id}.json`)
//! - JSONL exports of derived tables

mod json;
mod jsonl;

pub use json::*;
pub use jsonl::*;

use std::path::PathBuf;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::MatchId;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Unknown event type '{name}' (event {event_id})")]
    UnknownEventType { event_id: String, name: String },

    #[error("Malformed record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },
}

/// Configuration for dataset paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub matches_file: PathBuf,
    pub events_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            matches_file: PathBuf::from("matches/43.json"),
            events_dir: PathBuf::from("events"),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            data_dir: config.data_dir.clone(),
            matches_file: config.dataset.matches_file.clone(),
            events_dir: config.dataset.events_dir.clone(),
        }
    }

    pub fn matches_path(&self) -> PathBuf {
        self.data_dir.join(&self.matches_file)
    }

    pub fn events_dir(&self) -> PathBuf {
        self.data_dir.join(&self.events_dir)
    }

    pub fn event_path(&self, match_id: MatchId) -> PathBuf {
        self.events_dir().join(format!("{}.json", match_id))
    }

    pub fn derived_dir(&self) -> PathBuf {
        self.data_dir.join("derived")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
