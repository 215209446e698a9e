//! Planner configuration
//!
//! Loaded from `config.toml` in the platform config directory. Every field
//! has a default, so a missing file or an empty one is fine.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{DEFAULT_ROWS, DEFAULT_SEATS_PER_ROW};

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DATA_FILE_NAME: &str = "events.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Rows for new events when none are given
    #[serde(default = "default_rows")]
    pub default_rows: u32,
    /// Seats per row for new events when none are given
    #[serde(default = "default_seats_per_row")]
    pub default_seats_per_row: u32,
    /// Snapshot file; the platform data directory is used when unset
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_rows() -> u32 {
    DEFAULT_ROWS
}

fn default_seats_per_row() -> u32 {
    DEFAULT_SEATS_PER_ROW
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            default_rows: default_rows(),
            default_seats_per_row: default_seats_per_row(),
            data_file: None,
        }
    }
}

impl PlannerConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        if config.default_rows == 0 || config.default_seats_per_row == 0 {
            return Err(Error::InvalidOperation(
                "default grid dimensions must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Load from a file, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Snapshot path, resolved against the platform data directory
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join(DATA_FILE_NAME)),
        }
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join(CONFIG_FILE_NAME))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "onyx", "seatplan").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })
}
