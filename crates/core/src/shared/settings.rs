use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::detection::domain::heuristic_thresholds::{HeuristicThresholds, ThresholdError};
use crate::shared::constants::{DEFAULT_WORKERS, SETTINGS_DIR_NAME, SETTINGS_FILE_NAME};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid thresholds in {path}: {source}")]
    Thresholds {
        path: PathBuf,
        #[source]
        source: ThresholdError,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode settings: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Persisted tuning for the presence check.
///
/// Missing fields fall back to their defaults, so a file only needs to name
/// what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub thresholds: HeuristicThresholds,
    pub workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            thresholds: HeuristicThresholds::default(),
            workers: DEFAULT_WORKERS,
        }
    }
}

impl Settings {
    /// `<config_dir>/presence-check/settings.json`, when the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads settings from the default location, falling back to defaults
    /// when the file is absent or unusable.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("Ignoring settings: {e}");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Settings =
            serde_json::from_str(&json).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        settings
            .thresholds
            .validate()
            .map_err(|source| SettingsError::Thresholds {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| SettingsError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(SettingsError::Encode)?;
        fs::write(path, json).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}
