//! Game settings
//!
//! Optional JSON file; anything missing takes its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay settings for a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Level number a new run starts on (1-based)
    pub starting_level: usize,
    /// Lives the player gets on every level load
    pub initial_lives: u32,
    /// Largest delta-time fed to one update (seconds)
    pub max_frame_dt: f32,
    /// Score per coin
    pub coin_value: u64,
    /// Falling below this world Y ends the run
    pub fall_limit_y: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            starting_level: 1,
            initial_lives: PLAYER_INITIAL_LIVES,
            max_frame_dt: MAX_FRAME_DT,
            coin_value: COIN_VALUE,
            fall_limit_y: FALL_LIMIT_Y,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults when there is no file or it is unusable
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.initial_lives == 0 {
            return Err(SettingsError::Invalid {
                field: "initial_lives",
                reason: "must be at least 1",
            });
        }
        if self.max_frame_dt.is_nan() || self.max_frame_dt <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "max_frame_dt",
                reason: "must be positive",
            });
        }
        Ok(())
    }
}
