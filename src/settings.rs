//! Game settings
//!
//! Loaded from an optional JSON file; every field falls back to its default.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PlayArea;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical play area all positions are measured in
    pub play_area: PlayArea,
    /// Simulation tick cadence (milliseconds)
    pub sim_interval_ms: u64,
    /// Spawn tick cadence (milliseconds)
    pub spawn_interval_ms: u64,
    /// RNG seed; a time-based seed is used when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            play_area: PlayArea::default(),
            sim_interval_ms: SIM_INTERVAL_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// Read and validate settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|error| SettingsError::Io {
            path: path.to_path_buf(),
            error,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json).map_err(SettingsError::Parse)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(SettingsError::Parse)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.sim_interval_ms == 0 {
            return Err(SettingsError::Invalid("sim_interval_ms must be positive".into()));
        }
        if self.spawn_interval_ms == 0 {
            return Err(SettingsError::Invalid("spawn_interval_ms must be positive".into()));
        }
        let area = self.play_area;
        if area.width <= 2 * SPAWN_EDGE_MARGIN || area.width < BASKET_WIDTH {
            return Err(SettingsError::Invalid(format!(
                "play area width {} is too narrow",
                area.width
            )));
        }
        if area.height <= BASKET_HEIGHT + BASKET_BOTTOM_MARGIN {
            return Err(SettingsError::Invalid(format!(
                "play area height {} is too short",
                area.height
            )));
        }
        Ok(())
    }

    pub fn sim_interval(&self) -> Duration {
        Duration::from_millis(self.sim_interval_ms)
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }
}

/// Errors that can occur while loading settings.
#[derive(Debug)]
pub enum SettingsError {
    /// The settings file could not be read.
    Io { path: PathBuf, error: std::io::Error },
    /// The settings file was not valid JSON for `Settings`.
    Parse(serde_json::Error),
    /// The settings parsed but describe an unplayable session.
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, error } => {
                write!(f, "could not read settings '{}': {error}", path.display())
            }
            Self::Parse(error) => write!(f, "could not parse settings: {error}"),
            Self::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { error, .. } => Some(error),
            Self::Parse(error) => Some(error),
            Self::Invalid(_) => None,
        }
    }
}
