//! Game settings and preferences
//!
//! Persisted as JSON next to the executable's working directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PersistenceError, Result};
use crate::highscores::DEFAULT_SCORE_FILE;

/// Default settings file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,

    // === Visual Effects ===
    /// Camera shake on kills and hits
    pub screen_shake: bool,

    // === Accessibility ===
    /// Reduced motion (disables shake)
    pub reduced_motion: bool,

    // === Persistence ===
    /// Score log path
    pub score_file: PathBuf,

    /// Fixed RNG seed; random when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            screen_shake: true,
            reduced_motion: false,
            score_file: PathBuf::from(DEFAULT_SCORE_FILE),
            seed: None,
        }
    }
}

impl Settings {
    /// Effective screen shake (respects reduced_motion)
    pub fn effective_screen_shake(&self) -> bool {
        self.screen_shake && !self.reduced_motion
    }

    /// Effective effect volume
    pub fn sfx_gain(&self) -> f32 {
        self.master_volume * self.sfx_volume
    }

    /// Effective music volume
    pub fn music_gain(&self) -> f32 {
        self.master_volume * self.music_volume
    }

    /// Clamp volumes into range after loading
    fn sanitized(mut self) -> Self {
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    pub fn try_load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| PersistenceError::io(path, e))?;
        let settings: Self =
            serde_json::from_str(&json).map_err(|e| PersistenceError::json(path, e))?;
        Ok(settings.sanitized())
    }

    /// Load settings, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) if e.is_not_found() => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    pub fn try_save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| PersistenceError::json(path, e))?;
        std::fs::write(path, json).map_err(|e| PersistenceError::io(path, e))
    }

    pub fn save(&self, path: &Path) {
        match self.try_save(path) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Settings not saved: {e}"),
        }
    }
}
