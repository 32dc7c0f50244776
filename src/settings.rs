//! Presentation settings and preferences
//!
//! Persisted separately from tuning. None of these affect the simulation.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Presentation settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Overlay text (sp) ===
    /// "Score: N" label size
    pub score_text_size: f32,
    /// "Game Over" title size
    pub game_over_text_size: f32,
    /// "Tap to try again" hint size
    pub retry_text_size: f32,
    /// Scaled pixels per sp on the target display
    pub scaled_density: f32,

    // === Frame loop ===
    /// Frame cap; `None` runs the loop unpaced
    pub target_fps: Option<u32>,

    // === HUD ===
    /// Show FPS counter
    pub show_fps: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            score_text_size: 28.0,
            game_over_text_size: 32.0,
            retry_text_size: 20.0,
            scaled_density: 1.0,

            target_fps: Some(60),

            show_fps: false,
        }
    }
}

impl Settings {
    /// Convert density-independent units to pixels
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.scaled_density
    }

    /// Minimum wall time per loop iteration, if capped
    pub fn frame_budget(&self) -> Option<Duration> {
        self.target_fps
            .filter(|&fps| fps > 0)
            .map(|fps| Duration::from_secs_f64(1.0 / fps as f64))
    }

    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = serde_json::from_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                log::info!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved");
        Ok(())
    }
}
