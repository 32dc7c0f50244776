//! Data-driven game balance
//!
//! Every tunable the simulation reads lives in [`Tuning`]. A tuning file may
//! name only the fields it wants to override; the rest keep their defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// How gravity and velocity are integrated each tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Integration {
    /// Gravity and velocity are applied once per tick, ignoring dt.
    /// Game feel depends on the loop's frame rate.
    #[default]
    PerFrame,
    /// Gravity and displacement are multiplied by `dt * reference_hz`, so the
    /// per-frame tunables keep their meaning at `reference_hz`.
    Scaled { reference_hz: f32 },
}

impl Integration {
    /// Multiplier applied to gravity and velocity for a tick of `dt` seconds
    pub fn step_scale(&self, dt: f32) -> f32 {
        match *self {
            Integration::PerFrame => 1.0,
            Integration::Scaled { reference_hz } => dt * reference_hz,
        }
    }
}

/// Source dimensions of a sprite, used only for aspect ratios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Sprite metrics the scaling rules derive bird and pipe sizes from.
/// `None` means the sprite is missing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteMetrics {
    pub pipe: Option<SpriteSize>,
    pub bird: Option<SpriteSize>,
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self {
            pipe: Some(SpriteSize::new(52.0, 320.0)),
            bird: Some(SpriteSize::new(34.0, 24.0)),
        }
    }
}

#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Game balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Velocity added per tick (px)
    pub gravity: f32,
    /// Velocity set by a flap (negative is upward)
    pub flap_impulse: f32,
    /// Horizontal pipe movement per tick (px)
    pub pipe_speed: f32,
    /// Gap between the top and bottom pipe (px)
    pub gap_size: f32,
    /// Bird width relative to the scaled pipe width
    pub bird_to_pipe_width_ratio: f32,
    /// Pipe height relative to the viewport height
    pub pipe_height_ratio: f32,
    /// Margin of the gap-center range relative to the viewport height
    pub gap_margin_ratio: f32,
    pub sprites: SpriteMetrics,
    pub integration: Integration,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            flap_impulse: FLAP_IMPULSE,
            pipe_speed: PIPE_SPEED,
            gap_size: GAP_SIZE,
            bird_to_pipe_width_ratio: BIRD_TO_PIPE_WIDTH_RATIO,
            pipe_height_ratio: PIPE_HEIGHT_RATIO,
            gap_margin_ratio: GAP_MARGIN_RATIO,
            sprites: SpriteMetrics::default(),
            integration: Integration::PerFrame,
        }
    }
}

impl Tuning {
    /// Parse and validate a (possibly partial) JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load a tuning file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| TuningError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let finite = [
            ("gravity", self.gravity),
            ("flap_impulse", self.flap_impulse),
            ("pipe_speed", self.pipe_speed),
            ("gap_size", self.gap_size),
            ("bird_to_pipe_width_ratio", self.bird_to_pipe_width_ratio),
            ("pipe_height_ratio", self.pipe_height_ratio),
            ("gap_margin_ratio", self.gap_margin_ratio),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be finite",
                });
            }
        }

        let positive = [
            ("pipe_speed", self.pipe_speed),
            ("gap_size", self.gap_size),
            ("bird_to_pipe_width_ratio", self.bird_to_pipe_width_ratio),
            ("pipe_height_ratio", self.pipe_height_ratio),
        ];
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(TuningError::Invalid {
                    field,
                    reason: "must be positive",
                });
            }
        }

        if !(0.0..0.5).contains(&self.gap_margin_ratio) {
            return Err(TuningError::Invalid {
                field: "gap_margin_ratio",
                reason: "must be in [0, 0.5)",
            });
        }

        for (field, sprite) in [("sprites.pipe", self.sprites.pipe), ("sprites.bird", self.sprites.bird)] {
            if let Some(size) = sprite {
                if !(size.width > 0.0 && size.height > 0.0) {
                    return Err(TuningError::Invalid {
                        field,
                        reason: "sprite dimensions must be positive",
                    });
                }
            }
        }

        if let Integration::Scaled { reference_hz } = self.integration {
            if !(reference_hz.is_finite() && reference_hz > 0.0) {
                return Err(TuningError::Invalid {
                    field: "integration.reference_hz",
                    reason: "must be positive",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_values() {
        let tuning = Tuning::default();
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.flap_impulse, -10.0);
        assert_eq!(tuning.pipe_speed, 6.0);
        assert_eq!(tuning.gap_size, 450.0);
        assert_eq!(tuning.bird_to_pipe_width_ratio, 0.4);
        assert_eq!(tuning.integration, Integration::PerFrame);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn test_partial_json_overrides_only_named_fields() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "gap_size": 300 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.gap_size, 300.0);
        assert_eq!(tuning.pipe_speed, PIPE_SPEED);
        assert_eq!(tuning.sprites, SpriteMetrics::default());
    }

    #[test]
    fn test_scaled_integration_parses() {
        let tuning =
            Tuning::from_json(r#"{ "integration": { "mode": "scaled", "reference_hz": 60 } }"#)
                .unwrap();
        assert_eq!(tuning.integration, Integration::Scaled { reference_hz: 60.0 });
        assert!((tuning.integration.step_scale(1.0 / 30.0) - 2.0).abs() < 1e-5);
        assert_eq!(Integration::PerFrame.step_scale(0.5), 1.0);
    }

    #[test]
    fn test_rejects_non_positive_gap() {
        let err = Tuning::from_json(r#"{ "gap_size": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_size", .. }));
    }

    #[test]
    fn test_rejects_bad_margin() {
        let err = Tuning::from_json(r#"{ "gap_margin_ratio": 0.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "gap_margin_ratio", .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        assert!(matches!(
            Tuning::from_json("{ gravity: }"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Tuning::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, TuningError::Io { .. }));
    }
}
