//! Game tuning
//!
//! Every gameplay constant lives here so balance can be adjusted from a
//! JSON file without a rebuild. Missing fields fall back to the defaults in
//! [`crate::consts`].

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors raised while loading or validating tuning
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read tuning file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed tuning json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Fixed simulation step (s)
    pub fixed_delta: f64,
    pub viewport: Vec2,
    pub scroll_speed: f32,

    // === Hero ===
    pub hero_start: Vec2,
    pub hero_radius: f32,
    pub hero_mass: f32,
    pub hero_inertia: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    pub jump_angular_impulse: f32,
    pub freefall_delay: f64,
    pub freefall_angular_impulse: f32,
    /// Rotation limits in degrees
    pub rotation_limits_deg: (f32, f32),
    pub angular_velocity_limits: (f32, f32),
    pub max_fall_speed: f32,
    pub death_rotation_deg: f32,
    pub flap_duration: f64,

    // === Ground ===
    pub ground_tile_width: f32,
    pub ground_height: f32,
    pub ground_tile_count: usize,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_gap: f32,
    pub obstacle_column_height: f32,
    pub spawn_interval: f64,
    pub spawn_x: f32,
    /// Vertical band the gap centre is drawn from
    pub spawn_y_range: (f32, f32),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fixed_delta: FIXED_DELTA,
            viewport: Vec2::new(VIEWPORT_WIDTH, VIEWPORT_HEIGHT),
            scroll_speed: SCROLL_SPEED,

            hero_start: Vec2::new(HERO_START_X, HERO_START_Y),
            hero_radius: HERO_RADIUS,
            hero_mass: HERO_MASS,
            hero_inertia: HERO_INERTIA,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
            jump_angular_impulse: JUMP_ANGULAR_IMPULSE,
            freefall_delay: FREEFALL_DELAY,
            freefall_angular_impulse: FREEFALL_ANGULAR_IMPULSE,
            rotation_limits_deg: (ROTATION_MIN_DEG, ROTATION_MAX_DEG),
            angular_velocity_limits: (ANGULAR_VELOCITY_MIN, ANGULAR_VELOCITY_MAX),
            max_fall_speed: MAX_FALL_SPEED,
            death_rotation_deg: DEATH_ROTATION_DEG,
            flap_duration: FLAP_DURATION,

            ground_tile_width: GROUND_TILE_WIDTH,
            ground_height: GROUND_HEIGHT,
            ground_tile_count: GROUND_TILE_COUNT,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_gap: OBSTACLE_GAP,
            obstacle_column_height: OBSTACLE_COLUMN_HEIGHT,
            spawn_interval: SPAWN_INTERVAL,
            spawn_x: SPAWN_X,
            spawn_y_range: (SPAWN_Y_MIN, SPAWN_Y_MAX),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, filling missing fields with defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            Err(ConfigError::Invalid { field, reason })
        }

        // Written as `!(x > 0.0)` so NaN is rejected too
        let positive = [
            ("fixed_delta", self.fixed_delta),
            ("spawn_interval", self.spawn_interval),
            ("scroll_speed", self.scroll_speed as f64),
            ("hero_mass", self.hero_mass as f64),
            ("hero_inertia", self.hero_inertia as f64),
            ("max_fall_speed", self.max_fall_speed as f64),
            ("ground_tile_width", self.ground_tile_width as f64),
            ("obstacle_width", self.obstacle_width as f64),
            ("obstacle_gap", self.obstacle_gap as f64),
        ];
        if let Some((field, _)) = positive.iter().find(|(_, value)| !(*value > 0.0)) {
            return invalid(*field, "must be positive");
        }
        if !(self.gravity >= 0.0) {
            return invalid("gravity", "must not be negative");
        }
        if self.ground_tile_count == 0 {
            return invalid("ground_tile_count", "must be at least 1");
        }

        let ranges = [
            ("rotation_limits_deg", self.rotation_limits_deg),
            ("angular_velocity_limits", self.angular_velocity_limits),
            ("spawn_y_range", self.spawn_y_range),
        ];
        if let Some((field, _)) = ranges.iter().find(|(_, (min, max))| !(min <= max)) {
            return invalid(*field, "min exceeds max");
        }
        Ok(())
    }

    /// Rotation limits converted to radians
    pub fn rotation_limits(&self) -> (f32, f32) {
        (
            self.rotation_limits_deg.0.to_radians(),
            self.rotation_limits_deg.1.to_radians(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert!((tuning.fixed_delta - 1.0 / 60.0).abs() < 1e-12);
        assert_eq!(tuning.spawn_y_range, (234.0, 382.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 150.0 }"#).unwrap();
        assert_eq!(tuning.scroll_speed, 150.0);
        assert_eq!(tuning.jump_impulse, JUMP_IMPULSE);
    }

    #[test]
    fn test_inverted_limits_rejected() {
        let err = Tuning::from_json(r#"{ "rotation_limits_deg": [30.0, -35.0] }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "rotation_limits_deg",
                ..
            }
        ));
    }

    #[test]
    fn test_non_positive_values_rejected() {
        for (json, expected) in [
            (r#"{ "scroll_speed": 0.0 }"#, "scroll_speed"),
            (r#"{ "scroll_speed": -100.0 }"#, "scroll_speed"),
            (r#"{ "obstacle_gap": 0.0 }"#, "obstacle_gap"),
            (r#"{ "max_fall_speed": -1.0 }"#, "max_fall_speed"),
            (r#"{ "hero_mass": 0.0 }"#, "hero_mass"),
            (r#"{ "gravity": -600.0 }"#, "gravity"),
            (r#"{ "ground_tile_count": 0 }"#, "ground_tile_count"),
        ] {
            match Tuning::from_json(json) {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected),
                other => panic!("{json} accepted: {other:?}"),
            }
        }
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning {
            spawn_interval: f64::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "spawn_interval",
                ..
            })
        ));

        let tuning = Tuning {
            spawn_y_range: (f32::NAN, 382.0),
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid {
                field: "spawn_y_range",
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Tuning::load("/nonexistent/wabbit-tuning.json").unwrap_err();
        assert!(err.to_string().contains("wabbit-tuning.json"));
    }

    #[test]
    fn test_rotation_limits_in_radians() {
        let (min, max) = Tuning::default().rotation_limits();
        assert!((min - (-35.0f32).to_radians()).abs() < 1e-6);
        assert!((max - 30.0f32.to_radians()).abs() < 1e-6);
    }
}
