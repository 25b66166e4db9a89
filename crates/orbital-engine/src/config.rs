//! Configuration types for the orbital engine.
//!
//! This module defines the tunable parameters of the orbit: track radius,
//! depth-cue ranges and the rotation clock.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::geometry::MAX_ANGLE_PRECISION;

/// Directory (relative to the working directory) searched for a config file.
pub const CONFIG_DIR: &str = ".orbital";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration for the orbital engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrbitalConfig {
    /// Radius of the orbital track, in layout units.
    #[serde(default = "default_radius")]
    pub radius: f64,

    /// Degrees advanced per rotation tick.
    #[serde(default = "default_step_deg")]
    pub step_deg: f64,

    /// Milliseconds between rotation ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Decimal places kept when the angle is advanced.
    #[serde(default = "default_angle_precision")]
    pub angle_precision: u32,

    /// Opacity of nodes at the back and front of the ring.
    #[serde(default = "default_opacity_range")]
    pub opacity: Range,

    /// Scale of nodes at the back and front of the ring.
    #[serde(default = "default_scale_range")]
    pub scale: Range,

    /// Z-order given to the expanded node so it draws above everything.
    #[serde(default = "default_focused_z_order")]
    pub focused_z_order: i32,

    /// Base hit radius of a node, in layout units (multiplied by its scale).
    #[serde(default = "default_hit_radius")]
    pub hit_radius: f64,
}

/// Closed numeric interval used by the depth-cue maps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Linear map of `t` in [0, 1] into the range, clamped.
    pub fn lerp(&self, t: f64) -> f64 {
        (self.min + (self.max - self.min) * t).clamp(self.min, self.max)
    }
}

fn default_radius() -> f64 {
    280.0
}

fn default_step_deg() -> f64 {
    0.3
}

fn default_tick_interval_ms() -> u64 {
    50
}

fn default_angle_precision() -> u32 {
    3
}

fn default_opacity_range() -> Range {
    Range::new(0.5, 1.0)
}

fn default_scale_range() -> Range {
    Range::new(0.85, 1.15)
}

fn default_focused_z_order() -> i32 {
    200
}

fn default_hit_radius() -> f64 {
    40.0
}

impl Default for OrbitalConfig {
    fn default() -> Self {
        Self {
            radius: default_radius(),
            step_deg: default_step_deg(),
            tick_interval_ms: default_tick_interval_ms(),
            angle_precision: default_angle_precision(),
            opacity: default_opacity_range(),
            scale: default_scale_range(),
            focused_z_order: default_focused_z_order(),
            hit_radius: default_hit_radius(),
        }
    }
}

impl OrbitalConfig {
    /// Load configuration from a file and validate it.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `.orbital/config.json` under `root` if present, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self, ConfigError> {
        let path = root.join(CONFIG_DIR).join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "radius must be positive, got {}",
                self.radius
            )));
        }
        if !(self.step_deg.is_finite() && self.step_deg > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "step_deg must be positive, got {}",
                self.step_deg
            )));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be at least 1".into(),
            ));
        }
        if self.angle_precision > MAX_ANGLE_PRECISION {
            return Err(ConfigError::Invalid(format!(
                "angle_precision must be at most {MAX_ANGLE_PRECISION}, got {}",
                self.angle_precision
            )));
        }
        for (name, range) in [("opacity", self.opacity), ("scale", self.scale)] {
            if !(range.min.is_finite() && range.max.is_finite()) || range.min > range.max {
                return Err(ConfigError::Invalid(format!(
                    "{name} range is inverted or not finite: {}..{}",
                    range.min, range.max
                )));
            }
        }
        if !(self.hit_radius.is_finite() && self.hit_radius >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "hit_radius must not be negative, got {}",
                self.hit_radius
            )));
        }
        Ok(())
    }

    /// Interval between rotation ticks.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Config parsed but holds unusable values.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = OrbitalConfig::default();
        assert!((config.radius - 280.0).abs() < f64::EPSILON);
        assert!((config.step_deg - 0.3).abs() < f64::EPSILON);
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.angle_precision, 3);
        assert_eq!(config.focused_z_order, 200);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_range_lerp_clamps() {
        let range = Range::new(0.5, 1.0);
        assert!((range.lerp(0.0) - 0.5).abs() < 1e-12);
        assert!((range.lerp(0.5) - 0.75).abs() < 1e-12);
        assert!((range.lerp(1.0) - 1.0).abs() < 1e-12);
        assert!((range.lerp(2.0) - 1.0).abs() < 1e-12);
        assert!((range.lerp(-1.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: OrbitalConfig = serde_json::from_str(r#"{"radius": 120.0}"#).unwrap();
        assert!((config.radius - 120.0).abs() < f64::EPSILON);
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.scale, Range::new(0.85, 1.15));
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);

        let config = OrbitalConfig {
            step_deg: 1.5,
            tick_interval_ms: 20,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = OrbitalConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_discover_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let config = OrbitalConfig::discover(dir.path()).unwrap();
        assert_eq!(config, OrbitalConfig::default());
    }

    #[test]
    fn test_discover_reads_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_DIR).join(CONFIG_FILE);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"step_deg": 2.0}"#).unwrap();

        let config = OrbitalConfig::discover(dir.path()).unwrap();
        assert!((config.step_deg - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_radius = OrbitalConfig {
            radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(bad_radius.validate(), Err(ConfigError::Invalid(_))));

        let bad_interval = OrbitalConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(bad_interval.validate(), Err(ConfigError::Invalid(_))));

        let inverted = OrbitalConfig {
            scale: Range::new(1.2, 0.8),
            ..Default::default()
        };
        let err = inverted.validate().unwrap_err();
        assert!(err.to_string().contains("scale"));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            OrbitalConfig::load(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
