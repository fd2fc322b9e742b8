//! Field configuration.
//!
//! Loaded from a TOML file, every key optional. The defaults give 60
//! particles, links under 150 px at up to 40% opacity and a 50 px wrap
//! margin.

use crate::palette::Theme;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The file is not valid TOML or has a mistyped key.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Parsed, but the values make no sense.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Tunables for particle creation and link drawing.
///
/// Ranges are inclusive `[min, max]` pairs; `drift_speed` and
/// `angular_speed` are symmetric half-widths, so a particle's velocity on
/// each axis is drawn from `[-drift_speed, drift_speed]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
    pub particle_count: usize,
    pub link_distance: f32,
    pub link_opacity: f32,
    pub link_width: f32,
    pub wrap_margin: f32,
    pub display_radius: [f32; 2],
    pub drift_speed: f32,
    pub angular_speed: f32,
    pub orbit_radius: [f32; 2],
    pub theme: Theme,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: 60,
            link_distance: 150.0,
            link_opacity: 0.4,
            link_width: 0.5,
            wrap_margin: 50.0,
            display_radius: [1.0, 4.0],
            drift_speed: 0.25,
            angular_speed: 0.01,
            orbit_radius: [20.0, 70.0],
            theme: Theme::Dark,
        }
    }
}

impl FieldConfig {
    /// Reads, parses and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let cfg: FieldConfig = toml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::Invalid("particle_count must be at least 1".into()));
        }
        if !(self.link_distance.is_finite() && self.link_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "link_distance must be positive, got {}",
                self.link_distance
            )));
        }
        if !(0.0..=1.0).contains(&self.link_opacity) {
            return Err(ConfigError::Invalid(format!(
                "link_opacity must lie in [0, 1], got {}",
                self.link_opacity
            )));
        }
        check_non_negative("link_width", self.link_width)?;
        check_non_negative("wrap_margin", self.wrap_margin)?;
        check_half_width("drift_speed", self.drift_speed)?;
        check_half_width("angular_speed", self.angular_speed)?;
        check_range("display_radius", self.display_radius)?;
        check_range("orbit_radius", self.orbit_radius)?;
        Ok(())
    }
}

fn check_non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{name} must be a non-negative number, got {value}"
        )))
    }
}

/// A symmetric `[-value, value]` range; its full width must stay finite
/// for sampling.
fn check_half_width(name: &str, value: f32) -> Result<(), ConfigError> {
    check_non_negative(name, value)?;
    check_width(name, 2.0 * value)
}

fn check_range(name: &str, [min, max]: [f32; 2]) -> Result<(), ConfigError> {
    check_non_negative(name, min)?;
    check_non_negative(name, max)?;
    if min > max {
        return Err(ConfigError::Invalid(format!(
            "{name} range is inverted: [{min}, {max}]"
        )));
    }
    check_width(name, max - min)
}

fn check_width(name: &str, width: f32) -> Result<(), ConfigError> {
    if width.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{name} range is too wide to sample")))
    }
}
