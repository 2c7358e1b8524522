use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Distances used when snapping a dragged or clicked point to existing walls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// A dragged endpoint within this distance of another wall's endpoint
    /// jumps onto it.
    pub endpoint_distance: f64,
    /// Same as `endpoint_distance`, for the first click of a new wall.
    pub build_endpoint_distance: f64,
    /// After projecting onto a crossed wall, snap to that wall's start
    /// within this distance.
    pub intersection_start_distance: f64,
    /// Same as `intersection_start_distance`, for the crossed wall's end.
    pub intersection_end_distance: f64,
    /// Angle increment used while the angle-snap modifier is held.
    pub angle_step_degrees: f64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            endpoint_distance: 10.0,
            build_endpoint_distance: 15.0,
            intersection_start_distance: 25.0,
            intersection_end_distance: 10.0,
            angle_step_degrees: 45.0,
        }
    }
}

/// Engine-wide settings for building and reshaping walls.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub grid_size: f64,
    pub grid_snap: bool,
    pub wall_thickness: f64,
    pub divider_thickness: f64,
    pub wall_color: String,
    pub snap: SnapConfig,
    pub show_wall_guidelines: bool,
    /// Max x/y offset between two points for them to count as lined up.
    pub guideline_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 10.0,
            grid_snap: true,
            wall_thickness: 10.0,
            divider_thickness: 0.005,
            wall_color: "lightgray".to_owned(),
            snap: SnapConfig::default(),
            show_wall_guidelines: true,
            guideline_tolerance: 2.0,
        }
    }
}

impl EngineConfig {
    /// Parses a config from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` on malformed TOML and
    /// `ConfigError::InvalidValue` if a size or thickness is not positive.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`EngineConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::from)?;
        Self::from_toml_str(&text)
    }

    /// Checks that every size-like value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let checks = [
            ("grid_size", self.grid_size),
            ("wall_thickness", self.wall_thickness),
            ("divider_thickness", self.divider_thickness),
            ("snap.angle_step_degrees", self.snap.angle_step_degrees),
        ];
        for (field, value) in checks {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidValue { field, value }.into());
            }
        }
        Ok(())
    }
}
