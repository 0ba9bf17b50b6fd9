//! Scene configuration, loadable from JSON.
//!
//! Every field has a default, so a config file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "field": { "count": 12000, "policy": { "type": "vertical_fall",
//!              "min_fall_rate": 0.05, "max_fall_rate": 0.2, "ceiling": 50.0 } },
//!   "rocks": { "count": 20 },
//!   "highlight_duration_ms": 1500
//! }
//! ```

use glam::DVec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::camera::CameraConfig;
use crate::error::{ConfigError, SceneError};
use crate::field::FieldConfig;
use crate::highlight::HighlightStyle;
use crate::object::Rgb;

/// How one kind of decoration is scattered over the ground.
///
/// Positions are uniform in the XZ square of half-extent `spread` around
/// the origin, heights in `y_min..y_max`. `size` is the base radius of each
/// shape; `length` is the cone height and is ignored by other shapes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// How many to place.
    pub count: usize,
    /// Half-extent of the placement square.
    pub spread: f64,
    /// Lowest placement height.
    pub y_min: f64,
    /// Highest placement height.
    pub y_max: f64,
    /// Smallest radius.
    pub size_min: f64,
    /// Largest radius.
    pub size_max: f64,
    /// Shortest cone.
    pub length_min: f64,
    /// Tallest cone.
    pub length_max: f64,
    /// Base color.
    pub color: Rgb,
}

impl ScatterConfig {
    /// Ten tall gray cones.
    pub fn rocks() -> Self {
        Self {
            count: 10,
            spread: 25.0,
            y_min: 0.0,
            y_max: 2.0,
            size_min: 1.0,
            size_max: 2.0,
            length_min: 5.0,
            length_max: 15.0,
            color: Rgb::ROCK,
        }
    }

    /// Thirty small floating crystals.
    pub fn crystals() -> Self {
        Self {
            count: 30,
            spread: 30.0,
            y_min: 0.5,
            y_max: 2.5,
            size_min: 0.1,
            size_max: 0.6,
            length_min: 0.0,
            length_max: 0.0,
            color: Rgb::CRYSTAL,
        }
    }

    /// Fifteen bushes sitting on the ground.
    pub fn bushes() -> Self {
        Self {
            count: 15,
            spread: 25.0,
            y_min: 0.0,
            y_max: 0.0,
            size_min: 0.5,
            size_max: 1.5,
            length_min: 0.0,
            length_max: 0.0,
            color: Rgb::BUSH,
        }
    }

    /// Reject ranges no object could be placed with.
    pub fn validate(&self, needs_length: bool) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Ok(());
        }
        ConfigError::check_non_negative("scatter.spread", self.spread)?;
        ConfigError::check_range("scatter height", self.y_min, self.y_max)?;
        ConfigError::check_positive("scatter.size_min", self.size_min)?;
        ConfigError::check_range("scatter size", self.size_min, self.size_max)?;
        if needs_length {
            ConfigError::check_positive("scatter.length_min", self.length_min)?;
            ConfigError::check_range("scatter length", self.length_min, self.length_max)?;
        }
        Ok(())
    }
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self::rocks()
    }
}

/// Everything needed to build a [`Scene`](crate::Scene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// The snow.
    pub field: FieldConfig,
    /// Tall pointy rocks (cones).
    pub rocks: ScatterConfig,
    /// Floating crystals (tetrahedra).
    pub crystals: ScatterConfig,
    /// Bushes (spheres).
    pub bushes: ScatterConfig,
    /// Look of a picked object.
    pub highlight: HighlightStyle,
    /// How long a highlight lasts.
    pub highlight_duration_ms: u64,
    /// Camera placement and lens.
    pub camera: CameraConfig,
    /// Fixed simulation rate. `None` steps with real frame time.
    pub fixed_step_hz: Option<f64>,
    /// Seed for decoration placement. `None` seeds from the system clock.
    pub scatter_seed: Option<u64>,
}

impl SceneConfig {
    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        log::info!("loaded scene config from {}", path.as_ref().display());
        Self::from_json_str(&text)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String, SceneError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Pin every seed so the whole scene is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.field.seed = Some(seed);
        self.scatter_seed = Some(seed);
        self
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            // The blizzard swirls around the yeti, which stands slightly sunk
            // into the snow.
            field: FieldConfig::new().with_center(DVec3::new(0.0, -0.5, 0.0)),
            rocks: ScatterConfig::rocks(),
            crystals: ScatterConfig::crystals(),
            bushes: ScatterConfig::bushes(),
            highlight: HighlightStyle::default(),
            highlight_duration_ms: 2000,
            camera: CameraConfig::default(),
            fixed_step_hz: Some(60.0),
            scatter_seed: None,
        }
    }
}
