//! Startup configuration.
//!
//! Counts, starting shape and colors for a [`MorphField`](crate::MorphField).
//! Every field has a default, so a JSON file only needs the keys it changes:
//!
//! ```json
//! { "particle_count": 20000, "shape": "tornado", "seed": 7 }
//! ```

use crate::color::{self, ColorScheme};
use crate::error::ConfigError;
use crate::shape::Shape;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Particles in the morphing cloud.
    pub particle_count: usize,
    /// Background meteors.
    pub meteor_count: usize,
    /// Spark slots shared by all impact bursts.
    pub explosion_capacity: usize,
    /// Label anchors inside the cloud.
    pub anchor_count: usize,
    /// Starting shape id. Unknown ids fall back to the cube.
    pub shape: String,
    pub color_scheme: ColorScheme,
    /// Base color as `#rrggbb`, used by the `single` scheme.
    pub color: String,
    /// Seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 15_000,
            meteor_count: 10_000,
            explosion_capacity: 500,
            anchor_count: 5,
            shape: Shape::Saturn.id().to_string(),
            color_scheme: ColorScheme::Single,
            color: "#00ffff".to_string(),
            seed: None,
        }
    }
}

impl Config {
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    pub fn with_meteor_count(mut self, count: usize) -> Self {
        self.meteor_count = count;
        self
    }

    pub fn with_explosion_capacity(mut self, capacity: usize) -> Self {
        self.explosion_capacity = capacity;
        self
    }

    pub fn with_anchor_count(mut self, count: usize) -> Self {
        self.anchor_count = count;
        self
    }

    pub fn with_shape(mut self, shape: impl Into<String>) -> Self {
        self.shape = shape.into();
        self
    }

    pub fn with_color_scheme(mut self, scheme: ColorScheme) -> Self {
        self.color_scheme = scheme;
        self
    }

    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.color = hex.into();
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Starting shape, resolved leniently.
    pub fn shape(&self) -> Shape {
        Shape::from_id(&self.shape)
    }

    /// Base color as RGB.
    pub fn base_color(&self) -> Result<Vec3, ConfigError> {
        Ok(color::parse_hex(&self.color)?)
    }

    /// Check the values a field cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 {
            return Err(ConfigError::NoParticles);
        }
        self.base_color()?;
        Ok(())
    }

    /// Parse a config from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
