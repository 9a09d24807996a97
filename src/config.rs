//! Map configuration.
//!
//! Every option is optional in JSON; missing keys take the values from
//! [`MapConfig::default`]. Keys are camelCase (`elevationSeed`, `heightCurve`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::biome::{BiomeTable, DisplayMode};
use crate::error::MapError;
use crate::falloff::FalloffConfig;
use crate::field_generator::octave_weight_sum;
use crate::seed::Seed;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub size: usize,
    pub zoom: f64,
    pub elevation_seed: Seed,
    pub moisture_seed: Seed,
    pub elevation_octaves: Vec<f64>,
    pub moisture_octaves: Vec<f64>,
    pub height_curve: f64,
    pub falloff: FalloffConfig,
    pub shadow_intensity: f64,
    pub show_elevation: bool,
    pub show_moisture: bool,
    pub show_shadows: bool,
    /// Stretch elevation to the full `[0, 1]` range so the highest biomes always appear.
    pub always_mountains: bool,
    pub biomes: BiomeTable,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            size: 64,
            zoom: 1.0,
            elevation_seed: Seed::default(),
            moisture_seed: Seed::default(),
            elevation_octaves: vec![1.0, 0.5, 0.25, 0.13, 0.06, 0.03],
            moisture_octaves: vec![1.0, 0.75, 0.33, 0.33, 0.33, 0.5],
            height_curve: 3.0,
            falloff: FalloffConfig::default(),
            shadow_intensity: 0.15,
            show_elevation: false,
            show_moisture: false,
            show_shadows: true,
            always_mountains: false,
            biomes: BiomeTable::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json_str(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, MapError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, MapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_flags(self.show_elevation, self.show_moisture)
    }

    /// Check everything that would otherwise fail or produce NaN mid-generation.
    ///
    /// Biome coverage is not checked here; see [`BiomeTable::validate`].
    pub fn validate(&self) -> Result<(), MapError> {
        if self.size == 0 {
            return Err(MapError::ZeroSize);
        }
        if !self.zoom.is_finite() {
            return Err(MapError::InvalidZoom(self.zoom));
        }
        if !self.height_curve.is_finite() || self.height_curve < 0.0 {
            return Err(MapError::InvalidHeightCurve(self.height_curve));
        }
        if !(0.0..=1.0).contains(&self.shadow_intensity) {
            return Err(MapError::InvalidShadowIntensity(self.shadow_intensity));
        }
        octave_weight_sum("elevation", &self.elevation_octaves)?;
        octave_weight_sum("moisture", &self.moisture_octaves)?;
        self.falloff.validate()
    }
}
