//! Biome definitions and elevation × moisture classification.

use std::borrow::Cow;
use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{Color, ColorScale};
use crate::error::MapError;

/// One entry of the biome table.
///
/// A biome covers every `(elevation, moisture)` pair with
/// `elevation <= max_height` and `moisture <= moisture`, both inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Biome {
    pub label: String,
    pub max_height: f64,
    pub moisture: f64,
    #[serde(default)]
    pub shadows: bool,
    pub color: Color,
}

impl Biome {
    pub fn new(label: &str, max_height: f64, moisture: f64, shadows: bool, color: Color) -> Self {
        Biome {
            label: label.to_string(),
            max_height,
            moisture,
            shadows,
            color,
        }
    }

    /// Returned for cells no table entry covers.
    pub fn invalid() -> Self {
        Biome::new("Invalid", 0.0, 0.0, false, Color::rgb(255, 0, 255))
    }

    fn synthetic(label: &str, color: Color) -> Self {
        Biome::new(label, 1.0, 1.0, false, color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    #[default]
    Biomes,
    Elevation,
    Moisture,
}

impl DisplayMode {
    /// Pick the mode from the display flags. Elevation wins when both are set.
    pub fn from_flags(show_elevation: bool, show_moisture: bool) -> Self {
        if show_elevation {
            DisplayMode::Elevation
        } else if show_moisture {
            DisplayMode::Moisture
        } else {
            DisplayMode::Biomes
        }
    }
}

// label, max height, moisture, shadows, rgb
const DEFAULT_BIOMES: &[(&str, f64, f64, bool, [u8; 3])] = &[
    ("Deep Water", 0.10, 1.00, false, [38, 64, 124]),
    ("Shallow Water", 0.18, 1.00, false, [62, 98, 168]),
    ("Beach", 0.22, 1.00, false, [214, 200, 150]),
    ("Subtropical Desert", 0.40, 0.16, true, [233, 221, 199]),
    ("Grassland", 0.40, 0.33, true, [196, 212, 170]),
    ("Tropical Seasonal Forest", 0.40, 0.66, true, [169, 204, 164]),
    ("Tropical Rain Forest", 0.40, 1.00, true, [156, 187, 169]),
    ("Temperate Desert", 0.60, 0.16, true, [228, 232, 202]),
    ("Shrubland", 0.60, 0.50, true, [196, 204, 187]),
    ("Temperate Deciduous Forest", 0.60, 0.83, true, [180, 201, 169]),
    ("Temperate Rain Forest", 0.60, 1.00, true, [164, 196, 168]),
    ("Taiga", 0.80, 1.00, true, [204, 212, 187]),
    ("Scorched", 1.00, 0.10, true, [153, 153, 153]),
    ("Bare", 1.00, 0.20, true, [187, 187, 187]),
    ("Tundra", 1.00, 0.50, true, [221, 221, 187]),
    ("Snow", 1.00, 1.00, true, [248, 248, 248]),
];

/// An editable, unordered collection of biomes.
///
/// Entries may be added in any order; [`BiomeTable::compile`] produces the
/// sorted form used for classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BiomeTable {
    biomes: Vec<Biome>,
}

impl Default for BiomeTable {
    fn default() -> Self {
        let biomes = DEFAULT_BIOMES
            .iter()
            .map(|&(label, max_height, moisture, shadows, [r, g, b])| {
                Biome::new(label, max_height, moisture, shadows, Color::rgb(r, g, b))
            })
            .collect();
        BiomeTable { biomes }
    }
}

impl BiomeTable {
    pub fn new(biomes: Vec<Biome>) -> Self {
        BiomeTable { biomes }
    }

    pub fn push(&mut self, biome: Biome) {
        self.biomes.push(biome);
    }

    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    pub fn biomes_mut(&mut self) -> &mut Vec<Biome> {
        &mut self.biomes
    }

    pub fn len(&self) -> usize {
        self.biomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.biomes.is_empty()
    }

    /// Check that some entry covers elevation 1.0.
    ///
    /// A table failing this check still renders; uncovered cells fall back to
    /// [`Biome::invalid`].
    pub fn validate(&self) -> Result<(), MapError> {
        let highest = self
            .biomes
            .iter()
            .map(|b| b.max_height)
            .fold(f64::NEG_INFINITY, f64::max);
        if highest >= 1.0 {
            Ok(())
        } else {
            Err(MapError::UncoveredElevation { highest })
        }
    }

    /// Sort a copy of the table by `(max_height, moisture)` for classification.
    ///
    /// The sort is stable: entries with equal keys keep their insertion order.
    pub fn compile(&self) -> CompiledBiomes {
        let mut sorted = self.biomes.clone();
        sorted.sort_by(|a, b| {
            a.max_height
                .partial_cmp(&b.max_height)
                .unwrap_or(Ordering::Equal)
                .then(a.moisture.partial_cmp(&b.moisture).unwrap_or(Ordering::Equal))
        });
        debug!("compiled biome table with {} entries", sorted.len());
        CompiledBiomes {
            sorted,
            invalid: Biome::invalid(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompiledBiomes {
    sorted: Vec<Biome>,
    invalid: Biome,
}

impl CompiledBiomes {
    pub fn sorted(&self) -> &[Biome] {
        &self.sorted
    }

    /// Look up the biome for an `(elevation, moisture)` pair.
    ///
    /// Among entries with `max_height >= elevation`, returns the first whose
    /// moisture ceiling admits `moisture`, else the last such entry. Returns the
    /// invalid sentinel when no entry reaches `elevation`.
    pub fn classify(&self, elevation: f64, moisture: f64) -> &Biome {
        let mut fallback = None;
        for biome in self.sorted.iter().filter(|b| b.max_height >= elevation) {
            if biome.moisture >= moisture {
                return biome;
            }
            fallback = Some(biome);
        }
        fallback.unwrap_or(&self.invalid)
    }
}

pub struct Classifier<'a, S: ColorScale> {
    biomes: &'a CompiledBiomes,
    mode: DisplayMode,
    scale: &'a S,
}

impl<'a, S: ColorScale> Classifier<'a, S> {
    pub fn new(biomes: &'a CompiledBiomes, mode: DisplayMode, scale: &'a S) -> Self {
        Classifier {
            biomes,
            mode,
            scale,
        }
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Biome for one cell. Debug modes yield a synthetic, never-shaded biome.
    pub fn classify(&self, elevation: f64, moisture: f64) -> Cow<'a, Biome> {
        match self.mode {
            DisplayMode::Biomes => Cow::Borrowed(self.biomes.classify(elevation, moisture)),
            DisplayMode::Elevation => Cow::Owned(Biome::synthetic(
                "Elevation",
                self.scale.color_at(elevation),
            )),
            DisplayMode::Moisture => Cow::Owned(Biome::synthetic(
                "Moisture",
                self.scale.color_at(moisture),
            )),
        }
    }
}
