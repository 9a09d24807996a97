use tracing::{debug, warn};

use crate::biome::{Biome, CompiledBiomes};
use crate::color::{ColorScale, LinearScale};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::field_generator::{FieldConfig, FieldGenerator, ScalarField};
use crate::noise_sampler::{SeededNoise, SimplexNoise};
use crate::seed::Seed;
use crate::shading::ShadingRule;
use crate::terrain_renderer::{render, PixelBuffer, RenderOptions};

/// Generated elevation and moisture fields for one configuration.
///
/// Both fields are empty until [`ProceduralMap::generate_map`] succeeds.
#[derive(Debug, Clone)]
pub struct ProceduralMap {
    config: MapConfig,
    biomes: CompiledBiomes,
    elevation: ScalarField,
    moisture: ScalarField,
}

impl ProceduralMap {
    /// Validate `config` and prepare an ungenerated map.
    ///
    /// A biome table that leaves elevation 1.0 uncovered is accepted with a
    /// warning; affected cells render with [`Biome::invalid`].
    pub fn new(config: MapConfig) -> Result<Self, MapError> {
        config.validate()?;
        if let Err(e) = config.biomes.validate() {
            warn!("{}; uncovered cells will render as invalid", e);
        }
        let biomes = config.biomes.compile();
        Ok(ProceduralMap {
            config,
            biomes,
            elevation: ScalarField::empty(),
            moisture: ScalarField::empty(),
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn elevation(&self) -> &ScalarField {
        &self.elevation
    }

    pub fn moisture(&self) -> &ScalarField {
        &self.moisture
    }

    pub fn is_generated(&self) -> bool {
        !self.elevation.is_empty() && !self.moisture.is_empty()
    }

    /// Swap both seeds. Previously generated fields are discarded.
    pub fn reseed(&mut self, elevation_seed: Seed, moisture_seed: Seed) {
        self.config.elevation_seed = elevation_seed;
        self.config.moisture_seed = moisture_seed;
        self.elevation = ScalarField::empty();
        self.moisture = ScalarField::empty();
    }

    pub fn generate_map(&mut self) -> Result<(), MapError> {
        self.generate_map_with(&SimplexNoise)
    }

    /// Generate both fields with a caller-supplied noise backend.
    ///
    /// The stored fields are only replaced once both have been generated.
    pub fn generate_map_with<N: SeededNoise>(&mut self, noise: &N) -> Result<(), MapError> {
        let config = &self.config;
        let generator = FieldGenerator::new(config.size, config.height_curve, &config.falloff);

        let elevation = generator.generate(
            &FieldConfig {
                seed: &config.elevation_seed,
                octaves: &config.elevation_octaves,
                zoom: config.zoom,
                use_height_curve: true,
                use_distance: config.falloff.enabled,
                normalize: config.always_mountains,
                name: "elevation",
            },
            noise,
        )?;
        let moisture = generator.generate(
            &FieldConfig {
                seed: &config.moisture_seed,
                octaves: &config.moisture_octaves,
                zoom: config.zoom,
                use_height_curve: false,
                use_distance: false,
                normalize: true,
                name: "moisture",
            },
            noise,
        )?;

        debug!(
            "generated {}x{} map (elevation seed {}, moisture seed {})",
            config.size, config.size, config.elevation_seed, config.moisture_seed
        );
        self.elevation = elevation;
        self.moisture = moisture;
        Ok(())
    }

    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            mode: self.config.display_mode(),
            shading: ShadingRule::new(self.config.show_shadows, self.config.shadow_intensity),
        }
    }

    /// Render the map with the default black-to-white debug scale.
    ///
    /// Returns `None` until the map has been generated.
    pub fn generate_image(&self) -> Option<PixelBuffer> {
        self.generate_image_with(&LinearScale::default())
    }

    pub fn generate_image_with<S: ColorScale>(&self, scale: &S) -> Option<PixelBuffer> {
        render(
            &self.elevation,
            &self.moisture,
            &self.biomes,
            &self.render_options(),
            scale,
        )
    }

    /// Biome under cell `index` in biome mode, or `None` before generation.
    pub fn classify_cell(&self, index: usize) -> Option<&Biome> {
        let e = *self.elevation.values().get(index)?;
        let m = *self.moisture.values().get(index)?;
        Some(self.biomes.classify(e, m))
    }

    /// Count of cells per biome label, in descending order.
    pub fn biome_distribution(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for (&e, &m) in self.elevation.values().iter().zip(self.moisture.values()) {
            let label = &self.biomes.classify(e, m).label;
            match counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, n)) => *n += 1,
                None => counts.push((label.clone(), 1)),
            }
        }
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
