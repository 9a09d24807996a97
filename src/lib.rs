//! Procedural 2D terrain maps.
//!
//! Elevation and moisture fields are sampled from seeded simplex noise, shaped
//! by octave weights, a height curve and an island falloff mask, then
//! classified into biomes and optionally shaded into an RGBA buffer.
//!
//! ```no_run
//! use terrain_mapper::{MapConfig, ProceduralMap};
//!
//! let mut map = ProceduralMap::new(MapConfig::default())?;
//! map.generate_map()?;
//! if let Some(pixels) = map.generate_image() {
//!     pixels.save_png("map.png", 4)?;
//! }
//! # Ok::<(), terrain_mapper::MapError>(())
//! ```

pub mod biome;
pub mod color;
pub mod config;
pub mod error;
pub mod falloff;
pub mod field_generator;
pub mod map_generator;
pub mod noise_sampler;
pub mod seed;
pub mod shading;
pub mod terrain_renderer;

pub use biome::{Biome, BiomeTable, Classifier, CompiledBiomes, DisplayMode};
pub use color::{Color, ColorScale, LinearScale};
pub use config::MapConfig;
pub use error::MapError;
pub use falloff::{mask_at, FalloffConfig, FalloffCurve, FalloffMethod};
pub use field_generator::{FieldConfig, FieldGenerator, ScalarField};
pub use map_generator::ProceduralMap;
pub use noise_sampler::{NoiseSampler, NoiseSource, SeededNoise, SimplexNoise};
pub use seed::Seed;
pub use shading::{shade, ShadingRule};
pub use terrain_renderer::{render, PixelBuffer, RenderOptions};
