use std::path::Path;

use image::{ImageBuffer, Rgba, RgbaImage};
use tracing::debug;

use crate::biome::{Classifier, CompiledBiomes, DisplayMode};
use crate::color::ColorScale;
use crate::error::MapError;
use crate::field_generator::ScalarField;
use crate::shading::ShadingRule;

/// RGBA bytes for a `size`×`size` map, in field cell order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    size: usize,
    bytes: Vec<u8>,
}

impl PixelBuffer {
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.size || y >= self.size {
            return None;
        }
        let idx = (y * self.size + x) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.bytes[idx..idx + 4]);
        Some(px)
    }

    pub fn into_image(self) -> Option<RgbaImage> {
        let side = self.size as u32;
        ImageBuffer::from_raw(side, side, self.bytes)
    }

    /// Nearest-neighbor magnification, each cell becoming a `scale`×`scale` block.
    pub fn upscale(&self, scale: u32) -> Option<RgbaImage> {
        if self.bytes.len() != self.size * self.size * 4 {
            return None;
        }
        let scale = scale.max(1);
        let side = self.size as u32 * scale;
        Some(ImageBuffer::from_fn(side, side, |px, py| {
            let x = (px / scale) as usize;
            let y = (py / scale) as usize;
            let idx = (y * self.size + x) * 4;
            Rgba([
                self.bytes[idx],
                self.bytes[idx + 1],
                self.bytes[idx + 2],
                self.bytes[idx + 3],
            ])
        }))
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P, scale: u32) -> Result<(), MapError> {
        let img = self.upscale(scale).ok_or(MapError::SizeMismatch {
            expected: self.size * self.size * 4,
            actual: self.bytes.len(),
        })?;
        img.save(path)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub mode: DisplayMode,
    pub shading: ShadingRule,
}

/// Classify and shade every cell into an RGBA buffer.
///
/// Returns `None` when either field is empty or they disagree in length: the
/// map has not been generated yet.
pub fn render<S: ColorScale>(
    elevation: &ScalarField,
    moisture: &ScalarField,
    biomes: &CompiledBiomes,
    options: &RenderOptions,
    scale: &S,
) -> Option<PixelBuffer> {
    if elevation.is_empty() || moisture.is_empty() || elevation.len() != moisture.len() {
        return None;
    }

    let classifier = Classifier::new(biomes, options.mode, scale);
    let mut bytes = Vec::with_capacity(elevation.len() * 4);
    for (i, (&e, &m)) in elevation
        .values()
        .iter()
        .zip(moisture.values())
        .enumerate()
    {
        let biome = classifier.classify(e, m);
        let color = options.shading.apply(i, &biome, elevation, options.mode);
        bytes.extend_from_slice(&color.to_rgba8());
    }

    debug!("rendered {} cells in {:?} mode", elevation.len(), options.mode);
    Some(PixelBuffer {
        size: elevation.size(),
        bytes,
    })
}
