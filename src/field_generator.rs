//! Octave-blended scalar fields over a square grid.
//!
//! Cells are stored row-major: index `i = y * size + x`, so `x = i % size` and
//! `y = i / size`. Generation, falloff, shading and the pixel buffer all share
//! this convention.

use tracing::debug;

use crate::error::MapError;
use crate::falloff::{centered, mask_at, FalloffConfig};
use crate::noise_sampler::{NoiseSampler, SeededNoise};
use crate::seed::Seed;

/// A flat `size`×`size` field of samples in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScalarField {
    size: usize,
    values: Vec<f64>,
}

impl ScalarField {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_values(size: usize, values: Vec<f64>) -> Result<Self, MapError> {
        let expected = size * size;
        if values.len() != expected {
            return Err(MapError::SizeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(ScalarField { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.size + x
    }

    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.size, index / self.size)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x < self.size && y < self.size {
            Some(self.values[self.index(x, y)])
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldConfig<'a> {
    pub seed: &'a Seed,
    pub octaves: &'a [f64],
    pub zoom: f64,
    pub use_height_curve: bool,
    pub use_distance: bool,
    pub normalize: bool,
    /// Name used in error messages and logs ("elevation", "moisture").
    pub name: &'static str,
}

#[derive(Debug, Clone)]
pub struct FieldGenerator<'a> {
    pub size: usize,
    pub height_curve: f64,
    pub falloff: &'a FalloffConfig,
}

pub fn octave_weight_sum(name: &'static str, octaves: &[f64]) -> Result<f64, MapError> {
    if octaves.is_empty() {
        return Err(MapError::EmptyOctaves { field: name });
    }
    if let Some(index) = octaves.iter().position(|w| !w.is_finite()) {
        return Err(MapError::NonFiniteWeight { field: name, index });
    }
    // mixed signs can push the blend below zero, where powf yields NaN
    if let Some(index) = octaves.iter().position(|&w| w < 0.0) {
        return Err(MapError::NegativeWeight { field: name, index });
    }
    let sum: f64 = octaves.iter().sum();
    if sum == 0.0 {
        return Err(MapError::ZeroWeightSum { field: name });
    }
    Ok(sum)
}

impl<'a> FieldGenerator<'a> {
    pub fn new(size: usize, height_curve: f64, falloff: &'a FalloffConfig) -> Self {
        Self {
            size,
            height_curve,
            falloff,
        }
    }

    pub fn generate<N: SeededNoise>(
        &self,
        config: &FieldConfig<'_>,
        noise: &N,
    ) -> Result<ScalarField, MapError> {
        if self.size == 0 {
            return Err(MapError::ZeroSize);
        }
        if !config.zoom.is_finite() {
            return Err(MapError::InvalidZoom(config.zoom));
        }
        let weight_sum = octave_weight_sum(config.name, config.octaves)?;

        debug!(
            "generating {} field: size={}, seed={}, octaves={}",
            config.name,
            self.size,
            config.seed,
            config.octaves.len()
        );

        let sampler = NoiseSampler::seeded(noise, config.seed);
        let size = self.size;
        let mut values = Vec::with_capacity(size * size);

        for y in 0..size {
            for x in 0..size {
                let nx = centered(x, size);
                let ny = centered(y, size);

                let mut sample = 0.0;
                let mut frequency = config.zoom;
                for &weight in config.octaves {
                    sample += weight * sampler.sample(frequency * nx, frequency * ny);
                    frequency *= 2.0;
                }
                sample /= weight_sum;

                if config.use_height_curve {
                    sample = sample.powf(self.height_curve);
                }
                values.push(sample);
            }
        }

        if config.normalize {
            normalize(&mut values);
        }
        for v in values.iter_mut() {
            *v = v.clamp(0.0, 1.0);
        }
        // after normalization so the mask shapes the full range
        if config.use_distance {
            for (i, v) in values.iter_mut().enumerate() {
                *v *= mask_at(i % size, i / size, self.falloff, size);
            }
        }

        Ok(ScalarField { size, values })
    }
}

/// Rescale so the minimum maps to 0 and the maximum to 1. Flat fields are left alone.
fn normalize(values: &mut [f64]) {
    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = max - min;
    if range <= 0.0 {
        return;
    }
    for v in values.iter_mut() {
        *v = (*v - min) / range;
    }
}
