//! Adapter around the coherent-noise primitive.

use noise::{NoiseFn, Simplex};

use crate::seed::Seed;

/// A seeded 2D coherent-noise function returning values in `[-1, 1]`.
pub trait NoiseSource {
    fn noise_2d(&self, x: f64, y: f64) -> f64;
}

impl NoiseSource for Simplex {
    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self.get([x, y])
    }
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64,
{
    fn noise_2d(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

pub trait SeededNoise {
    type Source: NoiseSource;

    fn seeded(&self, seed: &Seed) -> Self::Source;
}

/// Default noise backend: `noise::Simplex` seeded from [`Seed::noise_seed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SimplexNoise;

impl SeededNoise for SimplexNoise {
    type Source = Simplex;

    fn seeded(&self, seed: &Seed) -> Simplex {
        Simplex::new(seed.noise_seed())
    }
}

/// Produces noise samples remapped into `[0, 1]` for one seed.
pub struct NoiseSampler<S: NoiseSource> {
    source: S,
}

impl<S: NoiseSource> NoiseSampler<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn seeded<N>(noise: &N, seed: &Seed) -> Self
    where
        N: SeededNoise<Source = S>,
    {
        Self::new(noise.seeded(seed))
    }

    /// Sample at `(x, y)` and remap `[-1, 1]` to `[0, 1]` via `raw / 2 + 0.5`.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        // Simplex can overshoot its nominal range by a hair
        let raw = self.source.noise_2d(x, y).clamp(-1.0, 1.0);
        raw / 2.0 + 0.5
    }
}
