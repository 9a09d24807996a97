//! Seed values accepted by the generator.
//!
//! A seed is either a number or a string. Both are reduced to the `u32` that
//! `noise::Simplex` takes, by hashing the value and drawing from a `ChaCha8Rng`.
//! The hash is a fixed FNV-1a, so a seed maps to the same terrain on every
//! platform and toolchain.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(f64),
    Text(String),
}

impl Seed {
    /// Derive the 32-bit seed handed to the noise primitive.
    ///
    /// The same `Seed` always yields the same value. Numbers hash by bit
    /// pattern, so `-0.0` and `0.0` are distinct seeds.
    pub fn noise_seed(&self) -> u32 {
        let hash = match self {
            Seed::Number(n) => fnv1a(0, &n.to_bits().to_le_bytes()),
            Seed::Text(s) => fnv1a(1, s.as_bytes()),
        };
        let mut rng = ChaCha8Rng::seed_from_u64(hash);
        rng.gen::<u32>()
    }
}

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(tag: u8, bytes: &[u8]) -> u64 {
    std::iter::once(&tag)
        .chain(bytes)
        .fold(FNV_OFFSET, |hash, &b| (hash ^ b as u64).wrapping_mul(FNV_PRIME))
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Number(0.0)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Seed::Number(value)
    }
}

impl From<u32> for Seed {
    fn from(value: u32) -> Self {
        Seed::Number(value as f64)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_string())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Seed::Text(value)
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Number(n) => write!(f, "{}", n),
            Seed::Text(s) => write!(f, "\"{}\"", s),
        }
    }
}
