use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("{field} octave list is empty")]
    EmptyOctaves { field: &'static str },
    #[error("{field} octave weight #{index} is not a finite number")]
    NonFiniteWeight { field: &'static str, index: usize },
    #[error("{field} octave weight #{index} is negative")]
    NegativeWeight { field: &'static str, index: usize },
    #[error("{field} octave weights sum to zero")]
    ZeroWeightSum { field: &'static str },
    #[error("map size must be at least 1")]
    ZeroSize,
    #[error("zoom must be a finite number, got {0}")]
    InvalidZoom(f64),
    #[error("height curve must be a finite exponent >= 0, got {0}")]
    InvalidHeightCurve(f64),
    #[error("shadow intensity must lie in [0, 1], got {0}")]
    InvalidShadowIntensity(f64),
    #[error("falloff distance must lie in [0, 1], got {0}")]
    InvalidFalloffDistance(f64),
    #[error("no biome covers elevation 1.0 (highest maxHeight is {highest})")]
    UncoveredElevation { highest: f64 },
    #[error("expected {expected} cells, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
}
