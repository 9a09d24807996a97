//! Island falloff mask.
//!
//! The mask is a per-cell multiplier that pulls elevation toward zero near the
//! map edges. Coordinates use the same centered sample space as the field
//! generator: `n = (c + size) / size - 0.5`, which puts the map center at 1.0.

use serde::{Deserialize, Serialize};

use crate::error::MapError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FalloffMethod {
    #[default]
    Euclidean,
    /// Square contours; the larger of the two axis distances.
    Manhattan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FalloffCurve {
    /// Straight ramp from 1 to 0. `smoothness`, `intensity` and
    /// `amplification` are ignored.
    #[default]
    Linear,
    /// Logistic-style ramp driven by `smoothness`, `intensity` and
    /// `amplification`. Changes output relative to `Linear`.
    Shaped,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FalloffConfig {
    pub enabled: bool,
    pub method: FalloffMethod,
    /// Distance in `[0, 1]` where the falloff begins.
    pub distance: f64,
    pub smoothness: f64,
    pub intensity: f64,
    pub amplification: f64,
    pub curve: FalloffCurve,
}

impl Default for FalloffConfig {
    fn default() -> Self {
        FalloffConfig {
            enabled: true,
            method: FalloffMethod::Euclidean,
            distance: 0.5,
            smoothness: 3.0,
            intensity: 2.2,
            amplification: 1.0,
            curve: FalloffCurve::Linear,
        }
    }
}

impl FalloffConfig {
    pub fn validate(&self) -> Result<(), MapError> {
        if !(0.0..=1.0).contains(&self.distance) {
            return Err(MapError::InvalidFalloffDistance(self.distance));
        }
        Ok(())
    }
}

#[inline]
pub fn centered(c: usize, size: usize) -> f64 {
    (c as f64 + size as f64) / size as f64 - 0.5
}

/// Scalar distance of cell `(x, y)` from the map center under `method`.
///
/// Zero at the center, 1.0 at the middle of each edge.
pub fn distance_from_center(x: usize, y: usize, size: usize, method: FalloffMethod) -> f64 {
    let dx = centered(x, size) - 1.0;
    let dy = centered(y, size) - 1.0;
    match method {
        FalloffMethod::Euclidean => 2.0 * dx.hypot(dy),
        FalloffMethod::Manhattan => 2.0 * dx.abs().max(dy.abs()),
    }
}

/// Linear ramp: 1 up to `start`, 0 at `d = 1`, clamped in between.
fn linear_ramp(d: f64, start: f64) -> f64 {
    if d <= start {
        return 1.0;
    }
    if start >= 1.0 {
        return 0.0;
    }
    (1.0 - (d - start) / (1.0 - start)).clamp(0.0, 1.0)
}

fn shaped_ramp(linear: f64, config: &FalloffConfig) -> f64 {
    let s = 1.0 - linear;
    if s <= 0.0 {
        return 1.0;
    }
    let a = config.smoothness;
    let b = config.intensity;
    let num = s.powf(a);
    let den = num + (b - b * s).max(0.0).powf(a);
    if den <= 0.0 {
        return 1.0;
    }
    (1.0 - config.amplification * (num / den)).clamp(0.0, 1.0)
}

/// Falloff multiplier in `[0, 1]` for cell `(x, y)` of a `size`×`size` map.
pub fn mask_at(x: usize, y: usize, config: &FalloffConfig, size: usize) -> f64 {
    let d = distance_from_center(x, y, size, config.method);
    let linear = linear_ramp(d, config.distance);
    match config.curve {
        FalloffCurve::Linear => linear,
        FalloffCurve::Shaped => shaped_ramp(linear, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn config(method: FalloffMethod, distance: f64) -> FalloffConfig {
        FalloffConfig {
            method,
            distance,
            ..Default::default()
        }
    }

    #[test]
    fn test_center_is_unmasked() {
        for method in [FalloffMethod::Euclidean, FalloffMethod::Manhattan] {
            let c = config(method, 0.3);
            assert_eq!(mask_at(8, 8, &c, 16), 1.0);
        }
    }

    #[test]
    fn test_edge_reaches_zero() {
        let c = config(FalloffMethod::Manhattan, 0.5);
        // x = 0 sits exactly at distance 1.0 under the square metric
        assert!(mask_at(0, 8, &c, 16).abs() < EPSILON);
        assert!(mask_at(8, 0, &c, 16).abs() < EPSILON);

        let c = config(FalloffMethod::Euclidean, 0.5);
        assert_eq!(mask_at(0, 0, &c, 16), 0.0);
    }

    #[test]
    fn test_linear_midpoint() {
        // distance 0.5 along x: halfway between start 0.0 and edge 1.0
        let c = config(FalloffMethod::Manhattan, 0.0);
        assert!((mask_at(4, 8, &c, 16) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn test_monotonic_along_ray() {
        for method in [FalloffMethod::Euclidean, FalloffMethod::Manhattan] {
            let c = config(method, 0.2);
            let size = 64;
            let mut last = f64::INFINITY;
            // walk from the center toward the left edge and the top-left corner
            for step in 0..=size / 2 {
                let along_x = mask_at(size / 2 - step, size / 2, &c, size);
                assert!(along_x <= last + EPSILON, "{method:?} not monotonic at step {step}");
                last = along_x;
            }
            assert!(last.abs() < EPSILON);

            let mut last = f64::INFINITY;
            for step in 0..=size / 2 {
                let diag = mask_at(size / 2 - step, size / 2 - step, &c, size);
                assert!(diag <= last + EPSILON);
                last = diag;
            }
        }
    }

    #[test]
    fn test_transpose_and_mirror_symmetry() {
        let size = 32;
        for method in [FalloffMethod::Euclidean, FalloffMethod::Manhattan] {
            let c = config(method, 0.25);
            for y in 0..size {
                for x in 0..size {
                    let a = mask_at(x, y, &c, size);
                    let b = mask_at(y, x, &c, size);
                    assert!((a - b).abs() < EPSILON, "{method:?} asymmetric at ({x}, {y})");
                }
            }
            for k in 0..size / 2 {
                for y in 0..size {
                    let left = mask_at(size / 2 - k, y, &c, size);
                    let right = mask_at(size / 2 + k, y, &c, size);
                    assert!((left - right).abs() < EPSILON);
                }
            }
        }
    }

    #[test]
    fn test_full_distance_disables_ramp() {
        let c = config(FalloffMethod::Manhattan, 1.0);
        assert_eq!(mask_at(0, 5, &c, 16), 1.0);
        let c = config(FalloffMethod::Euclidean, 1.0);
        // corner distance is ~1.41, beyond the threshold
        assert_eq!(mask_at(0, 0, &c, 16), 0.0);
    }

    #[test]
    fn test_shaped_curve_only_when_opted_in() {
        let linear = config(FalloffMethod::Manhattan, 0.0);
        let shaped = FalloffConfig {
            curve: FalloffCurve::Shaped,
            ..linear.clone()
        };
        let l = mask_at(4, 8, &linear, 16);
        let s = mask_at(4, 8, &shaped, 16);
        assert!((l - 0.5).abs() < EPSILON);
        assert!((l - s).abs() > 1e-3, "shaped curve should differ from linear");
        assert_eq!(mask_at(8, 8, &shaped, 16), 1.0);
        assert!(mask_at(0, 8, &shaped, 16).abs() < EPSILON);
    }

    #[test]
    fn test_validate_rejects_out_of_range_distance() {
        assert!(config(FalloffMethod::Euclidean, 1.5).validate().is_err());
        assert!(config(FalloffMethod::Euclidean, -0.1).validate().is_err());
        assert!(config(FalloffMethod::Euclidean, 0.0).validate().is_ok());
    }
}
