//! Neighbor-relative shading.
//!
//! A cell is shadowed when its north-west neighbor, one step back along both
//! axes and clamped at the map edge, is strictly higher. That fakes a light
//! source in the top-left corner.

use crate::biome::{Biome, DisplayMode};
use crate::color::Color;
use crate::field_generator::ScalarField;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingRule {
    pub enabled: bool,
    pub intensity: f64,
}

impl ShadingRule {
    pub fn new(enabled: bool, intensity: f64) -> Self {
        ShadingRule { enabled, intensity }
    }

    pub fn disabled() -> Self {
        ShadingRule::new(false, 0.0)
    }

    /// Color for cell `index` under `biome`, darkened when eligible and in shadow.
    pub fn apply(
        &self,
        index: usize,
        biome: &Biome,
        elevation: &ScalarField,
        mode: DisplayMode,
    ) -> Color {
        if !self.enabled || !biome.shadows || mode != DisplayMode::Biomes {
            return biome.color;
        }
        shade(index, biome, elevation, elevation.size(), self.intensity)
    }
}

pub fn shadow_neighbor(index: usize, size: usize) -> usize {
    if size == 0 {
        return index;
    }
    let x = index % size;
    let y = index / size;
    y.saturating_sub(1) * size + x.saturating_sub(1)
}

/// Darken `biome.color` by `intensity` if the neighbor cell is strictly higher.
///
/// Only the elevation test is applied here; eligibility checks live in
/// [`ShadingRule::apply`]. A `size` that disagrees with the field, or an index
/// outside it, leaves the color unshaded.
pub fn shade(
    index: usize,
    biome: &Biome,
    elevation: &ScalarField,
    size: usize,
    intensity: f64,
) -> Color {
    if size != elevation.size() {
        return biome.color;
    }
    let values = elevation.values();
    let (Some(here), Some(neighbor)) = (
        values.get(index),
        values.get(shadow_neighbor(index, size)),
    ) else {
        return biome.color;
    };
    if neighbor > here {
        biome.color.darker(intensity)
    } else {
        biome.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grass() -> Biome {
        Biome::new("Grass", 1.0, 1.0, true, Color::rgb(120, 180, 90))
    }

    // 3x3, rising toward the top-left
    fn slope() -> ScalarField {
        ScalarField::from_values(3, vec![0.9, 0.8, 0.7, 0.8, 0.6, 0.5, 0.7, 0.5, 0.5]).unwrap()
    }

    #[test]
    fn test_neighbor_is_north_west_and_clamped() {
        assert_eq!(shadow_neighbor(0, 3), 0);
        assert_eq!(shadow_neighbor(1, 3), 0);
        assert_eq!(shadow_neighbor(3, 3), 0);
        assert_eq!(shadow_neighbor(4, 3), 0);
        assert_eq!(shadow_neighbor(8, 3), 4);
        assert_eq!(shadow_neighbor(5, 3), 1);
    }

    #[test]
    fn test_higher_neighbor_darkens_by_intensity() {
        let biome = grass();
        let field = slope();
        let color = shade(4, &biome, &field, 3, 0.15);
        assert_eq!(color, biome.color.darker(0.15));
        assert_ne!(color.to_rgba8(), biome.color.to_rgba8());
    }

    #[test]
    fn test_equal_or_lower_neighbor_unchanged() {
        let biome = grass();
        let field = slope();
        // cell 0 is its own neighbor
        assert_eq!(shade(0, &biome, &field, 3, 0.15), biome.color);
        // cell 8 (0.5) vs neighbor 4 (0.6) is darkened, but a flat field is not
        let flat = ScalarField::from_values(3, vec![0.5; 9]).unwrap();
        assert_eq!(shade(8, &biome, &flat, 3, 0.15), biome.color);
    }

    #[test]
    fn test_mismatched_size_or_index_is_unshaded() {
        let biome = grass();
        let field = slope();
        assert_eq!(shade(4, &biome, &field, 2, 0.15), biome.color);
        assert_eq!(shade(4, &biome, &field, 0, 0.15), biome.color);
        assert_eq!(shade(9, &biome, &field, 3, 0.15), biome.color);
        assert_eq!(shade(0, &biome, &ScalarField::empty(), 0, 0.15), biome.color);
        assert_eq!(shadow_neighbor(5, 0), 5);
    }

    #[test]
    fn test_rule_respects_eligibility() {
        let field = slope();
        let rule = ShadingRule::new(true, 0.15);

        let shaded = rule.apply(4, &grass(), &field, DisplayMode::Biomes);
        assert_eq!(shaded, grass().color.darker(0.15));

        let mut water = grass();
        water.shadows = false;
        assert_eq!(rule.apply(4, &water, &field, DisplayMode::Biomes), water.color);

        assert_eq!(rule.apply(4, &grass(), &field, DisplayMode::Elevation), grass().color);
        assert_eq!(
            ShadingRule::disabled().apply(4, &grass(), &field, DisplayMode::Biomes),
            grass().color
        );
    }
}
