//! Colors, darkening and the debug color scale.

use serde::{Deserialize, Serialize};

const DARKER: f64 = 0.7;

fn default_alpha() -> f64 {
    1.0
}

/// An RGB color with channels in `[0, 255]` and alpha in `[0, 1]`.
///
/// Channels are kept as floats so repeated darkening does not accumulate
/// rounding; they are rounded when emitted as bytes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Color = Color {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        alpha: 1.0,
    };
    pub const WHITE: Color = Color {
        r: 255.0,
        g: 255.0,
        b: 255.0,
        alpha: 1.0,
    };

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(self, alpha: f64) -> Self {
        Color { alpha, ..self }
    }

    /// Darken by `k` steps: each channel is multiplied by `0.7^k`.
    pub fn darker(&self, k: f64) -> Self {
        let factor = DARKER.powf(k);
        Color {
            r: self.r * factor,
            g: self.g * factor,
            b: self.b * factor,
            alpha: self.alpha,
        }
    }

    pub fn lerp(&self, other: &Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Color {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            alpha: self.alpha + (other.alpha - self.alpha) * t,
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        [
            channel(self.r),
            channel(self.g),
            channel(self.b),
            channel(self.alpha * 255.0),
        ]
    }
}

/// Continuous color ramp over `[0, 1]`, used by the elevation and moisture views.
pub trait ColorScale {
    fn color_at(&self, t: f64) -> Color;
}

impl<F> ColorScale for F
where
    F: Fn(f64) -> Color,
{
    fn color_at(&self, t: f64) -> Color {
        self(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub from: Color,
    pub to: Color,
}

impl Default for LinearScale {
    fn default() -> Self {
        LinearScale {
            from: Color::BLACK,
            to: Color::WHITE,
        }
    }
}

impl ColorScale for LinearScale {
    fn color_at(&self, t: f64) -> Color {
        self.from.lerp(&self.to, t)
    }
}
