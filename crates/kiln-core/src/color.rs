//! Color values as delivered by the design tool.

use serde::{Deserialize, Serialize};

fn opaque() -> f64 {
    1.0
}

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    #[serde(default = "opaque")]
    pub a: f64,
}

impl Rgba {
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Scale the alpha channel by a paint-level opacity.
    pub fn with_opacity(self, opacity: f64) -> Self {
        Self {
            a: self.a * opacity,
            ..self
        }
    }

    /// Convert to an 8-bit RGBA tuple, rounding each channel to the nearest integer.
    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        fn scale(channel: f64) -> u8 {
            (channel.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        (scale(self.r), scale(self.g), scale(self.b), scale(self.a))
    }

    /// Convert to an 8-digit lower-case hex string (`#rrggbbaa`).
    ///
    /// The alpha channel is always present, including for opaque colors.
    pub fn to_hex(&self) -> String {
        let (r, g, b, a) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}{:02x}", r, g, b, a)
    }

    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}
