//! Color parsing and shading for gauge elements.

use std::fmt;
use std::str::FromStr;

use palette::{Hsl, IntoColor, Srgb};

use crate::error::GaugeError;

/// An opaque sRGB color used for strokes and fills.
///
/// Parses `#rgb`, `#rrggbb` (the `#` is optional) and CSS color names such as
/// `black` or `steelblue`. Always displays as lowercase `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(Srgb<u8>);

impl Color {
    /// Black, the default needle color.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Light gray, the default face of a gauge without a background image.
    pub const FACE: Self = Self::rgb(0xf0, 0xf0, 0xf0);

    /// Dark gray used for tick marks and text.
    pub const INK: Self = Self::rgb(0x33, 0x33, 0x33);

    /// Creates a color from its 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    /// Returns the channels as a tuple.
    pub fn as_tuple(&self) -> (u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue)
    }

    /// Darkens the color by reducing its HSL lightness by `amount` (0.0-1.0).
    pub fn darken(&self, amount: f32) -> Self {
        let rgb: Srgb<f32> = self.0.into_format();
        let mut hsl: Hsl = rgb.into_color();
        hsl.lightness = (hsl.lightness - amount).max(0.0);
        let darkened: Srgb = hsl.into_color();
        Self(darkened.into_format())
    }
}

impl FromStr for Color {
    type Err = GaugeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rgb) = trimmed.parse::<Srgb<u8>>() {
            return Ok(Self(rgb));
        }
        palette::named::from_str(&trimmed.to_ascii_lowercase())
            .map(Self)
            .ok_or_else(|| GaugeError::InvalidColor {
                value: s.to_string(),
                message: "expected #rgb, #rrggbb or a CSS color name".to_string(),
            })
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.as_tuple();
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}
