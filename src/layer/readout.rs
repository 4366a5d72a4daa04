//! Readout layer: the current value as text.

use std::fmt::Write;

use super::svg::{fmt_fixed, fmt_num};
use super::{DependencyVersion, LayerConfig, LayerEffect, RenderContext};
use crate::color::Color;
use crate::dial::{Dial, GaugeType, Point};
use crate::error::{GaugeError, Result};

/// Most decimals a readout may show.
pub const MAX_DECIMALS: u8 = 6;

// ============================================================================
// ReadoutConfig
// ============================================================================

/// Configuration for the numeric value display.
#[derive(Debug, Clone)]
pub struct ReadoutConfig {
    /// Number of decimals shown.
    pub decimals: u8,

    /// Font size in pixels.
    pub font_size: u32,

    /// Text color.
    pub color: Color,
}

impl ReadoutConfig {
    /// Creates a readout config showing `decimals` decimals.
    pub fn new(decimals: u8) -> Result<Self> {
        if decimals > MAX_DECIMALS {
            return Err(GaugeError::InvalidDecimals {
                value: decimals,
                max: MAX_DECIMALS,
            });
        }
        Ok(Self {
            decimals,
            font_size: 16,
            color: Color::INK,
        })
    }

    /// The text shown for a value.
    pub fn text(&self, value: f64) -> String {
        fmt_fixed(value, self.decimals)
    }

    /// Where the readout is centred: below the pivot on a full dial, just
    /// above it on a half dial where nothing is drawn below.
    pub fn position(dial: &Dial) -> Point {
        let center = dial.center();
        match dial.gauge_type() {
            GaugeType::Circular => Point::new(center.x, center.y + dial.radius() / 2.0),
            GaugeType::Semicircular => Point::new(center.x, f64::from(dial.view_height()) - 15.0),
        }
    }
}

impl LayerConfig for ReadoutConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self.decimals != other.decimals
            || self.font_size != other.font_size
            || self.color != other.color
    }
}

impl LayerEffect for ReadoutConfig {
    fn dependencies(ctx: &RenderContext<'_>) -> DependencyVersion {
        DependencyVersion::from_value(ctx.value)
    }

    fn draw(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let at = Self::position(ctx.dial);
        let _ = write!(
            out,
            r#"<text id="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-size="{}" font-weight="bold" fill="{}" font-family="Arial, sans-serif">{}</text>"#,
            ctx.element_id("value"),
            fmt_num(at.x),
            fmt_num(at.y),
            self.font_size,
            self.color,
            self.text(ctx.value),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_with_configured_decimals() {
        assert_eq!(ReadoutConfig::new(1).unwrap().text(42.0), "42.0");
        assert_eq!(ReadoutConfig::new(0).unwrap().text(42.6), "43");
        assert_eq!(ReadoutConfig::new(3).unwrap().text(1.0 / 3.0), "0.333");
    }

    #[test]
    fn rejects_too_many_decimals() {
        assert!(matches!(
            ReadoutConfig::new(7),
            Err(GaugeError::InvalidDecimals { value: 7, max: 6 })
        ));
    }

    #[test]
    fn positions_per_shape() {
        let full = Dial::new(0.0, 1.0, GaugeType::Circular, 220).unwrap();
        assert_eq!(ReadoutConfig::position(&full), Point::new(110.0, 155.0));

        let half = Dial::new(0.0, 1.0, GaugeType::Semicircular, 220).unwrap();
        assert_eq!(ReadoutConfig::position(&half), Point::new(110.0, 95.0));
    }

    #[test]
    fn draws_clamped_value() {
        let dial = Dial::new(0.0, 100.0, GaugeType::Semicircular, 220).unwrap();
        let mut out = String::new();
        ReadoutConfig::new(1)
            .unwrap()
            .draw(&RenderContext::new(&dial, "speed", 180.0), &mut out);
        assert!(out.starts_with(r#"<text id="speed_value" x="110" y="95""#));
        assert!(out.ends_with(">100.0</text>"));
    }
}
