//! Needle layer: a line from the pivot, rotated to the current value.

use std::fmt::Write;

use super::svg::{fmt_num, rotate_transform};
use super::{DependencyVersion, LayerConfig, LayerEffect, RenderContext};
use crate::color::Color;
use crate::error::{GaugeError, Result};

/// Radius of the hub drawn over the pivot.
const HUB_RADIUS: f64 = 6.0;

// ============================================================================
// NeedleConfig
// ============================================================================

/// Configuration for the needle.
///
/// The needle is always drawn pointing straight up and turned into place by
/// a `rotate()` transform on its group, so a redraw only needs to replace
/// that one attribute.
#[derive(Debug, Clone)]
pub struct NeedleConfig {
    /// Stroke of the needle and fill of its hub.
    pub color: Color,

    /// Length as a fraction of the dial radius, in `(0, 1]`.
    pub length: f64,

    /// Stroke width in pixels.
    pub width: f64,
}

impl NeedleConfig {
    /// Creates a needle config, rejecting lengths outside `(0, 1]`.
    pub fn new(color: Color, length: f64) -> Result<Self> {
        if !(length > 0.0 && length <= 1.0) {
            return Err(GaugeError::InvalidNeedleLength(length));
        }
        Ok(Self {
            color,
            length,
            width: 4.0,
        })
    }

    /// The transform attribute value placing the needle at the context value.
    pub fn transform(ctx: &RenderContext<'_>) -> String {
        let center = ctx.dial.center();
        rotate_transform(ctx.dial.rotation(ctx.value), center.x, center.y)
    }
}

impl LayerConfig for NeedleConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self.color != other.color
            || (self.length - other.length).abs() > 1e-9
            || (self.width - other.width).abs() > 1e-9
    }
}

impl LayerEffect for NeedleConfig {
    fn dependencies(ctx: &RenderContext<'_>) -> DependencyVersion {
        DependencyVersion::from_value(ctx.value)
    }

    fn draw(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let center = ctx.dial.center();
        let (cx, cy) = (fmt_num(center.x), fmt_num(center.y));
        let tip_y = center.y - ctx.dial.radius() * self.length;

        let _ = write!(
            out,
            r#"<g id="{}" transform="{}"><line x1="{cx}" y1="{cy}" x2="{cx}" y2="{}" stroke="{}" stroke-width="{}" stroke-linecap="round"/><circle cx="{cx}" cy="{cy}" r="{}" fill="{}"/></g>"#,
            ctx.element_id("needle"),
            Self::transform(ctx),
            fmt_num(tip_y),
            self.color,
            fmt_num(self.width),
            fmt_num(HUB_RADIUS),
            self.color,
        );
    }
}
