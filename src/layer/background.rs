//! Background layer: an embedded image, or a plain face when there is none.

use std::fmt::Write;

use super::svg::{escape_xml, fmt_num};
use super::{DependencyVersion, LayerConfig, LayerEffect, RenderContext};
use crate::color::Color;
use crate::dial::GaugeType;
use crate::embed::EmbeddedImage;

/// How much darker than the face its rim is drawn.
const RIM_DARKEN: f32 = 0.15;

// ============================================================================
// BackgroundConfig
// ============================================================================

/// Configuration for the gauge background.
///
/// With an [`EmbeddedImage`] the picture covers the whole drawing. Without
/// one, a circle (full gauges) or a half disc (half gauges) is filled with
/// `face` and outlined in a darker shade of it.
#[derive(Debug, Clone)]
pub struct BackgroundConfig {
    /// Optional picture drawn instead of the plain face.
    pub image: Option<EmbeddedImage>,

    /// Fill of the plain face.
    pub face: Color,
}

impl BackgroundConfig {
    /// Creates a plain face background.
    pub fn new(face: Color) -> Self {
        Self { image: None, face }
    }

    /// Sets or clears the background image.
    pub fn with_image(mut self, image: Option<EmbeddedImage>) -> Self {
        self.image = image;
        self
    }
}

impl LayerConfig for BackgroundConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self.face != other.face || self.image != other.image
    }
}

impl LayerEffect for BackgroundConfig {
    fn dependencies(_ctx: &RenderContext<'_>) -> DependencyVersion {
        DependencyVersion::NONE
    }

    fn draw(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let dial = ctx.dial;

        if let Some(image) = &self.image {
            let _ = write!(
                out,
                r#"<image x="0" y="0" width="{}" height="{}" href="{}" preserveAspectRatio="xMidYMid meet"/>"#,
                dial.size(),
                dial.view_height(),
                escape_xml(image.data_uri()),
            );
            return;
        }

        let center = dial.center();
        let r = dial.radius();
        let rim = self.face.darken(RIM_DARKEN);
        match dial.gauge_type() {
            GaugeType::Circular => {
                let _ = write!(
                    out,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}" stroke="{rim}" stroke-width="2"/>"#,
                    fmt_num(center.x),
                    fmt_num(center.y),
                    fmt_num(r),
                    self.face,
                );
            }
            GaugeType::Semicircular => {
                let _ = write!(
                    out,
                    r#"<path d="M {} {cy} A {r} {r} 0 0 1 {} {cy} Z" fill="{}" stroke="{rim}" stroke-width="2"/>"#,
                    fmt_num(center.x - r),
                    fmt_num(center.x + r),
                    self.face,
                    cy = fmt_num(center.y),
                    r = fmt_num(r),
                );
            }
        }
    }
}
