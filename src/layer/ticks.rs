//! Tick layer: evenly spaced graduations with numeric labels.

use std::fmt::Write;

use super::svg::{fmt_decimals, fmt_num};
use super::{DependencyVersion, LayerConfig, LayerEffect, RenderContext};
use crate::color::Color;
use crate::dial::{GaugeType, LabelPlacement};

/// Length of a tick mark, measured inward from the dial radius.
const TICK_LENGTH: f64 = 10.0;

/// Most tick divisions a gauge accepts.
pub const MAX_TICK_COUNT: u32 = 360;

/// Roughly how many labels fit around a dial before they crowd.
const LABELS_PER_DIAL: f64 = 12.0;

// ============================================================================
// TickConfig
// ============================================================================

/// Configuration for tick marks.
///
/// `count` is the number of divisions of the range: a half gauge with 12
/// divisions draws 13 ticks, a full gauge draws 12 because its last tick
/// would land on top of the first.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Number of divisions; `0` draws no graduations.
    pub count: u32,

    /// Where the numeric labels go.
    pub placement: LabelPlacement,

    /// Color of marks and labels.
    pub color: Color,
}

impl TickConfig {
    /// Creates a tick config with the shape's default label placement.
    pub fn new(count: u32, gauge_type: GaugeType) -> Self {
        Self {
            count,
            placement: gauge_type.default_label_placement(),
            color: Color::INK,
        }
    }

    /// Overrides the label placement.
    pub fn with_placement(mut self, placement: LabelPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Every how many ticks a label is drawn.
    pub fn label_step(&self) -> u32 {
        ((f64::from(self.count) / LABELS_PER_DIAL).round_ties_even() as u32).max(1)
    }

    /// Index of the last tick drawn on a dial of the given shape.
    fn last_index(&self, gauge_type: GaugeType) -> u32 {
        match gauge_type {
            GaugeType::Circular => self.count - 1,
            GaugeType::Semicircular => self.count,
        }
    }

    /// Whether tick `index` carries a label.
    fn is_labelled(&self, index: u32, gauge_type: GaugeType) -> bool {
        index % self.label_step() == 0
            || (gauge_type == GaugeType::Semicircular && index == self.count)
    }

    /// Distance of labels from the pivot and their font size.
    fn label_metrics(&self, radius: f64) -> (f64, u32) {
        match self.placement {
            LabelPlacement::Inside => (radius - 25.0, 10),
            LabelPlacement::Outside => (radius + 12.0, 11),
        }
    }
}

impl LayerConfig for TickConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self.count != other.count || self.placement != other.placement || self.color != other.color
    }
}

impl LayerEffect for TickConfig {
    fn dependencies(_ctx: &RenderContext<'_>) -> DependencyVersion {
        DependencyVersion::NONE
    }

    fn draw(&self, ctx: &RenderContext<'_>, out: &mut String) {
        if self.count == 0 {
            return;
        }

        let dial = ctx.dial;
        let gauge_type = dial.gauge_type();
        let radius = dial.radius();
        let (label_radius, font_size) = self.label_metrics(radius);

        let _ = write!(out, r#"<g id="{}">"#, ctx.element_id("ticks"));
        for index in 0..=self.last_index(gauge_type) {
            let fraction = f64::from(index) / f64::from(self.count);
            let rotation = dial.rotation_at(fraction);
            let inner = dial.polar(rotation, radius - TICK_LENGTH);
            let outer = dial.polar(rotation, radius);

            out.push('\n');
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="1"/>"#,
                fmt_num(inner.x),
                fmt_num(inner.y),
                fmt_num(outer.x),
                fmt_num(outer.y),
                self.color,
            );

            if self.is_labelled(index, gauge_type) {
                let at = dial.polar(rotation, label_radius);
                out.push('\n');
                let _ = write!(
                    out,
                    r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-size="{font_size}" fill="{}" font-family="Arial, sans-serif">{}</text>"#,
                    fmt_num(at.x),
                    fmt_num(at.y),
                    self.color,
                    fmt_decimals(dial.value_at(fraction), 2),
                );
            }
        }
        out.push_str("\n</g>");
    }
}
