//! Dial geometry: value range, shape, and the angle math shared by all layers.
//!
//! Angles are SVG rotation degrees: 0° points straight up from the pivot and
//! positive angles turn clockwise, matching `transform="rotate(...)"`.

use serde::{Deserialize, Serialize};

use crate::error::{GaugeError, Result};

/// Smallest gauge size that still leaves room for ticks inside the radius.
pub const MIN_SIZE: u32 = 64;

/// Margin between the dial radius and the edge of the drawing.
const RADIUS_MARGIN: u32 = 20;

// ============================================================================
// GaugeType
// ============================================================================

/// Angular shape of a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum GaugeType {
    /// Full circle, the needle sweeps 360° starting at 9 o'clock.
    Circular,
    /// Upper half circle, the needle sweeps 180° from 9 o'clock to 3 o'clock.
    #[default]
    Semicircular,
}

impl GaugeType {
    /// Total angle covered by the needle between min and max.
    pub fn span_degrees(self) -> f64 {
        match self {
            Self::Circular => 360.0,
            Self::Semicircular => 180.0,
        }
    }

    /// Needle rotation for the minimum value: 9 o'clock for both shapes.
    pub fn start_degrees(self) -> f64 {
        match self {
            Self::Circular | Self::Semicircular => -90.0,
        }
    }

    /// Number of tick divisions used when none is configured.
    pub fn default_tick_count(self) -> u32 {
        match self {
            Self::Circular => 10,
            Self::Semicircular => 12,
        }
    }

    /// Where tick labels go when no placement is configured.
    pub fn default_label_placement(self) -> LabelPlacement {
        match self {
            Self::Circular => LabelPlacement::Inside,
            Self::Semicircular => LabelPlacement::Outside,
        }
    }
}

/// Placement of tick labels relative to the tick ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum LabelPlacement {
    /// Labels inside the ring, toward the pivot.
    Inside,
    /// Labels outside the ring.
    Outside,
}

// ============================================================================
// Point
// ============================================================================

/// A position in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Dial
// ============================================================================

/// Validated range and layout of a gauge.
///
/// A `Dial` can only be created with finite bounds where `min < max` and a
/// size of at least [`MIN_SIZE`] pixels, so every method below is total.
#[derive(Debug, Clone, PartialEq)]
pub struct Dial {
    min: f64,
    max: f64,
    gauge_type: GaugeType,
    size: u32,
}

impl Dial {
    /// Creates a dial, rejecting malformed bounds and undersized layouts.
    pub fn new(min: f64, max: f64, gauge_type: GaugeType, size: u32) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(GaugeError::NonFiniteRange { min, max });
        }
        if min >= max {
            return Err(GaugeError::InvalidRange { min, max });
        }
        // The span must be finite too
        if !(max - min).is_finite() {
            return Err(GaugeError::NonFiniteRange { min, max });
        }
        if size < MIN_SIZE {
            return Err(GaugeError::SizeTooSmall {
                size,
                min: MIN_SIZE,
            });
        }
        Ok(Self {
            min,
            max,
            gauge_type,
            size,
        })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn gauge_type(&self) -> GaugeType {
        self.gauge_type
    }

    /// Width of the drawing in pixels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Clamps a value into `[min, max]`. NaN maps to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            self.min
        } else {
            value.clamp(self.min, self.max)
        }
    }

    /// Position of a value within the range, in `[0, 1]`.
    pub fn fraction(&self, value: f64) -> f64 {
        (self.clamp(value) - self.min) / (self.max - self.min)
    }

    /// Angle between the start position and the needle for a value.
    pub fn sweep(&self, value: f64) -> f64 {
        self.fraction(value) * self.gauge_type.span_degrees()
    }

    /// Absolute needle rotation for a value, as used in the `rotate()` transform.
    pub fn rotation(&self, value: f64) -> f64 {
        self.gauge_type.start_degrees() + self.sweep(value)
    }

    /// Rotation at a fraction of the range, for graduations.
    pub fn rotation_at(&self, fraction: f64) -> f64 {
        self.gauge_type.start_degrees() + fraction * self.gauge_type.span_degrees()
    }

    /// Value at a given fraction of the range.
    pub fn value_at(&self, fraction: f64) -> f64 {
        self.min + fraction * (self.max - self.min)
    }

    /// Needle pivot.
    pub fn center(&self) -> Point {
        let c = f64::from(self.size / 2);
        Point::new(c, c)
    }

    /// Radius of the tick ring.
    pub fn radius(&self) -> f64 {
        f64::from(self.size / 2 - RADIUS_MARGIN)
    }

    /// Height of the SVG viewBox; a half circle only needs the upper half.
    pub fn view_height(&self) -> u32 {
        match self.gauge_type {
            GaugeType::Circular => self.size,
            GaugeType::Semicircular => self.size / 2,
        }
    }

    /// Height of the HTML container, leaving room for the label.
    pub fn container_height(&self) -> u32 {
        self.view_height() + 30
    }

    /// Point at `distance` from the pivot in the direction of `rotation`.
    pub fn polar(&self, rotation: f64, distance: f64) -> Point {
        let center = self.center();
        let rad = rotation.to_radians();
        Point::new(
            center.x + distance * rad.sin(),
            center.y - distance * rad.cos(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn speed_dial() -> Dial {
        Dial::new(0.0, 100.0, GaugeType::Circular, 220).unwrap()
    }

    fn heading_dial() -> Dial {
        Dial::new(0.0, 360.0, GaugeType::Semicircular, 220).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn half_value_on_full_circle_is_half_turn() {
        let dial = speed_dial();
        assert!(close(dial.sweep(50.0), 180.0));
        assert!(close(dial.rotation(50.0), 90.0));
    }

    #[test]
    fn full_circle_runs_left_top_right_bottom() {
        let dial = speed_dial();
        assert!(close(dial.rotation(0.0), -90.0));
        assert!(close(dial.rotation(25.0), 0.0));
        assert!(close(dial.rotation(75.0), 180.0));
        assert!(close(dial.rotation(100.0), 270.0));
    }

    #[test]
    fn spans_are_fixed_per_shape() {
        let full = speed_dial();
        let half = heading_dial();
        assert!(close(full.sweep(full.max()) - full.sweep(full.min()), 360.0));
        assert!(close(half.sweep(half.max()) - half.sweep(half.min()), 180.0));
    }

    #[test]
    fn semicircle_runs_left_top_right() {
        let dial = heading_dial();
        assert!(close(dial.rotation(0.0), -90.0));
        assert!(close(dial.rotation(180.0), 0.0));
        assert!(close(dial.rotation(360.0), 90.0));
    }

    #[test]
    fn rotation_is_linear_and_monotonic() {
        let dial = Dial::new(-40.0, 60.0, GaugeType::Circular, 200).unwrap();
        let step = dial.rotation(-30.0) - dial.rotation(-40.0);
        let mut previous = dial.rotation(-40.0);
        for i in 1..=10 {
            let value = -40.0 + f64::from(i) * 10.0;
            let angle = dial.rotation(value);
            assert!(angle > previous);
            assert!(close(angle - previous, step));
            previous = angle;
        }
    }

    #[test]
    fn out_of_range_values_clamp() {
        let dial = speed_dial();
        assert_eq!(dial.rotation(-25.0), dial.rotation(0.0));
        assert_eq!(dial.rotation(1e9), dial.rotation(100.0));
        assert_eq!(dial.rotation(f64::NEG_INFINITY), dial.rotation(0.0));
        assert_eq!(dial.clamp(f64::NAN), 0.0);
    }

    #[test]
    fn rejects_inverted_or_empty_range() {
        assert!(matches!(
            Dial::new(100.0, 0.0, GaugeType::Circular, 220),
            Err(GaugeError::InvalidRange { .. })
        ));
        assert!(matches!(
            Dial::new(5.0, 5.0, GaugeType::Semicircular, 220),
            Err(GaugeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_non_finite_bounds() {
        assert!(matches!(
            Dial::new(f64::NAN, 1.0, GaugeType::Circular, 220),
            Err(GaugeError::NonFiniteRange { .. })
        ));
        assert!(matches!(
            Dial::new(0.0, f64::INFINITY, GaugeType::Circular, 220),
            Err(GaugeError::NonFiniteRange { .. })
        ));
    }

    #[test]
    fn rejects_range_whose_span_overflows() {
        assert!(matches!(
            Dial::new(-1e308, 1e308, GaugeType::Circular, 220),
            Err(GaugeError::NonFiniteRange { .. })
        ));

        // Wide but representable spans stay linear up to the maximum
        let dial = Dial::new(-1e307, 1e307, GaugeType::Circular, 220).unwrap();
        assert!(close(dial.rotation(-1e307), -90.0));
        assert!(close(dial.rotation(0.0), 90.0));
        assert!(close(dial.rotation(1e307), 270.0));
        assert!(dial.value_at(1.0).is_finite());
    }

    #[test]
    fn rejects_tiny_size() {
        assert!(matches!(
            Dial::new(0.0, 1.0, GaugeType::Circular, 40),
            Err(GaugeError::SizeTooSmall { size: 40, .. })
        ));
    }

    #[test]
    fn layout_matches_pixel_grid() {
        let full = speed_dial();
        assert_eq!(full.center(), Point::new(110.0, 110.0));
        assert_eq!(full.radius(), 90.0);
        assert_eq!(full.view_height(), 220);
        assert_eq!(full.container_height(), 250);

        let half = heading_dial();
        assert_eq!(half.view_height(), 110);
        assert_eq!(half.container_height(), 140);

        // Odd sizes round down like the pixel layout
        let odd = Dial::new(0.0, 1.0, GaugeType::Circular, 101).unwrap();
        assert_eq!(odd.center(), Point::new(50.0, 50.0));
        assert_eq!(odd.radius(), 30.0);
    }

    #[test]
    fn polar_points_follow_clock_directions() {
        let dial = speed_dial();
        let up = dial.polar(0.0, 10.0);
        assert!(close(up.x, 110.0) && close(up.y, 100.0));
        let right = dial.polar(90.0, 10.0);
        assert!(close(right.x, 120.0) && close(right.y, 110.0));
        let left = dial.polar(-90.0, 10.0);
        assert!(close(left.x, 100.0) && close(left.y, 110.0));
    }

    #[test]
    fn shape_defaults() {
        assert_eq!(GaugeType::default(), GaugeType::Semicircular);
        assert_eq!(GaugeType::Circular.default_tick_count(), 10);
        assert_eq!(GaugeType::Semicircular.default_tick_count(), 12);
        assert_eq!(
            GaugeType::Semicircular.default_label_placement(),
            LabelPlacement::Outside
        );
    }
}
