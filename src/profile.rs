//! Serializable gauge profile for configuration files and frontends.
//!
//! A [`GaugeProfile`] captures every construction parameter of a gauge in a
//! format that can be stored as JSON, sent from a dashboard frontend, or
//! exported from a live gauge.
//!
//! # Example
//!
//! ```
//! use svg_gauge::{Gauge, GaugeProfile, GaugeType};
//!
//! // Build a profile
//! let profile = GaugeProfile::new()
//!     .with_range(0.0, 200.0)
//!     .with_label("Boost")
//!     .with_gauge_type(GaugeType::Circular);
//!
//! // Serialize to JSON and back
//! let json = profile.to_json().unwrap();
//! let restored = GaugeProfile::from_json(&json).unwrap();
//!
//! let gauge = Gauge::new(&restored).unwrap();
//! assert_eq!(gauge.label(), "Boost");
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::dial::{GaugeType, LabelPlacement};

// ============================================================================
// GaugeProfile
// ============================================================================

/// A serializable record of a gauge's configuration.
///
/// Every field has a default, so `{}` is a valid profile.
///
/// # JSON Format
///
/// ```json
/// {
///   "value": 0.0,
///   "minValue": 0.0,
///   "maxValue": 100.0,
///   "label": "EGO Speed",
///   "gaugeType": "circular",
///   "size": 220,
///   "needleColor": "#000000",
///   "needleLength": 0.75,
///   "tickCount": 12
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct GaugeProfile {
    /// Element id prefix. `None` derives one from the label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Initial value; clamped into the range.
    pub value: f64,

    /// Lower bound of the range.
    pub min_value: f64,

    /// Upper bound of the range.
    pub max_value: f64,

    /// Caption shown below the gauge.
    pub label: String,

    /// Full or half circle.
    pub gauge_type: GaugeType,

    /// Width of the drawing in pixels.
    pub size: u32,

    /// Image drawn behind the needle instead of the plain face.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<PathBuf>,

    /// Fill of the plain face.
    pub face_color: String,

    /// Needle color.
    pub needle_color: String,

    /// Needle length as a fraction of the radius.
    pub needle_length: f64,

    /// Whether the numeric value is displayed.
    pub show_value: bool,

    /// Whether tick marks are displayed.
    pub show_ticks: bool,

    /// Number of tick divisions. `None` uses the shape's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tick_count: Option<u32>,

    /// Tick label placement. `None` uses the shape's default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_placement: Option<LabelPlacement>,

    /// Decimals of the value readout.
    pub value_decimals: u8,
}

impl Default for GaugeProfile {
    fn default() -> Self {
        Self {
            id: None,
            value: 0.0,
            min_value: 0.0,
            max_value: 100.0,
            label: "Gauge".to_string(),
            gauge_type: GaugeType::default(),
            size: 220,
            background_image: None,
            face_color: "#f0f0f0".to_string(),
            needle_color: "#000000".to_string(),
            needle_length: 0.75,
            show_value: true,
            show_ticks: true,
            tick_count: None,
            label_placement: None,
            value_decimals: 1,
        }
    }
}

impl GaugeProfile {
    /// Creates a profile with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Vehicle speed: 0-100 on a full circle with 12 divisions.
    pub fn speed() -> Self {
        Self::new()
            .with_range(0.0, 100.0)
            .with_label("EGO Speed")
            .with_gauge_type(GaugeType::Circular)
            .with_tick_count(12)
    }

    /// Compass heading: 0-360 on a half circle, a tick every 30°.
    pub fn heading() -> Self {
        Self::new()
            .with_range(0.0, 360.0)
            .with_label("EGO Heading")
            .with_gauge_type(GaugeType::Semicircular)
            .with_tick_count(12)
    }

    /// Sets the element id prefix.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the initial value.
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    /// Sets the range bounds.
    pub fn with_range(mut self, min_value: f64, max_value: f64) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    /// Sets the caption.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the shape.
    pub fn with_gauge_type(mut self, gauge_type: GaugeType) -> Self {
        self.gauge_type = gauge_type;
        self
    }

    /// Sets the drawing width in pixels.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Sets the background image path.
    pub fn with_background_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.background_image = Some(path.into());
        self
    }

    /// Sets the plain face color.
    pub fn with_face_color(mut self, color: impl Into<String>) -> Self {
        self.face_color = color.into();
        self
    }

    /// Sets the needle color.
    pub fn with_needle_color(mut self, color: impl Into<String>) -> Self {
        self.needle_color = color.into();
        self
    }

    /// Sets the needle length as a fraction of the radius.
    pub fn with_needle_length(mut self, length: f64) -> Self {
        self.needle_length = length;
        self
    }

    /// Shows or hides the value readout.
    pub fn with_show_value(mut self, show: bool) -> Self {
        self.show_value = show;
        self
    }

    /// Shows or hides the tick marks.
    pub fn with_show_ticks(mut self, show: bool) -> Self {
        self.show_ticks = show;
        self
    }

    /// Sets the number of tick divisions.
    pub fn with_tick_count(mut self, count: u32) -> Self {
        self.tick_count = Some(count);
        self
    }

    /// Sets the tick label placement.
    pub fn with_label_placement(mut self, placement: LabelPlacement) -> Self {
        self.label_placement = Some(placement);
        self
    }

    /// Sets the readout decimals.
    pub fn with_value_decimals(mut self, decimals: u8) -> Self {
        self.value_decimals = decimals;
        self
    }

    /// Tick divisions after applying the shape default.
    pub fn effective_tick_count(&self) -> u32 {
        self.tick_count
            .unwrap_or_else(|| self.gauge_type.default_tick_count())
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_serialization_roundtrip() {
        let profile = GaugeProfile::heading()
            .with_value(275.0)
            .with_background_image("assets/heading.png")
            .with_label_placement(LabelPlacement::Inside);

        let json = profile.to_json().unwrap();
        let restored = GaugeProfile::from_json(&json).unwrap();

        assert_eq!(restored, profile);
    }

    #[test]
    fn profile_json_format() {
        let json = GaugeProfile::speed().to_json_pretty().unwrap();

        assert!(json.contains("\"minValue\""));
        assert!(json.contains("\"gaugeType\": \"circular\""));
        assert!(json.contains("\"tickCount\": 12"));
        assert!(!json.contains("backgroundImage"));
        assert!(!json.contains("\"id\""));
    }

    #[test]
    fn empty_profile_deserializes_to_defaults() {
        let profile = GaugeProfile::from_json("{}").unwrap();
        assert_eq!(profile, GaugeProfile::default());
        assert_eq!(profile.gauge_type, GaugeType::Semicircular);
        assert_eq!(profile.effective_tick_count(), 12);
    }

    #[test]
    fn partial_profile_keeps_other_defaults() {
        let profile =
            GaugeProfile::from_json(r#"{"gaugeType": "circular", "maxValue": 8000}"#).unwrap();
        assert_eq!(profile.max_value, 8000.0);
        assert_eq!(profile.size, 220);
        assert_eq!(profile.effective_tick_count(), 10);
    }

    #[test]
    fn unknown_gauge_type_is_rejected() {
        assert!(GaugeProfile::from_json(r#"{"gaugeType": "linear"}"#).is_err());
    }

    #[test]
    fn presets_match_dashboard_gauges() {
        let speed = GaugeProfile::speed();
        assert_eq!((speed.min_value, speed.max_value), (0.0, 100.0));
        assert_eq!(speed.gauge_type, GaugeType::Circular);
        assert_eq!(speed.label, "EGO Speed");

        let heading = GaugeProfile::heading();
        assert_eq!((heading.min_value, heading.max_value), (0.0, 360.0));
        assert_eq!(heading.gauge_type, GaugeType::Semicircular);
        assert_eq!(heading.effective_tick_count(), 12);
    }
}
