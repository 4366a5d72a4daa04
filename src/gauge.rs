//! The gauge widget: a value, its dial, and the layer pipeline that draws it.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::color::Color;
use crate::dial::Dial;
use crate::embed::EmbeddedImage;
use crate::error::{GaugeError, Result};
use crate::layer::svg::{encode_png, escape_xml, rasterize};
use crate::layer::ticks::MAX_TICK_COUNT;
use crate::layer::{
    BackgroundConfig, LayerPipeline, NeedleConfig, ReadoutConfig, RenderContext, TickConfig,
};
use crate::patch::{NeedlePatch, Redraw, UpdateMode};
use crate::profile::GaugeProfile;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`GaugeProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    ///
    /// The profile is validated as a whole first; on error nothing changes.
    fn apply_profile(&mut self, profile: &GaugeProfile) -> Result<()>;

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> GaugeProfile;
}

// ============================================================================
// Gauge
// ============================================================================

/// A single instrument gauge.
///
/// A `Gauge` owns its dial (range, shape, size), the current value, and a
/// [`LayerPipeline`] that caches the markup of each part. Static parts are
/// drawn once; a new value only redraws the needle and the readout.
///
/// # Example
///
/// ```
/// use svg_gauge::{Gauge, GaugeProfile, Redraw, UpdateMode};
///
/// let mut gauge = Gauge::new(&GaugeProfile::speed().with_id("speed")).unwrap();
/// assert_eq!(gauge.rotation(), -90.0);
///
/// let svg = gauge.render_svg();
/// assert!(svg.contains(r#"id="speed_needle""#));
///
/// // Move the needle on the page without re-sending the SVG
/// let patch = gauge.set_value(50.0);
/// assert_eq!(patch.transform, "rotate(90, 110, 110)");
///
/// // Or ask for the whole fragment again
/// if let Redraw::Markup(svg) = gauge.update(75.0, UpdateMode::Full) {
///     assert!(svg.contains("75.0"));
/// }
/// ```
pub struct Gauge {
    id: String,
    label: String,
    dial: Dial,
    value: f64,
    background_path: Option<PathBuf>,

    /// The layer pipeline. Access layers directly to toggle or restyle them.
    pub pipeline: LayerPipeline,
}

impl Gauge {
    /// Builds a gauge from a profile.
    ///
    /// Fails on malformed bounds, an undersized layout, bad colors, needle
    /// length, decimals, tick count or id. A background image that cannot be loaded is
    /// not an error: the plain face is drawn instead.
    pub fn new(profile: &GaugeProfile) -> Result<Self> {
        let settings = Settings::from_profile(profile)?;
        let mut gauge = Self {
            id: settings.id.clone(),
            label: settings.label.clone(),
            dial: settings.dial.clone(),
            value: settings.value,
            background_path: settings.background_path.clone(),
            pipeline: LayerPipeline::default(),
        };
        gauge.install(settings);

        tracing::debug!(
            id = %gauge.id,
            gauge_type = ?gauge.dial.gauge_type(),
            min = gauge.dial.min(),
            max = gauge.dial.max(),
            "gauge created"
        );
        Ok(gauge)
    }

    /// Prefix of every element id in the markup.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Caption shown beneath the gauge.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Range and layout.
    pub fn dial(&self) -> &Dial {
        &self.dial
    }

    /// The current value, always within the range.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Path of the configured background image, whether or not it loaded.
    pub fn background_path(&self) -> Option<&Path> {
        self.background_path.as_deref()
    }

    /// Angle between the start position and the needle.
    pub fn sweep(&self) -> f64 {
        self.dial.sweep(self.value)
    }

    /// Absolute needle rotation in SVG degrees.
    pub fn rotation(&self) -> f64 {
        self.dial.rotation(self.value)
    }

    /// Renders the `<svg>` fragment.
    pub fn render_svg(&mut self) -> String {
        let ctx = RenderContext::new(&self.dial, &self.id, self.value);
        self.pipeline.render(&ctx)
    }

    /// Renders the SVG inside a sized container with the label beneath.
    pub fn render_html(&mut self) -> String {
        let svg = self.render_svg();
        let mut html = String::new();
        let _ = writeln!(
            html,
            r#"<div id="{}" style="width: {}px; height: {}px; text-align: center; display: inline-block;">"#,
            self.element_id("container"),
            self.dial.size(),
            self.dial.container_height(),
        );
        html.push_str(&svg);
        html.push('\n');
        let _ = writeln!(
            html,
            r#"<div style="margin-top: 5px; font-size: 14px; font-weight: bold; color: {};">{}</div>"#,
            Color::INK,
            escape_xml(&self.label),
        );
        html.push_str("</div>");
        html
    }

    /// Sets a new value and returns the patch that moves the needle there.
    ///
    /// The value is clamped into the range. NaN is ignored with a warning
    /// and the patch reflects the unchanged value.
    pub fn set_value(&mut self, value: f64) -> NeedlePatch {
        if value.is_nan() {
            tracing::warn!(id = %self.id, "ignoring NaN gauge value");
        } else {
            self.value = self.dial.clamp(value);
        }
        self.patch()
    }

    /// Sets a new value and returns the redraw in the requested form.
    pub fn update(&mut self, value: f64, mode: UpdateMode) -> Redraw {
        let patch = self.set_value(value);
        match mode {
            UpdateMode::Patch => Redraw::Patch(patch),
            UpdateMode::Full => Redraw::Markup(self.render_svg()),
        }
    }

    /// The patch for the current value.
    pub fn patch(&self) -> NeedlePatch {
        let ctx = RenderContext::new(&self.dial, &self.id, self.value);
        let readout = self
            .pipeline
            .readout
            .config()
            .filter(|_| self.pipeline.readout.is_active());

        NeedlePatch {
            needle_id: ctx.element_id("needle"),
            transform: NeedleConfig::transform(&ctx),
            rotation: self.rotation(),
            value_id: readout.map(|_| ctx.element_id("value")),
            text: readout.map(|config| config.text(self.value)),
        }
    }

    /// Rasterizes the current SVG at `scale` times its pixel size.
    pub fn snapshot(&mut self, scale: f32) -> Result<RgbaImage> {
        let svg = self.render_svg();
        rasterize(&svg, scale)
    }

    /// Rasterizes the current SVG and encodes it as PNG.
    pub fn render_png(&mut self, scale: f32) -> Result<Vec<u8>> {
        encode_png(&self.snapshot(scale)?)
    }

    fn element_id(&self, part: &str) -> String {
        crate::layer::element_id(&self.id, part)
    }

    /// Commits validated settings to the gauge and its layers.
    fn install(&mut self, settings: Settings) {
        let layout_changed = self.dial != settings.dial || self.id != settings.id;

        self.id = settings.id;
        self.label = settings.label;
        self.dial = settings.dial;
        self.value = settings.value;
        self.background_path = settings.background_path;

        let pipeline = &mut self.pipeline;
        pipeline.background.set_config(Some(settings.background));
        pipeline.ticks.set_config(Some(settings.ticks));
        pipeline.ticks.set_enabled(settings.show_ticks);
        pipeline.needle.set_config(Some(settings.needle));
        pipeline.readout.set_config(Some(settings.readout));
        pipeline.readout.set_enabled(settings.show_value);

        if layout_changed {
            pipeline.invalidate_all();
        }
    }
}

impl Configurable for Gauge {
    fn apply_profile(&mut self, profile: &GaugeProfile) -> Result<()> {
        let settings = Settings::from_profile(profile)?;
        self.install(settings);
        tracing::debug!(id = %self.id, "gauge re-configured");
        Ok(())
    }

    fn export_profile(&self) -> GaugeProfile {
        let pipeline = &self.pipeline;
        let mut profile = GaugeProfile {
            id: Some(self.id.clone()),
            value: self.value,
            min_value: self.dial.min(),
            max_value: self.dial.max(),
            label: self.label.clone(),
            gauge_type: self.dial.gauge_type(),
            size: self.dial.size(),
            background_image: self.background_path.clone(),
            show_value: pipeline.readout.is_enabled(),
            show_ticks: pipeline.ticks.is_enabled(),
            ..GaugeProfile::default()
        };

        if let Some(background) = pipeline.background.config() {
            profile.face_color = background.face.to_string();
        }
        if let Some(ticks) = pipeline.ticks.config() {
            profile.tick_count = Some(ticks.count);
            profile.label_placement = Some(ticks.placement);
        }
        if let Some(needle) = pipeline.needle.config() {
            profile.needle_color = needle.color.to_string();
            profile.needle_length = needle.length;
        }
        if let Some(readout) = pipeline.readout.config() {
            profile.value_decimals = readout.decimals;
        }
        profile
    }
}

// ============================================================================
// Settings
// ============================================================================

/// A fully validated profile, ready to be installed.
struct Settings {
    id: String,
    label: String,
    dial: Dial,
    value: f64,
    background_path: Option<PathBuf>,
    background: BackgroundConfig,
    ticks: TickConfig,
    needle: NeedleConfig,
    readout: ReadoutConfig,
    show_ticks: bool,
    show_value: bool,
}

impl Settings {
    fn from_profile(profile: &GaugeProfile) -> Result<Self> {
        let dial = Dial::new(
            profile.min_value,
            profile.max_value,
            profile.gauge_type,
            profile.size,
        )?;

        let id = match &profile.id {
            Some(id) => validate_id(id)?,
            None => default_id(&profile.label),
        };

        let face: Color = profile.face_color.parse()?;
        let needle_color: Color = profile.needle_color.parse()?;
        let needle = NeedleConfig::new(needle_color, profile.needle_length)?;
        let readout = ReadoutConfig::new(profile.value_decimals)?;

        let tick_count = profile.effective_tick_count();
        if tick_count > MAX_TICK_COUNT {
            return Err(GaugeError::TooManyTicks {
                count: tick_count,
                max: MAX_TICK_COUNT,
            });
        }
        let mut ticks = TickConfig::new(tick_count, profile.gauge_type);
        if let Some(placement) = profile.label_placement {
            ticks = ticks.with_placement(placement);
        }

        let image = profile
            .background_image
            .as_deref()
            .and_then(EmbeddedImage::load_or_skip);

        Ok(Self {
            id,
            label: profile.label.clone(),
            value: dial.clamp(profile.value),
            dial,
            background_path: profile.background_image.clone(),
            background: BackgroundConfig::new(face).with_image(image),
            ticks,
            needle,
            readout,
            show_ticks: profile.show_ticks,
            show_value: profile.show_value,
        })
    }
}

/// Accepts ids made of ASCII letters, digits, `-` and `_`.
fn validate_id(id: &str) -> Result<String> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(id.to_string())
    } else {
        Err(GaugeError::InvalidId(id.to_string()))
    }
}

/// `gauge-` followed by the label lowercased, with runs of other characters
/// collapsed to single dashes.
fn default_id(label: &str) -> String {
    let mut id = String::from("gauge");
    let mut pending_dash = true;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash {
                id.push('-');
                pending_dash = false;
            }
            id.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    id
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dial::{GaugeType, LabelPlacement};
    use image::{Rgba, RgbaImage};
    use resvg::usvg;

    fn speed() -> Gauge {
        Gauge::new(&GaugeProfile::speed().with_id("speed")).unwrap()
    }

    fn heading() -> Gauge {
        Gauge::new(&GaugeProfile::heading().with_id("heading")).unwrap()
    }

    fn transform_attr(svg: &str, element_id: &str) -> String {
        let start = svg.find(&format!(r#"id="{element_id}" transform=""#)).unwrap();
        let rest = &svg[start + element_id.len() + 17..];
        rest[..rest.find('"').unwrap()].to_string()
    }

    #[test]
    fn half_of_full_circle_is_half_turn() {
        let mut gauge = speed();
        gauge.set_value(50.0);
        assert_eq!(gauge.sweep(), 180.0);
        assert_eq!(gauge.rotation(), 180.0);
    }

    #[test]
    fn full_circle_starts_at_nine_o_clock() {
        let mut gauge = speed();
        assert_eq!(gauge.set_value(0.0).transform, "rotate(-90, 110, 110)");
        assert_eq!(gauge.set_value(50.0).transform, "rotate(90, 110, 110)");
        assert_eq!(gauge.set_value(100.0).transform, "rotate(270, 110, 110)");
    }

    #[test]
    fn values_are_clamped() {
        let mut gauge = speed();
        gauge.set_value(250.0);
        assert_eq!(gauge.value(), 100.0);
        gauge.set_value(-5.0);
        assert_eq!(gauge.value(), 0.0);

        let initial = Gauge::new(&GaugeProfile::speed().with_value(-5.0)).unwrap();
        assert_eq!(initial.value(), 0.0);
    }

    #[test]
    fn nan_value_is_ignored() {
        let mut gauge = speed();
        gauge.set_value(30.0);
        let patch = gauge.set_value(f64::NAN);
        assert_eq!(gauge.value(), 30.0);
        assert_eq!(patch.text.as_deref(), Some("30.0"));

        let initial = Gauge::new(&GaugeProfile::speed().with_value(f64::NAN)).unwrap();
        assert_eq!(initial.value(), 0.0);
    }

    #[test]
    fn inverted_range_fails() {
        let result = Gauge::new(&GaugeProfile::new().with_range(10.0, 10.0));
        assert!(matches!(result, Err(GaugeError::InvalidRange { .. })));
        let result = Gauge::new(&GaugeProfile::new().with_range(10.0, 0.0));
        assert!(matches!(result, Err(GaugeError::InvalidRange { .. })));
    }

    #[test]
    fn invalid_settings_fail_fast() {
        assert!(matches!(
            Gauge::new(&GaugeProfile::new().with_needle_color("not-a-color")),
            Err(GaugeError::InvalidColor { .. })
        ));
        assert!(matches!(
            Gauge::new(&GaugeProfile::new().with_id("a b")),
            Err(GaugeError::InvalidId(_))
        ));
        assert!(matches!(
            Gauge::new(&GaugeProfile::new().with_value_decimals(9)),
            Err(GaugeError::InvalidDecimals { .. })
        ));
        assert!(matches!(
            Gauge::new(&GaugeProfile::new().with_size(10)),
            Err(GaugeError::SizeTooSmall { .. })
        ));
    }

    #[test]
    fn tick_count_is_capped() {
        let json = r#"{"tickCount": 4294967295}"#;
        assert!(matches!(
            Gauge::new(&GaugeProfile::from_json(json).unwrap()),
            Err(GaugeError::TooManyTicks { count: 4294967295, max: 360 })
        ));
        assert!(Gauge::new(&GaugeProfile::new().with_tick_count(MAX_TICK_COUNT)).is_ok());

        let mut gauge = speed();
        let before = gauge.render_svg();
        let result = gauge.apply_profile(&GaugeProfile::speed().with_tick_count(361));
        assert!(matches!(result, Err(GaugeError::TooManyTicks { .. })));
        assert_eq!(gauge.render_svg(), before);
    }

    #[test]
    fn default_id_is_label_slug() {
        let gauge = Gauge::new(&GaugeProfile::speed()).unwrap();
        assert_eq!(gauge.id(), "gauge-ego-speed");
        assert_eq!(default_id("  RPM (x1000) "), "gauge-rpm-x1000");
        assert_eq!(default_id("°"), "gauge");
    }

    #[test]
    fn rerender_is_identical() {
        let mut gauge = speed();
        gauge.set_value(42.0);
        let first = gauge.render_svg();
        assert_eq!(gauge.render_svg(), first);

        gauge.set_value(43.0);
        gauge.set_value(42.0);
        assert_eq!(gauge.render_svg(), first);
    }

    #[test]
    fn patch_matches_full_render() {
        for mut gauge in [speed(), heading()] {
            for value in [0.0, 17.5, 99.0, 275.0] {
                let patch = gauge.set_value(value);
                let svg = gauge.render_svg();
                assert_eq!(transform_attr(&svg, &patch.needle_id), patch.transform);
                let text = patch.text.unwrap();
                assert!(svg.contains(&format!(">{text}</text>")));
            }
        }
    }

    #[test]
    fn update_modes() {
        let mut gauge = heading();
        match gauge.update(180.0, UpdateMode::Patch) {
            Redraw::Patch(patch) => assert_eq!(patch.transform, "rotate(0, 110, 110)"),
            Redraw::Markup(_) => panic!("expected a patch"),
        }
        match gauge.update(360.0, UpdateMode::Full) {
            Redraw::Markup(svg) => assert!(svg.contains("rotate(90, 110, 110)")),
            Redraw::Patch(_) => panic!("expected markup"),
        }
    }

    #[test]
    fn hidden_readout_is_left_out() {
        let mut gauge = Gauge::new(&GaugeProfile::speed().with_show_value(false)).unwrap();
        let patch = gauge.set_value(10.0);
        assert!(patch.value_id.is_none());
        assert!(patch.text.is_none());
        assert!(!gauge.render_svg().contains("_value"));
    }

    #[test]
    fn hidden_ticks_are_left_out() {
        let mut gauge = Gauge::new(&GaugeProfile::heading().with_show_ticks(false)).unwrap();
        assert!(!gauge.render_svg().contains("_ticks"));
    }

    #[test]
    fn output_parses_as_svg() {
        for mut gauge in [speed(), heading()] {
            let svg = gauge.render_svg();
            let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();
            assert_eq!(tree.size().width(), 220.0);
        }
    }

    #[test]
    fn html_wraps_svg_with_label() {
        let mut gauge = Gauge::new(&GaugeProfile::heading().with_label("Heading <deg>")).unwrap();
        let html = gauge.render_html();
        assert!(html.starts_with(
            r#"<div id="gauge-heading-deg_container" style="width: 220px; height: 140px;"#
        ));
        assert!(html.contains("Heading &lt;deg&gt;</div>"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn snapshot_draws_needle() {
        let mut gauge = Gauge::new(&GaugeProfile::speed().with_show_ticks(false)).unwrap();
        gauge.set_value(0.0);
        let image = gauge.snapshot(1.0).unwrap();
        assert_eq!(image.dimensions(), (220, 220));

        // Left of the pivot, halfway along the needle
        let pixel = image.get_pixel(75, 110);
        assert!(pixel[0] < 64 && pixel[1] < 64 && pixel[2] < 64);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn png_has_signature() {
        let png = heading().render_png(0.5).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn missing_background_falls_back_to_face() {
        let profile = GaugeProfile::heading().with_background_image("/nonexistent/face.png");
        let mut gauge = Gauge::new(&profile).unwrap();
        let svg = gauge.render_svg();
        assert!(svg.contains("<path d="));
        assert!(!svg.contains("<image"));
        assert_eq!(gauge.background_path(), Some(Path::new("/nonexistent/face.png")));
    }

    #[test]
    fn background_image_is_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("face.png");
        RgbaImage::from_pixel(4, 2, Rgba([200, 10, 10, 255]))
            .save(&path)
            .unwrap();

        let mut gauge = Gauge::new(&GaugeProfile::heading().with_background_image(&path)).unwrap();
        let svg = gauge.render_svg();
        assert!(svg.contains(r#"href="data:image/png;base64,"#));
        assert!(!svg.contains("<path d="));
    }

    #[test]
    fn export_then_rebuild_renders_same_markup() {
        let mut gauge = Gauge::new(
            &GaugeProfile::heading()
                .with_value(90.0)
                .with_needle_color("crimson")
                .with_label_placement(LabelPlacement::Inside)
                .with_value_decimals(0),
        )
        .unwrap();

        let exported = gauge.export_profile();
        assert_eq!(exported.needle_color, "#dc143c");
        let json = exported.to_json().unwrap();
        let mut rebuilt = Gauge::new(&GaugeProfile::from_json(&json).unwrap()).unwrap();

        assert_eq!(rebuilt.render_svg(), gauge.render_svg());
    }

    #[test]
    fn apply_profile_reconfigures() {
        let mut gauge = speed();
        let before = gauge.render_svg();

        gauge
            .apply_profile(&GaugeProfile::heading().with_id("speed").with_value(90.0))
            .unwrap();
        assert_eq!(gauge.dial().gauge_type(), GaugeType::Semicircular);
        assert_eq!(gauge.rotation(), -45.0);
        let after = gauge.render_svg();
        assert_ne!(after, before);
        assert!(after.contains(r#"height="110""#));
    }

    #[test]
    fn failed_apply_leaves_gauge_unchanged() {
        let mut gauge = speed();
        gauge.set_value(25.0);
        let before = gauge.render_svg();

        let result = gauge.apply_profile(&GaugeProfile::heading().with_needle_length(2.0));
        assert!(matches!(result, Err(GaugeError::InvalidNeedleLength(_))));
        assert_eq!(gauge.value(), 25.0);
        assert_eq!(gauge.dial().gauge_type(), GaugeType::Circular);
        assert_eq!(gauge.render_svg(), before);
    }

    #[test]
    fn gauge_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Gauge>();
    }
}
