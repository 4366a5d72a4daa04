//! Layer infrastructure for gauge rendering.
//!
//! A gauge is drawn as a stack of layers: background, ticks, needle and
//! readout. Each layer encapsulates a configuration, an enabled state,
//! version tracking for cache invalidation, and a cache of its last markup.
//!
//! # Architecture
//!
//! Each layer config implements [`LayerEffect`], which defines:
//! - How the layer draws itself
//! - Which inputs its markup depends on (nothing, or the current value)
//!
//! Static layers are drawn once and reused across value updates, so a gauge
//! refreshed many times per second only redraws its needle and readout.

pub mod background;
pub mod needle;
pub mod readout;
pub mod svg;
pub mod ticks;

pub use background::BackgroundConfig;
pub use needle::NeedleConfig;
pub use readout::ReadoutConfig;
pub use ticks::TickConfig;

use std::fmt::Write;

use crate::dial::Dial;

// ============================================================================
// Render Context
// ============================================================================

/// Inputs shared by every layer during one render.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Range and layout of the gauge.
    pub dial: &'a Dial,

    /// Prefix for element ids.
    pub id: &'a str,

    /// The current value, already clamped into the dial range.
    pub value: f64,
}

impl<'a> RenderContext<'a> {
    /// Creates a context, clamping `value` into the dial range.
    pub fn new(dial: &'a Dial, id: &'a str, value: f64) -> Self {
        Self {
            dial,
            id,
            value: dial.clamp(value),
        }
    }

    /// Id of a named part of the gauge, e.g. `speed_needle`.
    pub fn element_id(&self, part: &str) -> String {
        element_id(self.id, part)
    }
}

/// Id of a named part of the gauge with the given prefix.
pub fn element_id(id: &str, part: &str) -> String {
    format!("{id}_{part}")
}

// ============================================================================
// Layer Traits
// ============================================================================

/// Trait for layer configuration types.
///
/// Implementations must detect when a configuration meaningfully differs
/// from another, which drives cache invalidation.
pub trait LayerConfig: Clone {
    /// Returns true if this config differs from another in a way that
    /// would produce different markup.
    fn differs_from(&self, other: &Self) -> bool;
}

/// Trait for layer configurations that know how to draw themselves.
pub trait LayerEffect: LayerConfig {
    /// Returns the inputs the markup depends on besides the config itself.
    ///
    /// Static layers return [`DependencyVersion::NONE`]; layers that move
    /// with the value return [`DependencyVersion::from_value`].
    fn dependencies(ctx: &RenderContext<'_>) -> DependencyVersion;

    /// Appends this layer's markup to `out`.
    fn draw(&self, ctx: &RenderContext<'_>, out: &mut String);
}

// ============================================================================
// Layer Dependencies
// ============================================================================

/// Fingerprint of the render inputs a cached fragment was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DependencyVersion(u64);

impl DependencyVersion {
    /// Depends on nothing but the layer config.
    pub const NONE: Self = Self(0);

    /// Depends on the exact value being displayed.
    pub fn from_value(value: f64) -> Self {
        // +0.0 and -0.0 draw the same needle
        let value = if value == 0.0 { 0.0 } else { value };
        Self(value.to_bits())
    }
}

// ============================================================================
// Layer Versions
// ============================================================================

/// Snapshot of all layer versions in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerVersions {
    /// Version of the background layer.
    pub background: u64,
    /// Version of the tick layer.
    pub ticks: u64,
    /// Version of the needle layer.
    pub needle: u64,
    /// Version of the readout layer.
    pub readout: u64,
}

// ============================================================================
// Generic Layer
// ============================================================================

/// A generic layer with configuration, caching, and version tracking.
///
/// The layer tracks:
/// - Optional configuration of type `C`
/// - Whether the layer is enabled (can be toggled without losing config)
/// - A version number that increments on any state change
/// - The last drawn markup and the dependency version it was drawn for
pub struct Layer<C: LayerConfig> {
    config: Option<C>,
    enabled: bool,
    version: u64,
    cache: Option<(String, DependencyVersion)>,
}

impl<C: LayerConfig> Default for Layer<C> {
    fn default() -> Self {
        Self {
            config: None,
            enabled: true,
            version: 0,
            cache: None,
        }
    }
}

impl<C: LayerConfig> Layer<C> {
    /// Creates an enabled layer with the given config.
    pub fn with_config(config: C) -> Self {
        let mut layer = Self::default();
        layer.set_config(Some(config));
        layer
    }

    /// Returns the current configuration, if any.
    pub fn config(&self) -> Option<&C> {
        self.config.as_ref()
    }

    /// Returns true if this layer is active (has config AND is enabled).
    pub fn is_active(&self) -> bool {
        self.enabled && self.config.is_some()
    }

    /// Returns true if the layer has a configuration set.
    pub fn has_config(&self) -> bool {
        self.config.is_some()
    }

    /// Returns whether the layer is enabled.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets whether the layer is enabled.
    ///
    /// Returns true if the enabled state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        if self.enabled != enabled {
            self.enabled = enabled;
            self.invalidate();
            true
        } else {
            false
        }
    }

    /// Returns the current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Sets the configuration. Returns true if it changed.
    ///
    /// Clears the cache and increments version if the config differs.
    pub fn set_config(&mut self, config: Option<C>) -> bool {
        let differs = match (&self.config, &config) {
            (None, None) => false,
            (Some(_), None) | (None, Some(_)) => true,
            (Some(old), Some(new)) => old.differs_from(new),
        };

        if differs {
            self.config = config;
            self.invalidate();
        }
        differs
    }

    /// Invalidates the cache and increments version.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache = None;
    }

    /// Gets the cached markup if it was drawn for the given dependencies.
    pub fn get_cached(&self, deps: DependencyVersion) -> Option<&str> {
        match &self.cache {
            Some((markup, stored)) if *stored == deps => Some(markup.as_str()),
            _ => None,
        }
    }

    /// Stores markup in the cache with its dependency version.
    pub fn store(&mut self, markup: String, deps: DependencyVersion) {
        self.cache = Some((markup, deps));
    }
}

impl<C: LayerEffect> Layer<C> {
    /// Appends this layer's markup to `out`, using the cache if valid.
    ///
    /// Inactive layers append nothing.
    pub fn apply(&mut self, ctx: &RenderContext<'_>, out: &mut String) {
        if !self.enabled {
            return;
        }
        let Some(config) = &self.config else {
            return;
        };

        let deps = C::dependencies(ctx);
        if let Some(cached) = self.get_cached(deps) {
            out.push_str(cached);
            return;
        }

        let mut markup = String::new();
        config.draw(ctx, &mut markup);
        out.push_str(&markup);
        self.store(markup, deps);
    }
}

// ============================================================================
// Composite Layer
// ============================================================================

/// Key of the composed fragment: every layer version plus the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CompositeKey {
    versions: LayerVersions,
    value: DependencyVersion,
}

/// A cache-only layer for the final composed SVG.
///
/// Unlike [`Layer<C>`], this has no configuration or enabled state.
#[derive(Default)]
pub struct CompositeLayer {
    version: u64,
    cache: Option<(CompositeKey, String)>,
}

impl CompositeLayer {
    /// Returns the current version number.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Invalidates the cache and increments version.
    pub fn invalidate(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.cache = None;
    }

    fn get_cached(&self, key: CompositeKey) -> Option<&str> {
        match &self.cache {
            Some((stored, svg)) if *stored == key => Some(svg.as_str()),
            _ => None,
        }
    }

    fn store(&mut self, key: CompositeKey, svg: String) {
        self.cache = Some((key, svg));
    }
}

// ============================================================================
// Layer Pipeline
// ============================================================================

/// All gauge layers in drawing order.
///
/// ```text
/// ┌────────────┐
/// │ Background │ ◄── static
/// └─────┬──────┘
///       ▼
/// ┌────────────┐
/// │   Ticks    │ ◄── static
/// └─────┬──────┘
///       ▼
/// ┌────────────┐
/// │   Needle   │ ◄── depends on: value
/// └─────┬──────┘
///       ▼
/// ┌────────────┐
/// │  Readout   │ ◄── depends on: value
/// └─────┬──────┘
///       ▼
/// ┌────────────┐
/// │ Composite  │ ◄── depends on: all layer versions + value
/// └────────────┘
/// ```
#[derive(Default)]
pub struct LayerPipeline {
    /// Face or embedded background image.
    pub background: Layer<BackgroundConfig>,

    /// Graduations and their labels.
    pub ticks: Layer<TickConfig>,

    /// The rotating needle.
    pub needle: Layer<NeedleConfig>,

    /// Numeric value display.
    pub readout: Layer<ReadoutConfig>,

    /// Cache of the composed SVG.
    pub composite: CompositeLayer,
}

impl LayerPipeline {
    /// Returns a snapshot of all layer versions.
    pub fn layer_versions(&self) -> LayerVersions {
        LayerVersions {
            background: self.background.version(),
            ticks: self.ticks.version(),
            needle: self.needle.version(),
            readout: self.readout.version(),
        }
    }

    /// Invalidates all caches, e.g. after the dial or id changed.
    pub fn invalidate_all(&mut self) {
        self.background.invalidate();
        self.ticks.invalidate();
        self.needle.invalidate();
        self.readout.invalidate();
        self.composite.invalidate();
    }

    /// Renders the complete `<svg>` element.
    ///
    /// Returns the cached fragment when neither the layers nor the value
    /// changed since the last call.
    pub fn render(&mut self, ctx: &RenderContext<'_>) -> String {
        let key = CompositeKey {
            versions: self.layer_versions(),
            value: DependencyVersion::from_value(ctx.value),
        };
        if let Some(cached) = self.composite.get_cached(key) {
            return cached.to_string();
        }

        let dial = ctx.dial;
        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg id="{svg_id}" width="{size}" height="{height}" viewBox="0 0 {size} {height}" xmlns="http://www.w3.org/2000/svg" style="display: block;">"#,
            svg_id = ctx.element_id("svg"),
            size = dial.size(),
            height = dial.view_height(),
        );
        svg.push('\n');

        let mut part = String::new();
        self.background.apply(ctx, &mut part);
        push_line(&mut svg, &mut part);
        self.ticks.apply(ctx, &mut part);
        push_line(&mut svg, &mut part);
        self.needle.apply(ctx, &mut part);
        push_line(&mut svg, &mut part);
        self.readout.apply(ctx, &mut part);
        push_line(&mut svg, &mut part);
        svg.push_str("</svg>");

        self.composite.store(key, svg.clone());
        svg
    }
}

/// Moves a non-empty layer fragment onto its own line of `svg`.
fn push_line(svg: &mut String, part: &mut String) {
    if !part.is_empty() {
        svg.push_str(part);
        svg.push('\n');
        part.clear();
    }
}

// ============================================================================
// Tests
// ============================================================================
