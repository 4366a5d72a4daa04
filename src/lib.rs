//! svg-gauge: instrument gauges rendered as inline SVG
//!
//! This crate draws speedometer- and compass-style gauges for web
//! dashboards. A gauge maps a value onto a needle angle over a full or half
//! circle and renders a self-contained `<svg>` fragment with an optional
//! embedded background, graduated ticks, the needle, and a numeric readout.
//!
//! # Example
//!
//! ```
//! use svg_gauge::{Gauge, GaugeProfile};
//!
//! let mut speed = Gauge::new(&GaugeProfile::speed()).unwrap();
//!
//! // Initial markup for the page
//! let html = speed.render_html();
//! assert!(html.contains("EGO Speed"));
//!
//! // Each new sample only moves the needle
//! let patch = speed.set_value(50.0);
//! assert_eq!(patch.rotation, 90.0);
//! let script = patch.to_script();
//! ```
//!
//! # Serializable Profiles
//!
//! Gauges are configured from a [`GaugeProfile`] with the [`Configurable`]
//! trait, so settings can travel as JSON:
//!
//! ```
//! use svg_gauge::{Configurable, Gauge, GaugeProfile, GaugeType};
//!
//! let mut gauge = Gauge::new(&GaugeProfile::default()).unwrap();
//!
//! // Re-configure in place
//! let profile = GaugeProfile::heading().with_needle_color("crimson");
//! gauge.apply_profile(&profile).unwrap();
//! assert_eq!(gauge.dial().gauge_type(), GaugeType::Semicircular);
//!
//! // Export current settings
//! let json = gauge.export_profile().to_json().unwrap();
//! ```

mod color;
mod dial;
mod embed;
mod error;
mod gauge;
mod layer;
mod patch;
mod profile;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "cli")]
pub mod logging;

pub use color::Color;
pub use dial::{Dial, GaugeType, LabelPlacement, MIN_SIZE, Point};
pub use embed::EmbeddedImage;
pub use error::{GaugeError, Result};
pub use gauge::{Configurable, Gauge};
pub use layer::readout::MAX_DECIMALS;
pub use layer::ticks::MAX_TICK_COUNT;
pub use layer::svg::{encode_png, rasterize};
pub use layer::{
    BackgroundConfig, CompositeLayer, DependencyVersion, Layer, LayerConfig, LayerEffect,
    LayerPipeline, LayerVersions, NeedleConfig, ReadoutConfig, RenderContext, TickConfig,
};
pub use patch::{NeedlePatch, Redraw, UpdateMode};
pub use profile::GaugeProfile;

#[cfg(feature = "cli")]
pub use logging::init_logging;
