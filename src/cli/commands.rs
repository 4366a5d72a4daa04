//! CLI command definitions.

use std::path::PathBuf;

use clap::{Args, ValueEnum};

use crate::dial::{GaugeType, LabelPlacement};
use crate::error::Result;
use crate::profile::GaugeProfile;

/// Built-in gauge presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// 0-100 full circle
    Speed,
    /// 0-360 half circle
    Heading,
}

impl Preset {
    /// The profile this preset starts from.
    pub fn profile(self) -> GaugeProfile {
        match self {
            Self::Speed => GaugeProfile::speed(),
            Self::Heading => GaugeProfile::heading(),
        }
    }
}

/// Options describing the gauge, shared by every command.
///
/// The base profile comes from `--profile`, else `--preset`, else the
/// defaults; every other option overrides a single field of it.
#[derive(Debug, Default, Args)]
pub struct GaugeArgs {
    /// Start from a built-in preset
    #[arg(long, value_enum, conflicts_with = "profile")]
    pub preset: Option<Preset>,

    /// Start from a JSON profile file
    #[arg(long, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Element id prefix
    #[arg(long)]
    pub id: Option<String>,

    /// Value to display
    #[arg(long, allow_negative_numbers = true)]
    pub value: Option<f64>,

    /// Lower bound of the range
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,

    /// Upper bound of the range
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,

    /// Caption beneath the gauge
    #[arg(long)]
    pub label: Option<String>,

    /// Full or half circle
    #[arg(long = "type", value_enum, value_name = "TYPE")]
    pub gauge_type: Option<GaugeType>,

    /// Width in pixels
    #[arg(long)]
    pub size: Option<u32>,

    /// Background image drawn behind the needle
    #[arg(long, value_name = "FILE")]
    pub background: Option<PathBuf>,

    /// Plain face color (hex or CSS name)
    #[arg(long)]
    pub face_color: Option<String>,

    /// Needle color (hex or CSS name)
    #[arg(long)]
    pub needle_color: Option<String>,

    /// Needle length as a fraction of the radius
    #[arg(long)]
    pub needle_length: Option<f64>,

    /// Number of tick divisions
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Where tick labels go
    #[arg(long, value_enum)]
    pub label_placement: Option<LabelPlacement>,

    /// Decimals of the value readout
    #[arg(long)]
    pub decimals: Option<u8>,

    /// Hide the value readout
    #[arg(long)]
    pub hide_value: bool,

    /// Hide the tick marks
    #[arg(long)]
    pub hide_ticks: bool,
}

impl GaugeArgs {
    /// Resolves the options into a profile.
    pub fn to_profile(&self) -> Result<GaugeProfile> {
        let mut profile = match (&self.profile, self.preset) {
            (Some(path), _) => {
                let json = std::fs::read_to_string(path)?;
                GaugeProfile::from_json(&json)?
            }
            (None, Some(preset)) => preset.profile(),
            (None, None) => GaugeProfile::default(),
        };

        if let Some(id) = &self.id {
            profile.id = Some(id.clone());
        }
        if let Some(value) = self.value {
            profile.value = value;
        }
        if let Some(min) = self.min {
            profile.min_value = min;
        }
        if let Some(max) = self.max {
            profile.max_value = max;
        }
        if let Some(label) = &self.label {
            profile.label = label.clone();
        }
        if let Some(gauge_type) = self.gauge_type {
            profile.gauge_type = gauge_type;
        }
        if let Some(size) = self.size {
            profile.size = size;
        }
        if let Some(background) = &self.background {
            profile.background_image = Some(background.clone());
        }
        if let Some(color) = &self.face_color {
            profile.face_color = color.clone();
        }
        if let Some(color) = &self.needle_color {
            profile.needle_color = color.clone();
        }
        if let Some(length) = self.needle_length {
            profile.needle_length = length;
        }
        if let Some(count) = self.ticks {
            profile.tick_count = Some(count);
        }
        if let Some(placement) = self.label_placement {
            profile.label_placement = Some(placement);
        }
        if let Some(decimals) = self.decimals {
            profile.value_decimals = decimals;
        }
        if self.hide_value {
            profile.show_value = false;
        }
        if self.hide_ticks {
            profile.show_ticks = false;
        }
        Ok(profile)
    }
}

/// Render command arguments.
#[derive(Debug, Args)]
pub struct RenderCommand {
    #[command(flatten)]
    pub gauge: GaugeArgs,

    /// Wrap the SVG in an HTML container with the label
    #[arg(long)]
    pub html: bool,

    /// Write markup to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write a PNG snapshot
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Scale factor of the PNG snapshot
    #[arg(long, default_value = "1.0")]
    pub scale: f32,
}

/// Patch command arguments.
#[derive(Debug, Args)]
pub struct PatchCommand {
    #[command(flatten)]
    pub gauge: GaugeArgs,

    /// Print a browser script instead of JSON
    #[arg(long)]
    pub script: bool,
}

/// Profile command arguments.
#[derive(Debug, Args)]
pub struct ProfileCommand {
    #[command(flatten)]
    pub gauge: GaugeArgs,
}
