//! Command-line interface for the `svg-gauge` binary.

mod commands;

use clap::{Parser, Subcommand};

pub use commands::{GaugeArgs, PatchCommand, Preset, ProfileCommand, RenderCommand};

use crate::logging::Verbosity;

/// svg-gauge - render instrument gauges as inline SVG
#[derive(Debug, Parser)]
#[command(name = "svg-gauge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the gauge as SVG or HTML, optionally saving a PNG snapshot
    Render(RenderCommand),

    /// Print the redraw instructions for the gauge's value
    Patch(PatchCommand),

    /// Print the effective profile as JSON
    Profile(ProfileCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.verbose)
    }
}
