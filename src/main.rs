//! `svg-gauge` - render gauges from the command line
//!
//! Prints gauge markup, redraw patches, or effective profiles, built from a
//! preset or profile file plus per-field overrides.

#![deny(unsafe_code)]

use std::path::Path;

use clap::Parser;

use svg_gauge::cli::{Cli, Command, PatchCommand, ProfileCommand, RenderCommand};
use svg_gauge::{Configurable, Gauge, init_logging};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    match cli.command {
        Command::Render(cmd) => handle_render(&cmd),
        Command::Patch(cmd) => handle_patch(&cmd),
        Command::Profile(cmd) => handle_profile(&cmd),
    }
}

fn handle_render(cmd: &RenderCommand) -> Result<(), Box<dyn std::error::Error>> {
    let mut gauge = Gauge::new(&cmd.gauge.to_profile()?)?;

    let markup = if cmd.html {
        gauge.render_html()
    } else {
        gauge.render_svg()
    };
    emit(&markup, cmd.output.as_deref())?;

    if let Some(path) = &cmd.png {
        let png = gauge.render_png(cmd.scale)?;
        std::fs::write(path, png)?;
        tracing::info!(path = %path.display(), scale = cmd.scale, "wrote snapshot");
    }
    Ok(())
}

fn handle_patch(cmd: &PatchCommand) -> Result<(), Box<dyn std::error::Error>> {
    let profile = cmd.gauge.to_profile()?;
    let mut gauge = Gauge::new(&profile)?;
    let patch = gauge.set_value(profile.value);

    let out = if cmd.script {
        patch.to_script()
    } else {
        patch.to_json()?
    };
    println!("{out}");
    Ok(())
}

fn handle_profile(cmd: &ProfileCommand) -> Result<(), Box<dyn std::error::Error>> {
    let gauge = Gauge::new(&cmd.gauge.to_profile()?)?;
    println!("{}", gauge.export_profile().to_json_pretty()?);
    Ok(())
}

/// Writes markup to `output`, or stdout when none is given.
fn emit(markup: &str, output: Option<&Path>) -> std::io::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, markup)?;
            tracing::info!(path = %path.display(), bytes = markup.len(), "wrote markup");
        }
        None => println!("{markup}"),
    }
    Ok(())
}
