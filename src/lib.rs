//! # CoilKit
//!
//! Generates CNC toolpaths for saddle coils cut from flat sheet.
//!
//! ## Architecture
//!
//! CoilKit is organized as a workspace with multiple crates:
//!
//! 1. **coilkit-core** - Point/vector primitives and geometry errors
//! 2. **coilkit-camtools** - Saddle coil builder, cut paths, G-code and TikZ export
//! 3. **coilkit-settings** - Job files in TOML or JSON
//! 4. **coilkit** - Job runner and command line binary

use anyhow::Context;
use tracing::info;

pub use coilkit_camtools::{
    ArcDirection, BendClass, CamToolError, CoilExtents, CutPath, GcodeExporter, SaddleCoil,
    SaddleCoilParameters, Segment, TikzExporter, TikzOptions,
};
pub use coilkit_core::{GeometryError, Point};
pub use coilkit_settings::{CoilJobConfig, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// What a job produced.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutput {
    pub extents: CoilExtents,
    /// The G-code program, whether or not it was written to a file.
    pub gcode: String,
}

/// Builds the coil described by `config` and writes its outputs.
///
/// The G-code goes to the configured file, or is returned for the caller
/// to print when no file is set. The diagram is only written when a
/// diagram output is configured.
pub fn run_job(config: &CoilJobConfig) -> anyhow::Result<JobOutput> {
    config.validate().context("invalid coil job")?;

    let coil = SaddleCoil::new(config.coil.clone()).context("failed to build coil")?;
    let extents = coil.extents();
    info!(
        max_x = extents.max_x,
        max_y = extents.max_y,
        "coil dimensions"
    );

    let exporter = GcodeExporter::new(config.gcode.feed);
    let gcode = match config.gcode.output_path() {
        Some(path) => exporter
            .write_coil(&coil, path)
            .with_context(|| format!("failed to write G-code to {}", path.display()))?,
        None => exporter.export_coil(&coil),
    };

    if let Some(path) = config.diagram.output_path() {
        TikzExporter::new(config.diagram.to_options())
            .with_gcode_exporter(exporter)
            .write_coil(&coil, path)
            .with_context(|| format!("failed to write diagram to {}", path.display()))?;
    }

    Ok(JobOutput { extents, gcode })
}

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so a G-code program on stdout stays clean
/// - RUST_LOG environment variable support
/// - Target, thread and line information
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
