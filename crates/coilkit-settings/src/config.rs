//! Coil job configuration.
//!
//! A job file has three sections:
//!
//! ```toml
//! [coil]
//! h = 11.0
//! r = 7.5
//! alpha = 120.0
//! width = 3.0
//! cutter_diameter = 0.0
//! leg_length = 35.0
//! corner_radius = 1.0
//! start_angle = 0.0
//!
//! [gcode]
//! feed = 7.5
//! output = "coil.nc"
//!
//! [diagram]
//! output = "coil.tex"
//! include_points = true
//! ```
//!
//! `[coil]` takes the fields of [`SaddleCoilParameters`]. `h`, `r`, `alpha`,
//! `width` and `cutter_diameter` are required; the rest have defaults. An
//! empty G-code output prints the program to stdout; an empty diagram output
//! skips the diagram.

use crate::error::{SettingsError, SettingsResult};
use coilkit_camtools::{write_atomic, SaddleCoilParameters, TikzOptions, DEFAULT_FEED_RATE};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GcodeSettings {
    pub feed: f64,
    /// Output file. Empty prints to stdout.
    pub output: String,
}

impl Default for GcodeSettings {
    fn default() -> Self {
        Self {
            feed: DEFAULT_FEED_RATE,
            output: String::new(),
        }
    }
}

impl GcodeSettings {
    pub fn output_path(&self) -> Option<&Path> {
        non_empty_path(&self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramSettings {
    /// Output file. Empty skips the diagram.
    pub output: String,
    pub include_points: bool,
    pub include_points_text: bool,
    pub include_gcode: bool,
    pub scale_bars: bool,
    pub scale: f64,
    pub compile: bool,
}

impl Default for DiagramSettings {
    fn default() -> Self {
        let options = TikzOptions::default();
        Self {
            output: String::new(),
            include_points: options.include_points,
            include_points_text: options.include_points_text,
            include_gcode: options.include_gcode,
            scale_bars: options.scale_bars,
            scale: options.scale,
            compile: options.compile,
        }
    }
}

impl DiagramSettings {
    pub fn output_path(&self) -> Option<&Path> {
        non_empty_path(&self.output)
    }

    pub fn to_options(&self) -> TikzOptions {
        TikzOptions {
            include_points: self.include_points,
            include_points_text: self.include_points_text,
            include_gcode: self.include_gcode,
            scale_bars: self.scale_bars,
            scale: self.scale,
            compile: self.compile,
        }
    }
}

fn non_empty_path(value: &str) -> Option<&Path> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| Path::new(trimmed))
}

/// A complete coil job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoilJobConfig {
    pub coil: SaddleCoilParameters,
    #[serde(default)]
    pub gcode: GcodeSettings,
    #[serde(default)]
    pub diagram: DiagramSettings,
}

impl Default for CoilJobConfig {
    /// The reference coil: 11 mm loops on a 7.5 mm radius with 35 mm legs.
    fn default() -> Self {
        Self {
            coil: SaddleCoilParameters::default()
                .with_leg_length(35.0)
                .with_corner_radius(1.0),
            gcode: GcodeSettings::default(),
            diagram: DiagramSettings::default(),
        }
    }
}

impl CoilJobConfig {
    /// Load a job from a `.toml` or `.json` file and validate it.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match Format::of(path)? {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Save the job as `.toml` or `.json`, chosen by extension.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        write_atomic(path, &content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        positive("gcode.feed", self.gcode.feed)?;
        positive("diagram.scale", self.diagram.scale)?;

        self.coil
            .validate()
            .map_err(|e| invalid("coil", e.to_string()))
    }
}

enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("toml") => Ok(Format::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(key, format!("{value} must be a positive number")))
    }
}

fn invalid(key: &str, reason: String) -> SettingsError {
    SettingsError::Invalid {
        key: key.to_string(),
        reason,
    }
}
