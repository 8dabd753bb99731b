//! G-code program export.
//!
//! The program turns tool compensation on once, runs every cut in build
//! order and turns compensation off at the end:
//!
//! ```text
//! ;G-Code generated by coilkit
//! ;maxX : 42.124
//! ;maxY : 52.000
//! G90
//! G00 Z5.00
//! M10 O6.1
//! G0 Z5
//! G0 X.. Y..
//! ...
//! M10 O6.0
//! ```

use crate::error::CamToolResult;
use crate::output::write_atomic;
use crate::saddle_coil::{CoilExtents, SaddleCoil};
use crate::toolpath::{CutMotion, CutPath};
use std::path::Path;
use tracing::info;

/// Feed rate used when none is configured.
pub const DEFAULT_FEED_RATE: f64 = 7.5;

const TOOL_COMPENSATION_ON: &str = "M10 O6.1";
const TOOL_COMPENSATION_OFF: &str = "M10 O6.0";

#[derive(Debug, Clone)]
pub struct GcodeExporter {
    feed: f64,
    motion: CutMotion,
}

impl Default for GcodeExporter {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_RATE)
    }
}

impl GcodeExporter {
    pub fn new(feed: f64) -> Self {
        Self {
            feed,
            motion: CutMotion::default(),
        }
    }

    pub fn with_motion(mut self, motion: CutMotion) -> Self {
        self.motion = motion;
        self
    }

    pub fn feed(&self) -> f64 {
        self.feed
    }

    /// Renders the full program for `cuts`. The output depends only on the
    /// arguments and the exporter settings.
    pub fn export(&self, cuts: &[CutPath], extents: CoilExtents) -> String {
        let mut gcode = String::new();
        gcode.push_str(&format!(
            ";G-Code generated by {} {}\n",
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ));
        gcode.push_str(&format!(";maxX : {:.3}\n", extents.max_x));
        gcode.push_str(&format!(";maxY : {:.3}\n", extents.max_y));
        gcode.push_str("G90\n");
        gcode.push_str(&format!("G00 Z{:.2}\n", self.motion.safe_z));
        gcode.push_str(TOOL_COMPENSATION_ON);
        gcode.push('\n');

        for cut in cuts {
            gcode.push_str(&cut.to_gcode(self.feed, &self.motion));
        }

        gcode.push_str(TOOL_COMPENSATION_OFF);
        gcode.push('\n');
        gcode
    }

    pub fn export_coil(&self, coil: &SaddleCoil) -> String {
        self.export(coil.cuts(), coil.extents())
    }

    /// Renders the coil and writes it to `path`, replacing any existing
    /// file. Returns the program text.
    pub fn write_coil(&self, coil: &SaddleCoil, path: &Path) -> CamToolResult<String> {
        let gcode = self.export_coil(coil);
        write_atomic(path, &gcode)?;
        info!(
            path = %path.display(),
            lines = gcode.lines().count(),
            "wrote G-code program"
        );
        Ok(gcode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolpath::Segment;
    use coilkit_core::Point;

    fn single_cut() -> Vec<CutPath> {
        let mut cut = CutPath::new(Point::new(1.0, 1.0));
        cut.push(Segment::straight(Point::new(4.0, 1.0)));
        vec![cut]
    }

    #[test]
    fn test_export_layout() {
        let extents = CoilExtents {
            max_x: 4.0,
            max_y: 1.0,
        };
        let gcode = GcodeExporter::default().export(&single_cut(), extents);
        let lines: Vec<&str> = gcode.lines().collect();
        assert!(lines[0].starts_with(";G-Code generated by coilkit-camtools"));
        assert_eq!(
            &lines[1..],
            &[
                ";maxX : 4.000",
                ";maxY : 1.000",
                "G90",
                "G00 Z5.00",
                "M10 O6.1",
                "G0 Z5",
                "G0 X1.000 Y1.000",
                "G0 Z0.5",
                "G01 Z-0.3 F7.500",
                "G1 X4.000 Y1.000",
                "G0 Z5",
                "M10 O6.0",
            ]
        );
    }

    #[test]
    fn test_feed_override() {
        let gcode = GcodeExporter::new(120.0).export(&single_cut(), CoilExtents::default());
        assert!(gcode.contains("G01 Z-0.3 F120.000\n"));
    }

    #[test]
    fn test_custom_motion() {
        let motion = CutMotion {
            safe_z: 10.0,
            approach_z: 1.0,
            cut_z: -0.5,
        };
        let gcode = GcodeExporter::default()
            .with_motion(motion)
            .export(&single_cut(), CoilExtents::default());
        assert!(gcode.contains("G00 Z10.00\n"));
        assert!(gcode.contains("G0 Z1\n"));
        assert!(gcode.contains("G01 Z-0.5 F7.500\n"));
    }

    #[test]
    fn test_empty_job_still_brackets() {
        let gcode = GcodeExporter::default().export(&[], CoilExtents::default());
        assert!(gcode.contains("M10 O6.1\n"));
        assert!(gcode.ends_with("M10 O6.0\n"));
    }
}
