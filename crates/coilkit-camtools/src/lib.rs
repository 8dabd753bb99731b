//! # CoilKit CAM Tools
//!
//! Toolpath generation for saddle coils cut from flat sheet.
//!
//! [`SaddleCoil`] turns the physical coil dimensions into two closed corner
//! polygons (the coil body and the detached leg stub), rounds every corner
//! with a tangent arc and returns one [`CutPath`] per polygon. The
//! exporters consume the finished paths:
//!
//! - [`GcodeExporter`] writes the machine program with tool compensation
//!   bracketing all motion.
//! - [`TikzExporter`] writes a LaTeX/TikZ drawing for visual checks, and can
//!   hand it to a [`DocumentCompiler`].

pub mod error;
pub mod gcode;
pub mod output;
pub mod saddle_coil;
pub mod tikz;
pub mod toolpath;

pub use error::{CamToolError, CamToolResult, ParameterError, ParameterResult};
pub use gcode::{GcodeExporter, DEFAULT_FEED_RATE};
pub use output::write_atomic;
pub use saddle_coil::{BendClass, CoilExtents, CornerSpec, SaddleCoil, SaddleCoilParameters};
pub use tikz::{DocumentCompiler, LatexCompiler, TikzExporter, TikzOptions};
pub use toolpath::{round_polygon, ArcDirection, CutMotion, CutPath, Segment};
