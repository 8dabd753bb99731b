//! TikZ diagram export for checking a coil before cutting.
//!
//! The document draws every cut as one `\draw` path, optionally labels the
//! corners (`p` for the main cut, `q` for the stub), adds scale bars for the
//! overall width and height, and can append the corner listing and the
//! G-code program as verbatim text.

use crate::error::{CamToolError, CamToolResult};
use crate::gcode::GcodeExporter;
use crate::output::write_atomic;
use crate::saddle_coil::{CornerSpec, SaddleCoil};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Distance of the scale bars from the drawing, in drawing units.
const SCALE_BAR_OFFSET: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TikzOptions {
    /// Label every corner with its index.
    pub include_points: bool,
    /// Append the corner coordinates and bend radii as text.
    pub include_points_text: bool,
    /// Append the G-code program as a verbatim listing.
    pub include_gcode: bool,
    pub scale_bars: bool,
    /// TikZ picture scale.
    pub scale: f64,
    /// Run the document compiler after writing the file.
    pub compile: bool,
}

impl Default for TikzOptions {
    fn default() -> Self {
        Self {
            include_points: true,
            include_points_text: false,
            include_gcode: false,
            scale_bars: true,
            scale: 1.0,
            compile: false,
        }
    }
}

/// Turns a written document into something viewable.
pub trait DocumentCompiler {
    fn compile(&self, document: &Path) -> CamToolResult<()>;
}

/// Runs `pdflatex` on the document, then opens the PDF in a viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatexCompiler {
    pub latex: String,
    pub viewer: Option<String>,
}

impl Default for LatexCompiler {
    fn default() -> Self {
        let viewer = if cfg!(target_os = "macos") {
            "open"
        } else {
            "xdg-open"
        };
        Self {
            latex: "pdflatex".to_string(),
            viewer: Some(viewer.to_string()),
        }
    }
}

impl DocumentCompiler for LatexCompiler {
    #[cfg(feature = "external-tools")]
    fn compile(&self, document: &Path) -> CamToolResult<()> {
        use std::process::Command;

        let dir = match document.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let file_name = document.file_name().ok_or_else(|| {
            CamToolError::ExternalProcess(format!("{} is not a file", document.display()))
        })?;

        let status = Command::new(&self.latex)
            .arg("-interaction=nonstopmode")
            .arg(file_name)
            .current_dir(dir)
            .status()
            .map_err(|e| CamToolError::ExternalProcess(format!("{}: {}", self.latex, e)))?;
        if !status.success() {
            return Err(CamToolError::ExternalProcess(format!(
                "{} exited with {}",
                self.latex, status
            )));
        }
        info!(document = %document.display(), "compiled diagram");

        if let Some(viewer) = &self.viewer {
            Command::new(viewer)
                .arg(document.with_extension("pdf"))
                .spawn()
                .map_err(|e| CamToolError::ExternalProcess(format!("{viewer}: {e}")))?;
        }
        Ok(())
    }

    #[cfg(not(feature = "external-tools"))]
    fn compile(&self, document: &Path) -> CamToolResult<()> {
        Err(CamToolError::ExternalProcess(format!(
            "cannot run {} on {}: built without external tool support",
            self.latex,
            document.display()
        )))
    }
}

pub struct TikzExporter {
    options: TikzOptions,
    gcode: GcodeExporter,
    compiler: Box<dyn DocumentCompiler>,
}

impl Default for TikzExporter {
    fn default() -> Self {
        Self::new(TikzOptions::default())
    }
}

impl TikzExporter {
    pub fn new(options: TikzOptions) -> Self {
        Self {
            options,
            gcode: GcodeExporter::default(),
            compiler: Box::new(LatexCompiler::default()),
        }
    }

    /// Exporter used for the embedded G-code listing.
    pub fn with_gcode_exporter(mut self, gcode: GcodeExporter) -> Self {
        self.gcode = gcode;
        self
    }

    pub fn with_compiler(mut self, compiler: Box<dyn DocumentCompiler>) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn options(&self) -> &TikzOptions {
        &self.options
    }

    pub fn export(&self, coil: &SaddleCoil) -> String {
        let mut tex = String::new();
        tex.push_str("\\documentclass{article}\n");
        tex.push_str("\\usepackage{tikz}\n");
        tex.push_str("\\begin{document}\n");
        tex.push_str(&format!(
            "\\begin{{tikzpicture}}[scale={}]\n",
            self.options.scale
        ));

        for cut in coil.cuts() {
            tex.push_str("  ");
            tex.push_str(&cut.to_tikz());
            tex.push('\n');
        }

        if self.options.include_points {
            push_point_labels(&mut tex, 'p', coil.main_corners());
            push_point_labels(&mut tex, 'q', coil.stub_corners());
        }

        if self.options.scale_bars {
            let extents = coil.extents();
            tex.push_str(&format!(
                "  \\draw[|<->|] (0,{y:.3}) -- ({:.3},{y:.3}) node[midway, below] {{{:.3} mm}};\n",
                extents.max_x,
                extents.max_x,
                y = -SCALE_BAR_OFFSET
            ));
            tex.push_str(&format!(
                "  \\draw[|<->|] ({x:.3},0) -- ({x:.3},{:.3}) node[midway, left] {{{:.3} mm}};\n",
                extents.max_y,
                extents.max_y,
                x = -SCALE_BAR_OFFSET
            ));
        }

        tex.push_str("  \\draw[fill=red] (0,0) circle (0.15);\n");
        tex.push_str("\\end{tikzpicture}\n");

        if self.options.include_points_text {
            let (small, large) = coil.corner_radii();
            tex.push_str("\n\\section*{Corner points}\n");
            tex.push_str(&format!(
                "Corner radius {:.3} mm: small bends {:.3} mm, large bends {:.3} mm.\n",
                coil.parameters().corner_radius,
                small,
                large
            ));
            tex.push_str("\\begin{verbatim}\n");
            push_point_listing(&mut tex, 'p', coil.main_corners());
            push_point_listing(&mut tex, 'q', coil.stub_corners());
            tex.push_str("\\end{verbatim}\n");
        }

        if self.options.include_gcode {
            tex.push_str("\n\\section*{G-code}\n");
            tex.push_str("\\begin{verbatim}\n");
            tex.push_str(&self.gcode.export_coil(coil));
            tex.push_str("\\end{verbatim}\n");
        }

        tex.push_str("\\end{document}\n");
        tex
    }

    /// Writes the document to `path`, then compiles it if enabled. A failing
    /// compiler is logged and leaves the written file in place.
    pub fn write_coil(&self, coil: &SaddleCoil, path: &Path) -> CamToolResult<String> {
        let tex = self.export(coil);
        write_atomic(path, &tex)?;
        info!(path = %path.display(), "wrote TikZ diagram");

        if self.options.compile {
            if let Err(e) = self.compiler.compile(path) {
                warn!(path = %path.display(), "diagram compilation failed: {}", e);
            }
        }
        Ok(tex)
    }
}

fn push_point_labels(tex: &mut String, prefix: char, corners: &[CornerSpec]) {
    for (i, corner) in corners.iter().enumerate() {
        tex.push_str(&format!(
            "  \\fill ({:.3},{:.3}) circle (0.08) node[above right] {{\\tiny ${}_{{{}}}$}};\n",
            corner.point.x, corner.point.y, prefix, i
        ));
    }
}

fn push_point_listing(tex: &mut String, prefix: char, corners: &[CornerSpec]) {
    for (i, corner) in corners.iter().enumerate() {
        tex.push_str(&format!(
            "{}{:<3} {} {}  {}\n",
            prefix,
            i,
            corner.point,
            corner.class.code(),
            corner.name
        ));
    }
}
