//! Segment and path model for tool-down cuts.
//!
//! A [`CutPath`] is one continuous cut: a start point followed by straight
//! and arc [`Segment`]s. Each segment renders itself as a G-code motion
//! command and as a TikZ path continuation.

use crate::error::{CamToolError, CamToolResult, ParameterError};
use coilkit_core::{GeometryError, Point};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rotational sense of a circular arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArcDirection {
    Clockwise,
    CounterClockwise,
}

impl ArcDirection {
    /// Picks the sense from the cross product of the incoming and outgoing
    /// directions. Only a strictly positive turn is counterclockwise.
    pub fn from_turn(cross: f64) -> Self {
        if cross > 0.0 {
            ArcDirection::CounterClockwise
        } else {
            ArcDirection::Clockwise
        }
    }

    /// G-code word for circular interpolation in this sense.
    pub fn gcode_word(self) -> &'static str {
        match self {
            ArcDirection::Clockwise => "G2",
            ArcDirection::CounterClockwise => "G3",
        }
    }

    /// Signed sweep of a corner arc in degrees.
    fn sweep_degrees(self) -> f64 {
        match self {
            ArcDirection::Clockwise => -90.0,
            ArcDirection::CounterClockwise => 90.0,
        }
    }
}

/// One motion of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    /// Linear move to `to`.
    Straight { to: Point },
    /// Circular move to `to`. The centre is `center_offset` relative to the
    /// position where the arc starts.
    Arc {
        to: Point,
        center_offset: Point,
        direction: ArcDirection,
    },
}

impl Segment {
    pub fn straight(to: Point) -> Self {
        Segment::Straight { to }
    }

    pub fn arc(to: Point, center_offset: Point, direction: ArcDirection) -> Self {
        Segment::Arc {
            to,
            center_offset,
            direction,
        }
    }

    /// Destination of the motion.
    pub fn end(&self) -> Point {
        match self {
            Segment::Straight { to } | Segment::Arc { to, .. } => *to,
        }
    }

    pub fn to_gcode(&self) -> String {
        match self {
            Segment::Straight { to } => format!("G1 X{:.3} Y{:.3}", to.x, to.y),
            Segment::Arc {
                to,
                center_offset,
                direction,
            } => format!(
                "{} X{:.3} Y{:.3} I{:.3} J{:.3}",
                direction.gcode_word(),
                to.x,
                to.y,
                center_offset.x,
                center_offset.y
            ),
        }
    }

    /// TikZ path continuation. Arcs use the `(start:end:radius)` form where
    /// the start angle points from the centre back to the arc's start.
    pub fn to_tikz(&self) -> String {
        match self {
            Segment::Straight { to } => format!(" -- ({:.3},{:.3})", to.x, to.y),
            Segment::Arc {
                center_offset,
                direction,
                ..
            } => {
                let start_angle = center_offset.angle_degrees() + 180.0;
                let end_angle = start_angle + direction.sweep_degrees();
                format!(
                    " arc ({:.3}:{:.3}:{:.3})",
                    start_angle,
                    end_angle,
                    center_offset.magnitude()
                )
            }
        }
    }
}

/// Heights and plunge used to bracket every cut.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CutMotion {
    /// Z for rapid moves between cuts.
    pub safe_z: f64,
    /// Z the tool rapids down to before feeding into the material.
    pub approach_z: f64,
    /// Z at which the cut runs.
    pub cut_z: f64,
}

impl Default for CutMotion {
    fn default() -> Self {
        Self {
            safe_z: 5.0,
            approach_z: 0.5,
            cut_z: -0.3,
        }
    }
}

/// One continuous tool-down cut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPath {
    start: Point,
    segments: Vec<Segment>,
}

impl CutPath {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Tool position after the last segment.
    pub fn end_point(&self) -> Point {
        self.segments.last().map_or(self.start, Segment::end)
    }

    /// Renders the cut with lift, rapid, plunge and final lift around the
    /// segment moves. Every line ends with a newline.
    pub fn to_gcode(&self, feed: f64, motion: &CutMotion) -> String {
        let mut gcode = String::new();
        gcode.push_str(&format!("G0 Z{}\n", motion.safe_z));
        gcode.push_str(&format!("G0 X{:.3} Y{:.3}\n", self.start.x, self.start.y));
        gcode.push_str(&format!("G0 Z{}\n", motion.approach_z));
        gcode.push_str(&format!("G01 Z{} F{:.3}\n", motion.cut_z, feed));
        for segment in &self.segments {
            gcode.push_str(&segment.to_gcode());
            gcode.push('\n');
        }
        gcode.push_str(&format!("G0 Z{}\n", motion.safe_z));
        gcode
    }

    /// Renders the cut as a single `\draw` command.
    pub fn to_tikz(&self) -> String {
        let mut tikz = format!("\\draw[thick] ({:.3},{:.3})", self.start.x, self.start.y);
        for segment in &self.segments {
            tikz.push_str(&segment.to_tikz());
        }
        tikz.push(';');
        tikz
    }
}

/// Replaces every corner of a closed polygon with a tangent arc.
///
/// Corner `i` is rounded with `radii[i]`: a straight move to
/// `P[i] - dir_in * r` followed by an arc to `P[i] + dir_out * r` whose
/// centre offset is `dir_out * r`. The path starts at the arc end of the
/// last corner, so a well-formed polygon closes back on the start point.
/// `cut` names the polygon in errors and log output.
pub fn round_polygon(cut: &str, corners: &[Point], radii: &[f64]) -> CamToolResult<CutPath> {
    let count = corners.len();
    if count < 3 {
        return Err(ParameterError::InvalidValue {
            name: cut.to_string(),
            reason: format!("a closed cut needs at least 3 corners, got {count}"),
        }
        .into());
    }
    if radii.len() != count {
        return Err(ParameterError::Incompatible(format!(
            "cut '{cut}' has {count} corners but {} corner radii",
            radii.len()
        ))
        .into());
    }

    let mut arcs = Vec::with_capacity(count);
    for i in 0..count {
        let prev = corners[(i + count - 1) % count];
        let corner = corners[i];
        let next = corners[(i + 1) % count];
        let geometry_err = |source: GeometryError| CamToolError::Geometry {
            corner: i,
            cut: cut.to_string(),
            source,
        };
        let dir_in = prev.direction_to(corner).map_err(geometry_err)?;
        let dir_out = corner.direction_to(next).map_err(geometry_err)?;

        let radius = radii[i];
        let arc_start = corner - dir_in * radius;
        let arc_end = corner + dir_out * radius;
        let center_offset = dir_out * radius;
        let direction = ArcDirection::from_turn(dir_in.cross(dir_out));
        debug!(
            cut,
            corner = i,
            radius,
            ?direction,
            "rounded corner at {}",
            corner
        );
        arcs.push((arc_start, Segment::arc(arc_end, center_offset, direction)));
    }

    let start = arcs[count - 1].1.end();
    let mut path = CutPath::new(start);
    for (arc_start, arc) in arcs {
        path.push(Segment::straight(arc_start));
        path.push(arc);
    }
    Ok(path)
}
