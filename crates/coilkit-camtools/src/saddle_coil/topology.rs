//! Corner tables for the two saddle coil cuts.
//!
//! The main cut is the tool-centre outline of the flat conductor strip,
//! walked with the conductor on the right. It runs from the leg foot around
//! loop 1, across the bridge into loop 2, out to the free end of loop 2 and
//! back along the outer edges. The stub cut frames the pad of the second
//! leg, which is joined to the free end of loop 2 after forming.
//!
//! Every corner carries its bend class. A left turn keeps the conductor on
//! the outside of the tool's arc and is a small bend; a right turn is a
//! large bend.

use super::types::{BendClass, SaddleCoilParameters};
use coilkit_core::Point;
use serde::Serialize;

/// Offsets derived from the coil parameters, before the final shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetFrame {
    /// Half trace width plus tool radius: distance from a trace centre line
    /// to the tool centre on either side of it.
    pub edge: f64,
    /// Loop height between trace centres.
    pub height: f64,
    /// Unrolled position of angle zero, the left side of the first loop.
    pub x_start: f64,
    /// Unrolled position of the opening angle.
    pub x_alpha: f64,
    /// Unrolled position of the second loop (180 degrees).
    pub x_half: f64,
    /// Unrolled position of the far side of the second loop.
    pub x_far: f64,
    /// Centre line of the first leg.
    pub leg_x: f64,
    /// Inner end of the foot and of the second loop's free end.
    pub tip_x: f64,
    /// Height of the free end of loop 2 above the bridge line.
    pub free_end_y: f64,
    pub leg_length: f64,
}

impl OffsetFrame {
    pub fn new(params: &SaddleCoilParameters, angle_to_x: impl Fn(f64) -> f64) -> Self {
        let edge = params.width / 2.0 + params.tool_radius();
        let x_alpha = angle_to_x(params.alpha);
        let x_half = angle_to_x(180.0);
        Self {
            edge,
            height: params.h,
            x_start: angle_to_x(0.0),
            x_alpha,
            x_half,
            x_far: angle_to_x(180.0 + params.alpha),
            leg_x: x_alpha - params.width - params.cutter_diameter - params.gap,
            tip_x: x_half - edge - params.gap,
            free_end_y: edge + params.gap,
            leg_length: params.leg_length,
        }
    }
}

/// One named corner of a cut polygon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CornerSpec {
    pub name: &'static str,
    pub class: BendClass,
    pub point: Point,
}

impl CornerSpec {
    fn new(name: &'static str, class: BendClass, x: f64, y: f64) -> Self {
        Self {
            name,
            class,
            point: Point::new(x, y),
        }
    }
}

/// Corners of the main cut, in cutting order.
pub fn main_cut(f: &OffsetFrame) -> Vec<CornerSpec> {
    use BendClass::{Large as L, Small as S};
    let o = f.edge;
    let h = f.height;
    let foot = -f.leg_length;
    vec![
        CornerSpec::new("foot tip, bottom", L, f.tip_x, foot - o),
        CornerSpec::new("foot heel, outer", L, f.leg_x - o, foot - o),
        CornerSpec::new("leg root, outer", S, f.leg_x - o, -o),
        CornerSpec::new("loop 1 bottom-left, outer", L, f.x_start - o, -o),
        CornerSpec::new("loop 1 top-left, outer", L, f.x_start - o, h + o),
        CornerSpec::new("loop 1 top-right, outer", L, f.x_alpha + o, h + o),
        CornerSpec::new("loop 1 to bridge, inner", S, f.x_alpha + o, o),
        CornerSpec::new("loop 2 bottom-right, inner", S, f.x_far - o, o),
        CornerSpec::new("loop 2 top-right, inner", S, f.x_far - o, h - o),
        CornerSpec::new("loop 2 top-left, inner", S, f.x_half + o, h - o),
        CornerSpec::new("loop 2 free end, inner", L, f.x_half + o, f.free_end_y),
        CornerSpec::new("loop 2 free end, outer", L, f.x_half - o, f.free_end_y),
        CornerSpec::new("loop 2 top-left, outer", L, f.x_half - o, h + o),
        CornerSpec::new("loop 2 top-right, outer", L, f.x_far + o, h + o),
        CornerSpec::new("loop 2 bottom-right, outer", L, f.x_far + o, -o),
        CornerSpec::new("loop 1 bottom-right, outer", L, f.x_alpha - o, -o),
        CornerSpec::new("loop 1 top-right, inner", S, f.x_alpha - o, h - o),
        CornerSpec::new("loop 1 top-left, inner", S, f.x_start + o, h - o),
        CornerSpec::new("loop 1 bottom-left, inner", S, f.x_start + o, o),
        CornerSpec::new("leg root, inner", L, f.leg_x + o, o),
        CornerSpec::new("foot heel, inner", S, f.leg_x + o, foot + o),
        CornerSpec::new("foot tip, top", L, f.tip_x, foot + o),
    ]
}

/// Corners of the leg stub cut, in cutting order.
pub fn stub_cut(f: &OffsetFrame) -> Vec<CornerSpec> {
    use BendClass::Large as L;
    let o = f.edge;
    let foot = -f.leg_length;
    vec![
        CornerSpec::new("stub bottom-left", L, f.x_half - o, foot - o),
        CornerSpec::new("stub top-left", L, f.x_half - o, -f.free_end_y),
        CornerSpec::new("stub top-right", L, f.x_half + o, -f.free_end_y),
        CornerSpec::new("stub bottom-right", L, f.x_half + o, foot - o),
    ]
}

/// Merge applied to the main cut in compact mode: the two foot corners are
/// removed and the bottom corner takes the x of the inner leg edge, so the
/// leg drops straight to its end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompactMerge {
    /// Indices removed from the main cut, ascending.
    pub removed: [usize; 2],
    /// Corner whose x is reassigned.
    pub target: usize,
    /// Corner the x is copied from.
    pub source: usize,
}

pub const COMPACT_MERGE: CompactMerge = CompactMerge {
    removed: [20, 21],
    target: 0,
    source: 19,
};

impl CompactMerge {
    pub fn apply(&self, corners: &mut Vec<CornerSpec>) {
        let x = corners[self.source].point.x;
        corners[self.target].point.x = x;
        for &index in self.removed.iter().rev() {
            corners.remove(index);
        }
    }
}
