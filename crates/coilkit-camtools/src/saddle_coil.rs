//! Saddle Coil Generator
//!
//! Builds the cut paths for a two-loop saddle coil that is cut from flat
//! sheet and then wrapped onto a cylinder. Angular positions on the
//! cylinder map to x along the unrolled circumference.

pub mod topology;
pub mod types;

pub use topology::{CompactMerge, CornerSpec, OffsetFrame, COMPACT_MERGE};
pub use types::{BendClass, CoilExtents, SaddleCoilParameters};

use crate::error::{CamToolError, CamToolResult, ParameterError};
use crate::toolpath::{round_polygon, CutPath};
use coilkit_core::{GeometryError, Point};
use std::f64::consts::PI;
use tracing::{debug, info};

pub const MAIN_CUT: &str = "main";
pub const STUB_CUT: &str = "stub";

/// A fully built coil: shifted corner tables and their rounded cut paths.
#[derive(Debug, Clone)]
pub struct SaddleCoil {
    params: SaddleCoilParameters,
    circumference: f64,
    main: Vec<CornerSpec>,
    stub: Vec<CornerSpec>,
    cuts: Vec<CutPath>,
    extents: CoilExtents,
}

impl SaddleCoil {
    /// Validates the parameters and builds both cuts.
    pub fn new(params: SaddleCoilParameters) -> CamToolResult<Self> {
        params.validate()?;

        let circumference = 2.0 * PI * params.r;
        let frame = OffsetFrame::new(&params, |angle| {
            angle_to_x(circumference, params.start_angle, angle)
        });

        let mut main = topology::main_cut(&frame);
        let mut stub = topology::stub_cut(&frame);
        if params.compact {
            COMPACT_MERGE.apply(&mut main);
        }

        let extents = shift_to_margin(&mut main, &mut stub, params.tool_radius());
        debug!(
            max_x = extents.max_x,
            max_y = extents.max_y,
            "shifted coil geometry"
        );

        let cuts = vec![
            build_cut(MAIN_CUT, &main, &params)?,
            build_cut(STUB_CUT, &stub, &params)?,
        ];

        info!(
            main_corners = main.len(),
            stub_corners = stub.len(),
            compact = params.compact,
            "built saddle coil {:.3} x {:.3} mm",
            extents.max_x,
            extents.max_y
        );

        Ok(Self {
            params,
            circumference,
            main,
            stub,
            cuts,
            extents,
        })
    }

    /// Position along the unrolled circumference for an angle in degrees,
    /// measured from the start angle.
    pub fn angle_to_x(&self, angle: f64) -> f64 {
        angle_to_x(self.circumference, self.params.start_angle, angle)
    }

    pub fn circumference(&self) -> f64 {
        self.circumference
    }

    pub fn parameters(&self) -> &SaddleCoilParameters {
        &self.params
    }

    pub fn extents(&self) -> CoilExtents {
        self.extents
    }

    /// Corner points of the main cut.
    pub fn points(&self) -> Vec<Point> {
        self.main.iter().map(|c| c.point).collect()
    }

    /// Corner points of the leg stub cut.
    pub fn points2(&self) -> Vec<Point> {
        self.stub.iter().map(|c| c.point).collect()
    }

    pub fn main_corners(&self) -> &[CornerSpec] {
        &self.main
    }

    pub fn stub_corners(&self) -> &[CornerSpec] {
        &self.stub
    }

    /// Cut paths in build order: main cut, then stub.
    pub fn cuts(&self) -> &[CutPath] {
        &self.cuts
    }

    /// Small and large bend radii.
    pub fn corner_radii(&self) -> (f64, f64) {
        (
            self.params.bend_radius(BendClass::Small),
            self.params.bend_radius(BendClass::Large),
        )
    }
}

fn angle_to_x(circumference: f64, start_angle: f64, angle: f64) -> f64 {
    circumference * (start_angle + angle) / 360.0
}

/// Moves both cuts so the combined bounding box starts at `margin` on both
/// axes and returns the resulting maxima.
fn shift_to_margin(main: &mut [CornerSpec], stub: &mut [CornerSpec], margin: f64) -> CoilExtents {
    let all = || main.iter().chain(stub.iter()).map(|c| c.point);
    let min_x = all().map(|p| p.x).fold(f64::INFINITY, f64::min);
    let min_y = all().map(|p| p.y).fold(f64::INFINITY, f64::min);
    let offset = Point::new(margin - min_x, margin - min_y);

    let mut extents = CoilExtents {
        max_x: f64::NEG_INFINITY,
        max_y: f64::NEG_INFINITY,
    };
    for corner in main.iter_mut().chain(stub.iter_mut()) {
        corner.point = corner.point + offset;
        extents.max_x = extents.max_x.max(corner.point.x);
        extents.max_y = extents.max_y.max(corner.point.y);
    }
    extents
}

fn build_cut(
    name: &str,
    corners: &[CornerSpec],
    params: &SaddleCoilParameters,
) -> CamToolResult<CutPath> {
    let points: Vec<Point> = corners.iter().map(|c| c.point).collect();
    let radii: Vec<f64> = corners.iter().map(|c| params.bend_radius(c.class)).collect();
    check_cut(name, corners, &radii)?;
    round_polygon(name, &points, &radii)
}

/// Tolerance for corner turns and edge lengths that sit exactly on a limit.
const EPSILON: f64 = 1e-9;

/// Rejects a cut whose rounding would be wrong: every corner must turn the
/// way its bend class assumes, and every edge must be long enough for the
/// arcs at both of its ends.
fn check_cut(name: &str, corners: &[CornerSpec], radii: &[f64]) -> CamToolResult<()> {
    let n = corners.len();
    for i in 0..n {
        let prev = corners[(i + n - 1) % n].point;
        let corner = &corners[i];
        let next = (i + 1) % n;

        let geometry_err = |source: GeometryError| CamToolError::Geometry {
            corner: i,
            cut: name.to_string(),
            source,
        };
        let dir_in = prev.direction_to(corner.point).map_err(geometry_err)?;
        let dir_out = corner.point.direction_to(corners[next].point).map_err(geometry_err)?;

        let turn = dir_in.cross(dir_out);
        let turns_as_classed = match corner.class {
            BendClass::Small => turn > EPSILON,
            BendClass::Large => turn < -EPSILON,
        };
        if !turns_as_classed {
            return Err(ParameterError::Incompatible(format!(
                "{} cut corner {} ({}) turns the wrong way for a {:?} bend",
                name, i, corner.name, corner.class
            ))
            .into());
        }

        let length = corner.point.distance_to(corners[next].point);
        let needed = radii[i] + radii[next];
        if length + EPSILON < needed {
            return Err(ParameterError::Incompatible(format!(
                "{} cut edge {} -> {} is {:.3} mm, shorter than its corner radii {:.3} mm",
                name, i, next, length, needed
            ))
            .into());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CamToolError, ParameterError};

    fn reference_params() -> SaddleCoilParameters {
        SaddleCoilParameters::new(11.0, 7.5, 120.0, 3.0, 0.0)
            .with_leg_length(35.0)
            .with_corner_radius(1.0)
    }

    #[test]
    fn test_reference_coil() {
        let coil = SaddleCoil::new(reference_params()).unwrap();
        assert_eq!(coil.points().len(), 22);
        assert_eq!(coil.points2().len(), 4);
        assert_eq!(coil.cuts().len(), 2);
        assert_eq!(coil.cuts()[0].len(), 44);
        assert_eq!(coil.cuts()[1].len(), 8);
    }

    #[test]
    fn test_shift_places_minimum_at_tool_radius() {
        let params = SaddleCoilParameters {
            cutter_diameter: 1.0,
            ..reference_params()
        };
        let coil = SaddleCoil::new(params).unwrap();
        let all: Vec<Point> = coil.points().into_iter().chain(coil.points2()).collect();
        let min_x = all.iter().map(|p| p.x).fold(f64::INFINITY, f64::min);
        let min_y = all.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        assert!((min_x - 0.5).abs() < 1e-12);
        assert!((min_y - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_extents_are_maxima() {
        let coil = SaddleCoil::new(reference_params()).unwrap();
        let all: Vec<Point> = coil.points().into_iter().chain(coil.points2()).collect();
        let max_x = all.iter().map(|p| p.x).fold(f64::NEG_INFINITY, f64::max);
        let max_y = all.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(coil.extents(), CoilExtents { max_x, max_y });
    }

    #[test]
    fn test_angle_to_x() {
        let coil = SaddleCoil::new(reference_params()).unwrap();
        assert_eq!(coil.angle_to_x(0.0), 0.0);
        assert!((coil.angle_to_x(360.0) - coil.circumference()).abs() < 1e-12);
        assert!((coil.circumference() - 2.0 * PI * 7.5).abs() < 1e-12);
    }

    #[test]
    fn test_corner_radii() {
        let params = SaddleCoilParameters {
            cutter_diameter: 1.0,
            corner_radius: 1.0,
            ..reference_params()
        };
        let coil = SaddleCoil::new(params).unwrap();
        assert_eq!(coil.corner_radii(), (0.5, 1.5));
    }

    #[test]
    fn test_configuration_error_before_geometry() {
        let params = SaddleCoilParameters {
            cutter_diameter: 1.0,
            corner_radius: 0.2,
            ..reference_params()
        };
        let err = SaddleCoil::new(params).unwrap_err();
        assert!(matches!(
            err,
            CamToolError::Configuration(ParameterError::Incompatible(_))
        ));
    }

    #[test]
    fn test_start_angle_offsets_angle_to_x() {
        let coil = SaddleCoil::new(reference_params().with_start_angle(10.0)).unwrap();
        let expected = coil.circumference() * 10.0 / 360.0;
        assert!((coil.angle_to_x(0.0) - expected).abs() < 1e-12);
        assert!((coil.angle_to_x(350.0) - coil.circumference()).abs() < 1e-12);
    }

    #[test]
    fn test_start_angle_does_not_change_cut_geometry() {
        let plain = SaddleCoil::new(reference_params()).unwrap();
        let rotated = SaddleCoil::new(reference_params().with_start_angle(25.0)).unwrap();
        for (a, b) in plain.points().iter().zip(rotated.points()) {
            assert!(a.distance_to(b) < 1e-9, "{a} != {b}");
        }
        assert_eq!(plain.cuts().len(), rotated.cuts().len());
    }

    fn assert_incompatible(params: SaddleCoilParameters) {
        match SaddleCoil::new(params) {
            Err(CamToolError::Configuration(ParameterError::Incompatible(msg))) => {
                assert!(msg.starts_with("main cut"), "{msg}");
            }
            other => panic!("expected incompatible parameters, got {other:?}"),
        }
    }

    #[test]
    fn test_narrow_opening_angle_is_rejected() {
        // the leg lands left of loop 1
        assert_incompatible(SaddleCoilParameters {
            alpha: 30.0,
            ..reference_params()
        });
    }

    #[test]
    fn test_wide_opening_angle_is_rejected() {
        // the foot is too short for its two bends
        assert_incompatible(SaddleCoilParameters {
            alpha: 170.0,
            ..reference_params()
        });
    }

    #[test]
    fn test_low_loop_is_rejected() {
        // the inner edges of loop 2 fold back over each other
        assert_incompatible(SaddleCoilParameters {
            h: 3.5,
            ..reference_params()
        });
    }

    #[test]
    fn test_corner_radius_too_large_for_small_coil() {
        let params = SaddleCoilParameters::new(8.0, 2.05, 120.0, 1.0, 1.0)
            .with_corner_radius(1.0)
            .with_compact(true);
        assert_incompatible(params.clone());
        assert_incompatible(params.with_compact(false));
    }

    #[test]
    fn test_small_coil_with_tool_sized_corners_builds() {
        let params = SaddleCoilParameters::new(8.0, 2.05, 120.0, 1.0, 1.0).with_compact(true);
        let coil = SaddleCoil::new(params).unwrap();
        assert_eq!(coil.points().len(), 20);
    }

    #[test]
    fn test_zero_length_edge_is_geometry_error() {
        // loop height equal to the trace width collapses the inner edges
        let params = SaddleCoilParameters {
            h: 3.0,
            ..reference_params()
        };
        match SaddleCoil::new(params).unwrap_err() {
            CamToolError::Geometry { corner, cut, .. } => {
                assert_eq!(corner, 7);
                assert_eq!(cut, MAIN_CUT);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
