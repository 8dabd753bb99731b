//! Type definitions for the saddle coil builder

use crate::error::{ParameterError, ParameterResult};
use serde::{Deserialize, Serialize};

/// Physical dimensions of a saddle coil. Lengths in millimetres, angles in
/// degrees.
///
/// The first five values have no default when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaddleCoilParameters {
    /// Height of the loops, measured between trace centres.
    pub h: f64,
    /// Radius of the cylinder the sheet is wrapped onto.
    pub r: f64,
    /// Opening angle of each loop.
    pub alpha: f64,
    /// Conductor trace width.
    pub width: f64,
    /// Diameter of the cutting tool.
    pub cutter_diameter: f64,
    /// Extra clearance between neighbouring conductors.
    #[serde(default = "default_gap")]
    pub gap: f64,
    #[serde(default = "default_leg_length")]
    pub leg_length: f64,
    /// Nominal corner rounding radius. Must be at least half the cutter
    /// diameter.
    #[serde(default = "default_corner_radius")]
    pub corner_radius: f64,
    /// Angular offset added to every position on the cylinder.
    #[serde(default)]
    pub start_angle: f64,
    /// Drop the leg foot so the leg runs straight down. Needed for small
    /// radii where the foot would crowd the second loop.
    #[serde(default)]
    pub compact: bool,
}

fn default_gap() -> f64 {
    1.0
}

fn default_leg_length() -> f64 {
    10.0
}

fn default_corner_radius() -> f64 {
    0.5
}

impl Default for SaddleCoilParameters {
    fn default() -> Self {
        Self {
            h: 11.0,
            r: 7.5,
            alpha: 120.0,
            width: 3.0,
            cutter_diameter: 0.0,
            gap: default_gap(),
            leg_length: default_leg_length(),
            corner_radius: default_corner_radius(),
            start_angle: 0.0,
            compact: false,
        }
    }
}

impl SaddleCoilParameters {
    pub fn new(h: f64, r: f64, alpha: f64, width: f64, cutter_diameter: f64) -> Self {
        Self {
            h,
            r,
            alpha,
            width,
            cutter_diameter,
            ..Self::default()
        }
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_leg_length(mut self, leg_length: f64) -> Self {
        self.leg_length = leg_length;
        self
    }

    pub fn with_corner_radius(mut self, corner_radius: f64) -> Self {
        self.corner_radius = corner_radius;
        self
    }

    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    pub fn with_compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Checks every value before any geometry is derived from it.
    pub fn validate(&self) -> ParameterResult<()> {
        let named = [
            ("h", self.h),
            ("r", self.r),
            ("alpha", self.alpha),
            ("width", self.width),
            ("cutter_diameter", self.cutter_diameter),
            ("gap", self.gap),
            ("leg_length", self.leg_length),
            ("corner_radius", self.corner_radius),
            ("start_angle", self.start_angle),
        ];
        for (name, value) in named {
            if !value.is_finite() {
                return Err(ParameterError::InvalidValue {
                    name: name.to_string(),
                    reason: format!("{value} is not a finite number"),
                });
            }
        }

        positive("h", self.h)?;
        positive("r", self.r)?;
        positive("width", self.width)?;
        positive("leg_length", self.leg_length)?;
        non_negative("cutter_diameter", self.cutter_diameter)?;
        non_negative("gap", self.gap)?;

        if self.alpha <= 0.0 || self.alpha >= 180.0 {
            return Err(ParameterError::OutOfRange {
                name: "alpha".to_string(),
                value: self.alpha,
                min: 0.0,
                max: 180.0,
            });
        }

        let tool_radius = self.tool_radius();
        if self.corner_radius < tool_radius {
            return Err(ParameterError::Incompatible(format!(
                "corner radius {} is smaller than the tool radius {}",
                self.corner_radius, tool_radius
            )));
        }
        Ok(())
    }

    pub fn tool_radius(&self) -> f64 {
        self.cutter_diameter / 2.0
    }

    /// Radius of a bend of the given class.
    pub fn bend_radius(&self, class: BendClass) -> f64 {
        match class {
            BendClass::Small => self.corner_radius - self.tool_radius(),
            BendClass::Large => self.corner_radius + self.tool_radius(),
        }
    }
}

fn positive(name: &str, value: f64) -> ParameterResult<()> {
    if value <= 0.0 {
        return Err(ParameterError::OutOfRange {
            name: name.to_string(),
            value,
            min: 0.0,
            max: f64::INFINITY,
        });
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> ParameterResult<()> {
    if value < 0.0 {
        return Err(ParameterError::InvalidValue {
            name: name.to_string(),
            reason: format!("{value} must not be negative"),
        });
    }
    Ok(())
}

/// Which rounding radius a corner uses.
///
/// At a `Small` bend the conductor lies on the outside of the tool's arc,
/// so the tool-centre radius shrinks by the tool radius. At a `Large` bend
/// the surrounding sheet is outside and the radius grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BendClass {
    Small,
    Large,
}

impl BendClass {
    /// One-letter code used in corner listings.
    pub fn code(self) -> char {
        match self {
            BendClass::Small => 'S',
            BendClass::Large => 'L',
        }
    }
}

/// Largest coordinates of the shifted geometry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CoilExtents {
    pub max_x: f64,
    pub max_y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters_are_valid() {
        assert!(SaddleCoilParameters::default().validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let params = SaddleCoilParameters::new(8.0, 2.05, 120.0, 1.0, 1.0)
            .with_gap(0.5)
            .with_leg_length(12.0)
            .with_corner_radius(0.75)
            .with_start_angle(10.0)
            .with_compact(true);
        assert_eq!(params.gap, 0.5);
        assert_eq!(params.leg_length, 12.0);
        assert_eq!(params.corner_radius, 0.75);
        assert_eq!(params.start_angle, 10.0);
        assert!(params.compact);
    }

    #[test]
    fn test_corner_radius_below_tool_radius() {
        let params = SaddleCoilParameters::new(11.0, 7.5, 120.0, 3.0, 1.0).with_corner_radius(0.2);
        assert!(matches!(
            params.validate(),
            Err(ParameterError::Incompatible(_))
        ));
    }

    #[test]
    fn test_corner_radius_equal_to_tool_radius_is_allowed() {
        let params = SaddleCoilParameters::new(11.0, 7.5, 120.0, 3.0, 1.0).with_corner_radius(0.5);
        assert!(params.validate().is_ok());
        assert_eq!(params.bend_radius(BendClass::Small), 0.0);
        assert_eq!(params.bend_radius(BendClass::Large), 1.0);
    }

    #[test]
    fn test_invalid_values() {
        let params = SaddleCoilParameters {
            r: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::OutOfRange { ref name, .. }) if name == "r"
        ));

        let params = SaddleCoilParameters {
            width: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(ParameterError::InvalidValue { .. })
        ));

        let params = SaddleCoilParameters {
            cutter_diameter: -1.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());

        let params = SaddleCoilParameters {
            alpha: 200.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_bend_class_code() {
        assert_eq!(BendClass::Small.code(), 'S');
        assert_eq!(BendClass::Large.code(), 'L');
    }
}
