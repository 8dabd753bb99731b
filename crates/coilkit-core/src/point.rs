//! 2D point and vector arithmetic.
//!
//! A [`Point`] is an immutable `(x, y)` pair in millimetres. The same type
//! carries positions and direction vectors; every operation returns a new
//! value, so a direction derived from a position never aliases it.

use crate::error::{GeometryError, GeometryResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the point moved by `dx` along the X axis.
    pub fn shift_x(self, dx: f64) -> Self {
        Self::new(self.x + dx, self.y)
    }

    /// Returns the point moved by `dy` along the Y axis.
    pub fn shift_y(self, dy: f64) -> Self {
        Self::new(self.x, self.y + dy)
    }

    /// Euclidean length of the vector from the origin to this point.
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the unit vector pointing the same way.
    ///
    /// Fails with [`GeometryError::DegenerateVector`] when the magnitude is
    /// exactly zero.
    pub fn normalized(self) -> GeometryResult<Self> {
        let magnitude = self.magnitude();
        if magnitude == 0.0 {
            return Err(GeometryError::DegenerateVector {
                x: self.x,
                y: self.y,
            });
        }
        Ok(Self::new(self.x / magnitude, self.y / magnitude))
    }

    /// Unit vector from `self` towards `to`.
    pub fn direction_to(self, to: Point) -> GeometryResult<Self> {
        (to - self).normalized()
    }

    /// Z component of the 3D cross product of two plane vectors.
    ///
    /// Positive when `other` turns counterclockwise from `self`.
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other - self).magnitude()
    }

    /// Polar angle of the vector in degrees, in `(-180, 180]`.
    pub fn angle_degrees(self) -> f64 {
        self.y.atan2(self.x).to_degrees()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_and_sub() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, -1.0);
        assert_eq!(a + b, Point::new(4.0, 1.0));
        assert_eq!(a - b, Point::new(-2.0, 3.0));
    }

    #[test]
    fn test_shift() {
        let p = Point::new(1.0, 1.0);
        assert_eq!(p.shift_x(2.5), Point::new(3.5, 1.0));
        assert_eq!(p.shift_y(-1.0), Point::new(1.0, 0.0));
        // shifting returns a new point
        assert_eq!(p, Point::new(1.0, 1.0));
    }

    #[test]
    fn test_magnitude() {
        assert_eq!(Point::new(3.0, 4.0).magnitude(), 5.0);
        assert_eq!(Point::ORIGIN.magnitude(), 0.0);
    }

    #[test]
    fn test_normalized() {
        let v = Point::new(0.0, -2.0).normalized().unwrap();
        assert_eq!(v, Point::new(0.0, -1.0));
    }

    #[test]
    fn test_normalized_zero_vector_fails() {
        let err = Point::ORIGIN.normalized().unwrap_err();
        assert_eq!(err, GeometryError::DegenerateVector { x: 0.0, y: 0.0 });
    }

    #[test]
    fn test_cross_sign() {
        let east = Point::new(1.0, 0.0);
        let north = Point::new(0.0, 1.0);
        assert!(east.cross(north) > 0.0);
        assert!(north.cross(east) < 0.0);
        assert_eq!(east.cross(east), 0.0);
    }

    #[test]
    fn test_angle_degrees() {
        assert!((Point::new(0.0, 1.0).angle_degrees() - 90.0).abs() < 1e-12);
        assert!((Point::new(-1.0, 0.0).angle_degrees() - 180.0).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn prop_normalized_has_unit_length(x in -1e3f64..1e3, y in -1e3f64..1e3) {
            prop_assume!(x != 0.0 || y != 0.0);
            let v = Point::new(x, y).normalized().unwrap();
            prop_assert!((v.magnitude() - 1.0).abs() < 1e-9);
        }
    }
}
