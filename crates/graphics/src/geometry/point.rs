use approx::{AbsDiffEq, RelativeEq};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::GeometryError;

/// A point (or vector) in 3D world space.
///
/// All operations return new values; a `Point3D` is never modified in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UNIT_X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    pub const UNIT_Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    pub const UNIT_Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Build a point from spherical coordinates.
    ///
    /// `theta` is the angle in the XY plane measured from the X axis, `phi`
    /// the angle from the Z axis and `rho` the distance from the origin.
    pub fn from_spherical(theta: f64, phi: f64, rho: f64) -> Self {
        Self {
            x: rho * phi.sin() * theta.cos(),
            y: rho * phi.sin() * theta.sin(),
            z: rho * phi.cos(),
        }
    }

    /// Angle in the XY plane, in the range `[-pi, pi]`.
    pub fn theta(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Angle from the Z axis, in the range `[0, pi]`.
    ///
    /// Returns NaN for the origin.
    pub fn phi(&self) -> f64 {
        (self.z / self.rho()).acos()
    }

    /// Distance from the origin.
    pub fn rho(&self) -> f64 {
        self.length()
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        (*self - *other).length()
    }

    /// Unit vector in the same direction, or `None` for a zero-length vector.
    pub fn normalized(&self) -> Option<Self> {
        let len = self.length();
        if len < 1e-15 || !len.is_finite() {
            None
        } else {
            Some(*self * (1.0 / len))
        }
    }

    /// Like [`Point3D::normalized`] but reports a zero-length input as an error.
    pub fn normalize(&self) -> Result<Self, GeometryError> {
        self.normalized().ok_or(GeometryError::ZeroLengthVector)
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        self.lerp(other, 0.5)
    }

    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self {
            x: self.x + t * (other.x - self.x),
            y: self.y + t * (other.y - self.y),
            z: self.z + t * (other.z - self.z),
        }
    }

    pub fn to_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    pub fn from_array(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Normal of the plane through `a`, `b` and `c`, computed as `(a - c) x (b - c)`.
///
/// The result is not normalized. Collinear inputs give the zero vector.
pub fn plane_normal(a: &Point3D, b: &Point3D, c: &Point3D) -> Point3D {
    (*a - *c).cross(&(*b - *c))
}

/// Angle in radians between two vectors.
///
/// The cosine is clamped to `[-1, 1]` before `acos` so that rounding on
/// nearly parallel vectors never yields NaN. Both vectors must be non-zero.
pub fn angle_between(a: &Point3D, b: &Point3D) -> f64 {
    let cos = a.dot(b) / (a.length() * b.length());
    cos.clamp(-1.0, 1.0).acos()
}

impl Add for Point3D {
    type Output = Point3D;
    fn add(self, rhs: Self) -> Self::Output {
        Point3D::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3D {
    type Output = Point3D;
    fn sub(self, rhs: Self) -> Self::Output {
        Point3D::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Point3D {
    type Output = Point3D;
    fn mul(self, rhs: f64) -> Self::Output {
        Point3D::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Point3D {
    type Output = Point3D;
    fn neg(self) -> Self::Output {
        Point3D::new(-self.x, -self.y, -self.z)
    }
}

impl AbsDiffEq for Point3D {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon)
            && self.y.abs_diff_eq(&other.y, epsilon)
            && self.z.abs_diff_eq(&other.z, epsilon)
    }
}

impl RelativeEq for Point3D {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative)
            && self.y.relative_eq(&other.y, epsilon, max_relative)
            && self.z.relative_eq(&other.z, epsilon, max_relative)
    }
}

/// A point on the 2D drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Twice the signed area of the triangle `a`, `b`, `c`.
///
/// Positive when the points run counter-clockwise in a y-up frame.
pub fn area2(a: &Point2D, b: &Point2D, c: &Point2D) -> f64 {
    (a.x - c.x) * (b.y - c.y) - (a.y - c.y) * (b.x - c.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_spherical_round_trip() {
        let p = Point3D::from_spherical(PI / 3.0, PI / 4.0, 10.0);
        assert!((p.theta() - PI / 3.0).abs() < 1e-12);
        assert!((p.phi() - PI / 4.0).abs() < 1e-12);
        assert!((p.rho() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_spherical_axes() {
        assert_relative_eq!(
            Point3D::from_spherical(0.0, PI / 2.0, 2.0),
            Point3D::new(2.0, 0.0, 0.0),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            Point3D::from_spherical(1.3, 0.0, 5.0),
            Point3D::new(0.0, 0.0, 5.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_normalize() {
        let v = Point3D::new(3.0, 4.0, 0.0).normalize().unwrap();
        assert!((v.length() - 1.0).abs() < 1e-12);
        assert!((v.x - 0.6).abs() < 1e-12);
        assert_eq!(
            Point3D::ORIGIN.normalize(),
            Err(GeometryError::ZeroLengthVector)
        );
    }

    #[test]
    fn test_cross_follows_right_hand_rule() {
        let z = Point3D::UNIT_X.cross(&Point3D::UNIT_Y);
        assert_relative_eq!(z, Point3D::UNIT_Z);
    }

    #[test]
    fn test_plane_normal() {
        let n = plane_normal(
            &Point3D::new(1.0, 0.0, 0.0),
            &Point3D::new(0.0, 1.0, 0.0),
            &Point3D::ORIGIN,
        );
        assert_relative_eq!(n, Point3D::UNIT_Z);
    }

    #[test]
    fn test_angle_between_clamps() {
        let a = Point3D::new(1.0, 1e-9, 0.0);
        let b = Point3D::new(1.0, 1e-9, 0.0) * 3.0;
        let angle = angle_between(&a, &b);
        assert!(!angle.is_nan());
        assert!(angle.abs() < 1e-6);
        assert!((angle_between(&Point3D::UNIT_X, &-Point3D::UNIT_X) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_area2_sign() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(1.0, 0.0);
        let c = Point2D::new(0.0, 1.0);
        assert!((area2(&a, &b, &c) - 1.0).abs() < 1e-12);
        assert!((area2(&a, &c, &b) + 1.0).abs() < 1e-12);
    }
}
