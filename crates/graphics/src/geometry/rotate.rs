use serde::{Deserialize, Serialize};

use super::point::Point3D;

/// Rotation by an angle about an arbitrary axis through a pivot point.
///
/// The axis runs from `a` towards `b`. The twelve affine coefficients are
/// computed once per angle and reused for every point passed to
/// [`Rotate3D::apply`], so a rotation shared by many points costs one
/// multiply-add pass per point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rotate3D {
    a: Point3D,
    b: Point3D,
    angle: f64,
    m: [f64; 12],
}

impl Rotate3D {
    /// Rotation about the axis through `a` and `b` by `angle` radians.
    pub fn new(a: Point3D, b: Point3D, angle: f64) -> Self {
        let mut r = Self {
            a,
            b,
            angle,
            m: [0.0; 12],
        };
        r.rebuild();
        r
    }

    /// Rotation about an axis through `pivot` whose direction is given in
    /// spherical angles.
    pub fn from_angles(pivot: Point3D, theta: f64, phi: f64, angle: f64) -> Self {
        let direction = Point3D::from_spherical(theta, phi, 1.0);
        Self::new(pivot, pivot + direction, angle)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn axis_start(&self) -> Point3D {
        self.a
    }

    pub fn axis_end(&self) -> Point3D {
        self.b
    }

    /// Change the rotation angle, recomputing the cached matrix.
    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
        self.rebuild();
    }

    /// Rotate a point.
    pub fn apply(&self, p: &Point3D) -> Point3D {
        self.apply_xyz(p.x, p.y, p.z)
    }

    pub fn apply_xyz(&self, x: f64, y: f64, z: f64) -> Point3D {
        let m = &self.m;
        Point3D::new(
            x * m[0] + y * m[3] + z * m[6] + m[9],
            x * m[1] + y * m[4] + z * m[7] + m[10],
            x * m[2] + y * m[5] + z * m[8] + m[11],
        )
    }

    // Row-major layout: m[0..9] holds r11..r33 by rows, m[9..12] the
    // translation that keeps the pivot fixed.
    fn rebuild(&mut self) {
        let v = self.b - self.a;
        let theta = v.y.atan2(v.x);
        let phi = (v.x * v.x + v.y * v.y).sqrt().atan2(v.z);

        let (st, ct) = theta.sin_cos();
        let (sp, cp) = phi.sin_cos();
        let (sa, ca) = self.angle.sin_cos();
        let c = 1.0 - ca;

        let r11 = ct * ct * (ca * cp * cp + sp * sp) + ca * st * st;
        let r12 = sa * cp + c * sp * sp * ct * st;
        let r13 = sp * (cp * ct * c - sa * st);
        let r21 = sp * sp * ct * st * c - sa * cp;
        let r22 = st * st * (ca * cp * cp + sp * sp) + ca * ct * ct;
        let r23 = sp * (cp * st * c + sa * ct);
        let r31 = sp * (cp * ct * c + sa * st);
        let r32 = sp * (cp * st * c - sa * ct);
        let r33 = ca * sp * sp + cp * cp;

        let (a1, a2, a3) = (self.a.x, self.a.y, self.a.z);
        let r41 = a1 - a1 * r11 - a2 * r21 - a3 * r31;
        let r42 = a2 - a1 * r12 - a2 * r22 - a3 * r32;
        let r43 = a3 - a1 * r13 - a2 * r23 - a3 * r33;

        self.m = [r11, r12, r13, r21, r22, r23, r31, r32, r33, r41, r42, r43];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_quarter_turn_about_z() {
        let r = Rotate3D::new(Point3D::ORIGIN, Point3D::UNIT_Z, PI / 2.0);
        assert_relative_eq!(r.apply(&Point3D::UNIT_X), Point3D::UNIT_Y, epsilon = 1e-12);
        assert_relative_eq!(r.apply(&Point3D::UNIT_Y), -Point3D::UNIT_X, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_angle_is_identity() {
        let r = Rotate3D::new(Point3D::new(1.0, 2.0, 3.0), Point3D::new(4.0, -1.0, 2.0), 0.0);
        let p = Point3D::new(-7.0, 0.5, 11.0);
        assert_relative_eq!(r.apply(&p), p, epsilon = 1e-12);
    }

    #[test]
    fn test_pivot_is_fixed() {
        let pivot = Point3D::new(2.0, -3.0, 1.0);
        let r = Rotate3D::from_angles(pivot, 0.4, 1.1, 2.0);
        assert_relative_eq!(r.apply(&pivot), pivot, epsilon = 1e-12);
    }

    #[test]
    fn test_off_origin_axis() {
        // Axis parallel to Z through (1, 0, 0).
        let r = Rotate3D::new(Point3D::new(1.0, 0.0, 0.0), Point3D::new(1.0, 0.0, 5.0), PI);
        assert_relative_eq!(
            r.apply(&Point3D::new(2.0, 0.0, 3.0)),
            Point3D::new(0.0, 0.0, 3.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_set_angle_rebuilds() {
        let mut r = Rotate3D::new(Point3D::ORIGIN, Point3D::UNIT_Z, 0.0);
        r.set_angle(PI);
        assert!((r.angle() - PI).abs() < 1e-15);
        assert_relative_eq!(r.apply(&Point3D::UNIT_X), -Point3D::UNIT_X, epsilon = 1e-12);
    }
}
