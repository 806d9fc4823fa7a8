//! The camera: a point on a sphere around the origin, always looking at the
//! origin, with a roll about the line of sight.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, instrument};

use crate::error::GeometryError;
use crate::geometry::dimension::{Dimension2D, Dimension3D};
use crate::geometry::point::{Point2D, Point3D, angle_between, plane_normal};
use crate::geometry::rotate::Rotate3D;
use crate::geometry::find_dimension;

/// Parameters for [`ViewPoint3D::optimal_distance`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitConfig {
    /// Near search bound as a multiple of the content diagonal.
    pub near_factor: f64,
    /// Far search bound as a multiple of the near bound.
    pub far_factor: f64,
    /// Bisection steps before giving up.
    pub max_iterations: usize,
    /// Accepted distance of the coverage ratio from 1, and the relative
    /// bracket width at which bisection stops.
    pub tolerance: f64,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            near_factor: 1.0,
            far_factor: 40.0,
            max_iterations: 64,
            tolerance: 1e-3,
        }
    }
}

/// Camera position (`theta`, `phi`, `rho`) plus an up reference point that
/// fixes the roll.
///
/// Pan, tilt, roll and zoom mutate the camera in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewPoint3D {
    theta: f64,
    phi: f64,
    rho: f64,
    // v11 v12 v13 v21 v22 v23 v32 v33 v43
    m: [f64; 9],
    up: Point3D,
    rotation: Rotate3D,
}

impl ViewPoint3D {
    /// A camera at the given spherical position, rolled by `orientation`
    /// radians about its line of sight.
    pub fn new(theta: f64, phi: f64, rho: f64, orientation: f64) -> Self {
        let mut vp = Self {
            theta,
            phi,
            rho,
            m: [0.0; 9],
            up: Point3D::ORIGIN,
            rotation: Rotate3D::new(Point3D::ORIGIN, Point3D::UNIT_Z, 0.0),
        };
        vp.update_matrix();
        let screen_up = vp.screen_up();
        vp.up = Rotate3D::new(vp.point(), Point3D::ORIGIN, orientation).apply(&screen_up);
        vp.rotation.set_angle(vp.calc_roll_angle());
        vp
    }

    /// A camera placed at `p`.
    pub fn from_point(p: Point3D, orientation: f64) -> Self {
        Self::new(p.theta(), p.phi(), p.rho(), orientation)
    }

    /// Looking down on the scene from above the front.
    pub fn above_view_point(rho: f64) -> Self {
        Self::new(-PI / 2.0, 9.0 * PI / 8.0, rho, 0.0)
    }

    /// The default chart camera: above the front, turned to the left.
    pub fn above_left_view_point(rho: f64) -> Self {
        let mut vp = Self::above_view_point(rho);
        vp.pan_left_right(-PI / 6.0);
        vp
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn phi(&self) -> f64 {
        self.phi
    }

    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Current roll angle about the line of sight.
    pub fn roll_angle(&self) -> f64 {
        self.rotation.angle()
    }

    /// Camera position in world space.
    pub fn point(&self) -> Point3D {
        Point3D::from_spherical(self.theta, self.phi, self.rho)
    }

    /// The up reference point; also the axis used for panning.
    pub fn vertical_rotation_axis(&self) -> Point3D {
        self.up
    }

    /// The axis used for moving up and down.
    pub fn horizontal_rotation_axis(&self) -> Point3D {
        plane_normal(&self.point(), &self.up, &Point3D::ORIGIN)
    }

    /// Move the camera to distance `rho`, keeping its direction and roll.
    pub fn set_rho(&mut self, rho: f64) {
        self.up = Point3D::from_spherical(self.up.theta(), self.up.phi(), rho);
        self.rho = rho;
        self.update_matrix();
    }

    /// Scale the camera distance by `factor`.
    pub fn zoom(&mut self, factor: f64) {
        self.set_rho(self.rho * factor);
    }

    /// Rotate the camera about the vertical axis by `delta` radians.
    pub fn pan_left_right(&mut self, delta: f64) {
        let r = Rotate3D::new(Point3D::ORIGIN, self.up, delta);
        let p = r.apply(&self.point());
        self.theta = p.theta();
        self.phi = p.phi();
        self.update_matrix();
        self.rotation.set_angle(self.calc_roll_angle());
    }

    /// Rotate the camera (and its up point) about the horizontal axis by
    /// `delta` radians.
    pub fn move_up_down(&mut self, delta: f64) {
        let axis = self.horizontal_rotation_axis();
        let r = Rotate3D::new(Point3D::ORIGIN, axis, delta);
        let p = r.apply(&self.point());
        self.up = r.apply(&self.up);
        self.theta = p.theta();
        self.phi = p.phi();
        self.update_matrix();
        self.rotation.set_angle(self.calc_roll_angle());
    }

    /// Roll about the line of sight by `delta` radians. The camera position
    /// does not change.
    pub fn roll(&mut self, delta: f64) {
        let r = Rotate3D::new(self.point(), Point3D::ORIGIN, delta);
        self.up = r.apply(&self.up);
        self.rotation.set_angle(self.calc_roll_angle());
    }

    /// Signed angle between the plane holding the up point and the plane
    /// holding the unrolled screen-up point.
    pub fn calc_roll_angle(&self) -> f64 {
        let vp = self.point();
        let screen_up = self.screen_up();
        let n1 = plane_normal(&vp, &self.up, &Point3D::ORIGIN);
        let n2 = plane_normal(&vp, &screen_up, &Point3D::ORIGIN);
        let angle = angle_between(&n1, &n2);
        if n1.dot(&screen_up) >= 0.0 { angle } else { -angle }
    }

    /// Convert a world point to eye coordinates. The camera looks down the
    /// negative z axis of eye space.
    pub fn world_to_eye(&self, p: &Point3D) -> Point3D {
        let [v11, v12, v13, v21, v22, v23, v32, v33, v43] = self.m;
        let x = v11 * p.x + v21 * p.y;
        let y = v12 * p.x + v22 * p.y + v32 * p.z;
        let z = v13 * p.x + v23 * p.y + v33 * p.z + v43;
        self.rotation.apply_xyz(x, y, z)
    }

    /// Perspective projection onto a screen plane at distance `d`.
    ///
    /// A point with eye z of zero maps to infinity; this is not treated as
    /// an error.
    pub fn world_to_screen(&self, p: &Point3D, d: f64) -> Point2D {
        let e = self.world_to_eye(p);
        Point2D::new(-d * e.x / e.z, -d * e.y / e.z)
    }

    /// Camera distance at which a box of `dims` centred on the origin
    /// projects to roughly fill `target`.
    ///
    /// Bisects between a near bound (the box diagonal) and a far bound until
    /// the larger of the width and height coverage ratios is within
    /// tolerance of 1. Returns the near bound if even that fits and the far
    /// bound if even that overflows.
    #[instrument(skip(self, config))]
    pub fn optimal_distance(
        &self,
        target: Dimension2D,
        dims: Dimension3D,
        projection_distance: f64,
        config: &FitConfig,
    ) -> Result<f64, GeometryError> {
        if !(target.width > 0.0 && target.height > 0.0) {
            return Err(GeometryError::InvalidConfig {
                reason: format!("target area {}x{} is empty", target.width, target.height),
            });
        }
        let mut vp = Self::new(self.theta, self.phi, self.rho, self.calc_roll_angle());
        let corners = box_corners(&dims);
        let mut coverage_at = |rho: f64| {
            vp.set_rho(rho);
            let pts: Vec<Point2D> = corners
                .iter()
                .map(|c| vp.world_to_screen(c, projection_distance))
                .collect();
            let dim = find_dimension(&pts);
            (dim.width / target.width).max(dim.height / target.height)
        };

        let mut near = dims.diagonal_length() * config.near_factor;
        let mut far = near * config.far_factor;
        if coverage_at(near) <= 1.0 {
            return Ok(near);
        }
        if coverage_at(far) >= 1.0 {
            return Ok(far);
        }
        for iteration in 0..config.max_iterations {
            let mid = (near + far) / 2.0;
            let cover = coverage_at(mid);
            if (cover - 1.0).abs() <= config.tolerance || (far - near) <= config.tolerance * far {
                debug!(iteration, distance = mid, cover, "optimal distance found");
                return Ok(mid);
            }
            if cover >= 1.0 {
                near = mid;
            } else {
                far = mid;
            }
        }
        Err(GeometryError::NoConvergence {
            iterations: config.max_iterations,
        })
    }

    fn screen_up(&self) -> Point3D {
        Point3D::from_spherical(self.theta, self.phi - PI / 2.0, self.rho)
    }

    fn update_matrix(&mut self) {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        self.m = [-st, -cp * ct, sp * ct, ct, -cp * st, sp * st, sp, cp, -self.rho];
    }
}

impl Default for ViewPoint3D {
    fn default() -> Self {
        Self::above_left_view_point(25.0)
    }
}

fn box_corners(dims: &Dimension3D) -> [Point3D; 8] {
    let (x, y, z) = (dims.width / 2.0, dims.height / 2.0, dims.depth / 2.0);
    [
        Point3D::new(-x, -y, -z),
        Point3D::new(x, -y, -z),
        Point3D::new(x, -y, z),
        Point3D::new(-x, -y, z),
        Point3D::new(-x, y, -z),
        Point3D::new(x, y, -z),
        Point3D::new(x, y, z),
        Point3D::new(-x, y, z),
    ]
}
