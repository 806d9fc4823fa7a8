//! Perspective 3D scene model and software rendering pipeline for charts.
//!
//! Geometry is built as [`object::Object3D`] solids, collected into a
//! partitioned [`world::World`], viewed through a [`view::ViewPoint3D`]
//! camera and painted back-to-front by [`render::Drawable3D`].

pub mod color;
pub mod error;
pub mod geometry;
pub mod object;
pub mod render;
pub mod view;
pub mod world;

pub use color::Color;
pub use error::GeometryError;
pub use geometry::point::{Point2D, Point3D};
pub use geometry::rotate::Rotate3D;
pub use object::{Face, FaceKind, ItemKey, Object3D};
pub use render::{Drawable3D, Painter, RenderConfig};
pub use view::ViewPoint3D;
pub use world::{ObjectId, World};

use serde::{Deserialize, Serialize};

/// Global tolerance configuration for geometric comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Points closer than this are considered coincident (world units).
    pub coincidence: f64,
    /// Angles smaller than this (radians) are considered zero.
    pub angular: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            coincidence: 1e-9,
            angular: 1e-10,
        }
    }
}

impl Tolerance {
    pub fn points_coincident(&self, a: &Point3D, b: &Point3D) -> bool {
        a.distance_to(b) < self.coincidence
    }

    /// Two coordinates closer than the coincidence tolerance.
    pub fn coincident(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.coincidence
    }

    pub fn is_zero_angle(&self, angle: f64) -> bool {
        angle.abs() < self.angular
    }
}
