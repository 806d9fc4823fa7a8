//! Painter's-algorithm face ordering.
//!
//! Faces are ordered by the mean eye-space z of their vertices, far to near.
//! This is an approximation: large or intersecting faces can still be
//! painted in the wrong order.

use std::cmp::Ordering;

use crate::geometry::point::Point3D;
use crate::world::SceneFace;

/// Chooses the order in which faces are painted.
pub trait FaceSorter {
    /// Indices into `faces` in paint order (first painted first).
    fn sort(&self, faces: &[SceneFace], eye: &[Point3D]) -> Vec<usize>;
}

/// Sorts faces far-to-near by average eye-space z.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardFaceSorter;

impl FaceSorter for StandardFaceSorter {
    fn sort(&self, faces: &[SceneFace], eye: &[Point3D]) -> Vec<usize> {
        let depths: Vec<f64> = faces.iter().map(|f| f.face.average_z(eye)).collect();
        let mut order: Vec<usize> = (0..faces.len()).collect();
        order.sort_by(|&a, &b| z_order(depths[a], depths[b]));
        order
    }
}

/// Compare two average depths; more negative (further away) sorts first.
///
/// NaN depths sort before every number, so faces with a degenerate vertex
/// are painted underneath. Equal depths compare equal and keep the
/// caller's input order.
pub fn z_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (a_nan, b_nan) => b_nan.cmp(&a_nan),
    }
}
