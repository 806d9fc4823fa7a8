pub mod dimension;
pub mod point;
pub mod rotate;

pub use dimension::{Dimension2D, Dimension3D, Offset2D, Offset3D};
pub use point::{Point2D, Point3D, angle_between, area2, plane_normal};
pub use rotate::Rotate3D;

/// Centre of the quadrilateral `a`, `b`, `c`, `d` (mean of the corners).
pub fn center_point(a: &Point2D, b: &Point2D, c: &Point2D, d: &Point2D) -> Point2D {
    Point2D::new(
        (a.x + b.x + c.x + d.x) / 4.0,
        (a.y + b.y + c.y + d.y) / 4.0,
    )
}

/// Bounding width and height of a set of 2D points.
///
/// An empty slice has zero size.
pub fn find_dimension(points: &[Point2D]) -> Dimension2D {
    if points.is_empty() {
        return Dimension2D::new(0.0, 0.0);
    }
    let mut min_x = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    Dimension2D::new(max_x - min_x, max_y - min_y)
}
