//! Property-based tests for the geometry and camera math.

use proptest::prelude::*;

use chart3d_graphics::geometry::point::{Point3D, angle_between};
use chart3d_graphics::geometry::rotate::Rotate3D;
use chart3d_graphics::render::z_order;
use chart3d_graphics::view::ViewPoint3D;

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_point() -> impl Strategy<Value = Point3D> {
    (-100.0f64..100.0, -100.0f64..100.0, -100.0f64..100.0).prop_map(|(x, y, z)| Point3D::new(x, y, z))
}

/// Points at least 0.1 from the origin, usable as directions.
fn arb_direction() -> impl Strategy<Value = Point3D> {
    arb_point().prop_filter("non-degenerate", |p| p.length() > 0.1)
}

fn arb_angle() -> impl Strategy<Value = f64> {
    -std::f64::consts::PI..std::f64::consts::PI
}

const TOL: f64 = 1e-6;

// ---------------------------------------------------------------------------
// Vectors
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn normalized_vectors_have_unit_length(v in arb_direction()) {
        let n = v.normalize().unwrap();
        prop_assert!((n.length() - 1.0).abs() < 1e-12, "length {}", n.length());
    }

    #[test]
    fn spherical_round_trip(p in arb_direction()) {
        let q = Point3D::from_spherical(p.theta(), p.phi(), p.rho());
        prop_assert!(p.distance_to(&q) < TOL, "{:?} != {:?}", p, q);
    }

    #[test]
    fn angle_is_never_nan(a in arb_direction(), b in arb_direction()) {
        let angle = angle_between(&a, &b);
        prop_assert!(angle.is_finite());
        prop_assert!((0.0..=std::f64::consts::PI).contains(&angle));
    }
}

// ---------------------------------------------------------------------------
// Rotation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn zero_rotation_is_identity(
        p in arb_point(),
        pivot in arb_point(),
        axis in arb_direction(),
    ) {
        let r = Rotate3D::new(pivot, pivot + axis, 0.0);
        let q = r.apply(&p);
        prop_assert!(p.distance_to(&q) < TOL, "{:?} moved to {:?}", p, q);
    }

    #[test]
    fn rotation_inverts(
        p in arb_point(),
        pivot in arb_point(),
        axis in arb_direction(),
        angle in arb_angle(),
    ) {
        let forward = Rotate3D::new(pivot, pivot + axis, angle);
        let back = Rotate3D::new(pivot, pivot + axis, -angle);
        let q = back.apply(&forward.apply(&p));
        prop_assert!(p.distance_to(&q) < TOL, "{:?} came back as {:?}", p, q);
    }

    #[test]
    fn rotation_preserves_distance_to_pivot(
        p in arb_point(),
        pivot in arb_point(),
        axis in arb_direction(),
        angle in arb_angle(),
    ) {
        let r = Rotate3D::new(pivot, pivot + axis, angle);
        let before = p.distance_to(&pivot);
        let after = r.apply(&p).distance_to(&pivot);
        prop_assert!((before - after).abs() < TOL);
    }
}

// ---------------------------------------------------------------------------
// Camera
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn set_rho_round_trips(rho in 0.5f64..500.0) {
        let mut vp = ViewPoint3D::default();
        vp.set_rho(rho);
        prop_assert_eq!(vp.rho(), rho);
    }

    #[test]
    fn pan_left_then_right_restores_position(
        theta in -3.0f64..3.0,
        phi in 0.2f64..2.9,
        delta in -0.5f64..0.5,
    ) {
        let mut vp = ViewPoint3D::new(theta, phi, 20.0, 0.0);
        let start = vp.point();
        vp.pan_left_right(delta);
        vp.pan_left_right(-delta);
        prop_assert!(vp.point().distance_to(&start) < 1e-6);
        prop_assert!((vp.phi() - phi).abs() < 1e-6);
    }

    #[test]
    fn origin_projects_to_screen_centre(
        theta in -3.0f64..3.0,
        phi in 0.2f64..2.9,
        orientation in arb_angle(),
    ) {
        let vp = ViewPoint3D::new(theta, phi, 30.0, orientation);
        let p = vp.world_to_screen(&Point3D::ORIGIN, 1000.0);
        prop_assert!(p.x.abs() < 1e-6 && p.y.abs() < 1e-6, "origin at {:?}", p);
    }
}

// ---------------------------------------------------------------------------
// Depth ordering
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn z_order_is_a_total_order_on_distinct_depths(
        mut depths in prop::collection::vec(-1000.0f64..1000.0, 2..40),
    ) {
        depths.sort_by(|a, b| z_order(*a, *b));
        for w in depths.windows(2) {
            prop_assert!(z_order(w[0], w[1]) != std::cmp::Ordering::Greater);
            prop_assert_eq!(z_order(w[0], w[1]), z_order(w[1], w[0]).reverse());
        }
    }
}
