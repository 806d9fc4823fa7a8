//! Factories for the canonical solids used by chart renderers.
//!
//! Face winding is counter-clockwise when seen from outside, so the
//! signed-area test in [`Face::is_front_facing`](super::Face::is_front_facing)
//! culls the far side of every closed solid.

use tracing::{debug, instrument};

use super::{FaceKind, LabelSpec, Object3D};
use crate::color::Color;
use crate::geometry::point::Point3D;

/// Axis-aligned box centred on `(x, y, z)` with the given extents.
#[instrument(skip(color))]
pub fn create_box(x: f64, xdim: f64, y: f64, ydim: f64, z: f64, zdim: f64, color: Color) -> Object3D {
    let mut b = Object3D::new(color);
    let xd = xdim / 2.0;
    let yd = ydim / 2.0;
    let zd = zdim / 2.0;
    b.add_vertex_xyz(x - xd, y - yd, z - zd); // 0
    b.add_vertex_xyz(x + xd, y - yd, z - zd); // 1
    b.add_vertex_xyz(x + xd, y - yd, z + zd); // 2
    b.add_vertex_xyz(x - xd, y - yd, z + zd); // 3
    b.add_vertex_xyz(x - xd, y + yd, z - zd); // 4
    b.add_vertex_xyz(x + xd, y + yd, z - zd); // 5
    b.add_vertex_xyz(x + xd, y + yd, z + zd); // 6
    b.add_vertex_xyz(x - xd, y + yd, z + zd); // 7
    for face in [
        [4, 5, 1, 0], // z-
        [5, 6, 2, 1], // x+
        [6, 7, 3, 2], // z+
        [3, 7, 4, 0], // x-
        [7, 6, 5, 4], // y+
        [0, 1, 2, 3], // y-
    ] {
        b.push_face(&face, FaceKind::Standard);
    }
    b
}

/// Cube of edge `size` centred on `(x, y, z)`.
pub fn create_cube(size: f64, x: f64, y: f64, z: f64, color: Color) -> Object3D {
    create_box(x, size, y, size, z, size, color)
}

/// A bar rising (or falling) from `zero` to `y`.
///
/// The four walls are added in both windings so the bar renders correctly
/// whichever side of `zero` the value lies on. The outer end faces take
/// `top_color` and `base_color` when given; `inverted` swaps the two for an
/// inverted value axis.
#[allow(clippy::too_many_arguments)]
#[instrument(skip(bar_color, base_color, top_color))]
pub fn create_bar(
    x_width: f64,
    z_width: f64,
    x: f64,
    y: f64,
    z: f64,
    zero: f64,
    bar_color: Color,
    base_color: Option<Color>,
    top_color: Option<Color>,
    inverted: bool,
) -> Object3D {
    let (c0, c1) = if inverted {
        (top_color, base_color)
    } else {
        (base_color, top_color)
    };
    let c0 = c0.unwrap_or(bar_color);
    let c1 = c1.unwrap_or(bar_color);

    let mut bar = Object3D::new(bar_color);
    let xd = x_width / 2.0;
    let zd = z_width / 2.0;
    bar.add_vertex_xyz(x - xd, zero, z - zd);
    bar.add_vertex_xyz(x + xd, zero, z - zd);
    bar.add_vertex_xyz(x + xd, zero, z + zd);
    bar.add_vertex_xyz(x - xd, zero, z + zd);
    bar.add_vertex_xyz(x - xd, y, z - zd);
    bar.add_vertex_xyz(x + xd, y, z - zd);
    bar.add_vertex_xyz(x + xd, y, z + zd);
    bar.add_vertex_xyz(x - xd, y, z + zd);

    for face in [
        [0, 1, 5, 4],
        [4, 5, 1, 0],
        [1, 2, 6, 5],
        [5, 6, 2, 1],
        [2, 3, 7, 6],
        [6, 7, 3, 2],
        [0, 4, 7, 3],
        [3, 7, 4, 0],
        [4, 5, 6, 7],
        [3, 2, 1, 0],
    ] {
        bar.push_face(&face, FaceKind::Standard);
    }
    bar.push_colored_face(&[7, 6, 5, 4], c1);
    bar.push_colored_face(&[0, 1, 2, 3], c0);
    debug!(faces = bar.face_count(), "bar created");
    bar
}

/// A pie wedge lying in the x-z plane from `angle1` to `angle2`.
///
/// The curved rim is approximated by steps of `inc` radians. The wedge is
/// pushed outward from the origin by `explode_radius` along its centre
/// angle.
#[allow(clippy::too_many_arguments)]
#[instrument(skip(color))]
pub fn create_pie_segment(
    radius: f64,
    explode_radius: f64,
    base: f64,
    height: f64,
    angle1: f64,
    angle2: f64,
    inc: f64,
    color: Color,
) -> Object3D {
    let mut seg = Object3D::new(color).with_outline(true);
    let centre_angle = (angle1 + angle2) / 2.0;
    let cx = explode_radius * centre_angle.cos();
    let cz = explode_radius * centre_angle.sin();
    let top = base + height;
    let rim = |theta: f64, y: f64| Point3D::new(cx + radius * theta.cos(), y, cz + radius * theta.sin());

    seg.add_vertex_xyz(cx, base, cz);
    seg.add_vertex_xyz(cx, top, cz);
    seg.add_vertex(rim(angle1, base));
    seg.add_vertex(rim(angle1, top));
    seg.push_face(&[1, 3, 2, 0], FaceKind::Standard);

    let mut vc = 4;
    let mut add_step = |seg: &mut Object3D, theta: f64| {
        seg.add_vertex(rim(theta, base));
        seg.add_vertex(rim(theta, top));
        vc += 2;
        seg.push_face(&[vc - 2, vc - 4, vc - 3, vc - 1], FaceKind::Standard);
        seg.push_face(&[0, vc - 4, vc - 2, 0], FaceKind::Standard);
        seg.push_face(&[1, vc - 1, vc - 3, 1], FaceKind::Standard);
        vc
    };

    // inc <= 0 would never advance; a single step to angle2 is used instead.
    if inc > 0.0 {
        let mut theta = angle1 + inc;
        while theta < angle2 {
            add_step(&mut seg, theta);
            theta += inc;
        }
    }
    let last = add_step(&mut seg, angle2);
    seg.push_face(&[1, 0, last - 2, last - 1], FaceKind::Standard);
    seg
}

/// Two small horizontal markers at the bottom and top of a pie wedge's
/// label anchor, used to position section labels.
pub fn create_pie_label_markers(
    radius: f64,
    explode_radius: f64,
    base: f64,
    height: f64,
    angle1: f64,
    angle2: f64,
) -> Vec<Object3D> {
    let angle = (angle1 + angle2) / 2.0;
    let cx = explode_radius * angle.cos();
    let cz = explode_radius * angle.sin();
    let r = radius * 0.9;
    let x = cx + r * angle.cos();
    let z = cz + r * angle.sin();
    vec![
        create_y_sheet(2.0, x, base, z, Color::RED, false),
        create_y_sheet(2.0, x, base + height, z, Color::rgb(0, 0, 255), true),
    ]
}

/// Square sheet in the x-z plane (constant `y`) centred on `(x, z)`.
///
/// `invert` reverses the winding so the sheet faces down instead of up.
pub fn create_y_sheet(size: f64, x: f64, y: f64, z: f64, color: Color, invert: bool) -> Object3D {
    let mut sheet = Object3D::new(color);
    let d = size / 2.0;
    sheet.add_vertex_xyz(x + d, y, z - d);
    sheet.add_vertex_xyz(x + d, y, z + d);
    sheet.add_vertex_xyz(x - d, y, z + d);
    sheet.add_vertex_xyz(x - d, y, z - d);
    if invert {
        sheet.push_face(&[3, 2, 1, 0], FaceKind::Standard);
    } else {
        sheet.push_face(&[0, 1, 2, 3], FaceKind::Standard);
    }
    sheet
}

/// Square sheet in the x-y plane (constant `z`) centred on `(x, y)`.
pub fn create_z_sheet(size: f64, x: f64, y: f64, z: f64, color: Color) -> Object3D {
    let mut sheet = Object3D::new(color);
    let d = size / 2.0;
    sheet.add_vertex_xyz(x + d, y - d, z);
    sheet.add_vertex_xyz(x + d, y + d, z);
    sheet.add_vertex_xyz(x - d, y + d, z);
    sheet.add_vertex_xyz(x - d, y - d, z);
    sheet.push_face(&[0, 1, 2, 3], FaceKind::Standard);
    sheet
}

/// Regular tetrahedron inscribed in a cube of half-edge `size`.
pub fn create_tetrahedron(size: f64, x: f64, y: f64, z: f64, color: Color) -> Object3D {
    let mut t = Object3D::new(color);
    t.add_vertex_xyz(size + x, -size + y, -size + z);
    t.add_vertex_xyz(-size + x, size + y, -size + z);
    t.add_vertex_xyz(size + x, size + y, size + z);
    t.add_vertex_xyz(-size + x, -size + y, size + z);
    for face in [[0, 1, 2], [1, 3, 2], [0, 3, 1], [0, 2, 3]] {
        t.push_face(&face, FaceKind::Standard);
    }
    t
}

/// Octahedron with vertices at distance `size` along each axis.
pub fn create_octahedron(size: f64, x: f64, y: f64, z: f64, color: Color) -> Object3D {
    let mut o = Object3D::new(color);
    o.add_vertex_xyz(size + x, y, z);
    o.add_vertex_xyz(x, size + y, z);
    o.add_vertex_xyz(-size + x, y, z);
    o.add_vertex_xyz(x, -size + y, z);
    o.add_vertex_xyz(x, y, -size + z);
    o.add_vertex_xyz(x, y, size + z);
    for face in [
        [0, 1, 5],
        [1, 2, 5],
        [2, 3, 5],
        [3, 0, 5],
        [1, 0, 4],
        [2, 1, 4],
        [3, 2, 4],
        [0, 3, 4],
    ] {
        o.push_face(&face, FaceKind::Standard);
    }
    o
}

/// Latitude/longitude sphere with `n` bands from pole to pole.
///
/// Every quad is emitted twice: outward in `ext_color` and inward in
/// `int_color`, so a cut-away sphere shows its interior. The polar caps are
/// left open.
#[instrument(skip(ext_color, int_color))]
pub fn create_sphere(radius: f64, n: usize, x: f64, y: f64, z: f64, ext_color: Color, int_color: Color) -> Object3D {
    let mut sphere = Object3D::new(ext_color);
    if n < 2 {
        return sphere;
    }
    let step = std::f64::consts::PI / n as f64;
    let ring = 2 * n;
    for _ in 0..ring {
        sphere.add_vertex_xyz(x, y + radius, z);
    }
    for layer in 1..n {
        let yy = radius * (layer as f64 * step).cos();
        let rr = radius * (layer as f64 * step).sin();
        for i in 0..ring {
            let a = i as f64 * step;
            sphere.add_vertex_xyz(x + rr * a.cos(), y + yy, z + rr * a.sin());
        }
        if layer < 2 {
            continue;
        }
        let prev = (layer - 1) * ring;
        let curr = layer * ring;
        for i in 1..=ring {
            let (p0, p1, c1, c0) = if i != ring {
                (prev + i - 1, prev + i, curr + i, curr + i - 1)
            } else {
                (prev + i - 1, prev, curr, curr + i - 1)
            };
            sphere.push_colored_face(&[p0, p1, c1, c0], ext_color);
            sphere.push_colored_face(&[c0, c1, p1, p0], int_color);
        }
    }
    debug!(vertices = sphere.vertex_count(), faces = sphere.face_count(), "sphere created");
    sphere
}

/// A single line segment, drawn as a stroke.
pub fn create_line_object(start: Point3D, end: Point3D, color: Color) -> Object3D {
    let mut line = Object3D::new(color);
    line.add_vertex(start);
    line.add_vertex(end);
    line.push_face(&[0, 1], FaceKind::Standard);
    line
}

/// Small double-sided square marker in the x-y plane, facing the viewer from
/// either side.
pub fn create_dot(size: f64, x: f64, y: f64, z: f64, color: Color) -> Object3D {
    let mut dot = Object3D::new(color);
    let d = size / 2.0;
    dot.add_vertex_xyz(x - d, y - d, z);
    dot.add_vertex_xyz(x + d, y - d, z);
    dot.add_vertex_xyz(x + d, y + d, z);
    dot.add_vertex_xyz(x - d, y + d, z);
    dot.push_face(&[0, 1, 2, 3], FaceKind::DoubleSided);
    dot
}

/// An invisible anchor carrying a text label at `(x, y, z)`.
///
/// The anchor is a small double-wound square so the label shows from any
/// viewing angle.
pub fn create_label(label: LabelSpec, x: f64, y: f64, z: f64) -> Object3D {
    let mut obj = Object3D::new(Color::TRANSPARENT);
    let d = 0.01;
    obj.add_vertex_xyz(x - d, y - d, z);
    obj.add_vertex_xyz(x + d, y - d, z);
    obj.add_vertex_xyz(x + d, y + d, z);
    obj.add_vertex_xyz(x - d, y + d, z);
    obj.push_face(&[0, 1, 2, 3], FaceKind::Label(label.clone()));
    obj.push_face(&[3, 2, 1, 0], FaceKind::Label(label));
    obj
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outward(obj: &Object3D, face: usize, centre: Point3D) -> bool {
        let f = &obj.faces()[face];
        let n = f.calculate_normal(obj.vertices()).unwrap();
        let idx = f.indices();
        let vs = obj.vertices();
        let c = idx.iter().fold(Point3D::ORIGIN, |acc, &i| acc + vs[i]) * (1.0 / idx.len() as f64);
        n.dot(&(c - centre)) > 0.0
    }

    #[test]
    fn test_box_faces_point_outward() {
        let centre = Point3D::new(1.0, 2.0, 3.0);
        let b = create_box(centre.x, 2.0, centre.y, 4.0, centre.z, 6.0, Color::GRAY);
        assert_eq!(b.vertex_count(), 8);
        assert_eq!(b.face_count(), 6);
        for i in 0..6 {
            assert!(outward(&b, i, centre), "face {i} points inward");
        }
    }

    #[test]
    fn test_bar_has_twelve_faces_with_end_colors() {
        let bar = create_bar(0.8, 0.5, 1.0, 5.0, 2.0, 0.0, Color::GRAY, Some(Color::BLACK), Some(Color::WHITE), false);
        assert_eq!(bar.vertex_count(), 8);
        assert_eq!(bar.face_count(), 12);
        assert_eq!(bar.face_color(&bar.faces()[10]), Color::WHITE);
        assert_eq!(bar.face_color(&bar.faces()[11]), Color::BLACK);
        let centre = Point3D::new(1.0, 2.5, 2.0);
        assert!(outward(&bar, 10, centre));
        assert!(outward(&bar, 11, centre));

        let inv = create_bar(0.8, 0.5, 1.0, 5.0, 2.0, 0.0, Color::GRAY, Some(Color::BLACK), Some(Color::WHITE), true);
        assert_eq!(inv.face_color(&inv.faces()[10]), Color::BLACK);
    }

    #[test]
    fn test_pie_segment_face_count() {
        let seg = create_pie_segment(4.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.25, Color::GRAY);
        // Steps at 0.25, 0.5, 0.75 then the closing edge at 1.0.
        assert_eq!(seg.vertex_count(), 4 + 2 * 4);
        assert_eq!(seg.face_count(), 1 + 3 * 4 + 1);
        let rim = seg.vertices()[2];
        assert!((Point3D::new(rim.x, 0.0, rim.z).length() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_pie_segment_exploded() {
        let seg = create_pie_segment(4.0, 1.0, 0.0, 1.0, 0.0, std::f64::consts::PI, 0.5, Color::GRAY);
        let centre = seg.vertices()[0];
        assert!(centre.x.abs() < 1e-12);
        assert!((centre.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_sheets_face_up_and_down() {
        let up = create_y_sheet(2.0, 0.0, 0.0, 0.0, Color::GRAY, false);
        let down = create_y_sheet(2.0, 0.0, 0.0, 0.0, Color::GRAY, true);
        let n_up = up.faces()[0].calculate_normal(up.vertices()).unwrap();
        let n_down = down.faces()[0].calculate_normal(down.vertices()).unwrap();
        assert!((n_up.y + n_down.y).abs() < 1e-12);
        assert!(n_up.y.abs() > 0.99);
    }

    #[test]
    fn test_tetrahedron_and_octahedron_outward() {
        let t = create_tetrahedron(1.0, 0.0, 0.0, 0.0, Color::GRAY);
        for i in 0..t.face_count() {
            assert!(outward(&t, i, Point3D::ORIGIN));
        }
        let o = create_octahedron(1.0, 0.0, 0.0, 0.0, Color::GRAY);
        for i in 0..o.face_count() {
            assert!(outward(&o, i, Point3D::ORIGIN));
        }
    }

    #[test]
    fn test_pie_segment_faces_point_outward() {
        let seg = create_pie_segment(4.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.25, Color::GRAY);
        let inside = Point3D::new(2.0 * 0.5_f64.cos(), 0.5, 2.0 * 0.5_f64.sin());
        for i in 0..seg.face_count() {
            assert!(outward(&seg, i, inside), "face {i} points inward");
        }
    }

    #[test]
    fn test_sphere_exterior_faces_point_outward() {
        let s = create_sphere(2.0, 4, 0.0, 0.0, 0.0, Color::GRAY, Color::BLACK);
        assert_eq!(s.vertex_count(), 8 * 4);
        // Two bands of 8 quads, each in both windings.
        assert_eq!(s.face_count(), 2 * 8 * 2);
        for i in 0..s.face_count() {
            let exterior = s.face_color(&s.faces()[i]) == Color::GRAY;
            assert_eq!(exterior, i % 2 == 0);
            assert_eq!(outward(&s, i, Point3D::ORIGIN), exterior);
        }
        assert!(create_sphere(1.0, 1, 0.0, 0.0, 0.0, Color::GRAY, Color::BLACK).faces().is_empty());
    }

    #[test]
    fn test_line_and_label() {
        let line = create_line_object(Point3D::ORIGIN, Point3D::UNIT_X, Color::BLACK);
        assert!(line.faces()[0].is_line());
        let label = create_label(LabelSpec::new("Q1", Color::BLACK), 0.0, 1.0, 0.0);
        assert!(label.faces().iter().all(|f| label.face_color(f).is_transparent()));
    }
}
