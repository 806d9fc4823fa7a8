//! Turning a world into painted 2D polygons.
//!
//! The draw pass computes eye coordinates, projects them, orders faces
//! far-to-near, culls back faces, shades what is left by the angle to the
//! light and hands each polygon to a [`Painter`].

pub mod sort;

pub use sort::{FaceSorter, StandardFaceSorter, z_order};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::color::Color;
use crate::error::GeometryError;
use crate::geometry::dimension::{Dimension2D, Offset2D};
use crate::geometry::point::Point2D;
use crate::object::{FaceKind, ItemKey, LabelSpec};
use crate::view::{FitConfig, ViewPoint3D};
use crate::world::World;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Settings for the draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Distance from the eye to the projection plane.
    pub projection_distance: f64,
    /// Stroke the outline of faces whose object asks for it.
    pub outlines: bool,
    pub stroke_width: f64,
    /// Filled behind the scene when set.
    pub background: Option<Color>,
    pub label_font_size: f64,
    /// Fraction of the target area left empty by [`Drawable3D::zoom_to_fit`].
    pub margin: f64,
    pub fit: FitConfig,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            projection_distance: 1500.0,
            outlines: true,
            stroke_width: 0.5,
            background: None,
            label_font_size: 12.0,
            margin: 0.1,
            fit: FitConfig::default(),
        }
    }
}

impl RenderConfig {
    /// Plain fills only: no outlines, no background.
    pub fn flat() -> Self {
        Self {
            outlines: false,
            ..Self::default()
        }
    }

    /// Parse a configuration from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, GeometryError> {
        serde_json::from_str(json).map_err(|e| GeometryError::InvalidConfig {
            reason: e.to_string(),
        })
    }
}

// ─── Painting Backend ────────────────────────────────────────────────────────

/// A 2D drawing surface. Coordinates are pixels with y pointing down.
pub trait Painter {
    fn fill_polygon(&mut self, points: &[Point2D], color: Color);

    fn stroke_polygon(&mut self, points: &[Point2D], color: Color, width: f64);

    fn draw_line(&mut self, from: Point2D, to: Point2D, color: Color, width: f64);

    fn draw_label(&mut self, text: &str, at: Point2D, color: Color, font_size: f64);

    /// Fill the whole surface before the scene is painted.
    fn fill_background(&mut self, size: Dimension2D, color: Color) {
        let corners = [
            Point2D::ORIGIN,
            Point2D::new(size.width, 0.0),
            Point2D::new(size.width, size.height),
            Point2D::new(0.0, size.height),
        ];
        self.fill_polygon(&corners, color);
    }
}

// ─── Projected Output ────────────────────────────────────────────────────────

/// What a projected face paints.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Polygon,
    Line,
    Label(LabelSpec),
}

/// One visible face in pixel space, ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedFace {
    pub points: Vec<Point2D>,
    /// Fill color after shading.
    pub color: Color,
    pub outline: bool,
    pub primitive: Primitive,
    pub shade: f64,
    pub depth: f64,
    pub item_key: Option<ItemKey>,
}

impl ProjectedFace {
    /// Mean of the face's points; labels are drawn here.
    pub fn centre(&self) -> Point2D {
        let n = self.points.len().max(1) as f64;
        let (sx, sy) = self
            .points
            .iter()
            .fold((0.0, 0.0), |(x, y), p| (x + p.x, y + p.y));
        Point2D::new(sx / n, sy / n)
    }

    pub fn contains(&self, p: &Point2D) -> bool {
        polygon_contains(&self.points, p)
    }
}

/// Even-odd point-in-polygon test. Fewer than three points contain nothing.
pub fn polygon_contains(points: &[Point2D], p: &Point2D) -> bool {
    if points.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// Summary of a draw pass, kept for hit-testing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderInfo {
    pub total_faces: usize,
    pub culled_faces: usize,
    /// Visible faces that belong to a data item, in paint order.
    pub items: Vec<(ItemKey, Vec<Point2D>)>,
}

impl RenderInfo {
    pub fn rendered_faces(&self) -> usize {
        self.total_faces - self.culled_faces
    }

    /// The topmost data item under `p`, if any.
    pub fn item_at(&self, p: &Point2D) -> Option<ItemKey> {
        self.items
            .iter()
            .rev()
            .find_map(|(key, points)| polygon_contains(points, p).then_some(*key))
    }
}

/// Faces in paint order plus bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub faces: Vec<ProjectedFace>,
    /// Pixel position of the eye-space origin: the centre of the target
    /// area plus the drawable's translation.
    pub offset: Offset2D,
    pub info: RenderInfo,
}

// ─── Drawable ────────────────────────────────────────────────────────────────

/// A world seen through a camera, drawable onto any [`Painter`].
pub struct Drawable3D {
    pub world: World,
    pub view_point: ViewPoint3D,
    /// Extra pixel offset applied after centring in the target area.
    pub translate: Offset2D,
    pub config: RenderConfig,
    sorter: Box<dyn FaceSorter>,
}

impl Drawable3D {
    pub fn new(world: World, view_point: ViewPoint3D) -> Self {
        Self {
            world,
            view_point,
            translate: Offset2D::ZERO,
            config: RenderConfig::default(),
            sorter: Box::new(StandardFaceSorter),
        }
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_sorter(mut self, sorter: Box<dyn FaceSorter>) -> Self {
        self.sorter = sorter;
        self
    }

    /// Move the camera so the world's bounding box fills `target`, less the
    /// configured margin.
    #[instrument(skip(self))]
    pub fn zoom_to_fit(&mut self, target: Dimension2D) -> Result<f64, GeometryError> {
        let dims = self.world.bounds()?;
        let keep = 1.0 - self.config.margin;
        let area = Dimension2D::new(target.width * keep, target.height * keep);
        let distance = self.view_point.optimal_distance(
            area,
            dims,
            self.config.projection_distance,
            &self.config.fit,
        )?;
        self.view_point.set_rho(distance);
        info!(distance, "zoomed to fit");
        Ok(distance)
    }

    /// Project, sort, cull and shade every face for a target of `size`
    /// pixels. The origin lands at the centre of the target.
    #[instrument(skip(self))]
    pub fn project(&self, size: Dimension2D) -> Projection {
        let scene = self.world.flatten();
        let eye = self.world.calculate_eye_coordinates(&self.view_point);
        let screen = self
            .world
            .calculate_projected_points(&self.view_point, self.config.projection_distance);
        let offset = Offset2D::new(size.width / 2.0 + self.translate.dx, size.height / 2.0 + self.translate.dy);
        let sun = self.world.sun();

        let mut info = RenderInfo {
            total_faces: scene.faces.len(),
            ..RenderInfo::default()
        };
        let mut faces = Vec::with_capacity(scene.faces.len());
        for index in self.sorter.sort(&scene.faces, &eye) {
            let sf = &scene.faces[index];
            if !sf.face.is_front_facing(&screen) {
                info.culled_faces += 1;
                continue;
            }
            let shade = sf
                .face
                .calculate_normal(&eye)
                .map(|n| (n.dot(&sun) + 1.0) / 2.0)
                .unwrap_or(1.0);
            let points: Vec<Point2D> = sf
                .face
                .indices()
                .iter()
                .map(|&i| Point2D::new(screen[i].x + offset.dx, screen[i].y + offset.dy))
                .collect();
            let primitive = match sf.face.kind() {
                FaceKind::Label(label) => Primitive::Label(label.clone()),
                _ if sf.face.is_line() => Primitive::Line,
                _ => Primitive::Polygon,
            };
            let color = match primitive {
                Primitive::Polygon => sf.color.shaded(shade),
                _ => sf.color,
            };
            if let Some(key) = sf.item_key {
                if primitive == Primitive::Polygon {
                    info.items.push((key, points.clone()));
                }
            }
            faces.push(ProjectedFace {
                points,
                color,
                outline: sf.outline && self.config.outlines,
                primitive,
                shade,
                depth: sf.face.average_z(&eye),
                item_key: sf.item_key,
            });
        }
        debug!(
            total = info.total_faces,
            culled = info.culled_faces,
            "projection complete"
        );
        Projection { faces, offset, info }
    }

    /// Paint the scene onto `painter` and return the render summary.
    pub fn draw(&self, painter: &mut dyn Painter, size: Dimension2D) -> RenderInfo {
        if let Some(bg) = self.config.background {
            painter.fill_background(size, bg);
        }
        let projection = self.project(size);
        for face in &projection.faces {
            match &face.primitive {
                Primitive::Polygon => {
                    if !face.color.is_transparent() {
                        painter.fill_polygon(&face.points, face.color);
                    }
                    if face.outline {
                        painter.stroke_polygon(&face.points, face.color, self.config.stroke_width);
                    }
                }
                Primitive::Line => {
                    painter.draw_line(face.points[0], face.points[1], face.color, self.config.stroke_width);
                }
                Primitive::Label(label) => {
                    let font_size = label.font_size.unwrap_or(self.config.label_font_size);
                    painter.draw_label(&label.text, face.centre(), label.color, font_size);
                }
            }
        }
        projection.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::primitives::{create_cube, create_label, create_line_object};
    use crate::geometry::point::Point3D;

    #[derive(Default)]
    struct Recorder {
        fills: Vec<(Vec<Point2D>, Color)>,
        strokes: usize,
        lines: usize,
        labels: Vec<String>,
    }

    impl Painter for Recorder {
        fn fill_polygon(&mut self, points: &[Point2D], color: Color) {
            self.fills.push((points.to_vec(), color));
        }
        fn stroke_polygon(&mut self, _points: &[Point2D], _color: Color, _width: f64) {
            self.strokes += 1;
        }
        fn draw_line(&mut self, _from: Point2D, _to: Point2D, _color: Color, _width: f64) {
            self.lines += 1;
        }
        fn draw_label(&mut self, text: &str, _at: Point2D, _color: Color, _font_size: f64) {
            self.labels.push(text.to_string());
        }
    }

    fn cube_world() -> World {
        let mut world = World::new();
        world.add(create_cube(2.0, 0.0, 0.0, 0.0, Color::rgb(200, 100, 50)).with_outline(true));
        world
    }

    #[test]
    fn test_cube_shows_three_faces() {
        let drawable = Drawable3D::new(cube_world(), ViewPoint3D::default());
        let mut painter = Recorder::default();
        let info = drawable.draw(&mut painter, Dimension2D::new(400.0, 300.0));
        assert_eq!(info.total_faces, 6);
        assert_eq!(info.culled_faces, 3);
        assert_eq!(painter.fills.len(), 3);
        assert_eq!(painter.strokes, 3);
    }

    #[test]
    fn test_shading_scales_rgb_only() {
        let drawable = Drawable3D::new(cube_world(), ViewPoint3D::default());
        let projection = drawable.project(Dimension2D::new(400.0, 300.0));
        for face in &projection.faces {
            assert!((0.0..=1.0).contains(&face.shade));
            assert_eq!(face.color, Color::rgb(200, 100, 50).shaded(face.shade));
            assert_eq!(face.color.a, 255);
        }
    }

    #[test]
    fn test_origin_maps_to_centre_plus_translate() {
        let mut world = World::new();
        world.add(create_line_object(Point3D::ORIGIN, Point3D::ORIGIN, Color::BLACK));
        let mut drawable = Drawable3D::new(world, ViewPoint3D::default());
        drawable.translate = Offset2D::new(10.0, -5.0);
        let projection = drawable.project(Dimension2D::new(400.0, 300.0));
        let p = projection.faces[0].points[0];
        assert!((p.x - 210.0).abs() < 1e-9);
        assert!((p.y - 145.0).abs() < 1e-9);
        assert_eq!(projection.offset, Offset2D::new(210.0, 145.0));
    }

    #[test]
    fn test_lines_and_labels_are_not_filled() {
        let mut world = World::new();
        world.add(create_line_object(Point3D::ORIGIN, Point3D::UNIT_X, Color::BLACK));
        world.add(create_label(LabelSpec::new("hello", Color::BLACK), 0.0, 0.0, 0.0));
        let drawable = Drawable3D::new(world, ViewPoint3D::default());
        let mut painter = Recorder::default();
        drawable.draw(&mut painter, Dimension2D::new(400.0, 300.0));
        assert!(painter.fills.is_empty());
        assert_eq!(painter.lines, 1);
        assert_eq!(painter.labels, vec!["hello".to_string()]);
    }

    #[test]
    fn test_item_hit_testing() {
        let mut world = World::new();
        world.add(create_cube(2.0, 0.0, 0.0, 0.0, Color::GRAY).with_item_key(ItemKey::new(0, 1, 2)));
        let drawable = Drawable3D::new(world, ViewPoint3D::default());
        let info = drawable.project(Dimension2D::new(400.0, 300.0)).info;
        assert_eq!(info.items.len(), 3);
        assert_eq!(info.item_at(&Point2D::new(200.0, 150.0)), Some(ItemKey::new(0, 1, 2)));
        assert_eq!(info.item_at(&Point2D::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_zoom_to_fit() {
        let mut drawable = Drawable3D::new(cube_world(), ViewPoint3D::default());
        let d = drawable.zoom_to_fit(Dimension2D::new(400.0, 300.0)).unwrap();
        assert!((drawable.view_point.rho() - d).abs() < 1e-12);
        let mut empty = Drawable3D::new(World::new(), ViewPoint3D::default());
        assert_eq!(
            empty.zoom_to_fit(Dimension2D::new(400.0, 300.0)),
            Err(GeometryError::EmptyWorld)
        );
    }

    #[test]
    fn test_config_from_json_keeps_defaults() {
        let config = RenderConfig::from_json(r#"{"projection_distance": 900.0, "outlines": false}"#).unwrap();
        assert_eq!(config.projection_distance, 900.0);
        assert!(!config.outlines);
        assert_eq!(config.label_font_size, 12.0);
        assert!(RenderConfig::from_json("{").is_err());
    }
}
