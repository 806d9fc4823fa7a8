//! Solids built from vertices and planar faces.

pub mod primitives;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::color::Color;
use crate::error::GeometryError;
use crate::geometry::dimension::Offset3D;
use crate::geometry::point::{Point2D, Point3D, area2};
use crate::view::ViewPoint3D;

/// Identifies the data item a piece of geometry was generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemKey {
    pub series: usize,
    pub row: usize,
    pub column: usize,
}

impl ItemKey {
    pub fn new(series: usize, row: usize, column: usize) -> Self {
        Self {
            series,
            row,
            column,
        }
    }
}

/// Text attached to a label face and drawn at the face centre.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelSpec {
    pub text: String,
    pub color: Color,
    /// Font size in pixels; `None` uses the render configuration's size.
    pub font_size: Option<f64>,
}

impl LabelSpec {
    pub fn new(text: impl Into<String>, color: Color) -> Self {
        Self {
            text: text.into(),
            color,
            font_size: None,
        }
    }
}

/// How a face takes part in culling, coloring and painting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FaceKind {
    /// Drawn only when its vertices appear counter-clockwise on screen.
    Standard,
    /// Drawn from both sides.
    DoubleSided,
    /// A standard face whose color can be overridden per tag on the owner.
    Tagged { tag: String },
    /// A fully transparent face that carries text.
    Label(LabelSpec),
}

/// A planar polygon given as indices into its owner's vertex list.
///
/// Two-index faces are line segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    indices: Vec<usize>,
    kind: FaceKind,
    color: Option<Color>,
}

impl Face {
    pub fn new(indices: Vec<usize>, kind: FaceKind) -> Self {
        Self {
            indices,
            kind,
            color: None,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn kind(&self) -> &FaceKind {
        &self.kind
    }

    /// Color set on the face itself, overriding the owner's color.
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn vertex_count(&self) -> usize {
        self.indices.len()
    }

    pub fn tag(&self) -> Option<&str> {
        match &self.kind {
            FaceKind::Tagged { tag } => Some(tag),
            _ => None,
        }
    }

    pub fn is_line(&self) -> bool {
        self.indices.len() == 2
    }

    /// Unit normal from the first three vertices, `(b - a) x (c - a)`.
    ///
    /// `points` is indexed by this face's indices. Lines and degenerate
    /// faces have no normal.
    pub fn calculate_normal(&self, points: &[Point3D]) -> Option<Point3D> {
        if self.indices.len() < 3 {
            return None;
        }
        let a = points[self.indices[0]];
        let b = points[self.indices[1]];
        let c = points[self.indices[2]];
        (b - a).cross(&(c - a)).normalized()
    }

    /// Mean z of the face's vertices.
    pub fn average_z(&self, points: &[Point3D]) -> f64 {
        let sum: f64 = self.indices.iter().map(|&i| points[i].z).sum();
        sum / self.indices.len() as f64
    }

    /// Whether the face shows its front side on screen.
    ///
    /// Uses the signed area of the first three projected vertices; double
    /// sided faces and lines are always front facing.
    pub fn is_front_facing(&self, projected: &[Point2D]) -> bool {
        if matches!(self.kind, FaceKind::DoubleSided) || self.indices.len() < 3 {
            return true;
        }
        let a = projected[self.indices[0]];
        let b = projected[self.indices[1]];
        let c = projected[self.indices[2]];
        area2(&a, &b, &c) > 0.0
    }

    pub(crate) fn offset_by(&self, base: usize) -> Vec<usize> {
        self.indices.iter().map(|i| i + base).collect()
    }
}

/// A solid: a vertex list plus faces that index into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Object3D {
    vertices: Vec<Point3D>,
    faces: Vec<Face>,
    color: Color,
    outline: bool,
    tag_colors: BTreeMap<String, Color>,
    item_key: Option<ItemKey>,
}

impl Object3D {
    pub fn new(color: Color) -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            color,
            outline: false,
            tag_colors: BTreeMap::new(),
            item_key: None,
        }
    }

    pub fn with_outline(mut self, outline: bool) -> Self {
        self.outline = outline;
        self
    }

    pub fn with_item_key(mut self, key: ItemKey) -> Self {
        self.item_key = Some(key);
        self
    }

    /// Append a vertex and return its index.
    pub fn add_vertex(&mut self, p: Point3D) -> usize {
        self.vertices.push(p);
        self.vertices.len() - 1
    }

    pub fn add_vertex_xyz(&mut self, x: f64, y: f64, z: f64) -> usize {
        self.add_vertex(Point3D::new(x, y, z))
    }

    /// Add a face after checking its indices against the vertex list.
    pub fn add_face(&mut self, face: Face) -> Result<(), GeometryError> {
        if face.indices.len() < 2 {
            return Err(GeometryError::TooFewVertices {
                count: face.indices.len(),
            });
        }
        let len = self.vertices.len();
        if let Some(&index) = face.indices.iter().find(|&&i| i >= len) {
            return Err(GeometryError::VertexOutOfRange { index, len });
        }
        self.faces.push(face);
        Ok(())
    }

    pub fn add_standard_face(&mut self, indices: &[usize]) -> Result<(), GeometryError> {
        self.add_face(Face::new(indices.to_vec(), FaceKind::Standard))
    }

    pub fn add_double_sided_face(&mut self, indices: &[usize]) -> Result<(), GeometryError> {
        self.add_face(Face::new(indices.to_vec(), FaceKind::DoubleSided))
    }

    pub fn add_tagged_face(&mut self, indices: &[usize], tag: &str) -> Result<(), GeometryError> {
        self.add_face(Face::new(
            indices.to_vec(),
            FaceKind::Tagged {
                tag: tag.to_string(),
            },
        ))
    }

    pub fn add_label_face(&mut self, indices: &[usize], label: LabelSpec) -> Result<(), GeometryError> {
        self.add_face(Face::new(indices.to_vec(), FaceKind::Label(label)))
    }

    // Factories in this crate only use constant, in-range indices.
    pub(crate) fn push_face(&mut self, indices: &[usize], kind: FaceKind) {
        debug_assert!(indices.iter().all(|&i| i < self.vertices.len()));
        self.faces.push(Face::new(indices.to_vec(), kind));
    }

    pub(crate) fn push_colored_face(&mut self, indices: &[usize], color: Color) {
        debug_assert!(indices.iter().all(|&i| i < self.vertices.len()));
        self.faces
            .push(Face::new(indices.to_vec(), FaceKind::Standard).with_color(color));
    }

    pub fn vertices(&self) -> &[Point3D] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn outline(&self) -> bool {
        self.outline
    }

    pub fn set_outline(&mut self, outline: bool) {
        self.outline = outline;
    }

    pub fn item_key(&self) -> Option<ItemKey> {
        self.item_key
    }

    pub fn set_item_key(&mut self, key: Option<ItemKey>) {
        self.item_key = key;
    }

    /// Color used for faces tagged `tag`.
    pub fn set_tag_color(&mut self, tag: &str, color: Color) {
        self.tag_colors.insert(tag.to_string(), color);
    }

    pub fn tag_color(&self, tag: &str) -> Option<Color> {
        self.tag_colors.get(tag).copied()
    }

    /// The fill color for one of this object's faces.
    ///
    /// Label faces are transparent. Tagged faces use the tag override when
    /// one is set, then the face's own color, then the object color.
    pub fn face_color(&self, face: &Face) -> Color {
        match &face.kind {
            FaceKind::Label(_) => Color::TRANSPARENT,
            FaceKind::Tagged { tag } => self
                .tag_color(tag)
                .or(face.color)
                .unwrap_or(self.color),
            FaceKind::Standard | FaceKind::DoubleSided => face.color.unwrap_or(self.color),
        }
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: Offset3D) {
        for v in &mut self.vertices {
            *v = Point3D::new(v.x + offset.dx, v.y + offset.dy, v.z + offset.dz);
        }
    }

    /// Vertex positions in eye space for `view`.
    pub fn calculate_eye_coordinates(&self, view: &ViewPoint3D) -> Vec<Point3D> {
        self.vertices.iter().map(|v| view.world_to_eye(v)).collect()
    }

    /// Vertex positions projected onto the screen plane at distance `d`.
    pub fn calculate_projected_points(&self, view: &ViewPoint3D, d: f64) -> Vec<Point2D> {
        self.vertices
            .iter()
            .map(|v| view.world_to_screen(v, d))
            .collect()
    }
}
