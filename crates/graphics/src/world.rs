//! The scene: objects grouped into named partitions, plus the light.

use serde::{Deserialize, Serialize};
use slotmap::{SlotMap, new_key_type};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

use crate::color::Color;
use crate::error::GeometryError;
use crate::geometry::dimension::Dimension3D;
use crate::geometry::point::{Point2D, Point3D};
use crate::object::{Face, ItemKey, Object3D};
use crate::view::ViewPoint3D;

// ─── Keys ────────────────────────────────────────────────────────────────────

new_key_type! {
    pub struct ObjectId;
}

// ─── World ───────────────────────────────────────────────────────────────────

/// Objects stored in an arena and grouped into named partitions.
///
/// A partition lets one group of geometry (axis furniture, data items) be
/// cleared and rebuilt without touching the others. The default partition
/// always exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    objects: SlotMap<ObjectId, Object3D>,
    partitions: BTreeMap<String, Vec<ObjectId>>,
    sun: Point3D,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub const DEFAULT_PARTITION: &'static str = "default";

    pub fn new() -> Self {
        let mut partitions = BTreeMap::new();
        partitions.insert(Self::DEFAULT_PARTITION.to_string(), Vec::new());
        let d = 1.0 / 3.0_f64.sqrt();
        Self {
            objects: SlotMap::with_key(),
            partitions,
            sun: Point3D::new(-d, -d, d),
        }
    }

    /// Add an object to the default partition.
    pub fn add(&mut self, object: Object3D) -> ObjectId {
        self.add_to_partition(Self::DEFAULT_PARTITION, object)
    }

    /// Add an object to a named partition, creating it if needed.
    pub fn add_to_partition(&mut self, partition: &str, object: Object3D) -> ObjectId {
        let id = self.objects.insert(object);
        self.partitions
            .entry(partition.to_string())
            .or_default()
            .push(id);
        id
    }

    pub fn add_all(&mut self, partition: &str, objects: impl IntoIterator<Item = Object3D>) -> Vec<ObjectId> {
        objects
            .into_iter()
            .map(|o| self.add_to_partition(partition, o))
            .collect()
    }

    /// Remove one object from whichever partition holds it.
    pub fn remove(&mut self, id: ObjectId) -> Result<Object3D, GeometryError> {
        let object = self.objects.remove(id).ok_or(GeometryError::UnknownObject)?;
        for ids in self.partitions.values_mut() {
            ids.retain(|&other| other != id);
        }
        Ok(object)
    }

    pub fn object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    /// Objects of one partition, in insertion order.
    pub fn partition(&self, name: &str) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.partitions
            .get(name)
            .into_iter()
            .flatten()
            .filter_map(|&id| self.objects.get(id).map(|o| (id, o)))
    }

    pub fn partition_names(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }

    /// Drop every object in one partition. The default partition is emptied
    /// but kept; other partitions are removed.
    pub fn clear_partition(&mut self, name: &str) {
        let ids = if name == Self::DEFAULT_PARTITION {
            self.partitions
                .get_mut(name)
                .map(std::mem::take)
                .unwrap_or_default()
        } else {
            self.partitions.remove(name).unwrap_or_default()
        };
        for id in ids {
            self.objects.remove(id);
        }
    }

    /// Remove all objects and all partitions except the (empty) default.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.partitions.clear();
        self.partitions
            .insert(Self::DEFAULT_PARTITION.to_string(), Vec::new());
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.objects.values().map(Object3D::vertex_count).sum()
    }

    pub fn face_count(&self) -> usize {
        self.objects.values().map(Object3D::face_count).sum()
    }

    /// Unit vector pointing towards the light, in eye space.
    pub fn sun(&self) -> Point3D {
        self.sun
    }

    /// Set the light direction; it is normalized on the way in.
    pub fn set_sun_source(&mut self, direction: Point3D) -> Result<(), GeometryError> {
        self.sun = direction.normalize()?;
        Ok(())
    }

    /// Size of the axis-aligned box holding every vertex.
    pub fn bounds(&self) -> Result<Dimension3D, GeometryError> {
        let mut vertices = self.objects.values().flat_map(|o| o.vertices().iter());
        let first = vertices.next().ok_or(GeometryError::EmptyWorld)?;
        let (mut min, mut max) = (*first, *first);
        for v in vertices {
            min = Point3D::new(min.x.min(v.x), min.y.min(v.y), min.z.min(v.z));
            max = Point3D::new(max.x.max(v.x), max.y.max(v.y), max.z.max(v.z));
        }
        Ok(Dimension3D::new(max.x - min.x, max.y - min.y, max.z - min.z))
    }

    /// Iterate objects partition by partition, insertion order within each.
    fn ordered(&self) -> impl Iterator<Item = (ObjectId, &Object3D)> {
        self.partitions
            .values()
            .flatten()
            .filter_map(|&id| self.objects.get(id).map(|o| (id, o)))
    }

    /// Build this frame's flat vertex buffer and re-index every face into it.
    #[instrument(skip(self))]
    pub fn flatten(&self) -> Scene {
        let mut vertices = Vec::with_capacity(self.vertex_count());
        let mut faces = Vec::with_capacity(self.face_count());
        for (id, object) in self.ordered() {
            let base = vertices.len();
            vertices.extend_from_slice(object.vertices());
            for face in object.faces() {
                faces.push(SceneFace {
                    face: Face::new(face.offset_by(base), face.kind().clone()),
                    color: object.face_color(face),
                    outline: object.outline(),
                    object: id,
                    item_key: object.item_key(),
                });
            }
        }
        debug!(vertices = vertices.len(), faces = faces.len(), "world flattened");
        Scene { vertices, faces }
    }

    /// Eye coordinates of every vertex, in [`World::flatten`] order.
    pub fn calculate_eye_coordinates(&self, view: &ViewPoint3D) -> Vec<Point3D> {
        self.ordered()
            .flat_map(|(_, o)| o.calculate_eye_coordinates(view))
            .collect()
    }

    /// Projected screen points of every vertex, in [`World::flatten`] order.
    pub fn calculate_projected_points(&self, view: &ViewPoint3D, d: f64) -> Vec<Point2D> {
        self.ordered()
            .flat_map(|(_, o)| o.calculate_projected_points(view, d))
            .collect()
    }
}

// ─── Flattened Scene ─────────────────────────────────────────────────────────

/// A face re-indexed into the scene's global vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFace {
    pub face: Face,
    pub color: Color,
    pub outline: bool,
    pub object: ObjectId,
    pub item_key: Option<ItemKey>,
}

/// The per-frame arena: all vertices of a world plus faces with global
/// indices. Rebuilt on every draw; objects are never re-indexed in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub vertices: Vec<Point3D>,
    pub faces: Vec<SceneFace>,
}
