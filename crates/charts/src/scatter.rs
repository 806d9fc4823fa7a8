use chart3d_data::utils::{find_x_range, find_y_range, find_z_range};
use chart3d_data::{Range, XYZDataset};
use chart3d_graphics::geometry::{Dimension3D, Offset3D};
use chart3d_graphics::object::primitives::{create_cube, create_dot, create_octahedron, create_sphere, create_tetrahedron};
use chart3d_graphics::{Color, ItemKey, Object3D, World};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::color_source::{ColorSource, StandardColorSource};
use crate::error::ChartError;
use crate::scale::ValueScale;
use crate::DATA_PARTITION;

// ─── Context ─────────────────────────────────────────────────────────────────

/// Three value axes spanning a plot box centred on the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct XYZPlotContext {
    pub dimensions: Dimension3D,
    pub x_axis: ValueScale,
    pub y_axis: ValueScale,
    pub z_axis: ValueScale,
    pub offset: Offset3D,
}

fn axis_range(range: Option<Range>) -> Result<Range, ChartError> {
    let range = range.ok_or_else(|| ChartError::InvalidConfig {
        reason: "dataset has no points".to_string(),
    })?;
    if range.length() > 0.0 {
        return Ok(range);
    }
    Ok(Range::new(range.min() - 0.5, range.max() + 0.5)?)
}

impl XYZPlotContext {
    pub fn new(dimensions: Dimension3D, x: Range, y: Range, z: Range) -> Self {
        Self {
            dimensions,
            x_axis: ValueScale::new(x),
            y_axis: ValueScale::new(y),
            z_axis: ValueScale::new(z),
            offset: Offset3D::new(
                -dimensions.width / 2.0,
                -dimensions.height / 2.0,
                -dimensions.depth / 2.0,
            ),
        }
    }

    /// Axes just wide enough for every point.
    pub fn for_dataset<D: XYZDataset + ?Sized>(data: &D, dimensions: Dimension3D) -> Result<Self, ChartError> {
        Ok(Self::new(
            dimensions,
            axis_range(find_x_range(data, None))?,
            axis_range(find_y_range(data, None))?,
            axis_range(find_z_range(data, None))?,
        ))
    }

    pub fn contains(&self, x: f64, y: f64, z: f64) -> bool {
        self.x_axis.range().contains(x) && self.y_axis.range().contains(y) && self.z_axis.range().contains(z)
    }

    pub fn world_point(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        (
            self.x_axis.translate_to_world(x, self.dimensions.width) + self.offset.dx,
            self.y_axis.translate_to_world(y, self.dimensions.height) + self.offset.dy,
            self.z_axis.translate_to_world(z, self.dimensions.depth) + self.offset.dz,
        )
    }
}

// ─── Renderer ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarkerShape {
    Cube,
    Octahedron,
    Tetrahedron,
    Sphere,
    /// A flat double-sided square.
    Dot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    /// Marker size in world units.
    pub size: f64,
    pub shape: MarkerShape,
    /// Bands of a sphere marker.
    pub sphere_bands: usize,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            size: 0.1,
            shape: MarkerShape::Cube,
            sphere_bands: 8,
        }
    }
}

/// Draws each XYZ point as a small solid. Points outside any axis range
/// are left out.
#[derive(Debug)]
pub struct ScatterXYZRenderer {
    pub config: ScatterConfig,
    pub colors: Box<dyn ColorSource>,
}

impl Default for ScatterXYZRenderer {
    fn default() -> Self {
        Self::new(ScatterConfig::default())
    }
}

impl ScatterXYZRenderer {
    pub fn new(config: ScatterConfig) -> Self {
        Self {
            config,
            colors: Box::new(StandardColorSource::default()),
        }
    }

    pub fn with_colors(mut self, colors: impl ColorSource + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    fn marker(&self, x: f64, y: f64, z: f64, color: Color) -> Object3D {
        let size = self.config.size;
        match self.config.shape {
            MarkerShape::Cube => create_cube(size, x, y, z, color),
            MarkerShape::Octahedron => create_octahedron(size / 2.0, x, y, z, color),
            MarkerShape::Tetrahedron => create_tetrahedron(size / 2.0, x, y, z, color),
            MarkerShape::Sphere => create_sphere(size / 2.0, self.config.sphere_bands, x, y, z, color, color),
            MarkerShape::Dot => create_dot(size, x, y, z, color),
        }
    }

    /// Add the marker for one point; returns whether it was drawn.
    pub fn compose_item<D: XYZDataset + ?Sized>(
        &self,
        world: &mut World,
        ctx: &XYZPlotContext,
        data: &D,
        series: usize,
        item: usize,
    ) -> bool {
        let (x, y, z) = (data.x(series, item), data.y(series, item), data.z(series, item));
        if !ctx.contains(x, y, z) {
            return false;
        }
        let (wx, wy, wz) = ctx.world_point(x, y, z);
        let marker = self
            .marker(wx, wy, wz, self.colors.color(series, 0, item))
            .with_item_key(ItemKey::new(series, 0, item));
        world.add_to_partition(DATA_PARTITION, marker);
        true
    }

    #[instrument(skip_all)]
    pub fn compose<D: XYZDataset + ?Sized>(&self, world: &mut World, ctx: &XYZPlotContext, data: &D) -> Result<(), ChartError> {
        if self.config.size <= 0.0 {
            return Err(ChartError::InvalidConfig {
                reason: format!("marker size {}", self.config.size),
            });
        }
        let mut skipped = 0;
        for series in 0..data.series_count() {
            for item in 0..data.item_count(series) {
                if !self.compose_item(world, ctx, data, series, item) {
                    skipped += 1;
                }
            }
        }
        debug!(skipped, "scatter composed");
        Ok(())
    }
}
