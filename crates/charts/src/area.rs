use chart3d_data::Range;
use chart3d_graphics::object::{Face, FaceKind};
use chart3d_graphics::{Color, ItemKey, Object3D, World};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color_source::{ColorSource, StandardColorSource};
use crate::error::ChartError;
use crate::renderer::{CategoryData, CategoryRenderer3D, ItemLabels, PlainRange, ValueRangeStrategy};
use crate::scale::PlotContext;
use crate::DATA_PARTITION;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaConfig {
    /// Value the area is filled down (or up) to.
    pub base: f64,
    /// Thickness of the area along z, in world units.
    pub depth: f64,
    /// Color of the face lying on the base.
    pub base_color: Color,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            base: 0.0,
            depth: 0.6,
            base_color: Color::GRAY,
        }
    }
}

/// Fills each series row between the value line and the base as a slab,
/// one prism per pair of neighbouring columns.
#[derive(Debug)]
pub struct AreaRenderer3D {
    pub config: AreaConfig,
    pub colors: Box<dyn ColorSource>,
    pub labels: Option<ItemLabels>,
}

impl Default for AreaRenderer3D {
    fn default() -> Self {
        Self::new(AreaConfig::default())
    }
}

impl AreaRenderer3D {
    pub fn new(config: AreaConfig) -> Self {
        Self {
            config,
            colors: Box::new(StandardColorSource::default()),
            labels: None,
        }
    }

    pub fn with_colors(mut self, colors: impl ColorSource + 'static) -> Self {
        self.colors = Box::new(colors);
        self
    }

    pub fn with_labels(mut self, labels: ItemLabels) -> Self {
        self.labels = Some(labels);
        self
    }
}

impl CategoryRenderer3D for AreaRenderer3D {
    fn find_value_range(&self, data: &CategoryData<'_>) -> Option<Range> {
        PlainRange.value_range(data, Some(self.config.base))
    }

    fn compose_item(
        &self,
        world: &mut World,
        ctx: &PlotContext,
        data: &CategoryData<'_>,
        series: usize,
        row: usize,
        column: usize,
    ) -> Result<(), ChartError> {
        let value = data.double_value(series, row, column);
        if value.is_nan() {
            return Ok(());
        }
        let item = ItemKey::new(series, row, column);
        let (x0, y0, z) = (ctx.x(column), ctx.y(value), ctx.z(row));
        if let Some(labels) = &self.labels {
            labels.add(world, ctx, item, value, (x0, y0, z));
        }

        // the last column only closes the slab started by its neighbour
        let count = data.column_count();
        if column + 1 >= count {
            return Ok(());
        }
        let next = data.double_value(series, row, column + 1);
        if next.is_nan() {
            debug!(series, row, column, "area gap");
            return Ok(());
        }
        let opens = column == 0 || data.double_value(series, row, column - 1).is_nan();
        let closes = column + 2 >= count || data.double_value(series, row, column + 2).is_nan();

        let (x1, y1) = (ctx.x(column + 1), ctx.y(next));
        let zero = ctx.y(self.config.base);
        let d = self.config.depth / 2.0;

        let mut slab = Object3D::new(self.colors.color(series, row, column)).with_item_key(item);
        slab.add_vertex_xyz(x0, y0, z - d);
        slab.add_vertex_xyz(x0, y0, z + d);
        slab.add_vertex_xyz(x1, y1, z + d);
        slab.add_vertex_xyz(x1, y1, z - d);
        slab.add_vertex_xyz(x1, zero, z - d);
        slab.add_vertex_xyz(x1, zero, z + d);
        slab.add_vertex_xyz(x0, zero, z + d);
        slab.add_vertex_xyz(x0, zero, z - d);

        let mut faces = vec![[0, 1, 2, 3], [0, 3, 4, 7], [6, 5, 2, 1]];
        if opens {
            faces.push([0, 7, 6, 1]);
        }
        if closes {
            faces.push([5, 4, 3, 2]);
        }
        let bottom = [5, 6, 7, 4];

        // windings above are outward for values above the base
        let below = y0 < zero && y1 < zero;
        let crosses = !below && (y0 < zero || y1 < zero);
        let kind = if crosses {
            FaceKind::DoubleSided
        } else {
            FaceKind::Standard
        };
        let oriented = |mut f: [usize; 4]| {
            if below {
                f.reverse();
            }
            f.to_vec()
        };
        for f in faces {
            slab.add_face(Face::new(oriented(f), kind.clone()))?;
        }
        slab.add_face(Face::new(oriented(bottom), kind).with_color(self.config.base_color))?;
        world.add_to_partition(DATA_PARTITION, slab);
        Ok(())
    }
}
