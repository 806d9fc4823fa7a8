//! Line charts drawn as thick 3D ribbons.
//!
//! Each data point owns the half of the line running to the midpoint of
//! each neighbour, so a point's geometry carries that point's item key.
//! Ends of the series and gaps around empty cells are closed with caps.

pub mod clip;

use chart3d_data::Range;
use chart3d_graphics::{Color, ItemKey, Object3D, World};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color_source::{ColorSource, StandardColorSource};
use crate::error::ChartError;
use crate::renderer::{CategoryData, CategoryRenderer3D, ItemLabels, PlainRange, ValueRangeStrategy};
use crate::scale::PlotContext;
use crate::DATA_PARTITION;

use clip::{Band, CLIP_TAG, clipped_segment, ribbon};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    /// Extent of the line along z, in world units.
    pub width: f64,
    /// Thickness of the line along y, in world units. Zero draws a flat
    /// ribbon.
    pub height: f64,
    /// Color of faces cut by the edge of the value axis.
    pub clip_color: Color,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            width: 0.4,
            height: 0.2,
            clip_color: Color::RED,
        }
    }
}

#[derive(Debug)]
pub struct LineRenderer3D {
    pub config: LineConfig,
    pub colors: Box<dyn ColorSource>,
    pub labels: Option<ItemLabels>,
}

impl Default for LineRenderer3D {
    fn default() -> Self {
        Self::new(LineConfig::default())
    }
}

struct Piece {
    from: (f64, f64),
    to: (f64, f64),
    open: bool,
    close: bool,
}

impl LineRenderer3D {
    pub fn new(config: LineConfig) -> Self {
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

    fn piece(&self, piece: &Piece, z: f64, window: (f64, f64), color: Color) -> Result<Option<Object3D>, ChartError> {
        if self.config.height == 0.0 {
            return ribbon(piece.from, piece.to, z, self.config.width, window, color);
        }
        let solid = clipped_segment(
            piece.from.0,
            piece.to.0,
            Band::around(piece.from.1, self.config.height),
            Band::around(piece.to.1, self.config.height),
            z,
            self.config.width,
            window,
            color,
            piece.open,
            piece.close,
        )?;
        Ok(solid.map(|mut s| {
            s.set_tag_color(CLIP_TAG, self.config.clip_color);
            s
        }))
    }
}

impl CategoryRenderer3D for LineRenderer3D {
    fn find_value_range(&self, data: &CategoryData<'_>) -> Option<Range> {
        PlainRange.value_range(data, None)
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
        if self.config.height < 0.0 || self.config.width <= 0.0 {
            return Err(ChartError::InvalidConfig {
                reason: format!("line size {} x {}", self.config.width, self.config.height),
            });
        }
        let point = (ctx.x(column), ctx.y(value));
        let neighbour = |c: usize| {
            let v = data.double_value(series, row, c);
            (!v.is_nan()).then(|| ((ctx.x(c) + point.0) / 2.0, (ctx.y(v) + point.1) / 2.0))
        };
        let prev = column.checked_sub(1).and_then(&neighbour);
        let next = (column + 1 < data.column_count()).then(|| neighbour(column + 1)).flatten();

        let mut pieces = Vec::with_capacity(2);
        if let Some(mid) = prev {
            pieces.push(Piece {
                from: mid,
                to: point,
                open: false,
                close: next.is_none(),
            });
        }
        if let Some(mid) = next {
            pieces.push(Piece {
                from: point,
                to: mid,
                open: prev.is_none(),
                close: false,
            });
        }
        if pieces.is_empty() {
            debug!(series, row, column, "isolated line point");
        }

        let item = ItemKey::new(series, row, column);
        let z = ctx.z(row);
        let window = ctx.value_window();
        let color = self.colors.color(series, row, column);
        for piece in &pieces {
            if let Some(solid) = self.piece(piece, z, window, color)? {
                world.add_to_partition(DATA_PARTITION, solid.with_item_key(item));
            }
        }
        if let Some(labels) = &self.labels {
            if point.1 >= window.0 && point.1 <= window.1 {
                labels.add(world, ctx, item, value, (point.0, point.1, z));
            }
        }
        Ok(())
    }
}
