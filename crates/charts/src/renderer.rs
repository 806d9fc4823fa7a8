//! The category renderer contract and the strategies renderers share.

use std::fmt;

use chart3d_data::utils::{find_stacked_value_range, find_value_range, stack_sub_total};
use chart3d_data::{Range, Values3D};
use chart3d_graphics::object::LabelSpec;
use chart3d_graphics::object::primitives::create_label;
use chart3d_graphics::{Color, ItemKey, World};
use tracing::{debug, instrument};

use crate::error::ChartError;
use crate::label::ItemLabelGenerator;
use crate::scale::PlotContext;
use crate::LABEL_PARTITION;

/// The data cube as seen by a category renderer.
pub type CategoryData<'a> = dyn Values3D<Item = f64> + 'a;

// ─── Renderer trait ──────────────────────────────────────────────────────────

/// Turns the cells of a category dataset into world geometry.
pub trait CategoryRenderer3D {
    /// The value range the value axis needs to show every item, `None`
    /// when the dataset has no values at all.
    fn find_value_range(&self, data: &CategoryData<'_>) -> Option<Range>;

    /// Add the geometry for one cell. Empty cells add nothing.
    fn compose_item(
        &self,
        world: &mut World,
        ctx: &PlotContext,
        data: &CategoryData<'_>,
        series: usize,
        row: usize,
        column: usize,
    ) -> Result<(), ChartError>;

    /// Compose every cell, series outermost.
    #[instrument(skip_all)]
    fn compose(&self, world: &mut World, ctx: &PlotContext, data: &CategoryData<'_>) -> Result<(), ChartError> {
        let before = world.object_count();
        for series in 0..data.series_count() {
            for row in 0..data.row_count() {
                for column in 0..data.column_count() {
                    self.compose_item(world, ctx, data, series, row, column)?;
                }
            }
        }
        debug!(
            series = data.series_count(),
            rows = data.row_count(),
            columns = data.column_count(),
            objects = world.object_count() - before,
            "dataset composed"
        );
        Ok(())
    }
}

// ─── Value range strategies ──────────────────────────────────────────────────

/// How a renderer turns cell values into value-axis extents.
pub trait ValueRangeStrategy: fmt::Debug {
    /// Range covering every item, widened to include `base` when given.
    fn value_range(&self, data: &CategoryData<'_>, base: Option<f64>) -> Option<Range>;

    /// The `(start, end)` values an item spans, `start` being the end
    /// nearest the base. `None` for an empty cell.
    fn item_extent(&self, data: &CategoryData<'_>, base: f64, series: usize, row: usize, column: usize) -> Option<(f64, f64)>;
}

/// Every item spans from the base to its own value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlainRange;

impl ValueRangeStrategy for PlainRange {
    fn value_range(&self, data: &CategoryData<'_>, base: Option<f64>) -> Option<Range> {
        let range = find_value_range(data, base, true)?;
        if range.length() > 0.0 {
            return Some(range);
        }
        Range::new(range.min() - 0.5, range.max() + 0.5).ok()
    }

    fn item_extent(&self, data: &CategoryData<'_>, base: f64, series: usize, row: usize, column: usize) -> Option<(f64, f64)> {
        let value = data.double_value(series, row, column);
        (!value.is_nan()).then_some((base, value))
    }
}

/// Items stack on the series before them, positives upward from the base
/// and negatives downward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StackedRange;

impl ValueRangeStrategy for StackedRange {
    fn value_range(&self, data: &CategoryData<'_>, base: Option<f64>) -> Option<Range> {
        find_stacked_value_range(data, base.unwrap_or(0.0)).ok()
    }

    fn item_extent(&self, data: &CategoryData<'_>, base: f64, series: usize, row: usize, column: usize) -> Option<(f64, f64)> {
        let value = data.double_value(series, row, column);
        if value.is_nan() {
            return None;
        }
        let (neg, pos) = stack_sub_total(data, base, series, row, column);
        let lower = if value < 0.0 { neg } else { pos };
        Some((lower, lower + value))
    }
}

// ─── Item labels ─────────────────────────────────────────────────────────────

/// Text settings shared by renderers that label their items.
#[derive(Debug)]
pub struct ItemLabels {
    pub generator: Box<dyn ItemLabelGenerator>,
    pub color: Color,
    /// World-unit lift above the labelled point.
    pub offset: f64,
}

impl ItemLabels {
    pub fn new(generator: impl ItemLabelGenerator + 'static) -> Self {
        Self {
            generator: Box::new(generator),
            color: Color::BLACK,
            offset: 0.1,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Add a label for `item` at the world point, if the generator makes one.
    pub(crate) fn add(&self, world: &mut World, ctx: &PlotContext, item: ItemKey, value: f64, at: (f64, f64, f64)) {
        let Some(text) = self.generator.generate(&ctx.keys, item, value) else {
            return;
        };
        let (x, y, z) = at;
        let label = create_label(LabelSpec::new(text, self.color), x, y + self.offset, z).with_item_key(item);
        world.add_to_partition(LABEL_PARTITION, label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart3d_data::DefaultKeyedValues3D;

    fn stack() -> DefaultKeyedValues3D<&'static str, &'static str, &'static str, f64> {
        let mut cube = DefaultKeyedValues3D::new();
        cube.set_value("S1", "R", "C", Some(2.0));
        cube.set_value("S2", "R", "C", Some(-1.0));
        cube.set_value("S3", "R", "C", Some(3.0));
        cube.set_value("S4", "R", "C", None);
        cube
    }

    #[test]
    fn test_plain_extent_starts_at_base() {
        let cube = stack();
        assert_eq!(PlainRange.item_extent(&cube, 0.5, 1, 0, 0), Some((0.5, -1.0)));
        assert_eq!(PlainRange.item_extent(&cube, 0.0, 3, 0, 0), None);
        let r = PlainRange.value_range(&cube, Some(0.0)).unwrap();
        assert_eq!((r.min(), r.max()), (-1.0, 3.0));
    }

    #[test]
    fn test_plain_range_widens_a_single_value() {
        let mut cube = DefaultKeyedValues3D::<&str, &str, &str, f64>::new();
        cube.set_value("S", "R", "C", Some(4.0));
        let r = PlainRange.value_range(&cube, None).unwrap();
        assert_eq!((r.min(), r.max()), (3.5, 4.5));
    }

    #[test]
    fn test_stacked_extents() {
        let cube = stack();
        assert_eq!(StackedRange.item_extent(&cube, 0.0, 0, 0, 0), Some((0.0, 2.0)));
        assert_eq!(StackedRange.item_extent(&cube, 0.0, 1, 0, 0), Some((0.0, -1.0)));
        assert_eq!(StackedRange.item_extent(&cube, 0.0, 2, 0, 0), Some((2.0, 5.0)));
        let r = StackedRange.value_range(&cube, None).unwrap();
        assert_eq!((r.min(), r.max()), (-1.0, 5.0));
    }
}
