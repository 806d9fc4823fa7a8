use chart3d_data::Range;
use chart3d_graphics::object::primitives::create_bar;
use chart3d_graphics::{Color, ItemKey, World};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color_source::{ColorSource, StandardColorSource};
use crate::error::ChartError;
use crate::renderer::{CategoryData, CategoryRenderer3D, ItemLabels, PlainRange, StackedRange, ValueRangeStrategy};
use crate::scale::PlotContext;
use crate::DATA_PARTITION;

/// Bar sizing and highlight colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    /// Value the bars grow from.
    pub base: f64,
    /// Bar width as a fraction of a column slot.
    pub x_width: f64,
    /// Bar depth as a fraction of a row slot.
    pub z_width: f64,
    /// Painted on the base end when the base lies outside the value axis.
    pub base_color: Option<Color>,
    /// Painted on the value end when the value lies outside the value axis.
    pub top_color: Option<Color>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            base: 0.0,
            x_width: 0.8,
            z_width: 0.5,
            base_color: None,
            top_color: None,
        }
    }
}

/// Draws each cell as a box from the base (or its stack position) to its
/// value.
#[derive(Debug)]
pub struct BarRenderer3D {
    pub config: BarConfig,
    pub colors: Box<dyn ColorSource>,
    pub labels: Option<ItemLabels>,
    strategy: Box<dyn ValueRangeStrategy>,
}

impl Default for BarRenderer3D {
    fn default() -> Self {
        Self::new(BarConfig::default())
    }
}

impl BarRenderer3D {
    /// One bar per cell, placed at its row and column. Series share a
    /// cell's slot, so grouped data is expected to put each series on its
    /// own row.
    pub fn new(config: BarConfig) -> Self {
        Self {
            config,
            colors: Box::new(StandardColorSource::default()),
            labels: None,
            strategy: Box::new(PlainRange),
        }
    }

    /// Bars stacked across series.
    pub fn stacked(config: BarConfig) -> Self {
        Self {
            strategy: Box::new(StackedRange),
            ..Self::new(config)
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

impl CategoryRenderer3D for BarRenderer3D {
    fn find_value_range(&self, data: &CategoryData<'_>) -> Option<Range> {
        self.strategy.value_range(data, Some(self.config.base))
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
        let Some((start, end)) = self.strategy.item_extent(data, self.config.base, series, row, column) else {
            return Ok(());
        };
        let range = ctx.value_axis.range();
        if !range.intersects(start.min(end), start.max(end)) {
            debug!(series, row, column, "bar outside value range");
            return Ok(());
        }
        let lower = range.peg(start);
        let upper = range.peg(end);
        if lower == upper && start != end {
            return Ok(());
        }
        let base_color = self.config.base_color.filter(|_| lower != start);
        let top_color = self.config.top_color.filter(|_| upper != end);

        let x = ctx.x(column);
        let z = ctx.z(row);
        let y = ctx.y(upper);
        let item = ItemKey::new(series, row, column);
        let bar = create_bar(
            ctx.column_width(self.config.x_width),
            ctx.row_width(self.config.z_width),
            x,
            y,
            z,
            ctx.y(lower),
            self.colors.color(series, row, column),
            base_color,
            top_color,
            ctx.value_axis.is_inverted(),
        )
        .with_item_key(item);
        world.add_to_partition(DATA_PARTITION, bar);

        if let Some(labels) = &self.labels {
            labels.add(world, ctx, item, data.double_value(series, row, column), (x, y, z));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::StandardItemLabelGenerator;
    use crate::LABEL_PARTITION;
    use chart3d_data::StandardCategoryDataset3D;
    use chart3d_graphics::geometry::Dimension3D;

    fn dataset() -> StandardCategoryDataset3D<&'static str, &'static str, &'static str> {
        let mut data = StandardCategoryDataset3D::new();
        data.add_value(2.0, "S1", "R1", "C1");
        data.add_value(-1.0, "S2", "R1", "C1");
        data.add_value(3.0, "S3", "R1", "C1");
        data.add_value(4.0, "S1", "R1", "C2");
        data
    }

    fn context(data: &StandardCategoryDataset3D<&str, &str, &str>, range: Range) -> PlotContext {
        PlotContext::for_dataset(data, Dimension3D::new(10.0, 10.0, 2.0), range).unwrap()
    }

    fn ys(world: &World) -> Vec<(f64, f64)> {
        world
            .partition(DATA_PARTITION)
            .map(|(_, o)| {
                let y = o.vertices().iter().map(|p| p.y);
                (y.clone().fold(f64::INFINITY, f64::min), y.fold(f64::NEG_INFINITY, f64::max))
            })
            .collect()
    }

    #[test]
    fn test_grouped_bars_skip_empty_cells() {
        let data = dataset();
        let renderer = BarRenderer3D::default();
        let range = renderer.find_value_range(&data).unwrap();
        assert_eq!((range.min(), range.max()), (-1.0, 4.0));
        let ctx = context(&data, range);
        let mut world = World::new();
        renderer.compose(&mut world, &ctx, &data).unwrap();
        // 3 series x 1 row x 2 columns, two cells empty
        assert_eq!(world.partition(DATA_PARTITION).count(), 4);
        for (_, bar) in world.partition(DATA_PARTITION) {
            assert_eq!(bar.vertex_count(), 8);
            assert!(bar.item_key().is_some());
        }
    }

    #[test]
    fn test_series_share_a_cell_slot() {
        let mut data = StandardCategoryDataset3D::new();
        data.add_value(2.0, "S1", "R1", "C1");
        data.add_value(3.0, "S2", "R1", "C1");
        data.add_value(4.0, "S2", "R2", "C1");
        let renderer = BarRenderer3D::default();
        let ctx = context(&data, renderer.find_value_range(&data).unwrap());
        let mut world = World::new();
        renderer.compose(&mut world, &ctx, &data).unwrap();
        let centres: Vec<(f64, f64)> = world
            .partition(DATA_PARTITION)
            .map(|(_, o)| {
                let n = o.vertex_count() as f64;
                let (x, z) = o.vertices().iter().fold((0.0, 0.0), |(x, z), p| (x + p.x, z + p.z));
                (x / n, z / n)
            })
            .collect();
        assert_eq!(centres.len(), 3);
        for (x, _) in &centres {
            assert!((x - ctx.x(0)).abs() < 1e-9);
        }
        assert!((centres[0].1 - ctx.z(0)).abs() < 1e-9);
        assert!((centres[1].1 - ctx.z(0)).abs() < 1e-9);
        assert!((centres[2].1 - ctx.z(1)).abs() < 1e-9);
    }

    #[test]
    fn test_stacked_bars_sit_on_each_other() {
        let data = dataset();
        let renderer = BarRenderer3D::stacked(BarConfig::default());
        let range = renderer.find_value_range(&data).unwrap();
        assert_eq!((range.min(), range.max()), (-1.0, 5.0));
        let ctx = context(&data, range);
        let mut world = World::new();
        renderer.compose(&mut world, &ctx, &data).unwrap();
        let spans = ys(&world);
        let zero = ctx.y(0.0);
        assert!((spans[0].0 - zero).abs() < 1e-9 && (spans[0].1 - ctx.y(2.0)).abs() < 1e-9);
        assert!((spans[2].0 - ctx.y(-1.0)).abs() < 1e-9 && (spans[2].1 - zero).abs() < 1e-9);
        assert!((spans[3].0 - ctx.y(2.0)).abs() < 1e-9 && (spans[3].1 - ctx.y(5.0)).abs() < 1e-9);
    }

    #[test]
    fn test_bars_are_pegged_to_the_axis() {
        let data = dataset();
        let config = BarConfig {
            top_color: Some(Color::RED),
            ..BarConfig::default()
        };
        let renderer = BarRenderer3D::new(config);
        let ctx = context(&data, Range::new(0.0, 2.5).unwrap());
        let mut world = World::new();
        renderer.compose(&mut world, &ctx, &data).unwrap();
        // the negative bar lies wholly below the axis and is dropped
        assert_eq!(world.partition(DATA_PARTITION).count(), 3);
        let top = ctx.y(2.5);
        for (lo, hi) in ys(&world) {
            assert!(lo >= ctx.y(0.0) - 1e-9);
            assert!(hi <= top + 1e-9);
        }
        let red_faces: usize = world
            .partition(DATA_PARTITION)
            .map(|(_, o)| o.faces().iter().filter(|f| f.color() == Some(Color::RED)).count())
            .sum();
        assert_eq!(red_faces, 2);
    }

    #[test]
    fn test_labels_go_to_the_label_partition() {
        let data = dataset();
        let renderer = BarRenderer3D::default().with_labels(ItemLabels::new(StandardItemLabelGenerator::default()));
        let ctx = context(&data, renderer.find_value_range(&data).unwrap());
        let mut world = World::new();
        renderer.compose(&mut world, &ctx, &data).unwrap();
        assert_eq!(world.partition(LABEL_PARTITION).count(), 4);
    }
}
