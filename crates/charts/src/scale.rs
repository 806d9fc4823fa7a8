//! Mapping from category indices and data values to world coordinates.

use std::fmt::Display;

use chart3d_data::{KeyedValues3D, Range};
use chart3d_graphics::geometry::{Dimension3D, Offset3D};

use crate::error::ChartError;
use crate::label::KeyLabels;

// ─── Category axis ───────────────────────────────────────────────────────────

/// Evenly spaced categories across an axis.
///
/// The axis runs over `[0, 1]` with a margin at each end; categories share
/// the remaining space equally and sit at the centre of their slot. With
/// half-width ends the first or last category sits on the margin line
/// instead, which suits area and line charts.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryScale {
    count: usize,
    lower_margin: f64,
    upper_margin: f64,
    first_half_width: bool,
    last_half_width: bool,
}

impl CategoryScale {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            lower_margin: 0.05,
            upper_margin: 0.05,
            first_half_width: false,
            last_half_width: false,
        }
    }

    pub fn with_margins(mut self, lower: f64, upper: f64) -> Self {
        self.lower_margin = lower;
        self.upper_margin = upper;
        self
    }

    pub fn with_half_width_ends(mut self, first: bool, last: bool) -> Self {
        self.first_half_width = first;
        self.last_half_width = last;
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    fn available(&self) -> (f64, f64) {
        let start = self.lower_margin;
        (start, 1.0 - self.upper_margin - start)
    }

    /// Axis position (in `[0, 1]`) of category `index`, NaN if there is no
    /// such category.
    pub fn category_value(&self, index: usize) -> f64 {
        if index >= self.count {
            return f64::NAN;
        }
        let (start, available) = self.available();
        let mut slots = self.count as f64;
        if self.first_half_width {
            slots -= 0.5;
        }
        if self.last_half_width {
            slots -= 0.5;
        }
        let width = if slots > 0.0 { available / slots } else { 0.0 };
        let adjust = if self.first_half_width { 0.0 } else { 0.5 };
        start + (adjust + index as f64) * width
    }

    /// Width of one category slot in axis units.
    pub fn category_width(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.available().1 / self.count as f64
    }

    pub fn translate_to_world(&self, value: f64, length: f64) -> f64 {
        length * value
    }
}

// ─── Value axis ──────────────────────────────────────────────────────────────

/// Linear mapping of a value range onto an axis length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueScale {
    range: Range,
    inverted: bool,
}

impl ValueScale {
    pub fn new(range: Range) -> Self {
        Self {
            range,
            inverted: false,
        }
    }

    pub fn inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn translate_to_world(&self, value: f64, length: f64) -> f64 {
        let p = self.range.percent(value);
        if self.inverted {
            length * (1.0 - p)
        } else {
            length * p
        }
    }
}

// ─── Plot context ────────────────────────────────────────────────────────────

/// Everything a renderer needs to place one item: the plot box, the three
/// axes and the offset that positions the box in the world.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotContext {
    pub dimensions: Dimension3D,
    pub row_axis: CategoryScale,
    pub column_axis: CategoryScale,
    pub value_axis: ValueScale,
    pub offset: Offset3D,
    pub keys: KeyLabels,
}

impl PlotContext {
    /// A context whose plot box is centred on the origin.
    pub fn new(
        dimensions: Dimension3D,
        row_axis: CategoryScale,
        column_axis: CategoryScale,
        value_axis: ValueScale,
    ) -> Self {
        let offset = Offset3D::new(
            -dimensions.width / 2.0,
            -dimensions.height / 2.0,
            -dimensions.depth / 2.0,
        );
        Self {
            dimensions,
            row_axis,
            column_axis,
            value_axis,
            offset,
            keys: KeyLabels::default(),
        }
    }

    /// Axes sized to a keyed dataset, with the dataset's key labels.
    pub fn for_dataset<D>(data: &D, dimensions: Dimension3D, value_range: Range) -> Result<Self, ChartError>
    where
        D: KeyedValues3D + ?Sized,
        D::SeriesKey: Display,
        D::RowKey: Display,
        D::ColumnKey: Display,
    {
        if value_range.length() <= 0.0 || !value_range.length().is_finite() {
            return Err(ChartError::InvalidConfig {
                reason: format!("value range {value_range} has no usable length"),
            });
        }
        let mut ctx = Self::new(
            dimensions,
            CategoryScale::new(data.row_count()),
            CategoryScale::new(data.column_count()),
            ValueScale::new(value_range),
        );
        ctx.keys = KeyLabels::from_keyed(data);
        Ok(ctx)
    }

    pub fn with_offset(mut self, offset: Offset3D) -> Self {
        self.offset = offset;
        self
    }

    /// World x of a column's centre.
    pub fn x(&self, column: usize) -> f64 {
        let v = self.column_axis.category_value(column);
        self.column_axis.translate_to_world(v, self.dimensions.width) + self.offset.dx
    }

    /// World y of a data value.
    pub fn y(&self, value: f64) -> f64 {
        self.value_axis.translate_to_world(value, self.dimensions.height) + self.offset.dy
    }

    /// World z of a row's centre.
    pub fn z(&self, row: usize) -> f64 {
        let v = self.row_axis.category_value(row);
        self.row_axis.translate_to_world(v, self.dimensions.depth) + self.offset.dz
    }

    /// World width of `fraction` of a column slot.
    pub fn column_width(&self, fraction: f64) -> f64 {
        self.column_axis
            .translate_to_world(fraction * self.column_axis.category_width(), self.dimensions.width)
    }

    /// World depth of `fraction` of a row slot.
    pub fn row_width(&self, fraction: f64) -> f64 {
        self.row_axis
            .translate_to_world(fraction * self.row_axis.category_width(), self.dimensions.depth)
    }

    /// The visible value window `(wmin, wmax)` in world y, lower first.
    pub fn value_window(&self) -> (f64, f64) {
        let range = self.value_axis.range();
        let a = self.y(range.min());
        let b = self.y(range.max());
        (a.min(b), a.max(b))
    }
}
