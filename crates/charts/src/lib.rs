//! Chart geometry composers.
//!
//! Each renderer turns one dataset into [`Object3D`](chart3d_graphics::Object3D)
//! geometry inside a [`World`](chart3d_graphics::World), laid out by a
//! [`PlotContext`] that maps category keys and values to world units.

pub mod area;
pub mod bar;
pub mod color_source;
pub mod error;
pub mod label;
pub mod line;
pub mod pie;
pub mod renderer;
pub mod scale;
pub mod scatter;

pub use area::{AreaConfig, AreaRenderer3D};
pub use bar::{BarConfig, BarRenderer3D};
pub use color_source::{ColorSource, StandardColorSource};
pub use error::ChartError;
pub use label::{ItemLabelGenerator, KeyLabels, StandardItemLabelGenerator};
pub use line::{LineConfig, LineRenderer3D};
pub use pie::{PieConfig, PieRenderer3D, Sweep};
pub use renderer::{CategoryData, CategoryRenderer3D, ItemLabels, PlainRange, StackedRange, ValueRangeStrategy};
pub use scale::{CategoryScale, PlotContext, ValueScale};
pub use scatter::{MarkerShape, ScatterConfig, ScatterXYZRenderer, XYZPlotContext};

/// Partition holding data geometry.
pub const DATA_PARTITION: &str = "data";

/// Partition holding item and section labels.
pub const LABEL_PARTITION: &str = "labels";
