//! Keyed data containers that feed chart geometry.
//!
//! The central abstraction is the data cube, [`values::Values3D`], mapping
//! `(series, row, column)` to an optional number. Keyed variants add lookup
//! by series/row/column key. Datasets wrap the containers and notify
//! subscribers after every mutation.

pub mod dataset;
pub mod error;
pub mod json;
pub mod keyed_values;
pub mod keyed_values2d;
pub mod keyed_values3d;
pub mod listener;
pub mod range;
pub mod utils;
pub mod values;
pub mod xyz;

pub use dataset::{DatasetChange, StandardCategoryDataset3D, StandardPieDataset3D};
pub use error::{DataError, KeyKind};
pub use keyed_values::DefaultKeyedValues;
pub use keyed_values2d::DefaultKeyedValues2D;
pub use keyed_values3d::DefaultKeyedValues3D;
pub use listener::{ChangeNotifier, SubscriptionId};
pub use range::Range;
pub use values::{DataKey, KeyedValues, KeyedValues2D, KeyedValues3D, Values, Values2D, Values3D};
pub use xyz::{XYZDataset, XYZItem, XYZSeries, XYZSeriesCollection};
